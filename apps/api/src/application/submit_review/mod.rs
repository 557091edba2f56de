pub mod assembler;
pub mod backup;
pub mod csv_report;
pub mod dto;
pub mod notification;
pub mod use_case;
