pub mod catalog;
pub mod review;
pub mod shared;
pub mod submission;
