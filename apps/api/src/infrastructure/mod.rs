pub mod archive;
pub mod mail;
pub mod storage;
