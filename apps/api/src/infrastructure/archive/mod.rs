pub mod submission_log;
