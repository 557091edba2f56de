pub mod browse_catalog;
pub mod submit_review;
