pub mod entity;
pub mod errors;

pub use entity::{DecodedImage, Submission, UploadOutcome, UploadedImage, reviewer_slug};
pub use errors::SubmissionError;
