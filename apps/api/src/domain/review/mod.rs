pub mod entity;
pub mod rating;

pub use entity::{ArtworkResponse, RatingTally, ResponseCollection};
pub use rating::Rating;
