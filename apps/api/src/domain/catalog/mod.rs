pub mod entity;

pub use entity::{CATEGORIES, Category, FALLBACK_CATEGORY, category_title, find_by_artwork, find_by_slug};
