use super::dto::{CatalogResponse, CategoryView};
use crate::domain::catalog::{CATEGORIES, find_by_slug};

/// Read-only view of the artwork catalog, in display order.
pub struct BrowseCatalogUseCase;

impl BrowseCatalogUseCase {
    pub fn list() -> CatalogResponse {
        let categories: Vec<CategoryView> = CATEGORIES.iter().map(CategoryView::from).collect();
        let total_images = categories.iter().map(|c| c.image_ids.len()).sum();
        CatalogResponse {
            categories,
            total_images,
        }
    }

    pub fn category(slug: &str) -> Option<CategoryView> {
        find_by_slug(slug).map(CategoryView::from)
    }
}
