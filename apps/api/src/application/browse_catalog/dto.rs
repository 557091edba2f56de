use crate::domain::catalog::Category;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryView {
    pub slug: String,
    pub title: String,
    pub color: String,
    pub description: String,
    pub image_ids: Vec<String>,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            slug: category.slug.to_string(),
            title: category.title.to_string(),
            color: category.color.to_string(),
            description: category.description.to_string(),
            image_ids: category.artwork_ids(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogResponse {
    pub categories: Vec<CategoryView>,
    pub total_images: usize,
}
