use crate::{
    application::browse_catalog::{
        dto::{CatalogResponse, CategoryView},
        use_case::BrowseCatalogUseCase,
    },
    presentation::http::errors::AppError,
};
use axum::{Json, extract::Path};

pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(BrowseCatalogUseCase::list())
}

pub async fn get_category(Path(slug): Path<String>) -> Result<Json<CategoryView>, AppError> {
    BrowseCatalogUseCase::category(&slug)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("category {}", slug)))
}
