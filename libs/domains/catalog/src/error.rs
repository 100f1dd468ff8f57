use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Subcategory not found: {0}")]
    SubCategoryNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Image not found: {0}")]
    ImageNotFound(Uuid),

    #[error("Attribute not found: {0}")]
    AttributeNotFound(Uuid),

    #[error("Attribute value not found: {0}")]
    AttributeValueNotFound(Uuid),

    #[error("Comment not found: {0}")]
    CommentNotFound(Uuid),

    #[error("Slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Cache error: {0}")]
    Cache(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CatalogError::SubCategoryNotFound(id) => {
                AppError::NotFound(format!("Subcategory {} not found", id))
            }
            CatalogError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CatalogError::ImageNotFound(id) => {
                AppError::NotFound(format!("Image {} not found", id))
            }
            CatalogError::AttributeNotFound(id) => {
                AppError::NotFound(format!("Attribute {} not found", id))
            }
            CatalogError::AttributeValueNotFound(id) => {
                AppError::NotFound(format!("Attribute value {} not found", id))
            }
            CatalogError::CommentNotFound(id) => {
                AppError::NotFound(format!("Comment {} not found", id))
            }
            CatalogError::DuplicateSlug(slug) => {
                AppError::Conflict(format!("Slug '{}' already exists", slug))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Database(e) => AppError::Database(e),
            CatalogError::Cache(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<redis::RedisError> for CatalogError {
    fn from(err: redis::RedisError) -> Self {
        CatalogError::Cache(err.to_string())
    }
}
