//! Catalog Domain
//!
//! Categories, subcategories, products, product images and attributes,
//! and customer comments with aggregate product ratings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, slugs, rating aggregation, caching
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! Product ratings are recomputed from scratch on every comment create
//! and delete: the mean of all ratings attached to the product, or 0
//! when none remain. List and detail reads go through a fixed-TTL redis
//! cache when one is configured.

pub mod cache;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod slug;

// Re-export commonly used types
pub use cache::CatalogCache;
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    Category, CategoryFilter, CategoryResponse, Comment, CommentFilter, CommentResponse,
    CreateCategory, CreateComment, CreateProduct, CreateSubCategory, Product, ProductDetail,
    ProductFilter, SubCategory, SubCategoryFilter, UpdateCategory, UpdateComment, UpdateProduct,
    UpdateSubCategory,
};
pub use postgres::PgCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
