use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{
    Attribute, AttributePair, AttributeValue, Category, CategoryFilter, Comment, CommentFilter,
    CommentResponse, Image, Product, ProductDetail, ProductFilter, SubCategory, SubCategoryFilter,
};

/// Repository trait for catalog persistence.
///
/// Slugs are computed by the service layer; the repository only stores
/// and queries them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ===== Categories =====

    async fn create_category(&self, category: Category) -> CatalogResult<Category>;

    async fn get_category(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn list_categories(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>>;

    async fn update_category(&self, category: Category) -> CatalogResult<Category>;

    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool>;

    /// Check slug uniqueness, optionally ignoring one row (for updates)
    async fn category_slug_exists(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> CatalogResult<bool>;

    async fn subcategory_count(&self, category_id: Uuid) -> CatalogResult<u64>;

    // ===== Subcategories =====

    async fn create_subcategory(&self, subcategory: SubCategory) -> CatalogResult<SubCategory>;

    async fn get_subcategory(&self, id: Uuid) -> CatalogResult<Option<SubCategory>>;

    async fn list_subcategories(
        &self,
        filter: SubCategoryFilter,
    ) -> CatalogResult<Vec<SubCategory>>;

    async fn update_subcategory(&self, subcategory: SubCategory) -> CatalogResult<SubCategory>;

    async fn delete_subcategory(&self, id: Uuid) -> CatalogResult<bool>;

    async fn subcategory_slug_exists(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> CatalogResult<bool>;

    // ===== Products =====

    async fn create_product(&self, product: Product) -> CatalogResult<Product>;

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// Expanded representation with nested images, attribute pairs, and
    /// comments
    async fn get_product_detail(&self, id: Uuid) -> CatalogResult<Option<ProductDetail>>;

    async fn list_products(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>>;

    async fn update_product(&self, product: Product) -> CatalogResult<Product>;

    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool>;

    async fn product_slug_exists(&self, slug: &str, exclude: Option<Uuid>)
    -> CatalogResult<bool>;

    // ===== Images =====

    async fn add_image(&self, image: Image) -> CatalogResult<Image>;

    async fn delete_image(&self, id: Uuid) -> CatalogResult<bool>;

    // ===== Attributes =====

    async fn create_attribute(&self, name: String) -> CatalogResult<Attribute>;

    async fn create_attribute_value(&self, value: String) -> CatalogResult<AttributeValue>;

    async fn get_attribute(&self, id: Uuid) -> CatalogResult<Option<Attribute>>;

    async fn get_attribute_value(&self, id: Uuid) -> CatalogResult<Option<AttributeValue>>;

    /// Link an attribute/value pair to a product
    async fn assign_product_attribute(
        &self,
        product_id: Uuid,
        attribute_id: Uuid,
        attribute_value_id: Uuid,
    ) -> CatalogResult<AttributePair>;

    // ===== Comments =====

    async fn create_comment(&self, comment: Comment) -> CatalogResult<Comment>;

    async fn get_comment(&self, id: Uuid) -> CatalogResult<Option<Comment>>;

    async fn list_comments(&self, filter: CommentFilter) -> CatalogResult<Vec<CommentResponse>>;

    async fn update_comment(&self, comment: Comment) -> CatalogResult<Comment>;

    async fn delete_comment(&self, id: Uuid) -> CatalogResult<bool>;

    /// All ratings currently attached to a product
    async fn comment_ratings(&self, product_id: Uuid) -> CatalogResult<Vec<i32>>;

    /// Persist a recomputed product rating
    async fn set_product_rating(&self, product_id: Uuid, rating: f64) -> CatalogResult<()>;
}
