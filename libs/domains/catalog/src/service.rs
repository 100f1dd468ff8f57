//! Catalog service - business logic layer.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::cache::CatalogCache;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    AssignAttribute, Attribute, AttributePair, AttributeValue, Category, CategoryFilter,
    CategoryResponse, Comment, CommentFilter, CommentResponse, CreateAttribute,
    CreateAttributeValue, CreateCategory, CreateComment, CreateImage, CreateProduct,
    CreateSubCategory, Image, Product, ProductDetail, ProductFilter, SubCategory,
    SubCategoryFilter, UpdateCategory, UpdateComment, UpdateProduct, UpdateSubCategory,
};
use crate::repository::CatalogRepository;

/// Catalog service providing business logic operations.
///
/// Handles validation, slug uniqueness, rating aggregation, and the
/// fixed-TTL read cache; persistence goes through the repository.
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
    cache: Option<CatalogCache>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: None,
        }
    }

    /// Attach a redis read cache for list/detail responses.
    pub fn with_cache(mut self, cache: CatalogCache) -> Self {
        self.cache = Some(cache);
        self
    }

    // ===== Categories =====

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let category = Category::new(input);

        if self
            .repository
            .category_slug_exists(&category.slug, None)
            .await?
        {
            return Err(CatalogError::DuplicateSlug(category.slug));
        }

        self.repository.create_category(category).await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CatalogResult<CategoryResponse> {
        let key = format!("categories:{}", id);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<CategoryResponse>(&key).await {
                return Ok(hit);
            }
        }

        let category = self
            .repository
            .get_category(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        let response = self.category_response(category).await?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &response).await;
        }

        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        filter: CategoryFilter,
    ) -> CatalogResult<Vec<CategoryResponse>> {
        let key = format!(
            "categories:list:{}:{}",
            filter.search.as_deref().unwrap_or(""),
            filter.ordering.as_deref().unwrap_or("")
        );
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<Vec<CategoryResponse>>(&key).await {
                return Ok(hit);
            }
        }

        let categories = self.repository.list_categories(filter).await?;

        let mut responses = Vec::with_capacity(categories.len());
        for category in categories {
            responses.push(self.category_response(category).await?);
        }

        if let Some(cache) = &self.cache {
            cache.put(&key, &responses).await;
        }

        Ok(responses)
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut category = self
            .repository
            .get_category(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        category.apply_update(input);

        if self
            .repository
            .category_slug_exists(&category.slug, Some(id))
            .await?
        {
            return Err(CatalogError::DuplicateSlug(category.slug));
        }

        self.repository.update_category(category).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_category(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }

    async fn category_response(&self, category: Category) -> CatalogResult<CategoryResponse> {
        let subcategory_count = self.repository.subcategory_count(category.id).await?;
        Ok(CategoryResponse {
            id: category.id,
            name: category.name,
            image: category.image,
            slug: category.slug,
            subcategory_count,
            created_at: category.created_at,
        })
    }

    // ===== Subcategories =====

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_subcategory(
        &self,
        input: CreateSubCategory,
    ) -> CatalogResult<SubCategory> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if self
            .repository
            .get_category(input.category_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::CategoryNotFound(input.category_id));
        }

        let subcategory = SubCategory::new(input);

        if self
            .repository
            .subcategory_slug_exists(&subcategory.slug, None)
            .await?
        {
            return Err(CatalogError::DuplicateSlug(subcategory.slug));
        }

        self.repository.create_subcategory(subcategory).await
    }

    #[instrument(skip(self))]
    pub async fn get_subcategory(&self, id: Uuid) -> CatalogResult<SubCategory> {
        self.repository
            .get_subcategory(id)
            .await?
            .ok_or(CatalogError::SubCategoryNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_subcategories(
        &self,
        filter: SubCategoryFilter,
    ) -> CatalogResult<Vec<SubCategory>> {
        let key = format!(
            "subcategories:list:{}:{}:{}",
            filter
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            filter.search.as_deref().unwrap_or(""),
            filter.ordering.as_deref().unwrap_or("")
        );
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<Vec<SubCategory>>(&key).await {
                return Ok(hit);
            }
        }

        let subcategories = self.repository.list_subcategories(filter).await?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &subcategories).await;
        }

        Ok(subcategories)
    }

    #[instrument(skip(self, input))]
    pub async fn update_subcategory(
        &self,
        id: Uuid,
        input: UpdateSubCategory,
    ) -> CatalogResult<SubCategory> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut subcategory = self
            .repository
            .get_subcategory(id)
            .await?
            .ok_or(CatalogError::SubCategoryNotFound(id))?;

        if let Some(category_id) = input.category_id {
            if self.repository.get_category(category_id).await?.is_none() {
                return Err(CatalogError::CategoryNotFound(category_id));
            }
        }

        subcategory.apply_update(input);

        if self
            .repository
            .subcategory_slug_exists(&subcategory.slug, Some(id))
            .await?
        {
            return Err(CatalogError::DuplicateSlug(subcategory.slug));
        }

        self.repository.update_subcategory(subcategory).await
    }

    #[instrument(skip(self))]
    pub async fn delete_subcategory(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_subcategory(id).await? {
            return Err(CatalogError::SubCategoryNotFound(id));
        }
        Ok(())
    }

    // ===== Products =====

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if self
            .repository
            .get_subcategory(input.subcategory_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::SubCategoryNotFound(input.subcategory_id));
        }

        let product = Product::new(input);

        if self
            .repository
            .product_slug_exists(&product.slug, None)
            .await?
        {
            return Err(CatalogError::DuplicateSlug(product.slug));
        }

        self.repository.create_product(product).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_product(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_product_detail(&self, id: Uuid) -> CatalogResult<ProductDetail> {
        let key = format!("products:detail:{}", id);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<ProductDetail>(&key).await {
                return Ok(hit);
            }
        }

        let detail = self
            .repository
            .get_product_detail(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &detail).await;
        }

        Ok(detail)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let key = format!(
            "products:list:{}:{}:{}:{}",
            filter
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            filter
                .subcategory_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            filter.search.as_deref().unwrap_or(""),
            filter.ordering.as_deref().unwrap_or("")
        );
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<Vec<Product>>(&key).await {
                return Ok(hit);
            }
        }

        let products = self.repository.list_products(filter).await?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &products).await;
        }

        Ok(products)
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut product = self
            .repository
            .get_product(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        if let Some(subcategory_id) = input.subcategory_id {
            if self
                .repository
                .get_subcategory(subcategory_id)
                .await?
                .is_none()
            {
                return Err(CatalogError::SubCategoryNotFound(subcategory_id));
            }
        }

        product.apply_update(input);

        if self
            .repository
            .product_slug_exists(&product.slug, Some(id))
            .await?
        {
            return Err(CatalogError::DuplicateSlug(product.slug));
        }

        self.repository.update_product(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_product(id).await? {
            return Err(CatalogError::ProductNotFound(id));
        }
        Ok(())
    }

    // ===== Images =====

    #[instrument(skip(self, input))]
    pub async fn add_image(&self, product_id: Uuid, input: CreateImage) -> CatalogResult<Image> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if self.repository.get_product(product_id).await?.is_none() {
            return Err(CatalogError::ProductNotFound(product_id));
        }

        self.repository
            .add_image(Image::new(product_id, input))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&self, id: Uuid) -> CatalogResult<()> {
        if !self.repository.delete_image(id).await? {
            return Err(CatalogError::ImageNotFound(id));
        }
        Ok(())
    }

    // ===== Attributes =====

    #[instrument(skip(self, input))]
    pub async fn create_attribute(&self, input: CreateAttribute) -> CatalogResult<Attribute> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create_attribute(input.name).await
    }

    #[instrument(skip(self, input))]
    pub async fn create_attribute_value(
        &self,
        input: CreateAttributeValue,
    ) -> CatalogResult<AttributeValue> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create_attribute_value(input.value).await
    }

    #[instrument(skip(self, input))]
    pub async fn assign_attribute(
        &self,
        product_id: Uuid,
        input: AssignAttribute,
    ) -> CatalogResult<AttributePair> {
        if self.repository.get_product(product_id).await?.is_none() {
            return Err(CatalogError::ProductNotFound(product_id));
        }

        if self
            .repository
            .get_attribute(input.attribute_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::AttributeNotFound(input.attribute_id));
        }

        if self
            .repository
            .get_attribute_value(input.attribute_value_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::AttributeValueNotFound(input.attribute_value_id));
        }

        self.repository
            .assign_product_attribute(product_id, input.attribute_id, input.attribute_value_id)
            .await
    }

    // ===== Comments =====

    /// Create a comment for the authenticated caller and recompute the
    /// product's rating.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        input: CreateComment,
    ) -> CatalogResult<Comment> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if self
            .repository
            .get_product(input.product_id)
            .await?
            .is_none()
        {
            return Err(CatalogError::ProductNotFound(input.product_id));
        }

        let comment = self
            .repository
            .create_comment(Comment::new(user_id, input))
            .await?;

        self.recalculate_rating(comment.product_id).await?;

        Ok(comment)
    }

    #[instrument(skip(self))]
    pub async fn get_comment(&self, id: Uuid) -> CatalogResult<Comment> {
        self.repository
            .get_comment(id)
            .await?
            .ok_or(CatalogError::CommentNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        filter: CommentFilter,
    ) -> CatalogResult<Vec<CommentResponse>> {
        let key = format!(
            "comments:list:{}:{}:{}",
            filter
                .product_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            filter.search.as_deref().unwrap_or(""),
            filter.ordering.as_deref().unwrap_or("")
        );
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<Vec<CommentResponse>>(&key).await {
                return Ok(hit);
            }
        }

        let comments = self.repository.list_comments(filter).await?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &comments).await;
        }

        Ok(comments)
    }

    #[instrument(skip(self, input))]
    pub async fn update_comment(&self, id: Uuid, input: UpdateComment) -> CatalogResult<Comment> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let mut comment = self
            .repository
            .get_comment(id)
            .await?
            .ok_or(CatalogError::CommentNotFound(id))?;

        comment.apply_update(input);

        self.repository.update_comment(comment).await
    }

    /// Delete a comment and recompute the product's rating; the rating
    /// resets to 0 when the last comment goes.
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: Uuid) -> CatalogResult<()> {
        let comment = self
            .repository
            .get_comment(id)
            .await?
            .ok_or(CatalogError::CommentNotFound(id))?;

        if !self.repository.delete_comment(id).await? {
            return Err(CatalogError::CommentNotFound(id));
        }

        self.recalculate_rating(comment.product_id).await?;

        Ok(())
    }

    /// Recompute a product's rating as the mean of all its comment
    /// ratings, or 0 when none remain.
    async fn recalculate_rating(&self, product_id: Uuid) -> CatalogResult<()> {
        let ratings = self.repository.comment_ratings(product_id).await?;

        let rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<i32>() as f64 / ratings.len() as f64
        };

        self.repository
            .set_product_rating(product_id, rating)
            .await?;

        tracing::info!(product_id = %product_id, rating, "Updated product average rating");
        Ok(())
    }
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: self.cache.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogRepository;
    use mockall::predicate::eq;

    fn sample_product(id: Uuid) -> Product {
        Product {
            id,
            name: "Gaming Laptop".to_string(),
            price: 129_900,
            quantity: 10,
            discount: 0.0,
            description: String::new(),
            rating: 0.0,
            slug: "gaming-laptop".to_string(),
            subcategory_id: Uuid::now_v7(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn sample_comment(product_id: Uuid, rating: i32) -> Comment {
        Comment::new(
            Uuid::now_v7(),
            CreateComment {
                product_id,
                body: "great".to_string(),
                rating,
            },
        )
    }

    #[tokio::test]
    async fn test_create_comment_recomputes_mean_rating() {
        let product_id = Uuid::now_v7();
        let mut repo = MockCatalogRepository::new();

        repo.expect_get_product()
            .with(eq(product_id))
            .returning(move |id| Ok(Some(sample_product(id))));
        repo.expect_create_comment().returning(Ok);
        repo.expect_comment_ratings()
            .with(eq(product_id))
            .returning(|_| Ok(vec![5, 3, 4]));
        repo.expect_set_product_rating()
            .with(eq(product_id), eq(4.0))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = CatalogService::new(repo);
        let comment = service
            .create_comment(
                Uuid::now_v7(),
                CreateComment {
                    product_id,
                    body: "solid".to_string(),
                    rating: 4,
                },
            )
            .await
            .unwrap();

        assert_eq!(comment.product_id, product_id);
    }

    #[tokio::test]
    async fn test_delete_comment_recomputes_remaining_mean() {
        let product_id = Uuid::now_v7();
        let comment = sample_comment(product_id, 3);
        let comment_id = comment.id;

        let mut repo = MockCatalogRepository::new();
        repo.expect_get_comment()
            .with(eq(comment_id))
            .returning(move |_| Ok(Some(comment.clone())));
        repo.expect_delete_comment()
            .with(eq(comment_id))
            .returning(|_| Ok(true));
        repo.expect_comment_ratings()
            .with(eq(product_id))
            .returning(|_| Ok(vec![5, 4]));
        repo.expect_set_product_rating()
            .with(eq(product_id), eq(4.5))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = CatalogService::new(repo);
        service.delete_comment(comment_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_rating_resets_when_last_comment_removed() {
        let product_id = Uuid::now_v7();
        let comment = sample_comment(product_id, 5);
        let comment_id = comment.id;

        let mut repo = MockCatalogRepository::new();
        repo.expect_get_comment()
            .returning(move |_| Ok(Some(comment.clone())));
        repo.expect_delete_comment().returning(|_| Ok(true));
        repo.expect_comment_ratings().returning(|_| Ok(vec![]));
        repo.expect_set_product_rating()
            .with(eq(product_id), eq(0.0))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = CatalogService::new(repo);
        service.delete_comment(comment_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_category_rejects_duplicate_slug() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_category_slug_exists()
            .withf(|slug, exclude| slug == "phones" && exclude.is_none())
            .returning(|_, _| Ok(true));

        let service = CatalogService::new(repo);
        let result = service
            .create_category(CreateCategory {
                name: "Phones".to_string(),
                image: "images/phones.png".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CatalogError::DuplicateSlug(_))));
    }

    #[tokio::test]
    async fn test_create_subcategory_requires_existing_category() {
        let category_id = Uuid::now_v7();
        let mut repo = MockCatalogRepository::new();
        repo.expect_get_category()
            .with(eq(category_id))
            .returning(|_| Ok(None));

        let service = CatalogService::new(repo);
        let result = service
            .create_subcategory(CreateSubCategory {
                name: "Tablets".to_string(),
                image: "images/tablets.png".to_string(),
                category_id,
            })
            .await;

        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_subcategories_passes_parent_filter() {
        let category_id = Uuid::now_v7();
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_subcategories()
            .withf(move |filter| filter.category_id == Some(category_id))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CatalogService::new(repo);
        let result = service
            .list_subcategories(SubCategoryFilter {
                category_id: Some(category_id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_create_product_derives_slug() {
        let subcategory_id = Uuid::now_v7();
        let mut repo = MockCatalogRepository::new();
        repo.expect_get_subcategory()
            .with(eq(subcategory_id))
            .returning(move |id| {
                Ok(Some(SubCategory {
                    id,
                    name: "Laptops".to_string(),
                    image: "images/laptops.png".to_string(),
                    slug: "laptops".to_string(),
                    category_id: Uuid::now_v7(),
                    created_at: chrono::Utc::now(),
                    updated_at: chrono::Utc::now(),
                }))
            });
        repo.expect_product_slug_exists().returning(|_, _| Ok(false));
        repo.expect_create_product().returning(Ok);

        let service = CatalogService::new(repo);
        let product = service
            .create_product(CreateProduct {
                name: "Gaming Laptop".to_string(),
                price: 129_900,
                quantity: 5,
                discount: 0.1,
                description: "A fast one".to_string(),
                subcategory_id,
            })
            .await
            .unwrap();

        assert_eq!(product.slug, "gaming-laptop");
        assert_eq!(product.rating, 0.0);
    }

    #[tokio::test]
    async fn test_delete_category_not_found() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_delete_category().returning(|_| Ok(false));

        let service = CatalogService::new(repo);
        let result = service.delete_category(Uuid::now_v7()).await;

        assert!(matches!(result, Err(CatalogError::CategoryNotFound(_))));
    }
}
