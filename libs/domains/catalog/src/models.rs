use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::slug::slugify;

/// Split a client-supplied ordering expression into a field name and
/// direction. A `-` prefix means descending.
pub fn parse_ordering(ordering: &str) -> (&str, bool) {
    match ordering.strip_prefix('-') {
        Some(field) => (field, true),
        None => (ordering, false),
    }
}

// ===== Categories =====

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// Storage-relative image path, served under the media URL prefix
    pub image: String,
    /// Unique URL-safe identifier derived from the name
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category representation with its subcategory count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub slug: String,
    pub subcategory_count: u64,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub image: String,
}

/// DTO for updating a category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub image: Option<String>,
}

/// Query filters for listing categories
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CategoryFilter {
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// Field to order by; `-` prefix for descending (name, created_at)
    pub ordering: Option<String>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            slug: slugify(&input.name),
            name: input.name,
            image: input.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates; the slug follows the name.
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.slug = slugify(&name);
            self.name = name;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        self.updated_at = Utc::now();
    }
}

// ===== Subcategories =====

/// Subcategory entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub slug: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a subcategory
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub image: String,
    pub category_id: Uuid,
}

/// DTO for updating a subcategory
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSubCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub image: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Query filters for listing subcategories
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SubCategoryFilter {
    /// Restrict to subcategories of this category
    pub category_id: Option<Uuid>,
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// Field to order by; `-` prefix for descending (name, created_at)
    pub ordering: Option<String>,
}

impl SubCategory {
    pub fn new(input: CreateSubCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            slug: slugify(&input.name),
            name: input.name,
            image: input.image,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateSubCategory) {
        if let Some(name) = update.name {
            self.slug = slugify(&name);
            self.name = name;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
    }
}

// ===== Products =====

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Price in cents
    pub price: i64,
    /// Stock quantity; never negative
    pub quantity: i32,
    /// Discount fraction
    pub discount: f64,
    pub description: String,
    /// Mean of all comment ratings, 0 when the product has none
    pub rating: f64,
    pub slug: String,
    pub subcategory_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub description: String,
    pub subcategory_id: Uuid,
}

/// DTO for updating a product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0))]
    pub discount: Option<f64>,
    pub description: Option<String>,
    pub subcategory_id: Option<Uuid>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Restrict to products whose subcategory belongs to this category
    pub category_id: Option<Uuid>,
    /// Restrict to products of this subcategory
    pub subcategory_id: Option<Uuid>,
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
    /// Field to order by; `-` prefix for descending
    /// (name, price, rating, created_at)
    pub ordering: Option<String>,
}

/// Expanded product representation with nested images, attribute pairs,
/// and comments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
    pub discount: f64,
    pub description: String,
    pub rating: f64,
    pub slug: String,
    pub subcategory_id: Uuid,
    pub images: Vec<Image>,
    pub attributes: Vec<AttributePair>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            slug: slugify(&input.name),
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            discount: input.discount,
            description: input.description,
            rating: 0.0,
            subcategory_id: input.subcategory_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.slug = slugify(&name);
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(discount) = update.discount {
            self.discount = discount;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(subcategory_id) = update.subcategory_id {
            self.subcategory_id = subcategory_id;
        }
        self.updated_at = Utc::now();
    }
}

// ===== Images =====

/// Product image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Image {
    pub id: Uuid,
    /// Storage-relative image path
    pub image: String,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// DTO for attaching an image to a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateImage {
    #[validate(length(min = 1, max = 255))]
    pub image: String,
}

impl Image {
    pub fn new(product_id: Uuid, input: CreateImage) -> Self {
        Self {
            id: Uuid::now_v7(),
            image: input.image,
            product_id,
            created_at: Utc::now(),
        }
    }
}

// ===== Attributes =====

/// Attribute (e.g. "color")
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Attribute {
    pub id: Uuid,
    pub name: String,
}

/// DTO for creating an attribute
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAttribute {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

/// Attribute value (e.g. "red")
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttributeValue {
    pub id: Uuid,
    pub value: String,
}

/// DTO for creating an attribute value
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAttributeValue {
    #[validate(length(min = 1, max = 50))]
    pub value: String,
}

/// An attribute name/value pair attached to a product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttributePair {
    pub name: String,
    pub value: String,
}

/// DTO for attaching an attribute/value pair to a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignAttribute {
    pub attribute_id: Uuid,
    pub attribute_value_id: Uuid,
}

// ===== Comments =====

/// Comment entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub body: String,
    /// Rating in 1..=5
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment representation carrying the author's username
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub username: String,
    pub product_id: Uuid,
    pub body: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a comment; the author is the authenticated caller
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    pub product_id: Uuid,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
}

/// DTO for updating a comment
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateComment {
    #[validate(length(min = 1))]
    pub body: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
}

/// Query filters for listing comments
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CommentFilter {
    /// Restrict to comments on this product
    pub product_id: Option<Uuid>,
    /// Case-insensitive substring match on the author's username
    pub search: Option<String>,
    /// Field to order by; `-` prefix for descending (rating, created_at)
    pub ordering: Option<String>,
}

impl Comment {
    pub fn new(user_id: Uuid, input: CreateComment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            user_id,
            product_id: input.product_id,
            body: input.body,
            rating: input.rating,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateComment) {
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_slug_follows_name() {
        let mut category = Category::new(CreateCategory {
            name: "Home Appliances".to_string(),
            image: "images/home.png".to_string(),
        });
        assert_eq!(category.slug, "home-appliances");

        category.apply_update(UpdateCategory {
            name: Some("Kitchen Appliances".to_string()),
            image: None,
        });
        assert_eq!(category.slug, "kitchen-appliances");
        assert_eq!(category.image, "images/home.png");
    }

    #[test]
    fn test_new_product_has_zero_rating() {
        let product = Product::new(CreateProduct {
            name: "Gaming Laptop".to_string(),
            price: 129_900,
            quantity: 10,
            discount: 0.0,
            description: String::new(),
            subcategory_id: Uuid::now_v7(),
        });
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.slug, "gaming-laptop");
    }

    #[test]
    fn test_parse_ordering() {
        assert_eq!(parse_ordering("name"), ("name", false));
        assert_eq!(parse_ordering("-price"), ("price", true));
    }
}
