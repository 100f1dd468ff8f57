//! HTTP handlers for the catalog API.
//!
//! Reads are open to any caller; the write routers are wrapped in auth
//! layers by the application (admin for catalog resources, any
//! authenticated user for comments).

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_helpers::{AppError, JwtClaims, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::models::{
    AssignAttribute, Attribute, AttributePair, AttributeValue, Category, CategoryFilter,
    CategoryResponse, Comment, CommentFilter, CommentResponse, CreateAttribute,
    CreateAttributeValue, CreateCategory, CreateComment, CreateImage, CreateProduct,
    CreateSubCategory, Image, Product, ProductDetail, ProductFilter, SubCategory,
    SubCategoryFilter, UpdateCategory, UpdateComment, UpdateProduct, UpdateSubCategory,
};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
        list_category_subcategories,
        list_category_products,
        list_subcategories,
        create_subcategory,
        get_subcategory,
        update_subcategory,
        delete_subcategory,
        list_products,
        create_product,
        get_product,
        get_product_detail,
        update_product,
        delete_product,
        add_product_image,
        delete_image,
        assign_product_attribute,
        create_attribute,
        create_attribute_value,
        list_comments,
        create_comment,
        get_comment,
        update_comment,
        delete_comment,
    ),
    components(schemas(
        Category,
        CategoryResponse,
        CreateCategory,
        UpdateCategory,
        SubCategory,
        CreateSubCategory,
        UpdateSubCategory,
        Product,
        ProductDetail,
        CreateProduct,
        UpdateProduct,
        Image,
        CreateImage,
        Attribute,
        CreateAttribute,
        AttributeValue,
        CreateAttributeValue,
        AttributePair,
        AssignAttribute,
        Comment,
        CommentResponse,
        CreateComment,
        UpdateComment,
    )),
    tags(
        (name = "Catalog", description = "Categories, subcategories, and products"),
        (name = "Comments", description = "Product comments and ratings")
    )
)]
pub struct ApiDoc;

/// Read-only catalog routes, open to any caller.
pub fn read_router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
        .route(
            "/categories/{id}/subcategories",
            get(list_category_subcategories),
        )
        .route(
            "/categories/{category_id}/subcategories/{subcategory_id}/products",
            get(list_category_products),
        )
        .route("/subcategories", get(list_subcategories))
        .route("/subcategories/{id}", get(get_subcategory))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}/detail", get(get_product_detail))
        .route("/comments", get(list_comments))
        .route("/comments/{id}", get(get_comment))
        .with_state(shared_service)
}

/// Catalog write routes; the app restricts these to admin callers.
pub fn admin_router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/categories", post(create_category))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/subcategories", post(create_subcategory))
        .route(
            "/subcategories/{id}",
            put(update_subcategory).delete(delete_subcategory),
        )
        .route("/products", post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/products/{id}/images", post(add_product_image))
        .route("/images/{id}", delete(delete_image))
        .route("/products/{id}/attributes", post(assign_product_attribute))
        .route("/attributes", post(create_attribute))
        .route("/attribute-values", post(create_attribute_value))
        .with_state(shared_service)
}

/// Comment write routes; the app restricts these to authenticated callers.
pub fn comment_write_router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/comments", post(create_comment))
        .route(
            "/comments/{id}",
            put(update_comment).delete(delete_comment),
        )
        .with_state(shared_service)
}

// ===== Categories =====

/// List categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Catalog",
    params(CategoryFilter),
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>)
    )
)]
async fn list_categories<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<CategoryFilter>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = service.list_categories(filter).await?;
    Ok(Json(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Catalog",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Slug already exists")
    )
)]
async fn create_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> Result<impl IntoResponse, AppError> {
    let category = service.create_category(input).await?;
    let location = format!("/api/categories/{}", category.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(category),
    ))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
async fn get_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = service.get_category(id).await?;
    Ok(Json(category))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Slug already exists")
    )
)]
async fn update_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> Result<Json<Category>, AppError> {
    let category = service.update_category(id, input).await?;
    Ok(Json(category))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
async fn delete_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the subcategories of a category
#[utoipa::path(
    get,
    path = "/categories/{id}/subcategories",
    tag = "Catalog",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        SubCategoryFilter
    ),
    responses(
        (status = 200, description = "Subcategories of the category", body = Vec<SubCategory>)
    )
)]
async fn list_category_subcategories<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
    Query(filter): Query<SubCategoryFilter>,
) -> Result<Json<Vec<SubCategory>>, AppError> {
    let subcategories = service
        .list_subcategories(SubCategoryFilter {
            category_id: Some(id),
            ..filter
        })
        .await?;
    Ok(Json(subcategories))
}

/// List the products under a category/subcategory pair
#[utoipa::path(
    get,
    path = "/categories/{category_id}/subcategories/{subcategory_id}/products",
    tag = "Catalog",
    params(
        ("category_id" = Uuid, Path, description = "Category ID"),
        ("subcategory_id" = Uuid, Path, description = "Subcategory ID"),
        ProductFilter
    ),
    responses(
        (status = 200, description = "Products in the subcategory", body = Vec<Product>)
    )
)]
async fn list_category_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path((category_id, subcategory_id)): Path<(Uuid, Uuid)>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = service
        .list_products(ProductFilter {
            category_id: Some(category_id),
            subcategory_id: Some(subcategory_id),
            ..filter
        })
        .await?;
    Ok(Json(products))
}

// ===== Subcategories =====

/// List subcategories
#[utoipa::path(
    get,
    path = "/subcategories",
    tag = "Catalog",
    params(SubCategoryFilter),
    responses(
        (status = 200, description = "List of subcategories", body = Vec<SubCategory>)
    )
)]
async fn list_subcategories<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<SubCategoryFilter>,
) -> Result<Json<Vec<SubCategory>>, AppError> {
    let subcategories = service.list_subcategories(filter).await?;
    Ok(Json(subcategories))
}

/// Create a subcategory
#[utoipa::path(
    post,
    path = "/subcategories",
    tag = "Catalog",
    request_body = CreateSubCategory,
    responses(
        (status = 201, description = "Subcategory created", body = SubCategory),
        (status = 404, description = "Parent category not found"),
        (status = 409, description = "Slug already exists")
    )
)]
async fn create_subcategory<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateSubCategory>,
) -> Result<impl IntoResponse, AppError> {
    let subcategory = service.create_subcategory(input).await?;
    let location = format!("/api/subcategories/{}", subcategory.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(subcategory),
    ))
}

/// Get a subcategory by ID
#[utoipa::path(
    get,
    path = "/subcategories/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    responses(
        (status = 200, description = "Subcategory found", body = SubCategory),
        (status = 404, description = "Subcategory not found")
    )
)]
async fn get_subcategory<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubCategory>, AppError> {
    let subcategory = service.get_subcategory(id).await?;
    Ok(Json(subcategory))
}

/// Update a subcategory
#[utoipa::path(
    put,
    path = "/subcategories/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    request_body = UpdateSubCategory,
    responses(
        (status = 200, description = "Subcategory updated", body = SubCategory),
        (status = 404, description = "Subcategory not found"),
        (status = 409, description = "Slug already exists")
    )
)]
async fn update_subcategory<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateSubCategory>,
) -> Result<Json<SubCategory>, AppError> {
    let subcategory = service.update_subcategory(id, input).await?;
    Ok(Json(subcategory))
}

/// Delete a subcategory
#[utoipa::path(
    delete,
    path = "/subcategories/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Subcategory ID")),
    responses(
        (status = 204, description = "Subcategory deleted"),
        (status = 404, description = "Subcategory not found")
    )
)]
async fn delete_subcategory<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_subcategory(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Products =====

/// List products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    params(ProductFilter),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>)
    )
)]
async fn list_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Catalog",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 404, description = "Subcategory not found"),
        (status = 409, description = "Slug already exists")
    )
)]
async fn create_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = service.create_product(input).await?;
    let location = format!("/api/products/{}", product.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

/// Get a product by ID (compact representation)
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Get a product's expanded representation with nested images,
/// attribute pairs, and comments
#[utoipa::path(
    get,
    path = "/products/{id}/detail",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Expanded product", body = ProductDetail),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product_detail<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductDetail>, AppError> {
    let detail = service.get_product_detail(id).await?;
    Ok(Json(detail))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Slug already exists")
    )
)]
async fn update_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, AppError> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
async fn delete_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach an image to a product
#[utoipa::path(
    post,
    path = "/products/{id}/images",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = CreateImage,
    responses(
        (status = 201, description = "Image attached", body = Image),
        (status = 404, description = "Product not found")
    )
)]
async fn add_product_image<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<CreateImage>,
) -> Result<impl IntoResponse, AppError> {
    let image = service.add_image(id, input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Delete a product image
#[utoipa::path(
    delete,
    path = "/images/{id}",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 404, description = "Image not found")
    )
)]
async fn delete_image<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_image(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach an attribute/value pair to a product
#[utoipa::path(
    post,
    path = "/products/{id}/attributes",
    tag = "Catalog",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = AssignAttribute,
    responses(
        (status = 201, description = "Attribute attached", body = AttributePair),
        (status = 404, description = "Product, attribute, or value not found")
    )
)]
async fn assign_product_attribute<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
    Json(input): Json<AssignAttribute>,
) -> Result<impl IntoResponse, AppError> {
    let pair = service.assign_attribute(id, input).await?;
    Ok((StatusCode::CREATED, Json(pair)))
}

/// Create an attribute
#[utoipa::path(
    post,
    path = "/attributes",
    tag = "Catalog",
    request_body = CreateAttribute,
    responses(
        (status = 201, description = "Attribute created", body = Attribute)
    )
)]
async fn create_attribute<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateAttribute>,
) -> Result<impl IntoResponse, AppError> {
    let attribute = service.create_attribute(input).await?;
    Ok((StatusCode::CREATED, Json(attribute)))
}

/// Create an attribute value
#[utoipa::path(
    post,
    path = "/attribute-values",
    tag = "Catalog",
    request_body = CreateAttributeValue,
    responses(
        (status = 201, description = "Attribute value created", body = AttributeValue)
    )
)]
async fn create_attribute_value<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateAttributeValue>,
) -> Result<impl IntoResponse, AppError> {
    let value = service.create_attribute_value(input).await?;
    Ok((StatusCode::CREATED, Json(value)))
}

// ===== Comments =====

/// List comments
#[utoipa::path(
    get,
    path = "/comments",
    tag = "Comments",
    params(CommentFilter),
    responses(
        (status = 200, description = "List of comments", body = Vec<CommentResponse>)
    )
)]
async fn list_comments<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<CommentFilter>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = service.list_comments(filter).await?;
    Ok(Json(comments))
}

/// Create a comment as the authenticated caller.
///
/// The product's rating is recomputed as part of the operation.
#[utoipa::path(
    post,
    path = "/comments",
    tag = "Comments",
    security(("bearer" = [])),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Product not found")
    )
)]
async fn create_comment<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> Result<impl IntoResponse, AppError> {
    let user_id: Uuid = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))?;

    let comment = service.create_comment(user_id, input).await?;
    let location = format!("/api/comments/{}", comment.id);

    let response = CommentResponse {
        id: comment.id,
        username: claims.username,
        product_id: comment.product_id,
        body: comment.body,
        rating: comment.rating,
        created_at: comment.created_at,
    };

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(response),
    ))
}

/// Get a comment by ID
#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "Comments",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment found", body = Comment),
        (status = 404, description = "Comment not found")
    )
)]
async fn get_comment<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Comment>, AppError> {
    let comment = service.get_comment(id).await?;
    Ok(Json(comment))
}

/// Update a comment
#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "Comments",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = UpdateComment,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 404, description = "Comment not found")
    )
)]
async fn update_comment<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateComment>,
) -> Result<Json<Comment>, AppError> {
    let comment = service.update_comment(id, input).await?;
    Ok(Json(comment))
}

/// Delete a comment.
///
/// The product's rating is recomputed; it resets to 0 when the last
/// comment is removed.
#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "Comments",
    security(("bearer" = [])),
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    )
)]
async fn delete_comment<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_comment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
