use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

use crate::entity::{
    AttributeValuesEntity, AttributesEntity, CategoriesEntity, CommentsEntity, ImagesEntity,
    ProductAttributesEntity, ProductsEntity, SubcategoriesEntity, attribute_values, attributes,
    categories, comments, images, product_attributes, products, subcategories,
};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Attribute, AttributePair, AttributeValue, Category, CategoryFilter, Comment, CommentFilter,
    CommentResponse, Image, Product, ProductDetail, ProductFilter, SubCategory, SubCategoryFilter,
    parse_ordering,
};
use crate::repository::CatalogRepository;

/// PostgreSQL implementation of CatalogRepository
#[derive(Clone)]
pub struct PgCatalogRepository {
    db: DatabaseConnection,
}

impl PgCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a unique-constraint violation to a slug conflict.
fn map_slug_conflict(e: DbErr, slug: &str) -> CatalogError {
    let err_str = e.to_string();
    if str::contains(&err_str, "duplicate key") || str::contains(&err_str, "unique constraint") {
        CatalogError::DuplicateSlug(slug.to_string())
    } else {
        CatalogError::Database(e)
    }
}

#[derive(FromQueryResult)]
struct AttributePairRow {
    name: String,
    value: String,
}

#[derive(FromQueryResult)]
struct CommentRow {
    id: Uuid,
    username: String,
    product_id: Uuid,
    body: String,
    rating: i32,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            product_id: row.product_id,
            body: row.body,
            rating: row.rating,
            created_at: row.created_at.into(),
        }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    // ===== Categories =====

    async fn create_category(&self, category: Category) -> CatalogResult<Category> {
        let slug = category.slug.clone();
        let model: categories::ActiveModel = category.into();

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| map_slug_conflict(e, &slug))?;

        Ok(created.into())
    }

    async fn get_category(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let result = CategoriesEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn list_categories(&self, filter: CategoryFilter) -> CatalogResult<Vec<Category>> {
        let mut query = CategoriesEntity::find();

        if let Some(ref search) = filter.search {
            query =
                query.filter(Expr::col((CategoriesEntity, categories::Column::Name)).ilike(format!("%{}%", search)));
        }

        let query = match filter.ordering.as_deref().map(parse_ordering) {
            Some(("name", false)) => query.order_by_asc(categories::Column::Name),
            Some(("name", true)) => query.order_by_desc(categories::Column::Name),
            Some(("created_at", true)) => query.order_by_desc(categories::Column::CreatedAt),
            _ => query.order_by_asc(categories::Column::CreatedAt),
        };

        let results = query
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(results)
    }

    async fn update_category(&self, category: Category) -> CatalogResult<Category> {
        let id = category.id;
        let slug = category.slug.clone();
        let model: categories::ActiveModel = category.into();

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::CategoryNotFound(id),
            other => map_slug_conflict(other, &slug),
        })?;

        Ok(updated.into())
    }

    async fn delete_category(&self, id: Uuid) -> CatalogResult<bool> {
        let result = CategoriesEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn category_slug_exists(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> CatalogResult<bool> {
        let mut query = CategoriesEntity::find().filter(categories::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(categories::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn subcategory_count(&self, category_id: Uuid) -> CatalogResult<u64> {
        let count = SubcategoriesEntity::find()
            .filter(subcategories::Column::CategoryId.eq(category_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    // ===== Subcategories =====

    async fn create_subcategory(&self, subcategory: SubCategory) -> CatalogResult<SubCategory> {
        let slug = subcategory.slug.clone();
        let model: subcategories::ActiveModel = subcategory.into();

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| map_slug_conflict(e, &slug))?;

        Ok(created.into())
    }

    async fn get_subcategory(&self, id: Uuid) -> CatalogResult<Option<SubCategory>> {
        let result = SubcategoriesEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn list_subcategories(
        &self,
        filter: SubCategoryFilter,
    ) -> CatalogResult<Vec<SubCategory>> {
        let mut query = SubcategoriesEntity::find();

        if let Some(category_id) = filter.category_id {
            query = query.filter(subcategories::Column::CategoryId.eq(category_id));
        }

        if let Some(ref search) = filter.search {
            query = query
                .filter(Expr::col((SubcategoriesEntity, subcategories::Column::Name)).ilike(format!("%{}%", search)));
        }

        let query = match filter.ordering.as_deref().map(parse_ordering) {
            Some(("name", false)) => query.order_by_asc(subcategories::Column::Name),
            Some(("name", true)) => query.order_by_desc(subcategories::Column::Name),
            Some(("created_at", true)) => query.order_by_desc(subcategories::Column::CreatedAt),
            _ => query.order_by_asc(subcategories::Column::CreatedAt),
        };

        let results = query
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(results)
    }

    async fn update_subcategory(&self, subcategory: SubCategory) -> CatalogResult<SubCategory> {
        let id = subcategory.id;
        let slug = subcategory.slug.clone();
        let model: subcategories::ActiveModel = subcategory.into();

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::SubCategoryNotFound(id),
            other => map_slug_conflict(other, &slug),
        })?;

        Ok(updated.into())
    }

    async fn delete_subcategory(&self, id: Uuid) -> CatalogResult<bool> {
        let result = SubcategoriesEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn subcategory_slug_exists(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> CatalogResult<bool> {
        let mut query = SubcategoriesEntity::find().filter(subcategories::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(subcategories::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    // ===== Products =====

    async fn create_product(&self, product: Product) -> CatalogResult<Product> {
        let slug = product.slug.clone();
        let model: products::ActiveModel = product.into();

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| map_slug_conflict(e, &slug))?;

        Ok(created.into())
    }

    async fn get_product(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let result = ProductsEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn get_product_detail(&self, id: Uuid) -> CatalogResult<Option<ProductDetail>> {
        let Some(product) = ProductsEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let images: Vec<Image> = ImagesEntity::find()
            .filter(images::Column::ProductId.eq(id))
            .order_by_asc(images::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let attributes = ProductAttributesEntity::find()
            .select_only()
            .column_as(attributes::Column::Name, "name")
            .column_as(attribute_values::Column::Value, "value")
            .join(
                JoinType::InnerJoin,
                product_attributes::Relation::Attribute.def(),
            )
            .join(
                JoinType::InnerJoin,
                product_attributes::Relation::AttributeValue.def(),
            )
            .filter(product_attributes::Column::ProductId.eq(id))
            .into_model::<AttributePairRow>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| AttributePair {
                name: row.name,
                value: row.value,
            })
            .collect();

        let comments = self
            .list_comments(CommentFilter {
                product_id: Some(id),
                ..Default::default()
            })
            .await?;

        Ok(Some(ProductDetail {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            discount: product.discount,
            description: product.description,
            rating: product.rating,
            slug: product.slug,
            subcategory_id: product.subcategory_id,
            images,
            attributes,
            comments,
            created_at: product.created_at.into(),
        }))
    }

    async fn list_products(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let mut query = ProductsEntity::find();

        if let Some(category_id) = filter.category_id {
            query = query
                .join(JoinType::InnerJoin, products::Relation::Subcategory.def())
                .filter(subcategories::Column::CategoryId.eq(category_id));
        }

        if let Some(subcategory_id) = filter.subcategory_id {
            query = query.filter(products::Column::SubcategoryId.eq(subcategory_id));
        }

        if let Some(ref search) = filter.search {
            query = query.filter(Expr::col((ProductsEntity, products::Column::Name)).ilike(format!("%{}%", search)));
        }

        let query = match filter.ordering.as_deref().map(parse_ordering) {
            Some(("name", false)) => query.order_by_asc(products::Column::Name),
            Some(("name", true)) => query.order_by_desc(products::Column::Name),
            Some(("price", false)) => query.order_by_asc(products::Column::Price),
            Some(("price", true)) => query.order_by_desc(products::Column::Price),
            Some(("rating", false)) => query.order_by_asc(products::Column::Rating),
            Some(("rating", true)) => query.order_by_desc(products::Column::Rating),
            Some(("created_at", true)) => query.order_by_desc(products::Column::CreatedAt),
            _ => query.order_by_asc(products::Column::CreatedAt),
        };

        let results = query
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(results)
    }

    async fn update_product(&self, product: Product) -> CatalogResult<Product> {
        let id = product.id;
        let slug = product.slug.clone();
        let model: products::ActiveModel = product.into();

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::ProductNotFound(id),
            other => map_slug_conflict(other, &slug),
        })?;

        Ok(updated.into())
    }

    async fn delete_product(&self, id: Uuid) -> CatalogResult<bool> {
        let result = ProductsEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn product_slug_exists(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> CatalogResult<bool> {
        let mut query = ProductsEntity::find().filter(products::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            query = query.filter(products::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    // ===== Images =====

    async fn add_image(&self, image: Image) -> CatalogResult<Image> {
        let model = images::ActiveModel {
            id: Set(image.id),
            image: Set(image.image),
            product_id: Set(image.product_id),
            created_at: Set(image.created_at.into()),
            updated_at: Set(Utc::now().into()),
        };

        let created = model.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn delete_image(&self, id: Uuid) -> CatalogResult<bool> {
        let result = ImagesEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    // ===== Attributes =====

    async fn create_attribute(&self, name: String) -> CatalogResult<Attribute> {
        let now = Utc::now();
        let model = attributes::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = model.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn create_attribute_value(&self, value: String) -> CatalogResult<AttributeValue> {
        let now = Utc::now();
        let model = attribute_values::ActiveModel {
            id: Set(Uuid::now_v7()),
            value: Set(value),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = model.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn get_attribute(&self, id: Uuid) -> CatalogResult<Option<Attribute>> {
        let result = AttributesEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn get_attribute_value(&self, id: Uuid) -> CatalogResult<Option<AttributeValue>> {
        let result = AttributeValuesEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn assign_product_attribute(
        &self,
        product_id: Uuid,
        attribute_id: Uuid,
        attribute_value_id: Uuid,
    ) -> CatalogResult<AttributePair> {
        let attribute = AttributesEntity::find_by_id(attribute_id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::AttributeNotFound(attribute_id))?;

        let value = AttributeValuesEntity::find_by_id(attribute_value_id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::AttributeValueNotFound(attribute_value_id))?;

        let now = Utc::now();
        let model = product_attributes::ActiveModel {
            id: Set(Uuid::now_v7()),
            attribute_id: Set(attribute_id),
            attribute_value_id: Set(attribute_value_id),
            product_id: Set(product_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        model.insert(&self.db).await?;

        Ok(AttributePair {
            name: attribute.name,
            value: value.value,
        })
    }

    // ===== Comments =====

    async fn create_comment(&self, comment: Comment) -> CatalogResult<Comment> {
        let model: comments::ActiveModel = comment.into();
        let created = model.insert(&self.db).await?;
        Ok(created.into())
    }

    async fn get_comment(&self, id: Uuid) -> CatalogResult<Option<Comment>> {
        let result = CommentsEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn list_comments(&self, filter: CommentFilter) -> CatalogResult<Vec<CommentResponse>> {
        let mut query = CommentsEntity::find()
            .select_only()
            .column(comments::Column::Id)
            .column(comments::Column::ProductId)
            .column(comments::Column::Body)
            .column(comments::Column::Rating)
            .column(comments::Column::CreatedAt)
            .column_as(domain_users::entity::users::Column::Username, "username")
            .join(JoinType::InnerJoin, comments::Relation::User.def());

        if let Some(product_id) = filter.product_id {
            query = query.filter(comments::Column::ProductId.eq(product_id));
        }

        if let Some(ref search) = filter.search {
            query = query.filter(
                Expr::col((domain_users::entity::UsersEntity, domain_users::entity::users::Column::Username))
                    .ilike(format!("%{}%", search)),
            );
        }

        let query = match filter.ordering.as_deref().map(parse_ordering) {
            Some(("rating", false)) => query.order_by_asc(comments::Column::Rating),
            Some(("rating", true)) => query.order_by_desc(comments::Column::Rating),
            Some(("created_at", true)) => query.order_by_desc(comments::Column::CreatedAt),
            _ => query.order_by_asc(comments::Column::CreatedAt),
        };

        let results = query
            .into_model::<CommentRow>()
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(results)
    }

    async fn update_comment(&self, comment: Comment) -> CatalogResult<Comment> {
        let id = comment.id;
        let model: comments::ActiveModel = comment.into();

        let updated = model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CatalogError::CommentNotFound(id),
            other => CatalogError::Database(other),
        })?;

        Ok(updated.into())
    }

    async fn delete_comment(&self, id: Uuid) -> CatalogResult<bool> {
        let result = CommentsEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn comment_ratings(&self, product_id: Uuid) -> CatalogResult<Vec<i32>> {
        let ratings = CommentsEntity::find()
            .select_only()
            .column(comments::Column::Rating)
            .filter(comments::Column::ProductId.eq(product_id))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(ratings)
    }

    async fn set_product_rating(&self, product_id: Uuid, rating: f64) -> CatalogResult<()> {
        ProductsEntity::update_many()
            .col_expr(products::Column::Rating, Expr::value(rating))
            .col_expr(products::Column::UpdatedAt, Expr::current_timestamp())
            .filter(products::Column::Id.eq(product_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
