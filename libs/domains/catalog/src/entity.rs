use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// ===== Categories Entity =====

pub mod categories {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "categories")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(50))")]
        pub name: String,
        pub image: String,
        #[sea_orm(column_type = "String(StringLen::N(50))", unique)]
        pub slug: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::subcategories::Entity")]
        Subcategories,
    }

    impl Related<super::subcategories::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Subcategories.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Category {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                image: model.image,
                slug: model.slug,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::Category> for ActiveModel {
        fn from(category: crate::models::Category) -> Self {
            ActiveModel {
                id: Set(category.id),
                name: Set(category.name),
                image: Set(category.image),
                slug: Set(category.slug),
                created_at: Set(category.created_at.into()),
                updated_at: Set(category.updated_at.into()),
            }
        }
    }
}

// ===== Subcategories Entity =====

pub mod subcategories {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "subcategories")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(50))")]
        pub name: String,
        pub image: String,
        #[sea_orm(column_type = "String(StringLen::N(50))", unique)]
        pub slug: String,
        pub category_id: Uuid,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::categories::Entity",
            from = "Column::CategoryId",
            to = "super::categories::Column::Id"
        )]
        Category,
        #[sea_orm(has_many = "super::products::Entity")]
        Products,
    }

    impl Related<super::categories::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Category.def()
        }
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Products.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::SubCategory {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                image: model.image,
                slug: model.slug,
                category_id: model.category_id,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::SubCategory> for ActiveModel {
        fn from(subcategory: crate::models::SubCategory) -> Self {
            ActiveModel {
                id: Set(subcategory.id),
                name: Set(subcategory.name),
                image: Set(subcategory.image),
                slug: Set(subcategory.slug),
                category_id: Set(subcategory.category_id),
                created_at: Set(subcategory.created_at.into()),
                updated_at: Set(subcategory.updated_at.into()),
            }
        }
    }
}

// ===== Products Entity =====

pub mod products {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(50))")]
        pub name: String,
        pub price: i64,
        pub quantity: i32,
        pub discount: f64,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub rating: f64,
        #[sea_orm(unique)]
        pub slug: String,
        pub subcategory_id: Uuid,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::subcategories::Entity",
            from = "Column::SubcategoryId",
            to = "super::subcategories::Column::Id"
        )]
        Subcategory,
        #[sea_orm(has_many = "super::images::Entity")]
        Images,
        #[sea_orm(has_many = "super::product_attributes::Entity")]
        ProductAttributes,
        #[sea_orm(has_many = "super::comments::Entity")]
        Comments,
    }

    impl Related<super::subcategories::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Subcategory.def()
        }
    }

    impl Related<super::images::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Images.def()
        }
    }

    impl Related<super::comments::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Comments.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Product {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                price: model.price,
                quantity: model.quantity,
                discount: model.discount,
                description: model.description,
                rating: model.rating,
                slug: model.slug,
                subcategory_id: model.subcategory_id,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::Product> for ActiveModel {
        fn from(product: crate::models::Product) -> Self {
            ActiveModel {
                id: Set(product.id),
                name: Set(product.name),
                price: Set(product.price),
                quantity: Set(product.quantity),
                discount: Set(product.discount),
                description: Set(product.description),
                rating: Set(product.rating),
                slug: Set(product.slug),
                subcategory_id: Set(product.subcategory_id),
                created_at: Set(product.created_at.into()),
                updated_at: Set(product.updated_at.into()),
            }
        }
    }
}

// ===== Images Entity =====

pub mod images {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "images")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub image: String,
        pub product_id: Uuid,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::products::Entity",
            from = "Column::ProductId",
            to = "super::products::Column::Id"
        )]
        Product,
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Image {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                image: model.image,
                product_id: model.product_id,
                created_at: model.created_at.into(),
            }
        }
    }
}

// ===== Attributes Entities =====

pub mod attributes {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "attributes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(50))")]
        pub name: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product_attributes::Entity")]
        ProductAttributes,
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Attribute {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
            }
        }
    }
}

pub mod attribute_values {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "attribute_values")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(50))")]
        pub value: String,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product_attributes::Entity")]
        ProductAttributes,
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::AttributeValue {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                value: model.value,
            }
        }
    }
}

pub mod product_attributes {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "product_attributes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub attribute_id: Uuid,
        pub attribute_value_id: Uuid,
        pub product_id: Uuid,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::attributes::Entity",
            from = "Column::AttributeId",
            to = "super::attributes::Column::Id"
        )]
        Attribute,
        #[sea_orm(
            belongs_to = "super::attribute_values::Entity",
            from = "Column::AttributeValueId",
            to = "super::attribute_values::Column::Id"
        )]
        AttributeValue,
        #[sea_orm(
            belongs_to = "super::products::Entity",
            from = "Column::ProductId",
            to = "super::products::Column::Id"
        )]
        Product,
    }

    impl Related<super::attributes::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Attribute.def()
        }
    }

    impl Related<super::attribute_values::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::AttributeValue.def()
        }
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

// ===== Comments Entity =====

pub mod comments {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "comments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub product_id: Uuid,
        #[sea_orm(column_type = "Text")]
        pub body: String,
        pub rating: i32,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::products::Entity",
            from = "Column::ProductId",
            to = "super::products::Column::Id"
        )]
        Product,
        #[sea_orm(
            belongs_to = "domain_users::entity::users::Entity",
            from = "Column::UserId",
            to = "domain_users::entity::users::Column::Id"
        )]
        User,
    }

    impl Related<super::products::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl Related<domain_users::entity::users::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Comment {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                user_id: model.user_id,
                product_id: model.product_id,
                body: model.body,
                rating: model.rating,
                created_at: model.created_at.into(),
                updated_at: model.updated_at.into(),
            }
        }
    }

    impl From<crate::models::Comment> for ActiveModel {
        fn from(comment: crate::models::Comment) -> Self {
            ActiveModel {
                id: Set(comment.id),
                user_id: Set(comment.user_id),
                product_id: Set(comment.product_id),
                body: Set(comment.body),
                rating: Set(comment.rating),
                created_at: Set(comment.created_at.into()),
                updated_at: Set(comment.updated_at.into()),
            }
        }
    }
}

pub use attribute_values::Entity as AttributeValuesEntity;
pub use attributes::Entity as AttributesEntity;
pub use categories::Entity as CategoriesEntity;
pub use comments::Entity as CommentsEntity;
pub use images::Entity as ImagesEntity;
pub use product_attributes::Entity as ProductAttributesEntity;
pub use products::Entity as ProductsEntity;
pub use subcategories::Entity as SubcategoriesEntity;
