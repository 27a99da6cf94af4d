use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository backed by SeaORM
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db_err(e: sea_orm::DbErr) -> ProductError {
        ProductError::Internal(format!("Database error: {}", e))
    }

    // LIKE/ILIKE treat %, _ and \ specially; search terms must match them
    // literally.
    fn escape_like(term: &str) -> String {
        term.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    }

    async fn find_where(&self, condition: Condition) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(condition)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::db_err)?;

        Ok(model.map(|m| m.into()))
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(Self::db_err)?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let existing = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(Self::db_err)?
            .ok_or(ProductError::NotFound(id))?;

        let active_model = entity::ActiveModel {
            id: Set(existing.id),
            name: Set(input.name),
            category: Set(input.category),
            quantity: Set(input.quantity),
            min_stock: Set(input.min_stock),
            price: Set(input.price),
            supplier: Set(input.supplier),
            last_updated: Set(Utc::now().into()),
        };

        let updated = active_model.update(&self.db).await.map_err(Self::db_err)?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(Self::db_err)?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.find_where(Condition::all().add(entity::Column::Category.eq(category)))
            .await
    }

    async fn find_by_supplier(&self, supplier: &str) -> ProductResult<Vec<Product>> {
        self.find_where(Condition::all().add(entity::Column::Supplier.eq(supplier)))
            .await
    }

    async fn find_low_stock(&self) -> ProductResult<Vec<Product>> {
        // quantity <= min_stock is a column-to-column comparison
        self.find_where(
            Condition::all().add(
                Expr::col(entity::Column::Quantity).lte(Expr::col(entity::Column::MinStock)),
            ),
        )
        .await
    }

    async fn find_out_of_stock(&self) -> ProductResult<Vec<Product>> {
        self.find_where(Condition::all().add(entity::Column::Quantity.eq(0)))
            .await
    }

    async fn search(&self, term: &str) -> ProductResult<Vec<Product>> {
        let pattern = format!("%{}%", Self::escape_like(term));

        self.find_where(
            Condition::any()
                .add(Expr::col(entity::Column::Name).ilike(pattern.clone()))
                .add(Expr::col(entity::Column::Category).ilike(pattern.clone()))
                .add(Expr::col(entity::Column::Supplier).ilike(pattern)),
        )
        .await
    }
}
