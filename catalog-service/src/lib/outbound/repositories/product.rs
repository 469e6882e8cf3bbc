use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::UserId;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    price: Decimal,
    posted_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(row.id),
            name: ProductName::new(row.name)?,
            price: Price::new(row.price)?,
            posted_by: UserId(row.posted_by),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database(e: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        // Echo the stored row so timestamps carry the column's precision.
        sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (id, name, price, posted_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, price, posted_by, created_at, updated_at
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.price.amount())
        .bind(product.posted_by.0)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database)
        .and_then(Product::try_from)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, posted_by, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database)?
        .map(Product::try_from)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, price, posted_by, created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET name = $2, price = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, name, price, posted_by, created_at, updated_at
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.price.amount())
        .bind(product.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(database)?
        .ok_or_else(|| ProductError::NotFound(product.id.to_string()))
        .and_then(Product::try_from)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
