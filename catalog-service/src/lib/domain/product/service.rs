use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::auth::authorizer::ensure_can_modify;
use crate::domain::auth::models::Identity;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Domain service implementation for product operations.
///
/// Every write to an existing product goes through the resource authorizer.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    /// Load a product and check the caller may modify it.
    async fn load_for_write(
        &self,
        identity: &Identity,
        id: &ProductId,
    ) -> Result<Product, ProductError> {
        let product = self.get_product(id).await?;

        ensure_can_modify(identity, &product.posted_by).map_err(|e| {
            tracing::warn!(
                product_id = %id,
                user_id = %identity.user_id,
                role = %identity.role,
                owner = %product.posted_by,
                "Product write denied"
            );
            ProductError::from(e)
        })?;

        Ok(product)
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn create_product(
        &self,
        identity: &Identity,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: command.name,
            price: command.price,
            posted_by: identity.user_id,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(product).await?;
        tracing::info!(product_id = %created.id, posted_by = %created.posted_by, "Product created");

        Ok(created)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.list_all().await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))
    }

    async fn update_product(
        &self,
        identity: &Identity,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.load_for_write(identity, id).await?;

        product.name = ProductName::new(command.name)?;
        product.price = Price::new(command.price)?;
        product.updated_at = Utc::now();

        let updated = self.repository.update(product).await?;
        tracing::info!(product_id = %id, user_id = %identity.user_id, "Product updated");

        Ok(updated)
    }

    async fn delete_product(&self, identity: &Identity, id: &ProductId) -> Result<(), ProductError> {
        self.load_for_write(identity, id).await?;
        self.repository.delete(id).await?;

        tracing::info!(product_id = %id, user_id = %identity.user_id, "Product deleted");
        Ok(())
    }
}
