use async_trait::async_trait;

use crate::domain::auth::models::Identity;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product domain service operations.
///
/// Writes take the caller's [`Identity`]; reads are open.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Create a product owned by the caller.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_product(
        &self,
        identity: &Identity,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError>;

    /// List every product, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// Replace name and price of a product the caller may modify.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `Forbidden` - Caller neither owns the product nor is an admin
    /// * `InvalidName` / `InvalidPrice` - Replacement values rejected (checked after `Forbidden`)
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        identity: &Identity,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Delete a product the caller may modify.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `Forbidden` - Caller neither owns the product nor is an admin
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, identity: &Identity, id: &ProductId)
        -> Result<(), ProductError>;
}

/// Persistence operations for product aggregate.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// Persist name, price and `updated_at`. The owner column is never written.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
}
