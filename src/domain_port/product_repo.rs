use crate::application_port::CatalogError;
use crate::domain_model::{Product, ProductId, ProductQuery};

#[async_trait::async_trait]
pub trait ProductRepo: Send + Sync {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError>;

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;
}
