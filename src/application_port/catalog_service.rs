use crate::domain_model::{Product, ProductId, ProductQuery};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Product not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn list(&self, query: ProductQuery) -> Result<Vec<Product>, CatalogError>;
    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError>;
}
