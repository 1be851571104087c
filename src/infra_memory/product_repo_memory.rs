use crate::application_port::CatalogError;
use crate::domain_model::{PriceSort, Product, ProductId, ProductQuery};
use crate::domain_port::ProductRepo;
use dashmap::DashMap;

#[derive(Default)]
pub struct MemoryProductRepo {
    products: DashMap<ProductId, Product>,
}

impl MemoryProductRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeding hook for tests and the memory backend.
    pub fn insert(&self, product: Product) {
        self.products.insert(product.id.clone(), product);
    }

    fn matches(product: &Product, query: &ProductQuery) -> bool {
        if let Some(category) = &query.category {
            if &product.category_id != category {
                return false;
            }
        }
        if let Some(needle) = &query.title_search {
            if !product
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(min) = query.min_rating {
            if product.rating < min {
                return false;
            }
        }
        true
    }
}

#[async_trait::async_trait]
impl ProductRepo for MemoryProductRepo {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let mut found: Vec<Product> = self
            .products
            .iter()
            .filter(|entry| Self::matches(entry.value(), query))
            .map(|entry| entry.value().clone())
            .collect();

        match query.sort_by {
            Some(PriceSort::PriceHigh) => found.sort_by(|a, b| b.price.cmp(&a.price)),
            Some(PriceSort::PriceLow) => found.sort_by(|a, b| a.price.cmp(&b.price)),
            // Map iteration order is arbitrary; keep unsorted listings stable.
            None => found.sort_by(|a, b| a.id.0.cmp(&b.id.0)),
        }

        Ok(found)
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.get(id).map(|p| p.clone()))
    }
}
