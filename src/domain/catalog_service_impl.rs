use crate::application_port::{CatalogError, CatalogService};
use crate::domain_model::{Product, ProductId, ProductQuery};
use crate::domain_port::ProductRepo;
use std::sync::Arc;

pub struct RealCatalogService {
    product_repo: Arc<dyn ProductRepo>,
}

impl RealCatalogService {
    pub fn new(product_repo: Arc<dyn ProductRepo>) -> Self {
        RealCatalogService { product_repo }
    }
}

#[async_trait::async_trait]
impl CatalogService for RealCatalogService {
    async fn list(&self, query: ProductQuery) -> Result<Vec<Product>, CatalogError> {
        self.product_repo.list(&query).await
    }

    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.product_repo.get(id).await?.ok_or(CatalogError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::PriceSort;
    use crate::infra_memory::MemoryProductRepo;

    fn product(id: &str, title: &str, price: i64, category: &str, rating: f64) -> Product {
        Product {
            id: ProductId::from(id),
            title: title.to_string(),
            description: None,
            price,
            image_url: format!("/uploads/{}.jpg", id),
            category_id: category.to_string(),
            rating,
        }
    }

    fn service() -> RealCatalogService {
        let repo = MemoryProductRepo::new();
        repo.insert(product("P1", "Walnut Desk", 120, "furniture", 4.5));
        repo.insert(product("P2", "Desk Lamp", 35, "lighting", 3.9));
        repo.insert(product("P3", "Standing desk mat", 55, "furniture", 4.1));
        RealCatalogService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn unfiltered_list_returns_everything() {
        let svc = service();
        let all = svc.list(ProductQuery::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn category_and_rating_filters_are_conjunctive() {
        let svc = service();
        let query = ProductQuery {
            category: Some("furniture".to_string()),
            min_rating: Some(4.2),
            ..Default::default()
        };
        let found = svc.list(query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.0, "P1");
    }

    #[tokio::test]
    async fn title_search_is_case_insensitive_substring() {
        let svc = service();
        let query = ProductQuery {
            title_search: Some("DESK".to_string()),
            ..Default::default()
        };
        let found = svc.list(query).await.unwrap();
        assert_eq!(found.len(), 3);
    }

    #[tokio::test]
    async fn price_sort_both_directions() {
        let svc = service();

        let high = svc
            .list(ProductQuery {
                sort_by: Some(PriceSort::PriceHigh),
                ..Default::default()
            })
            .await
            .unwrap();
        let prices: Vec<i64> = high.iter().map(|p| p.price).collect();
        assert_eq!(prices, [120, 55, 35]);

        let low = svc
            .list(ProductQuery {
                sort_by: Some(PriceSort::PriceLow),
                ..Default::default()
            })
            .await
            .unwrap();
        let prices: Vec<i64> = low.iter().map(|p| p.price).collect();
        assert_eq!(prices, [35, 55, 120]);
    }

    #[tokio::test]
    async fn get_by_id_and_miss() {
        let svc = service();
        let p = svc.get(&ProductId::from("P2")).await.unwrap();
        assert_eq!(p.title, "Desk Lamp");

        let err = svc.get(&ProductId::from("P999")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }
}
