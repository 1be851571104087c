use crate::application_port::CatalogError;
use crate::domain_model::{PriceSort, Product, ProductId, ProductQuery};
use crate::domain_port::ProductRepo;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlProductRepo {
    pool: MySqlPool,
}

impl MySqlProductRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlProductRepo { pool }
    }

    fn row_to_product(row: MySqlRow) -> Result<Product, CatalogError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let title: String = row
            .try_get("title")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let description: Option<String> = row
            .try_get("description")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let price: i64 = row
            .try_get("price")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let image_url: String = row
            .try_get("image_url")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let category_id: String = row
            .try_get("category_id")
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        let rating: f64 = row
            .try_get("rating")
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        Ok(Product {
            id: ProductId(id),
            title,
            description,
            price,
            image_url,
            category_id,
            rating,
        })
    }
}

#[async_trait::async_trait]
impl ProductRepo for MySqlProductRepo {
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let mut sql = String::from(
            r#"
SELECT id, title, description, price, image_url, category_id, rating
FROM product
WHERE 1 = 1
"#,
        );
        if query.category.is_some() {
            sql.push_str(" AND category_id = ?");
        }
        if query.title_search.is_some() {
            sql.push_str(" AND LOWER(title) LIKE ?");
        }
        if query.min_rating.is_some() {
            sql.push_str(" AND rating >= ?");
        }
        match query.sort_by {
            Some(PriceSort::PriceHigh) => sql.push_str(" ORDER BY price DESC"),
            Some(PriceSort::PriceLow) => sql.push_str(" ORDER BY price ASC"),
            None => sql.push_str(" ORDER BY id ASC"),
        }

        let mut q = sqlx::query(&sql);
        if let Some(category) = &query.category {
            q = q.bind(category);
        }
        if let Some(needle) = &query.title_search {
            // LIKE with escaped wildcards, substring match.
            let escaped = needle.replace('%', "\\%").replace('_', "\\_");
            q = q.bind(format!("%{}%", escaped.to_lowercase()));
        }
        if let Some(min) = query.min_rating {
            q = q.bind(min);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT id, title, description, price, image_url, category_id, rating
FROM product
WHERE id = ?
"#,
        )
        .bind(&id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CatalogError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_product).transpose()
    }
}
