use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by id
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by id
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Insert a new product; id and last_updated are assigned by the store
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Overwrite every mutable field of an existing product and refresh
    /// last_updated; fails with NotFound if the id does not exist
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by id; returns whether a record was removed.
    /// Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Exact, case-sensitive category match
    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// Exact, case-sensitive supplier match
    async fn find_by_supplier(&self, supplier: &str) -> ProductResult<Vec<Product>>;

    /// Products with quantity <= min_stock
    async fn find_low_stock(&self) -> ProductResult<Vec<Product>>;

    /// Products with quantity == 0
    async fn find_out_of_stock(&self) -> ProductResult<Vec<Product>>;

    /// Case-insensitive substring match over name OR category OR supplier
    async fn search(&self, term: &str) -> ProductResult<Vec<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i64, Product>>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut products: Vec<Product>) -> Vec<Product> {
        products.sort_by_key(|p| p.id);
        products
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let products = self.products.read().await;
        Self::sorted(products.values().filter(|p| predicate(p)).cloned().collect())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(Self::sorted(products.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id,
            name: input.name,
            category: input.category,
            quantity: input.quantity,
            min_stock: input.min_stock,
            price: input.price,
            supplier: input.supplier,
            last_updated: Utc::now(),
        };
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.category == category).await)
    }

    async fn find_by_supplier(&self, supplier: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.supplier == supplier).await)
    }

    async fn find_low_stock(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(Product::is_low_stock).await)
    }

    async fn find_out_of_stock(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(Product::is_out_of_stock).await)
    }

    async fn search(&self, term: &str) -> ProductResult<Vec<Product>> {
        let term = term.to_lowercase();
        Ok(self
            .filtered(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.category.to_lowercase().contains(&term)
                    || p.supplier.to_lowercase().contains(&term)
            })
            .await)
    }
}
