use std::collections::BTreeSet;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, InventoryStats, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for inventory business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products
    pub async fn get_all_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Get a product by id, failing with NotFound if absent
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product; the id is always assigned by storage
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.insert(input).await
    }

    /// Overwrite every mutable field of an existing product
    ///
    /// Fails with NotFound if the id does not exist. The id is preserved and
    /// last_updated is refreshed by the storage layer.
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product
    ///
    /// Deleting a non-existent id is not an error.
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Case-insensitive substring search over name, category and supplier
    pub async fn search_products(&self, term: &str) -> ProductResult<Vec<Product>> {
        self.repository.search(term).await
    }

    /// Products with quantity <= minStock
    pub async fn get_low_stock_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_low_stock().await
    }

    /// Products with quantity == 0
    pub async fn get_out_of_stock_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_out_of_stock().await
    }

    /// Exact category match
    pub async fn get_products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_category(category).await
    }

    /// Exact supplier match
    pub async fn get_products_by_supplier(&self, supplier: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_supplier(supplier).await
    }

    /// Sum of quantity * price over all products; 0 for an empty inventory
    pub async fn get_total_inventory_value(&self) -> ProductResult<f64> {
        let products = self.repository.find_all().await?;
        Ok(products
            .iter()
            .map(|p| p.quantity as f64 * p.price)
            .sum())
    }

    /// Distinct categories, sorted ascending
    pub async fn get_all_categories(&self) -> ProductResult<Vec<String>> {
        let products = self.repository.find_all().await?;
        let categories: BTreeSet<String> =
            products.into_iter().map(|p| p.category).collect();
        Ok(categories.into_iter().collect())
    }

    /// Distinct suppliers, sorted ascending
    pub async fn get_all_suppliers(&self) -> ProductResult<Vec<String>> {
        let products = self.repository.find_all().await?;
        let suppliers: BTreeSet<String> = products.into_iter().map(|p| p.supplier).collect();
        Ok(suppliers.into_iter().collect())
    }

    /// Aggregate statistics over the whole inventory
    pub async fn get_statistics(&self) -> ProductResult<InventoryStats> {
        let products = self.repository.find_all().await?;

        Ok(InventoryStats {
            total_products: products.len() as u64,
            low_stock_count: products.iter().filter(|p| p.is_low_stock()).count() as u64,
            out_of_stock_count: products.iter().filter(|p| p.is_out_of_stock()).count() as u64,
            total_value: products.iter().map(|p| p.quantity as f64 * p.price).sum(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};

    fn product_input(
        name: &str,
        category: &str,
        quantity: i32,
        min_stock: i32,
        price: f64,
        supplier: &str,
    ) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            min_stock,
            price,
            supplier: supplier.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_equal_record() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let created = service
            .create_product(product_input("Widget", "Tools", 5, 10, 2.5, "Acme"))
            .await
            .unwrap();

        let fetched = service.get_product(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let result = service.get_product(9999).await;
        assert!(matches!(result, Err(ProductError::NotFound(9999))));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let result = service
            .create_product(product_input("", "Tools", 5, 10, 2.5, "Acme"))
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_refreshes_last_updated() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let created = service
            .create_product(product_input("Widget", "Tools", 5, 10, 2.5, "Acme"))
            .await
            .unwrap();

        let updated = service
            .update_product(
                created.id,
                UpdateProduct {
                    name: "Widget Mk2".to_string(),
                    category: "Tools".to_string(),
                    quantity: 20,
                    min_stock: 10,
                    price: 3.0,
                    supplier: "Acme".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Widget Mk2");
        assert!(updated.last_updated > created.last_updated);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let result = service
            .update_product(
                42,
                UpdateProduct {
                    name: "Widget".to_string(),
                    category: "Tools".to_string(),
                    quantity: 1,
                    min_stock: 1,
                    price: 1.0,
                    supplier: "Acme".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let created = service
            .create_product(product_input("Widget", "Tools", 5, 10, 2.5, "Acme"))
            .await
            .unwrap();

        service.delete_product(created.id).await.unwrap();

        let result = service.get_product(created.id).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_product_succeeds() {
        let service = ProductService::new(InMemoryProductRepository::new());
        assert!(service.delete_product(9999).await.is_ok());
    }

    #[tokio::test]
    async fn test_total_value_empty_inventory_is_zero() {
        let service = ProductService::new(InMemoryProductRepository::new());
        assert_eq!(service.get_total_inventory_value().await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_total_value_sums_quantity_times_price() {
        let service = ProductService::new(InMemoryProductRepository::new());

        service
            .create_product(product_input("Widget", "Tools", 5, 10, 2.5, "Acme"))
            .await
            .unwrap();
        service
            .create_product(product_input("Bolt", "Hardware", 100, 20, 0.1, "Globex"))
            .await
            .unwrap();

        let total = service.get_total_inventory_value().await.unwrap();
        assert!((total - (5.0 * 2.5 + 100.0 * 0.1)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_categories_are_distinct_and_sorted() {
        let service = ProductService::new(InMemoryProductRepository::new());

        for (name, category) in [("A", "Tools"), ("B", "Hardware"), ("C", "Tools")] {
            service
                .create_product(product_input(name, category, 1, 0, 1.0, "Acme"))
                .await
                .unwrap();
        }

        let categories = service.get_all_categories().await.unwrap();
        assert_eq!(categories, vec!["Hardware", "Tools"]);
    }

    #[tokio::test]
    async fn test_low_stock_widget_scenario() {
        let service = ProductService::new(InMemoryProductRepository::new());

        // quantity 5 <= minStock 10, but not out of stock
        let widget = service
            .create_product(product_input("Widget", "Tools", 5, 10, 2.5, "Acme"))
            .await
            .unwrap();

        let low = service.get_low_stock_products().await.unwrap();
        assert!(low.iter().any(|p| p.id == widget.id));

        let out = service.get_out_of_stock_products().await.unwrap();
        assert!(!out.iter().any(|p| p.id == widget.id));
    }

    #[tokio::test]
    async fn test_out_of_stock_product_is_in_both_lists() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let empty = service
            .create_product(product_input("Empty", "Tools", 0, 5, 1.0, "Acme"))
            .await
            .unwrap();

        let low = service.get_low_stock_products().await.unwrap();
        let out = service.get_out_of_stock_products().await.unwrap();
        assert!(low.iter().any(|p| p.id == empty.id));
        assert!(out.iter().any(|p| p.id == empty.id));
    }

    #[tokio::test]
    async fn test_statistics_counts_and_value() {
        let service = ProductService::new(InMemoryProductRepository::new());

        service
            .create_product(product_input("Widget", "Tools", 5, 10, 2.5, "Acme"))
            .await
            .unwrap();
        service
            .create_product(product_input("Empty", "Tools", 0, 5, 1.0, "Acme"))
            .await
            .unwrap();
        service
            .create_product(product_input("Bolt", "Hardware", 100, 20, 0.1, "Globex"))
            .await
            .unwrap();

        let stats = service.get_statistics().await.unwrap();
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.low_stock_count, 2);
        assert_eq!(stats.out_of_stock_count, 1);
        assert!((stats.total_value - 22.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_search_delegates_to_repository() {
        let mut mock_repo = MockProductRepository::new();

        mock_repo
            .expect_search()
            .with(mockall::predicate::eq("acm"))
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(mock_repo);
        let results = service.search_products("acm").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock_repo = MockProductRepository::new();

        mock_repo
            .expect_find_all()
            .returning(|| Err(ProductError::Internal("connection reset".to_string())));

        let service = ProductService::new(mock_repo);
        let result = service.get_all_products().await;
        assert!(matches!(result, Err(ProductError::Internal(_))));
    }
}
