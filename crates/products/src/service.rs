//! Product service: the only place with cross-entity rules.
//!
//! Every mutating operation follows the same shape: load the entity, let it
//! validate and mutate itself in memory, then hand it back to the repository.
//! Nothing is written directly to storage, so the entity's invariants hold
//! before any write happens.

use stockroom_core::ProductId;

use crate::error::{ProductError, ProductResult};
use crate::product::Product;
use crate::repository::ProductRepository;
use crate::sku::Sku;

/// Default amount for a stock adjustment when the caller gives none.
pub const DEFAULT_ADJUSTMENT: i64 = 1;

/// Default page size for [`ProductService::get_all_products`].
pub const DEFAULT_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct ProductService<R> {
    repository: R,
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create a product after trimming and normalizing its input.
    ///
    /// The SKU lookup here only gives a clean error in the common case. Two
    /// concurrent creates can both pass it; the repository's own uniqueness
    /// check decides which one wins.
    pub fn create_product(&self, name: &str, sku: &str, stock: i64) -> ProductResult<Product> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProductError::invalid_amount(0, "Product name cannot be empty"));
        }
        let sku = Sku::parse(sku)?;
        if stock < 0 {
            return Err(ProductError::invalid_amount(stock, "Initial stock cannot be negative"));
        }

        if self.repository.get_by_sku(&sku)?.is_some() {
            return Err(ProductError::duplicate_sku(sku.into_string()));
        }

        let created = self.repository.create(Product::new(name, sku, stock)?)?;
        tracing::info!(
            product_id = ?created.id_typed(),
            sku = %created.sku(),
            stock = created.stock(),
            "product created"
        );
        Ok(created)
    }

    pub fn get_product_by_id(&self, id: ProductId) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)?
            .ok_or_else(|| ProductError::not_found(id))
    }

    /// Paginated listing. Bounds are the caller's concern.
    pub fn get_all_products(&self, skip: usize, limit: usize) -> ProductResult<Vec<Product>> {
        tracing::debug!(skip, limit, "listing products");
        self.repository.get_all(skip, limit)
    }

    pub fn update_product(
        &self,
        id: ProductId,
        name: Option<&str>,
        stock: Option<i64>,
    ) -> ProductResult<Product> {
        let mut product = self.get_product_by_id(id)?;

        let name = name.map(str::trim);
        if name.is_some_and(str::is_empty) {
            return Err(ProductError::invalid_amount(0, "Product name cannot be empty"));
        }
        if let Some(stock) = stock.filter(|s| *s < 0) {
            return Err(ProductError::invalid_amount(stock, "Stock cannot be negative"));
        }

        product.update_details(name, stock)?;
        let updated = self.repository.update(product)?;
        tracing::info!(product_id = %id, stock = updated.stock(), "product updated");
        Ok(updated)
    }

    pub fn delete_product(&self, id: ProductId) -> ProductResult<()> {
        self.get_product_by_id(id)?;
        if !self.repository.delete(id)? {
            // Removed between the existence check and the delete.
            return Err(ProductError::not_found(id));
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    pub fn increment_stock(&self, id: ProductId, amount: i64) -> ProductResult<Product> {
        let mut product = self.get_product_by_id(id)?;
        product.increment_stock(amount)?;
        let updated = self.repository.update(product)?;
        tracing::info!(product_id = %id, amount, stock = updated.stock(), "stock incremented");
        Ok(updated)
    }

    pub fn decrement_stock(&self, id: ProductId, amount: i64) -> ProductResult<Product> {
        let mut product = self.get_product_by_id(id)?;
        product.decrement_stock(amount)?;
        let updated = self.repository.update(product)?;
        tracing::info!(product_id = %id, amount, stock = updated.stock(), "stock decremented");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::error::ProductErrorKind;

    /// Minimal in-process repository that also records which calls were made.
    #[derive(Default)]
    struct FakeRepository {
        rows: Mutex<Vec<Product>>,
        calls: Mutex<Vec<String>>,
        next_id: Mutex<i64>,
        /// Simulates a uniqueness violation that slipped past the pre-check.
        reject_creates: bool,
    }

    impl FakeRepository {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls().iter().filter(|c| c.starts_with(prefix)).count()
        }
    }

    impl ProductRepository for FakeRepository {
        fn create(&self, product: Product) -> ProductResult<Product> {
            self.record("create");
            if self.reject_creates {
                return Err(ProductError::duplicate_sku(product.sku().as_str()));
            }
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let created = product.with_identity(ProductId::from_i64(*next), Utc::now());
            self.rows.lock().unwrap().push(created.clone());
            Ok(created)
        }

        fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
            self.record(format!("get_by_id:{id}"));
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id_typed() == Some(id))
                .cloned())
        }

        fn get_by_sku(&self, sku: &Sku) -> ProductResult<Option<Product>> {
            self.record(format!("get_by_sku:{sku}"));
            Ok(self.rows.lock().unwrap().iter().find(|p| p.sku() == sku).cloned())
        }

        fn get_all(&self, skip: usize, limit: usize) -> ProductResult<Vec<Product>> {
            self.record(format!("get_all:{skip}:{limit}"));
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .skip(skip)
                .take(limit)
                .cloned()
                .collect())
        }

        fn update(&self, product: Product) -> ProductResult<Product> {
            self.record("update");
            let mut rows = self.rows.lock().unwrap();
            let slot = rows
                .iter_mut()
                .find(|p| p.id_typed() == product.id_typed())
                .ok_or_else(|| ProductError::storage("update of unknown row"))?;
            *slot = product.clone();
            Ok(product)
        }

        fn delete(&self, id: ProductId) -> ProductResult<bool> {
            self.record(format!("delete:{id}"));
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|p| p.id_typed() != Some(id));
            Ok(rows.len() != before)
        }
    }

    fn service() -> ProductService<FakeRepository> {
        ProductService::new(FakeRepository::default())
    }

    fn seeded(stock: i64) -> (ProductService<FakeRepository>, ProductId) {
        let service = service();
        let product = service.create_product("Test Product", "TEST-001", stock).unwrap();
        (service, product.id_typed().unwrap())
    }

    #[test]
    fn create_product_normalizes_and_persists() {
        let service = service();
        let product = service.create_product("  Test Product ", " test-001 ", 10).unwrap();

        assert!(product.id_typed().is_some());
        assert_eq!(product.name(), "Test Product");
        assert_eq!(product.sku().as_str(), "TEST-001");
        assert_eq!(product.stock(), 10);
        assert_eq!(service.repository().count("create"), 1);
        assert!(service.repository().calls().contains(&"get_by_sku:TEST-001".to_string()));
    }

    #[test]
    fn create_product_rejects_duplicate_sku_in_any_case() {
        let service = service();
        service.create_product("First", "test-001", 1).unwrap();

        for sku in ["TEST-001", "Test-001", " test-001 "] {
            let err = service.create_product("Second", sku, 5).unwrap_err();
            assert_eq!(err, ProductError::duplicate_sku("TEST-001"));
            assert!(err.to_string().contains("TEST-001"));
        }
        assert_eq!(service.repository().count("create"), 1);
    }

    #[test]
    fn create_product_rejects_invalid_input_before_touching_storage() {
        let service = service();

        let err = service.create_product("", "X", 0).unwrap_err();
        assert_eq!(err.kind(), ProductErrorKind::InvalidAmount);

        let err = service.create_product("X", "", 0).unwrap_err();
        assert_eq!(err.kind(), ProductErrorKind::InvalidAmount);

        let err = service.create_product("   ", "X", 0).unwrap_err();
        assert_eq!(err.kind(), ProductErrorKind::InvalidAmount);

        let err = service.create_product("X", "Y", -1).unwrap_err();
        assert_eq!(err, ProductError::invalid_amount(-1, "Initial stock cannot be negative"));

        assert!(service.repository().calls().is_empty());
    }

    #[test]
    fn create_product_surfaces_storage_level_conflict() {
        let service = ProductService::new(FakeRepository {
            reject_creates: true,
            ..FakeRepository::default()
        });
        let err = service.create_product("Racer", "race-1", 0).unwrap_err();
        assert_eq!(err, ProductError::duplicate_sku("RACE-1"));
    }

    #[test]
    fn get_product_by_id_returns_product() {
        let (service, id) = seeded(10);
        let product = service.get_product_by_id(id).unwrap();
        assert_eq!(product.id_typed(), Some(id));
        assert_eq!(product.name(), "Test Product");
    }

    #[test]
    fn get_product_by_id_reports_missing_id() {
        let service = service();
        let missing = ProductId::from_i64(999);
        let err = service.get_product_by_id(missing).unwrap_err();
        assert_eq!(err, ProductError::ProductNotFound { product_id: missing });
    }

    #[test]
    fn get_all_products_passes_pagination_through() {
        let service = service();
        for i in 0..5 {
            service.create_product(&format!("P{i}"), &format!("P{i}"), 10).unwrap();
        }

        assert_eq!(service.get_all_products(0, DEFAULT_PAGE_LIMIT).unwrap().len(), 5);
        let page = service.get_all_products(1, 2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].sku().as_str(), "P1");
        assert!(service.repository().calls().contains(&"get_all:1:2".to_string()));
    }

    #[test]
    fn update_product_applies_trimmed_name_and_stock() {
        let (service, id) = seeded(10);
        let updated = service.update_product(id, Some("  New Name "), Some(20)).unwrap();
        assert_eq!(updated.name(), "New Name");
        assert_eq!(updated.stock(), 20);
        assert_eq!(updated.sku().as_str(), "TEST-001");
        assert_eq!(service.repository().count("update"), 1);
    }

    #[test]
    fn update_product_partial() {
        let (service, id) = seeded(10);
        let updated = service.update_product(id, Some("New Name"), None).unwrap();
        assert_eq!(updated.name(), "New Name");
        assert_eq!(updated.stock(), 10);
    }

    #[test]
    fn update_product_validates_before_persisting() {
        let (service, id) = seeded(10);

        let err = service.update_product(id, Some("  "), None).unwrap_err();
        assert_eq!(err.kind(), ProductErrorKind::InvalidAmount);

        let err = service.update_product(id, None, Some(-3)).unwrap_err();
        assert_eq!(err, ProductError::invalid_amount(-3, "Stock cannot be negative"));

        assert_eq!(service.repository().count("update"), 0);
        assert_eq!(service.get_product_by_id(id).unwrap().stock(), 10);
    }

    #[test]
    fn missing_ids_fail_for_update_and_delete() {
        let service = service();
        for raw in [0, 999, -7] {
            let missing = ProductId::from_i64(raw);
            let err = service.update_product(missing, Some("Test"), None).unwrap_err();
            assert_eq!(err, ProductError::not_found(missing));
            let err = service.delete_product(missing).unwrap_err();
            assert_eq!(err, ProductError::not_found(missing));
        }
        assert_eq!(service.repository().count("delete"), 0);
    }

    #[test]
    fn delete_product_removes_record() {
        let (service, id) = seeded(10);
        service.delete_product(id).unwrap();
        assert!(service.repository().calls().contains(&format!("delete:{id}")));
        assert_eq!(
            service.get_product_by_id(id).unwrap_err().kind(),
            ProductErrorKind::ProductNotFound
        );
    }

    #[test]
    fn increment_and_decrement_persist_changes() {
        let (service, id) = seeded(10);

        assert_eq!(service.increment_stock(id, 5).unwrap().stock(), 15);
        assert_eq!(service.increment_stock(id, DEFAULT_ADJUSTMENT).unwrap().stock(), 16);
        assert_eq!(service.decrement_stock(id, 3).unwrap().stock(), 13);
        assert_eq!(service.decrement_stock(id, DEFAULT_ADJUSTMENT).unwrap().stock(), 12);
        assert_eq!(service.repository().count("update"), 4);
    }

    #[test]
    fn rejected_adjustments_are_not_persisted() {
        let (service, id) = seeded(5);

        let err = service.increment_stock(id, 0).unwrap_err();
        assert_eq!(err.kind(), ProductErrorKind::InvalidAmount);

        let err = service.decrement_stock(id, 10).unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                current_stock: 5,
                requested_amount: 10
            }
        );

        assert_eq!(service.repository().count("update"), 0);
        assert_eq!(service.get_product_by_id(id).unwrap().stock(), 5);
    }

    #[test]
    fn adjustments_on_missing_product_report_not_found() {
        let service = service();
        let missing = ProductId::from_i64(42);
        assert_eq!(
            service.increment_stock(missing, 1).unwrap_err(),
            ProductError::not_found(missing)
        );
        assert_eq!(
            service.decrement_stock(missing, 1).unwrap_err(),
            ProductError::not_found(missing)
        );
    }

    #[test]
    fn end_to_end_stock_lifecycle() {
        let (service, id) = seeded(10);

        assert_eq!(service.increment_stock(id, 5).unwrap().stock(), 15);

        let err = service.decrement_stock(id, 20).unwrap_err();
        assert_eq!(err, ProductError::insufficient_stock(15, 20));
        assert_eq!(service.get_product_by_id(id).unwrap().stock(), 15);

        let drained = service.decrement_stock(id, 15).unwrap();
        assert_eq!(drained.stock(), 0);
        assert!(!drained.is_in_stock());
    }
}
