//! Product storage abstraction.

use std::sync::Arc;

use stockroom_core::ProductId;

use crate::error::ProductResult;
use crate::product::Product;
use crate::sku::Sku;

/// Capability set the product service needs from storage.
///
/// Implementations own durable state. They must:
/// - assign identity and timestamps in [`create`](ProductRepository::create);
/// - enforce SKU uniqueness themselves and report a conflict as
///   [`ProductError::DuplicateSku`](crate::ProductError::DuplicateSku), never as a raw storage error;
/// - report every other storage fault as
///   [`ProductError::Storage`](crate::ProductError::Storage).
pub trait ProductRepository: Send + Sync {
    fn create(&self, product: Product) -> ProductResult<Product>;
    fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>>;
    fn get_by_sku(&self, sku: &Sku) -> ProductResult<Option<Product>>;
    fn get_all(&self, skip: usize, limit: usize) -> ProductResult<Vec<Product>>;
    fn update(&self, product: Product) -> ProductResult<Product>;
    /// Returns whether a record was removed.
    fn delete(&self, id: ProductId) -> ProductResult<bool>;
}

impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    fn create(&self, product: Product) -> ProductResult<Product> {
        (**self).create(product)
    }

    fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        (**self).get_by_id(id)
    }

    fn get_by_sku(&self, sku: &Sku) -> ProductResult<Option<Product>> {
        (**self).get_by_sku(sku)
    }

    fn get_all(&self, skip: usize, limit: usize) -> ProductResult<Vec<Product>> {
        (**self).get_all(skip, limit)
    }

    fn update(&self, product: Product) -> ProductResult<Product> {
        (**self).update(product)
    }

    fn delete(&self, id: ProductId) -> ProductResult<bool> {
        (**self).delete(id)
    }
}
