use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::Utc;
use stockroom_core::ProductId;
use stockroom_products::{Product, ProductError, ProductRepository, ProductResult, Sku};

#[derive(Debug, Default)]
struct ProductTable {
    rows: BTreeMap<ProductId, Product>,
    by_sku: HashMap<Sku, ProductId>,
    last_id: i64,
}

/// In-memory product store. Rows are listed in id order.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: RwLock<ProductTable>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ProductError {
    ProductError::storage("product table lock poisoned")
}

impl ProductRepository for InMemoryProductRepository {
    fn create(&self, product: Product) -> ProductResult<Product> {
        let mut table = self.table.write().map_err(|_| poisoned())?;

        if table.by_sku.contains_key(product.sku()) {
            return Err(ProductError::duplicate_sku(product.sku().as_str()));
        }

        table.last_id += 1;
        let id = ProductId::from_i64(table.last_id);
        let stored = product.with_identity(id, Utc::now());

        table.by_sku.insert(stored.sku().clone(), id);
        table.rows.insert(id, stored.clone());
        tracing::debug!(product_id = %id, "product row inserted");
        Ok(stored)
    }

    fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    fn get_by_sku(&self, sku: &Sku) -> ProductResult<Option<Product>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .by_sku
            .get(sku)
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    fn get_all(&self, skip: usize, limit: usize) -> ProductResult<Vec<Product>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().skip(skip).take(limit).cloned().collect())
    }

    fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product
            .id_typed()
            .ok_or_else(|| ProductError::storage("cannot update a product without an id"))?;

        let mut table = self.table.write().map_err(|_| poisoned())?;
        let previous_sku = match table.rows.get(&id) {
            Some(existing) => existing.sku().clone(),
            None => return Err(ProductError::not_found(id)),
        };

        if &previous_sku != product.sku() {
            if table.by_sku.contains_key(product.sku()) {
                return Err(ProductError::duplicate_sku(product.sku().as_str()));
            }
            table.by_sku.remove(&previous_sku);
            table.by_sku.insert(product.sku().clone(), id);
        }

        table.rows.insert(id, product.clone());
        Ok(product)
    }

    fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        match table.rows.remove(&id) {
            Some(removed) => {
                table.by_sku.remove(removed.sku());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
