use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;
use stockroom_core::ProductId;
use stockroom_products::{Product, ProductError, ProductRepository, ProductResult, Sku};

use super::{PgStore, page_bound, unique_violation};

const COLUMNS: &str = "id, name, sku, stock, created_at, updated_at";

/// Product table backed by Postgres. Listing is in id order.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    store: PgStore,
}

impl PgProductRepository {
    pub fn new(store: PgStore) -> Self {
        Self { store }
    }
}

fn storage(err: sqlx::Error) -> ProductError {
    ProductError::storage(err.to_string())
}

fn write_error(err: sqlx::Error, sku: &Sku) -> ProductError {
    match unique_violation(&err) {
        Some(_) => ProductError::duplicate_sku(sku.as_str()),
        None => storage(err),
    }
}

fn decode(row: &PgRow) -> ProductResult<Product> {
    let id: i64 = row.try_get("id").map_err(storage)?;
    let name: String = row.try_get("name").map_err(storage)?;
    let sku: String = row.try_get("sku").map_err(storage)?;
    let stock: i64 = row.try_get("stock").map_err(storage)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(storage)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(storage)?;

    let corrupt = |err: ProductError| ProductError::storage(format!("product row {id} is invalid: {err}"));
    let sku = Sku::parse(&sku).map_err(corrupt)?;
    Product::from_parts(Some(ProductId::from_i64(id)), name, sku, stock, created_at, updated_at)
        .map_err(corrupt)
}

impl ProductRepository for PgProductRepository {
    fn create(&self, product: Product) -> ProductResult<Product> {
        let sql = format!(
            "INSERT INTO products (name, sku, stock, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING {COLUMNS}"
        );
        let row = self
            .store
            .block_on(
                sqlx::query(&sql)
                    .bind(product.name())
                    .bind(product.sku().as_str())
                    .bind(product.stock())
                    .bind(Utc::now())
                    .fetch_one(self.store.pool()),
            )
            .map_err(|err| write_error(err, product.sku()))?;

        let stored = decode(&row)?;
        tracing::debug!(product_id = ?stored.id_typed(), "product row inserted");
        Ok(stored)
    }

    fn get_by_id(&self, id: ProductId) -> ProductResult<Option<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let row = self
            .store
            .block_on(sqlx::query(&sql).bind(id.as_i64()).fetch_optional(self.store.pool()))
            .map_err(storage)?;
        row.as_ref().map(decode).transpose()
    }

    fn get_by_sku(&self, sku: &Sku) -> ProductResult<Option<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE sku = $1");
        let row = self
            .store
            .block_on(sqlx::query(&sql).bind(sku.as_str()).fetch_optional(self.store.pool()))
            .map_err(storage)?;
        row.as_ref().map(decode).transpose()
    }

    fn get_all(&self, skip: usize, limit: usize) -> ProductResult<Vec<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM products ORDER BY id LIMIT $1 OFFSET $2");
        let rows = self
            .store
            .block_on(
                sqlx::query(&sql)
                    .bind(page_bound(limit))
                    .bind(page_bound(skip))
                    .fetch_all(self.store.pool()),
            )
            .map_err(storage)?;
        rows.iter().map(decode).collect()
    }

    fn update(&self, product: Product) -> ProductResult<Product> {
        let id = product
            .id_typed()
            .ok_or_else(|| ProductError::storage("cannot update a product without an id"))?;

        let sql = format!(
            "UPDATE products SET name = $2, sku = $3, stock = $4, updated_at = $5 \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = self
            .store
            .block_on(
                sqlx::query(&sql)
                    .bind(id.as_i64())
                    .bind(product.name())
                    .bind(product.sku().as_str())
                    .bind(product.stock())
                    .bind(product.updated_at())
                    .fetch_optional(self.store.pool()),
            )
            .map_err(|err| write_error(err, product.sku()))?;

        match row {
            Some(row) => decode(&row),
            None => Err(ProductError::not_found(id)),
        }
    }

    fn delete(&self, id: ProductId) -> ProductResult<bool> {
        let done = self
            .store
            .block_on(
                sqlx::query("DELETE FROM products WHERE id = $1")
                    .bind(id.as_i64())
                    .execute(self.store.pool()),
            )
            .map_err(storage)?;
        Ok(done.rows_affected() > 0)
    }
}
