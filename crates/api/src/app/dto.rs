use serde::Deserialize;
use serde_json::{json, Value};

use stockroom_auth::User;
use stockroom_products::{Product, DEFAULT_ADJUSTMENT, DEFAULT_PAGE_LIMIT};

pub const PRODUCT_NAME_MAX_CHARS: usize = 200;
pub const SKU_MAX_CHARS: usize = 50;
pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub stock: i64,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_len("name", &self.name, 1, PRODUCT_NAME_MAX_CHARS)?;
        check_len("sku", &self.sku, 1, SKU_MAX_CHARS)?;
        check_non_negative("stock", self.stock)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub stock: Option<i64>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            check_len("name", name, 1, PRODUCT_NAME_MAX_CHARS)?;
        }
        if let Some(stock) = self.stock {
            check_non_negative("stock", stock)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct StockAdjustmentRequest {
    #[serde(default = "default_adjustment")]
    pub amount: i64,
}

fn default_adjustment() -> i64 {
    DEFAULT_ADJUSTMENT
}

/// Parse an optional adjustment body. An empty body means the default amount.
pub fn parse_adjustment(body: &[u8]) -> Result<i64, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DEFAULT_ADJUSTMENT);
    }
    let request: StockAdjustmentRequest =
        serde_json::from_slice(body).map_err(|e| format!("invalid adjustment body: {e}"))?;
    if request.amount <= 0 {
        return Err("amount must be greater than 0".to_string());
    }
    Ok(request.amount)
}

#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_len("username", &self.username, USERNAME_MIN_CHARS, USERNAME_MAX_CHARS)?;
        if !looks_like_email(&self.email) {
            return Err("email must be a valid email address".to_string());
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(format!(
                "password must be at least {PASSWORD_MIN_CHARS} characters"
            ));
        }
        Ok(())
    }
}

/// Form body for `/auth/login` (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(format!(
            "{field} must be between {min} and {max} characters (got {len})"
        ));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: i64) -> Result<(), String> {
    if value < 0 {
        return Err(format!("{field} must be greater than or equal to 0"));
    }
    Ok(())
}

/// Shape check only: `local@domain.tld`, no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(product: &Product) -> Value {
    json!({
        "id": product.id_typed().map(|id| id.as_i64()),
        "name": product.name(),
        "sku": product.sku().as_str(),
        "stock": product.stock(),
        "created_at": product.created_at().to_rfc3339(),
        "updated_at": product.updated_at().to_rfc3339(),
    })
}

pub fn user_to_json(user: &User) -> Value {
    json!({
        "id": user.id_typed().map(|id| id.as_i64()),
        "username": user.username(),
        "email": user.email(),
        "is_active": user.is_active(),
    })
}
