//! Товары каталога

use crate::shared::api_utils::{api_url, get_json, post_json, put_json};
use contracts::domain::a001_product::{CreateProduct, Product, StockAdjustment, UpdateProduct};

pub async fn list_products() -> Result<Vec<Product>, String> {
    get_json(&api_url("/api/products")).await
}

pub async fn create_product(product: &CreateProduct) -> Result<Product, String> {
    post_json(&api_url("/api/products"), product).await
}

pub async fn update_product(id: &str, changes: &UpdateProduct) -> Result<Product, String> {
    let url = api_url(&format!("/api/products/{}", urlencoding::encode(id)));
    put_json(&url, changes).await
}

/// Add (or with a negative quantity, remove) stock of an existing product
pub async fn adjust_stock(id: &str, adjustment: &StockAdjustment) -> Result<Product, String> {
    let url = api_url(&format!("/api/products/{}/stock", urlencoding::encode(id)));
    post_json(&url, adjustment).await
}
