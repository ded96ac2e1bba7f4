//! Поставщики; мастер импорта только читает список

use crate::shared::api_utils::{api_url, get_json, post_json, put_json};
use contracts::domain::a004_supplier::{CreateSupplier, Supplier, UpdateSupplier};

pub async fn list_suppliers() -> Result<Vec<Supplier>, String> {
    get_json(&api_url("/api/suppliers")).await
}

pub async fn create_supplier(supplier: &CreateSupplier) -> Result<Supplier, String> {
    post_json(&api_url("/api/suppliers"), supplier).await
}

pub async fn update_supplier(id: &str, supplier: &UpdateSupplier) -> Result<Supplier, String> {
    let url = api_url(&format!("/api/suppliers/{}", urlencoding::encode(id)));
    put_json(&url, supplier).await
}
