use crate::shared::api_utils::{api_url, get_json, post_json, put_json};
use contracts::domain::a003_order::{CreateOrder, Order, UpdateOrder};

pub async fn list_orders() -> Result<Vec<Order>, String> {
    get_json(&api_url("/api/orders")).await
}

pub async fn create_order(order: &CreateOrder) -> Result<Order, String> {
    post_json(&api_url("/api/orders"), order).await
}

/// Status and line changes of an existing order
pub async fn update_order(id: &str, changes: &UpdateOrder) -> Result<Order, String> {
    let url = api_url(&format!("/api/orders/{}", urlencoding::encode(id)));
    put_json(&url, changes).await
}
