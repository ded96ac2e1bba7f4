use crate::shared::api_utils::{api_url, get_json, post_json, put_json};
use contracts::domain::a002_customer::{CreateCustomer, Customer, UpdateCustomer};

pub async fn list_customers() -> Result<Vec<Customer>, String> {
    get_json(&api_url("/api/customers")).await
}

pub async fn create_customer(customer: &CreateCustomer) -> Result<Customer, String> {
    post_json(&api_url("/api/customers"), customer).await
}

pub async fn update_customer(id: &str, customer: &UpdateCustomer) -> Result<Customer, String> {
    let url = api_url(&format!("/api/customers/{}", urlencoding::encode(id)));
    put_json(&url, customer).await
}
