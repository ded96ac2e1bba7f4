use crate::shared::api_utils::{api_url, get_json, post_json, put_json};
use contracts::domain::a005_shipping_zone::{CreateShippingZone, ShippingZone, UpdateShippingZone};

pub async fn list_shipping_zones() -> Result<Vec<ShippingZone>, String> {
    get_json(&api_url("/api/shipping-zones")).await
}

pub async fn create_shipping_zone(zone: &CreateShippingZone) -> Result<ShippingZone, String> {
    post_json(&api_url("/api/shipping-zones"), zone).await
}

pub async fn update_shipping_zone(id: &str, zone: &UpdateShippingZone) -> Result<ShippingZone, String> {
    let url = api_url(&format!("/api/shipping-zones/{}", urlencoding::encode(id)));
    put_json(&url, zone).await
}
