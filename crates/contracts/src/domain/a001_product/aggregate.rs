use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Товар каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub cost_price: f64,
    pub price_retail: f64,
    #[serde(default)]
    pub price_wholesale: Option<f64>,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub cost_price: f64,
    pub price_retail: f64,
    pub price_wholesale: Option<f64>,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub supplier_id: Option<String>,
    pub category_id: Option<String>,
}

/// Частичное обновление: отсутствующие поля API не меняет
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_retail: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_wholesale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Тело `POST /api/products/{id}/stock`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub quantity: i32,
    #[serde(default)]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_skips_absent_fields() {
        let update = UpdateProduct {
            price_retail: Some(19.9),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"priceRetail":19.9}"#);
    }

    #[test]
    fn test_product_minimal_json() {
        let json = r#"{"id":"p1","code":"A1","name":"Hammer","costPrice":4.0,"priceRetail":9.5}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.active);
        assert_eq!(product.stock_quantity, 0);
        assert_eq!(product.created_at, None);
    }
}
