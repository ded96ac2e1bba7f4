use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInvoiceLine {
    #[serde(default)]
    pub product_id: Option<String>,
    pub description: String,
    pub quantity: i32,
    pub unit_cost: f64,
}

/// Входящая накладная поставщика
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierInvoice {
    pub id: String,
    pub supplier_id: String,
    pub number: String,
    pub issued_on: NaiveDate,
    pub total: f64,
    #[serde(default)]
    pub lines: Vec<SupplierInvoiceLine>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierInvoice {
    pub supplier_id: String,
    pub number: String,
    pub issued_on: NaiveDate,
    pub total: f64,
    pub lines: Vec<SupplierInvoiceLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierInvoice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}
