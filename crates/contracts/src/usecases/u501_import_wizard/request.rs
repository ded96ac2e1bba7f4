use serde::{Deserialize, Serialize};

use super::response::InvoiceHeader;

/// Параметры запроса `GET /api/import/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub source_id: String,
    pub query: String,
    /// Номер страницы (с 1)
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCodesRequest {
    pub codes: Vec<String>,
}

/// Что бэкенд делает с отправленной строкой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    /// Создать новый товар в каталоге
    Create,
    /// Товар уже есть: добавить количество к остатку
    AddStock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    pub external_id: String,
    pub code: String,
    pub name: String,
    pub cost_price: f64,
    pub price_retail: Option<f64>,
    pub price_wholesale: Option<f64>,
    pub image_url: Option<String>,
    pub stock_quantity: i32,
    pub action: ImportAction,
}

/// JSON `payload` part of `POST /api/import/execute`; the uploaded file, if
/// any, travels as a separate multipart part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub source_id: String,
    pub supplier_id: Option<String>,
    pub category_id: Option<String>,
    pub invoice: Option<InvoiceHeader>,
    pub items: Vec<ImportItem>,
}
