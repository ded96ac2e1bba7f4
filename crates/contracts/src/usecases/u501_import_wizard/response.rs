use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Товар из результатов поиска или разобранного файла
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(alias = "id")]
    pub external_id: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(alias = "price", default)]
    pub cost_price: f64,
    #[serde(default)]
    pub suggested_retail: Option<f64>,
    #[serde(default)]
    pub suggested_wholesale: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Реквизиты накладной поставщика, извлечённые бэкендом
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHeader {
    pub number: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(default)]
    pub total: Option<f64>,
}

/// Результат `parse-invoice` и `parse-excel`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFileResponse {
    #[serde(default)]
    pub invoice: Option<InvoiceHeader>,
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckCodesResponse {
    /// Коды из запроса, которые уже есть в каталоге
    pub existing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    #[serde(default)]
    pub imported: u32,
    #[serde(default)]
    pub stock_updated: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub errors: u32,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl ExecuteResponse {
    pub fn has_partial_failure(&self) -> bool {
        self.skipped > 0 || self.errors > 0
    }

    pub fn processed(&self) -> u32 {
        self.imported + self.stock_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_item_accepts_short_field_names() {
        let json = r#"{"id":"991","name":"Drill","price":41.9}"#;
        let item: SearchItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.external_id, "991");
        assert_eq!(item.cost_price, 41.9);
        assert_eq!(item.code, None);
        assert_eq!(item.stock, None);
    }

    #[test]
    fn test_parsed_invoice_with_header() {
        let json = r#"{
            "invoice": {"number": "F-0012", "supplierName": "Acme", "issuedOn": "2024-03-05", "total": 120.5},
            "items": [{"externalId": "l1", "code": "A1", "name": "Screws", "costPrice": 1.2, "stock": 100}]
        }"#;
        let parsed: ParsedFileResponse = serde_json::from_str(json).unwrap();
        let invoice = parsed.invoice.unwrap();
        assert_eq!(invoice.number, "F-0012");
        assert_eq!(invoice.issued_on, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parsed.items[0].stock, Some(100));
    }

    #[test]
    fn test_execute_response_partial_failure() {
        let ok = ExecuteResponse {
            imported: 3,
            stock_updated: 2,
            ..Default::default()
        };
        assert!(!ok.has_partial_failure());
        assert_eq!(ok.processed(), 5);

        let partial: ExecuteResponse =
            serde_json::from_str(r#"{"imported":1,"skipped":2,"errors":1}"#).unwrap();
        assert!(partial.has_partial_failure());
    }
}
