use serde::{Deserialize, Serialize};

use super::response::SearchItem;

/// Candidate row of the import wizard.
///
/// Lives only while the wizard holds a batch; it is never persisted as such.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductToImport {
    /// Идентификатор строки в пакете, не меняется при догрузке страниц
    pub row_id: usize,
    pub external_id: String,
    pub code: String,
    pub name: String,
    pub cost_price: f64,
    pub price_retail: Option<f64>,
    pub price_wholesale: Option<f64>,
    pub image_url: Option<String>,
    pub stock_quantity: i32,
    pub selected: bool,
    /// Код уже есть в каталоге (подтверждено сервером)
    pub exists: bool,
}

impl ProductToImport {
    pub fn from_item(row_id: usize, item: SearchItem, selected: bool) -> Self {
        Self {
            row_id,
            external_id: item.external_id,
            code: item.code.unwrap_or_default().trim().to_string(),
            name: item.name,
            cost_price: item.cost_price,
            price_retail: item.suggested_retail,
            price_wholesale: item.suggested_wholesale,
            image_url: item.image_url.filter(|url| !url.trim().is_empty()),
            stock_quantity: item.stock.unwrap_or(0).max(0),
            selected,
            exists: false,
        }
    }

    /// Код без пробелов, `None` если пустой
    pub fn normalized_code(&self) -> Option<&str> {
        let code = self.code.trim();
        if code.is_empty() {
            None
        } else {
            Some(code)
        }
    }

    /// Selected rows that will be created (not stock additions) need a retail price
    pub fn needs_retail_price(&self) -> bool {
        self.selected && !self.exists
    }

    pub fn has_valid_retail_price(&self) -> bool {
        matches!(self.price_retail, Some(price) if price > 0.0)
    }
}

/// Reconciliation status of a row against its batch and the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowStatus {
    New,
    DuplicateInBatch,
    ExistsInCatalog,
}

impl RowStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::New => "New",
            RowStatus::DuplicateInBatch => "Duplicate code",
            RowStatus::ExistsInCatalog => "Add stock",
        }
    }

    /// Вариант бейджа для таблицы
    pub fn badge_variant(&self) -> &'static str {
        match self {
            RowStatus::New => "success",
            RowStatus::DuplicateInBatch => "error",
            RowStatus::ExistsInCatalog => "warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: Option<&str>) -> SearchItem {
        SearchItem {
            external_id: "ext-1".to_string(),
            code: code.map(str::to_string),
            name: "Cable 2m".to_string(),
            cost_price: 3.5,
            suggested_retail: None,
            suggested_wholesale: None,
            image_url: Some("  ".to_string()),
            stock: Some(-4),
        }
    }

    #[test]
    fn test_from_item_normalizes_fields() {
        let row = ProductToImport::from_item(7, item(Some("  CB-2 ")), true);
        assert_eq!(row.row_id, 7);
        assert_eq!(row.code, "CB-2");
        assert_eq!(row.image_url, None);
        assert_eq!(row.stock_quantity, 0);
        assert!(row.selected);
        assert!(!row.exists);
    }

    #[test]
    fn test_normalized_code_blank() {
        let mut row = ProductToImport::from_item(0, item(None), false);
        assert_eq!(row.normalized_code(), None);
        row.code = "   ".to_string();
        assert_eq!(row.normalized_code(), None);
    }

    #[test]
    fn test_retail_price_validity() {
        let mut row = ProductToImport::from_item(0, item(Some("A")), true);
        assert!(!row.has_valid_retail_price());
        row.price_retail = Some(0.0);
        assert!(!row.has_valid_retail_price());
        row.price_retail = Some(-1.0);
        assert!(!row.has_valid_retail_price());
        row.price_retail = Some(0.01);
        assert!(row.has_valid_retail_price());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&RowStatus::DuplicateInBatch).unwrap();
        assert_eq!(json, "\"duplicate-in-batch\"");
    }
}
