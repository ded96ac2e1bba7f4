use serde::{Deserialize, Serialize};

/// Тип внешнего источника товаров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Веб-каталог поставщика, поиск по тексту
    WebCatalog,
    /// PDF-накладная, разбирается на сервере
    PdfInvoice,
    /// Письма поставщиков, проиндексированные бэкендом, поиск по тексту
    Email,
    /// Excel-файл, разбирается на сервере
    Excel,
}

impl SourceKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceKind::WebCatalog => "Web catalog",
            SourceKind::PdfInvoice => "PDF invoice",
            SourceKind::Email => "Email",
            SourceKind::Excel => "Excel sheet",
        }
    }

    /// Файловые источники загружаются, а не ищутся
    pub fn is_upload(&self) -> bool {
        matches!(self, SourceKind::PdfInvoice | SourceKind::Excel)
    }

    /// Every row of an uploaded document is meant to be imported, search
    /// results are picked by hand.
    pub fn selects_by_default(&self) -> bool {
        self.is_upload()
    }

    /// Значение атрибута `accept` для выбора файла
    pub fn accept(&self) -> Option<&'static str> {
        match self {
            SourceKind::PdfInvoice => Some(".pdf,application/pdf"),
            SourceKind::Excel => Some(".xlsx,.xls"),
            SourceKind::WebCatalog | SourceKind::Email => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SourceKind::WebCatalog => "globe",
            SourceKind::PdfInvoice => "file",
            SourceKind::Email => "mail",
            SourceKind::Excel => "sheet",
        }
    }
}

/// Источник из `GET /api/import/sources`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSource {
    pub id: String,
    pub name: String,
    pub kind: SourceKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}
