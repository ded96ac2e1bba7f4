//! Import wizard state and its transitions
//!
//! `ImportWizardState` is the only mutable value of the wizard. Views wrap it
//! in one signal and call the methods below; every derived value (statuses,
//! summary, gate) is recomputed from the rows on demand.

use std::collections::{BTreeSet, HashSet};

use super::code_check::{CodeCheckRequest, CodeCheckSequencer};
use super::gate::{proceed_blocker, ProceedBlocker};
use super::pagination::{PageRequest, SearchPager};
use super::pricing::{apply_margin, MarginError, MarginMultiplier};
use super::product::{ProductToImport, RowStatus};
use super::reconcile::{apply_existing_codes, classify, unique_codes};
use super::request::{ExecuteRequest, ImportAction, ImportItem};
use super::response::{ExecuteResponse, InvoiceHeader, ParsedFileResponse, SearchItem};
use super::settings::WizardSettings;
use super::source::ImportSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    SelectSource,
    /// Поиск или загрузка файла, в зависимости от источника
    Search,
    Configure,
    Confirm,
    Done,
}

impl WizardStep {
    pub fn all() -> [WizardStep; 5] {
        [
            WizardStep::SelectSource,
            WizardStep::Search,
            WizardStep::Configure,
            WizardStep::Confirm,
            WizardStep::Done,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            WizardStep::SelectSource => 0,
            WizardStep::Search => 1,
            WizardStep::Configure => 2,
            WizardStep::Confirm => 3,
            WizardStep::Done => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::SelectSource => "Source",
            WizardStep::Search => "Products",
            WizardStep::Configure => "Prices",
            WizardStep::Confirm => "Confirm",
            WizardStep::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardError {
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },
    SourceDisabled(String),
    /// Search requested on an upload source or the other way round
    SourceMismatch,
    NoSource,
    EmptyBatch,
    /// An existence check is in flight or waiting for edits to settle
    CheckingCodes,
    Blocked(ProceedBlocker),
    Margin(MarginError),
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WizardError::WrongStep { expected, actual } => write!(
                f,
                "Action belongs to step \"{}\", wizard is at \"{}\"",
                expected.title(),
                actual.title()
            ),
            WizardError::SourceDisabled(name) => write!(f, "Source \"{}\" is disabled", name),
            WizardError::SourceMismatch => {
                write!(f, "The selected source does not support this action")
            }
            WizardError::NoSource => write!(f, "No source selected"),
            WizardError::EmptyBatch => write!(f, "No products loaded"),
            WizardError::CheckingCodes => {
                write!(f, "Still checking which products already exist")
            }
            WizardError::Blocked(blocker) => write!(f, "{}", blocker),
            WizardError::Margin(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for WizardError {}

impl From<MarginError> for WizardError {
    fn from(err: MarginError) -> Self {
        WizardError::Margin(err)
    }
}

/// Счётчики над таблицей пакета
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub selected: usize,
    pub new: usize,
    pub existing: usize,
    pub duplicates: usize,
    /// Selected rows to create that still lack a retail price
    pub missing_price: usize,
}

/// Payload ready for `execute` plus the codes held back locally
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    pub request: ExecuteRequest,
    /// Codes of selected rows not submitted because an earlier selected row
    /// carries the same code
    pub locally_skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportWizardState {
    settings: WizardSettings,
    step: WizardStep,
    source: Option<ImportSource>,
    rows: Vec<ProductToImport>,
    next_row_id: usize,
    /// Коды, подтверждённые последней актуальной проверкой
    existing_codes: BTreeSet<String>,
    pager: SearchPager,
    code_check: CodeCheckSequencer,
    margin: Option<MarginMultiplier>,
    supplier_id: Option<String>,
    category_id: Option<String>,
    invoice: Option<InvoiceHeader>,
    result: Option<ExecuteResponse>,
}

impl ImportWizardState {
    pub fn new(settings: WizardSettings) -> Self {
        let pager = SearchPager::new(settings.page_size);
        Self {
            settings,
            step: WizardStep::SelectSource,
            source: None,
            rows: Vec::new(),
            next_row_id: 0,
            existing_codes: BTreeSet::new(),
            pager,
            code_check: CodeCheckSequencer::new(),
            margin: None,
            supplier_id: None,
            category_id: None,
            invoice: None,
            result: None,
        }
    }

    /// Вернуться к выбору источника с пустым пакетом
    pub fn reset(&mut self) {
        // Счётчики сохраняются, чтобы ответы на старые запросы оставались устаревшими
        let mut code_check = std::mem::take(&mut self.code_check);
        code_check.invalidate();
        let mut pager = self.pager.clone();
        pager.reset();
        *self = Self::new(self.settings.clone());
        self.code_check = code_check;
        self.pager = pager;
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    // === Шаг 1: источник ===

    pub fn select_source(&mut self, source: ImportSource) -> Result<(), WizardError> {
        self.expect_step(WizardStep::SelectSource)?;
        if !source.enabled {
            return Err(WizardError::SourceDisabled(source.name));
        }
        self.source = Some(source);
        self.step = WizardStep::Search;
        Ok(())
    }

    // === Шаг 2: поиск / загрузка ===

    fn search_source_id(&self) -> Result<String, WizardError> {
        let source = self.source.as_ref().ok_or(WizardError::NoSource)?;
        if source.kind.is_upload() {
            return Err(WizardError::SourceMismatch);
        }
        Ok(source.id.clone())
    }

    /// Start a new search on the selected source from page 1
    pub fn start_search(&mut self, query: &str) -> Result<PageRequest, WizardError> {
        self.expect_step(WizardStep::Search)?;
        let source_id = self.search_source_id()?;
        Ok(self.pager.start(&source_id, query))
    }

    /// Next page of the current search, if there is one
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.step != WizardStep::Search && self.step != WizardStep::Configure {
            return None;
        }
        self.pager.begin_load_more()
    }

    /// Page received for `ticket`. The first page replaces the batch, later
    /// pages are appended. Stale pages are dropped and `false` is returned.
    pub fn receive_page(&mut self, ticket: u64, items: Vec<SearchItem>) -> bool {
        if !self.pager.complete(ticket, items.len()) {
            return false;
        }
        if self.pager.is_first_page() {
            self.replace_batch(items);
        } else {
            self.append_items(items);
        }
        true
    }

    /// Search request failed: restore the page counter, keep the rows
    pub fn fail_page(&mut self, ticket: u64) -> bool {
        self.pager.fail(ticket)
    }

    /// Rows parsed from an uploaded invoice or sheet
    pub fn load_parsed_file(&mut self, parsed: ParsedFileResponse) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Search)?;
        let source = self.source.as_ref().ok_or(WizardError::NoSource)?;
        if !source.kind.is_upload() {
            return Err(WizardError::SourceMismatch);
        }
        self.invoice = parsed.invoice;
        self.replace_batch(parsed.items);
        Ok(())
    }

    fn select_by_default(&self) -> bool {
        self.source
            .as_ref()
            .map_or(false, |source| source.kind.selects_by_default())
    }

    fn replace_batch(&mut self, items: Vec<SearchItem>) {
        self.rows.clear();
        self.existing_codes.clear();
        self.code_check.invalidate();
        self.margin = None;
        self.append_items(items);
    }

    fn append_items(&mut self, items: Vec<SearchItem>) {
        let selected = self.select_by_default();
        for item in items {
            let row = ProductToImport::from_item(self.next_row_id, item, selected);
            self.next_row_id += 1;
            self.rows.push(row);
        }
    }

    pub fn go_to_configure(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Search)?;
        if self.rows.is_empty() {
            return Err(WizardError::EmptyBatch);
        }
        self.step = WizardStep::Configure;
        Ok(())
    }

    // === Правка строк ===

    fn row_mut(&mut self, row_id: usize) -> Option<&mut ProductToImport> {
        self.rows.iter_mut().find(|row| row.row_id == row_id)
    }

    pub fn row(&self, row_id: usize) -> Option<&ProductToImport> {
        self.rows.iter().find(|row| row.row_id == row_id)
    }

    /// Returns `true` when the code actually changed, i.e. a new existence
    /// check is due. The row keeps the existing flag only if its new code is
    /// among the confirmed ones.
    pub fn edit_code(&mut self, row_id: usize, code: &str) -> bool {
        let code = code.trim();
        let exists = self.existing_codes.contains(code);
        let changed = match self.row_mut(row_id) {
            Some(row) if row.code != code => {
                row.code = code.to_string();
                row.exists = exists;
                true
            }
            _ => false,
        };
        if changed {
            self.code_check.mark_due();
        }
        changed
    }

    pub fn edit_name(&mut self, row_id: usize, name: &str) {
        if let Some(row) = self.row_mut(row_id) {
            row.name = name.to_string();
        }
    }

    pub fn edit_retail_price(&mut self, row_id: usize, price: Option<f64>) {
        if let Some(row) = self.row_mut(row_id) {
            row.price_retail = price.filter(|p| p.is_finite());
        }
    }

    pub fn edit_wholesale_price(&mut self, row_id: usize, price: Option<f64>) {
        if let Some(row) = self.row_mut(row_id) {
            row.price_wholesale = price.filter(|p| p.is_finite());
        }
    }

    pub fn edit_stock(&mut self, row_id: usize, quantity: i32) {
        if let Some(row) = self.row_mut(row_id) {
            row.stock_quantity = quantity.max(0);
        }
    }

    pub fn set_selected(&mut self, row_id: usize, selected: bool) {
        if let Some(row) = self.row_mut(row_id) {
            row.selected = selected;
        }
    }

    pub fn toggle_row(&mut self, row_id: usize) {
        if let Some(row) = self.row_mut(row_id) {
            row.selected = !row.selected;
        }
    }

    pub fn set_all_selected(&mut self, selected: bool) {
        for row in self.rows.iter_mut() {
            row.selected = selected;
        }
    }

    // === Проверка существования ===

    /// Issue an existence check for the current codes. With no codes the
    /// flags are cleared right away and nothing needs to be sent.
    pub fn begin_code_check(&mut self) -> Option<CodeCheckRequest> {
        let codes = unique_codes(&self.rows);
        if codes.is_empty() {
            self.code_check.invalidate();
            self.existing_codes.clear();
            apply_existing_codes(&mut self.rows, &self.existing_codes);
            return None;
        }
        let seq = self.code_check.issue();
        Some(CodeCheckRequest { seq, codes })
    }

    /// Apply the answer to check `seq`. Answers to superseded checks are
    /// ignored and `false` is returned.
    pub fn resolve_code_check(&mut self, seq: u64, existing: Vec<String>) -> bool {
        if !self.code_check.settle(seq) {
            return false;
        }
        self.existing_codes = existing
            .into_iter()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect();
        apply_existing_codes(&mut self.rows, &self.existing_codes);
        true
    }

    /// Проверка не удалась, флаги не меняются
    pub fn fail_code_check(&mut self, seq: u64) -> bool {
        self.code_check.settle(seq)
    }

    pub fn is_checking_codes(&self) -> bool {
        self.code_check.is_pending()
    }

    // === Шаг 3: настройка ===

    pub fn apply_margin(&mut self, multiplier: MarginMultiplier) -> usize {
        self.margin = Some(multiplier);
        apply_margin(&mut self.rows, multiplier)
    }

    pub fn apply_custom_margin(&mut self, value: f64) -> Result<usize, WizardError> {
        let multiplier = MarginMultiplier::custom(
            value,
            self.settings.custom_margin_min,
            self.settings.custom_margin_max,
        )?;
        Ok(self.apply_margin(multiplier))
    }

    pub fn set_supplier(&mut self, supplier_id: Option<String>) {
        self.supplier_id = supplier_id.filter(|id| !id.is_empty());
    }

    pub fn set_category(&mut self, category_id: Option<String>) {
        self.category_id = category_id.filter(|id| !id.is_empty());
    }

    pub fn set_invoice(&mut self, invoice: Option<InvoiceHeader>) {
        self.invoice = invoice;
    }

    pub fn go_to_confirm(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Configure)?;
        if self.code_check.is_pending() {
            return Err(WizardError::CheckingCodes);
        }
        if let Some(blocker) = proceed_blocker(&self.rows) {
            return Err(WizardError::Blocked(blocker));
        }
        self.step = WizardStep::Confirm;
        Ok(())
    }

    // === Шаг 4: подтверждение ===

    /// Build the execute payload from the selected rows.
    ///
    /// Existing rows become stock additions. Of several selected rows sharing
    /// a code only the first is submitted.
    pub fn build_execute_request(&self) -> Result<SubmissionPlan, WizardError> {
        self.expect_step(WizardStep::Confirm)?;
        let source = self.source.as_ref().ok_or(WizardError::NoSource)?;
        if let Some(blocker) = proceed_blocker(&self.rows) {
            return Err(WizardError::Blocked(blocker));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut items = Vec::new();
        let mut locally_skipped = Vec::new();
        for row in self.rows.iter().filter(|row| row.selected) {
            if let Some(code) = row.normalized_code() {
                if !seen.insert(code) {
                    locally_skipped.push(code.to_string());
                    continue;
                }
            }
            items.push(ImportItem {
                external_id: row.external_id.clone(),
                code: row.code.trim().to_string(),
                name: row.name.trim().to_string(),
                cost_price: row.cost_price,
                price_retail: row.price_retail,
                price_wholesale: row.price_wholesale,
                image_url: row.image_url.clone(),
                stock_quantity: row.stock_quantity,
                action: if row.exists {
                    ImportAction::AddStock
                } else {
                    ImportAction::Create
                },
            });
        }

        Ok(SubmissionPlan {
            request: ExecuteRequest {
                source_id: source.id.clone(),
                supplier_id: self.supplier_id.clone(),
                category_id: self.category_id.clone(),
                invoice: self.invoice.clone(),
                items,
            },
            locally_skipped,
        })
    }

    /// Импорт завершён: сохранить результат, очистить пакет
    pub fn complete_import(&mut self, result: ExecuteResponse) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Confirm)?;
        self.rows.clear();
        self.existing_codes.clear();
        self.code_check.invalidate();
        self.result = Some(result);
        self.step = WizardStep::Done;
        Ok(())
    }

    /// One step back. Leaving the search step forgets the source and batch.
    pub fn back(&mut self) {
        match self.step {
            WizardStep::SelectSource | WizardStep::Done => {}
            WizardStep::Search => self.reset(),
            WizardStep::Configure => self.step = WizardStep::Search,
            WizardStep::Confirm => self.step = WizardStep::Configure,
        }
    }

    // === Производные значения ===

    pub fn statuses(&self) -> Vec<RowStatus> {
        classify(&self.rows, &self.existing_codes)
    }

    pub fn summary(&self) -> BatchSummary {
        let statuses = self.statuses();
        let mut summary = BatchSummary {
            total: self.rows.len(),
            ..Default::default()
        };
        for (row, status) in self.rows.iter().zip(statuses) {
            match status {
                RowStatus::New => summary.new += 1,
                RowStatus::ExistsInCatalog => summary.existing += 1,
                RowStatus::DuplicateInBatch => summary.duplicates += 1,
            }
            if row.selected {
                summary.selected += 1;
                if row.needs_retail_price() && !row.has_valid_retail_price() {
                    summary.missing_price += 1;
                }
            }
        }
        summary
    }

    pub fn proceed_blocker(&self) -> Option<ProceedBlocker> {
        proceed_blocker(&self.rows)
    }

    pub fn can_proceed(&self) -> bool {
        self.proceed_blocker().is_none()
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn source(&self) -> Option<&ImportSource> {
        self.source.as_ref()
    }

    pub fn rows(&self) -> &[ProductToImport] {
        &self.rows
    }

    pub fn pager(&self) -> &SearchPager {
        &self.pager
    }

    pub fn margin(&self) -> Option<MarginMultiplier> {
        self.margin
    }

    pub fn supplier_id(&self) -> Option<&str> {
        self.supplier_id.as_deref()
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category_id.as_deref()
    }

    pub fn invoice(&self) -> Option<&InvoiceHeader> {
        self.invoice.as_ref()
    }

    pub fn result(&self) -> Option<&ExecuteResponse> {
        self.result.as_ref()
    }
}

impl Default for ImportWizardState {
    fn default() -> Self {
        Self::new(WizardSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_import_wizard::source::SourceKind;

    fn source(kind: SourceKind) -> ImportSource {
        ImportSource {
            id: "src-1".to_string(),
            name: "Acme".to_string(),
            kind,
            description: None,
            enabled: true,
        }
    }

    fn item(n: usize, code: &str, cost: f64) -> SearchItem {
        SearchItem {
            external_id: format!("ext-{}", n),
            code: Some(code.to_string()),
            name: format!("Product {}", n),
            cost_price: cost,
            suggested_retail: None,
            suggested_wholesale: None,
            image_url: None,
            stock: Some(2),
        }
    }

    fn items(count: usize, offset: usize) -> Vec<SearchItem> {
        (offset..offset + count)
            .map(|n| item(n, &format!("C{}", n), 10.0))
            .collect()
    }

    fn searching() -> ImportWizardState {
        let mut state = ImportWizardState::default();
        state.select_source(source(SourceKind::WebCatalog)).unwrap();
        state
    }

    fn configured(batch: Vec<SearchItem>) -> ImportWizardState {
        let mut state = searching();
        let request = state.start_search("anything").unwrap();
        assert!(state.receive_page(request.ticket, batch));
        state.go_to_configure().unwrap();
        state
    }

    #[test]
    fn test_select_source_moves_to_search() {
        let mut state = ImportWizardState::default();
        assert_eq!(state.step(), WizardStep::SelectSource);
        state.select_source(source(SourceKind::Email)).unwrap();
        assert_eq!(state.step(), WizardStep::Search);
        assert_eq!(state.source().unwrap().kind, SourceKind::Email);
    }

    #[test]
    fn test_disabled_source_rejected() {
        let mut state = ImportWizardState::default();
        let mut disabled = source(SourceKind::WebCatalog);
        disabled.enabled = false;
        assert_eq!(
            state.select_source(disabled),
            Err(WizardError::SourceDisabled("Acme".to_string()))
        );
        assert_eq!(state.step(), WizardStep::SelectSource);
    }

    #[test]
    fn test_search_on_upload_source_rejected() {
        let mut state = ImportWizardState::default();
        state.select_source(source(SourceKind::PdfInvoice)).unwrap();
        assert_eq!(state.start_search("x"), Err(WizardError::SourceMismatch));
    }

    #[test]
    fn test_search_rows_start_unselected() {
        let state = configured(items(3, 0));
        assert_eq!(state.rows().len(), 3);
        assert!(state.rows().iter().all(|row| !row.selected));
        assert!(!state.can_proceed());
    }

    #[test]
    fn test_load_more_appends_and_stops_on_short_page() {
        let mut state = searching();
        let first = state.start_search("drill").unwrap();
        state.receive_page(first.ticket, items(50, 0));

        let second = state.load_more().unwrap();
        assert_eq!(second.params.page, 2);
        assert!(state.receive_page(second.ticket, items(37, 50)));
        assert_eq!(state.rows().len(), 87);
        assert!(!state.pager().has_more());
        assert!(state.load_more().is_none());

        let ids: BTreeSet<usize> = state.rows().iter().map(|row| row.row_id).collect();
        assert_eq!(ids.len(), 87);
    }

    #[test]
    fn test_failed_load_more_keeps_rows() {
        let mut state = searching();
        let first = state.start_search("drill").unwrap();
        state.receive_page(first.ticket, items(50, 0));
        let before = state.rows().to_vec();

        let second = state.load_more().unwrap();
        assert!(state.fail_page(second.ticket));
        assert_eq!(state.rows(), &before[..]);
        assert_eq!(state.pager().page(), 1);
    }

    #[test]
    fn test_new_search_replaces_batch() {
        let mut state = searching();
        let first = state.start_search("drill").unwrap();
        state.receive_page(first.ticket, items(50, 0));
        let again = state.start_search("saw").unwrap();
        state.receive_page(again.ticket, items(2, 100));
        assert_eq!(state.rows().len(), 2);
        assert_eq!(state.rows()[0].code, "C100");
    }

    #[test]
    fn test_parsed_invoice_rows_selected_with_header() {
        let mut state = ImportWizardState::default();
        state.select_source(source(SourceKind::PdfInvoice)).unwrap();
        state
            .load_parsed_file(ParsedFileResponse {
                invoice: Some(InvoiceHeader {
                    number: "F-1".to_string(),
                    supplier_name: None,
                    issued_on: None,
                    total: Some(20.0),
                }),
                items: items(2, 0),
            })
            .unwrap();
        assert!(state.rows().iter().all(|row| row.selected));
        assert_eq!(state.invoice().unwrap().number, "F-1");
    }

    #[test]
    fn test_stale_code_check_ignored() {
        let mut state = configured(items(2, 0));
        let stale = state.begin_code_check().unwrap();
        state.edit_code(0, "NEW-CODE");
        let latest = state.begin_code_check().unwrap();
        assert!(latest.codes.contains(&"NEW-CODE".to_string()));

        assert!(state.resolve_code_check(latest.seq, vec![]));
        assert!(!state.resolve_code_check(stale.seq, vec!["C1".to_string()]));
        assert!(!state.rows()[1].exists);
        assert!(!state.is_checking_codes());
    }

    #[test]
    fn test_resolved_check_forces_selection_of_existing() {
        let mut state = configured(items(2, 0));
        state.set_selected(0, false);
        let check = state.begin_code_check().unwrap();
        assert!(state.resolve_code_check(check.seq, vec!["C0".to_string()]));
        let row = state.row(0).unwrap();
        assert!(row.exists && row.selected);
        assert_eq!(
            state.statuses(),
            vec![RowStatus::ExistsInCatalog, RowStatus::New]
        );

        state.set_selected(0, false);
        let check = state.begin_code_check().unwrap();
        state.resolve_code_check(check.seq, vec!["C0".to_string()]);
        assert!(state.row(0).unwrap().selected);
    }

    #[test]
    fn test_code_check_without_codes_clears_flags() {
        let mut state = configured(items(1, 0));
        let check = state.begin_code_check().unwrap();
        state.resolve_code_check(check.seq, vec!["C0".to_string()]);
        state.edit_code(0, "   ");
        assert!(state.begin_code_check().is_none());
        assert!(!state.rows()[0].exists);
    }

    #[test]
    fn test_edit_code_reports_change() {
        let mut state = configured(items(1, 0));
        assert!(!state.edit_code(0, " C0 "));
        assert!(state.edit_code(0, "C9"));
        assert!(!state.edit_code(42, "C9"));
    }

    #[test]
    fn test_edited_code_loses_unconfirmed_existing_flag() {
        let mut state = configured(vec![item(0, "A", 1.0), item(1, "B", 1.0)]);
        let check = state.begin_code_check().unwrap();
        assert!(state.resolve_code_check(check.seq, vec!["A".to_string(), "B".to_string()]));
        state.set_selected(1, false);

        assert!(state.edit_code(0, "Z-NEW"));
        assert!(!state.row(0).unwrap().exists);
        assert_eq!(state.statuses()[0], RowStatus::New);

        // Renamed onto a confirmed code: the flag follows the code
        assert!(state.edit_code(1, "A"));
        assert!(!state.edit_code(1, "A"));
        state.edit_code(1, "B");
        assert!(state.row(1).unwrap().exists);

        // The failed recheck leaves the edited row as a product to create
        let recheck = state.begin_code_check().unwrap();
        assert!(state.fail_code_check(recheck.seq));
        assert!(!state.row(0).unwrap().exists);
        assert_eq!(
            state.go_to_confirm(),
            Err(WizardError::Blocked(ProceedBlocker::MissingRetailPrice {
                count: 1
            }))
        );
    }

    #[test]
    fn test_confirm_waits_for_code_check() {
        let mut state = configured(vec![item(0, "A", 1.0)]);
        state.set_all_selected(true);
        state.apply_margin(MarginMultiplier::DOUBLE);

        state.edit_code(0, "A-2");
        assert!(state.is_checking_codes());
        assert_eq!(state.go_to_confirm(), Err(WizardError::CheckingCodes));

        let check = state.begin_code_check().unwrap();
        assert_eq!(state.go_to_confirm(), Err(WizardError::CheckingCodes));
        assert_eq!(state.step(), WizardStep::Configure);

        assert!(state.resolve_code_check(check.seq, vec![]));
        state.go_to_confirm().unwrap();
        assert_eq!(state.step(), WizardStep::Confirm);
    }

    #[test]
    fn test_margin_then_confirm() {
        let mut state = configured(vec![item(0, "A", 12.345), item(1, "B", 4.0)]);
        state.set_all_selected(true);
        assert_eq!(
            state.go_to_confirm(),
            Err(WizardError::Blocked(ProceedBlocker::MissingRetailPrice {
                count: 2
            }))
        );
        assert_eq!(state.apply_margin(MarginMultiplier::DOUBLE), 2);
        assert_eq!(state.rows()[0].price_retail, Some(24.69));
        assert_eq!(state.margin(), Some(MarginMultiplier::DOUBLE));
        state.go_to_confirm().unwrap();
        assert_eq!(state.step(), WizardStep::Confirm);
    }

    #[test]
    fn test_custom_margin_out_of_range_leaves_prices() {
        let mut state = configured(items(1, 0));
        state.set_all_selected(true);
        let err = state.apply_custom_margin(11.0).unwrap_err();
        assert!(matches!(err, WizardError::Margin(MarginError::OutOfRange { .. })));
        assert_eq!(state.rows()[0].price_retail, None);
        assert_eq!(state.apply_custom_margin(3.0), Ok(1));
        assert_eq!(state.rows()[0].price_retail, Some(30.0));
    }

    #[test]
    fn test_summary_counts() {
        let mut state = configured(vec![
            item(0, "A", 1.0),
            item(1, "A", 1.0),
            item(2, "B", 1.0),
            item(3, "", 1.0),
        ]);
        let check = state.begin_code_check().unwrap();
        state.resolve_code_check(check.seq, vec!["B".to_string()]);
        state.set_selected(3, true);
        let summary = state.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.duplicates, 2);
        assert_eq!(summary.existing, 1);
        assert_eq!(summary.new, 1);
        assert_eq!(summary.selected, 2);
        assert_eq!(summary.missing_price, 1);
    }

    #[test]
    fn test_execute_request_dedupes_and_maps_actions() {
        let mut state = configured(vec![
            item(0, "A", 1.0),
            item(1, "A", 1.0),
            item(2, "B", 1.0),
        ]);
        let check = state.begin_code_check().unwrap();
        state.resolve_code_check(check.seq, vec!["B".to_string()]);
        state.set_selected(0, true);
        state.set_selected(1, true);
        state.apply_margin(MarginMultiplier::DOUBLE_AND_HALF);
        state.set_supplier(Some("sup-9".to_string()));
        state.set_category(Some(String::new()));
        state.go_to_confirm().unwrap();

        let plan = state.build_execute_request().unwrap();
        assert_eq!(plan.locally_skipped, vec!["A".to_string()]);
        assert_eq!(plan.request.items.len(), 2);
        assert_eq!(plan.request.items[0].action, ImportAction::Create);
        assert_eq!(plan.request.items[0].price_retail, Some(2.5));
        assert_eq!(plan.request.items[1].action, ImportAction::AddStock);
        assert_eq!(plan.request.items[1].price_retail, None);
        assert_eq!(plan.request.supplier_id.as_deref(), Some("sup-9"));
        assert_eq!(plan.request.category_id, None);
    }

    #[test]
    fn test_complete_import_discards_batch() {
        let mut state = configured(vec![item(0, "A", 1.0)]);
        state.set_all_selected(true);
        state.apply_margin(MarginMultiplier::DOUBLE);
        state.go_to_confirm().unwrap();
        state
            .complete_import(ExecuteResponse {
                imported: 1,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.step(), WizardStep::Done);
        assert!(state.rows().is_empty());
        assert_eq!(state.result().unwrap().imported, 1);

        state.reset();
        assert_eq!(state.step(), WizardStep::SelectSource);
        assert!(state.result().is_none());
    }

    #[test]
    fn test_wrong_step_actions_rejected() {
        let mut state = ImportWizardState::default();
        assert_eq!(
            state.go_to_configure(),
            Err(WizardError::WrongStep {
                expected: WizardStep::Search,
                actual: WizardStep::SelectSource,
            })
        );
        assert!(state.build_execute_request().is_err());
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_back_from_search_forgets_source() {
        let mut state = configured(items(2, 0));
        state.back();
        assert_eq!(state.step(), WizardStep::Search);
        assert_eq!(state.rows().len(), 2);
        state.back();
        assert_eq!(state.step(), WizardStep::SelectSource);
        assert!(state.source().is_none());
        assert!(state.rows().is_empty());
    }

    #[test]
    fn test_reset_makes_in_flight_search_stale() {
        let mut state = searching();
        let old = state.start_search("drill").unwrap();
        state.reset();
        state.select_source(source(SourceKind::WebCatalog)).unwrap();
        let new = state.start_search("saw").unwrap();
        assert_ne!(old.ticket, new.ticket);
        assert!(!state.receive_page(old.ticket, items(3, 0)));
        assert!(state.rows().is_empty());
    }

    #[test]
    fn test_back_from_search_discards_pending_check() {
        let mut state = configured(items(1, 0));
        let check = state.begin_code_check().unwrap();
        state.back();
        state.back();
        assert!(!state.resolve_code_check(check.seq, vec!["C0".to_string()]));
    }
}
