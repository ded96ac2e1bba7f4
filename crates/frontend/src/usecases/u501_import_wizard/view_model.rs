//! Import wizard - View Model
//!
//! The whole wizard is one `ImportWizardState` behind a single signal. Every
//! user action goes through `dispatch`, async results are fed back the same
//! way, and the state itself decides whether an answer is still current.

use super::api;
use crate::domain::{a004_supplier, a007_category};
use crate::shared::notifications::NotificationService;
use contracts::domain::a004_supplier::Supplier;
use contracts::domain::a007_category::Category;
use contracts::usecases::u501_import_wizard::{
    ImportSource, ImportWizardState, MarginMultiplier, PageRequest, RowStatus, WizardSettings,
    WizardStep,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use web_sys::File;

#[derive(Clone, Copy)]
pub struct ImportWizardVm {
    pub state: RwSignal<ImportWizardState>,

    // Справочники
    pub sources: RwSignal<Vec<ImportSource>>,
    pub sources_loading: RwSignal<bool>,
    pub suppliers: RwSignal<Vec<Supplier>>,
    pub categories: RwSignal<Vec<Category>>,

    // Поля форм
    pub query: RwSignal<String>,
    pub custom_margin: RwSignal<String>,
    pub supplier_value: RwSignal<String>,
    pub category_value: RwSignal<String>,

    pub uploading: RwSignal<bool>,
    pub importing: RwSignal<bool>,
    pub file_name: RwSignal<Option<String>>,

    /// Статусы строк по row id, пересчитываются при изменении пакета
    pub statuses: Memo<HashMap<usize, RowStatus>>,

    file: StoredValue<Option<File>, LocalStorage>,
    debounce: StoredValue<Option<Timeout>, LocalStorage>,
    notifications: NotificationService,
}

impl ImportWizardVm {
    pub fn new(settings: WizardSettings, notifications: NotificationService) -> Self {
        notifications.set_default_life(settings.notification_life_ms);
        let state = RwSignal::new(ImportWizardState::new(settings));

        let statuses = Memo::new(move |_| {
            state.with(|s| {
                s.rows()
                    .iter()
                    .map(|row| row.row_id)
                    .zip(s.statuses())
                    .collect::<HashMap<_, _>>()
            })
        });

        Self {
            state,
            sources: RwSignal::new(Vec::new()),
            sources_loading: RwSignal::new(true),
            suppliers: RwSignal::new(Vec::new()),
            categories: RwSignal::new(Vec::new()),
            query: RwSignal::new(String::new()),
            custom_margin: RwSignal::new(String::new()),
            supplier_value: RwSignal::new(String::new()),
            category_value: RwSignal::new(String::new()),
            uploading: RwSignal::new(false),
            importing: RwSignal::new(false),
            file_name: RwSignal::new(None),
            statuses,
            file: StoredValue::new_local(None),
            debounce: StoredValue::new_local(None),
            notifications,
        }
    }

    fn dispatch<R>(&self, action: impl FnOnce(&mut ImportWizardState) -> R) -> Option<R> {
        self.state.try_update(action)
    }

    // === Производные значения ===

    pub fn step(&self) -> WizardStep {
        self.state.with(|s| s.step())
    }

    pub fn row_ids(&self) -> Vec<usize> {
        self.state
            .with(|s| s.rows().iter().map(|row| row.row_id).collect())
    }

    pub fn status_of(&self, row_id: usize) -> RowStatus {
        self.statuses
            .with(|statuses| statuses.get(&row_id).copied())
            .unwrap_or(RowStatus::New)
    }

    pub fn is_searching(&self) -> bool {
        self.state.with(|s| s.pager().is_loading())
    }

    pub fn is_busy(&self) -> bool {
        self.is_searching() || self.uploading.get() || self.importing.get()
    }

    // === Справочники ===

    /// Источники, поставщики и категории загружаются независимо друг от друга
    pub fn load_reference_data(&self) {
        let vm = *self;

        spawn_local(async move {
            match api::get_sources().await {
                Ok(sources) => {
                    log::debug!("Loaded {} import sources", sources.len());
                    vm.sources.set(sources);
                }
                Err(e) => vm.notifications.error("Failed to load import sources", &e),
            }
            vm.sources_loading.set(false);
        });

        spawn_local(async move {
            match a004_supplier::api::list_suppliers().await {
                Ok(suppliers) => vm.suppliers.set(suppliers),
                Err(e) => vm.notifications.error("Failed to load suppliers", &e),
            }
        });

        spawn_local(async move {
            match a007_category::api::list_categories().await {
                Ok(categories) => vm.categories.set(categories),
                Err(e) => vm.notifications.error("Failed to load categories", &e),
            }
        });
    }

    // === Шаг 1 ===

    pub fn select_source(&self, source: ImportSource) {
        let name = source.name.clone();
        match self.dispatch(|s| s.select_source(source)) {
            Some(Ok(())) => log::info!("Import source selected: {}", name),
            Some(Err(e)) => self.notifications.warning("Cannot select source", &e.to_string()),
            None => {}
        }
    }

    // === Шаг 2: поиск ===

    pub fn search(&self) {
        let query = self.query.get_untracked();
        match self.dispatch(|s| s.start_search(&query)) {
            Some(Ok(request)) => self.fetch_page(request),
            Some(Err(e)) => self.notifications.warning("Cannot search", &e.to_string()),
            None => {}
        }
    }

    pub fn load_more(&self) {
        if let Some(Some(request)) = self.dispatch(|s| s.load_more()) {
            self.fetch_page(request);
        }
    }

    fn fetch_page(&self, request: PageRequest) {
        let vm = *self;
        let PageRequest { ticket, params } = request;
        log::debug!("Searching \"{}\", page {}", params.query, params.page);

        spawn_local(async move {
            match api::search(&params).await {
                Ok(response) => {
                    let received = response.items.len();
                    if vm.dispatch(|s| s.receive_page(ticket, response.items)) == Some(true) {
                        log::info!("Search page {} loaded: {} items", params.page, received);
                        vm.check_codes_now();
                    } else {
                        log::debug!("Dropped stale search page {}", params.page);
                    }
                }
                Err(e) => {
                    if vm.dispatch(|s| s.fail_page(ticket)) == Some(true) {
                        vm.notifications.error("Search failed", &e);
                    }
                }
            }
        });
    }

    // === Шаг 2: загрузка ===

    pub fn upload(&self, file: File) {
        let Some(kind) = self.state.with_untracked(|s| s.source().map(|src| src.kind)) else {
            return;
        };
        let vm = *self;
        let name = file.name();
        self.uploading.set(true);

        spawn_local(async move {
            match api::parse_file(kind, &file).await {
                Ok(parsed) => match vm.dispatch(|s| s.load_parsed_file(parsed)) {
                    Some(Ok(())) => {
                        let rows = vm.state.with_untracked(|s| s.rows().len());
                        log::info!("Parsed {}: {} items", name, rows);
                        vm.file.set_value(Some(file));
                        vm.file_name.set(Some(name));
                        vm.check_codes_now();
                    }
                    Some(Err(e)) => vm.notifications.warning("Cannot load file", &e.to_string()),
                    None => {}
                },
                Err(e) => vm.notifications.error("Failed to parse file", &e),
            }
            vm.uploading.set(false);
        });
    }

    pub fn go_to_configure(&self) {
        if let Some(Err(e)) = self.dispatch(|s| s.go_to_configure()) {
            self.notifications.warning("Cannot continue", &e.to_string());
        }
    }

    // === Шаг 3: настройка ===

    pub fn edit_code(&self, row_id: usize, code: String) {
        if self.dispatch(|s| s.edit_code(row_id, &code)) == Some(true) {
            self.schedule_code_check();
        }
    }

    pub fn edit_name(&self, row_id: usize, name: String) {
        self.dispatch(|s| s.edit_name(row_id, &name));
    }

    pub fn edit_retail_price(&self, row_id: usize, price: Option<f64>) {
        self.dispatch(|s| s.edit_retail_price(row_id, price));
    }

    pub fn edit_wholesale_price(&self, row_id: usize, price: Option<f64>) {
        self.dispatch(|s| s.edit_wholesale_price(row_id, price));
    }

    pub fn edit_stock(&self, row_id: usize, quantity: i32) {
        self.dispatch(|s| s.edit_stock(row_id, quantity));
    }

    pub fn toggle_row(&self, row_id: usize) {
        self.dispatch(|s| s.toggle_row(row_id));
    }

    pub fn set_all_selected(&self, selected: bool) {
        self.dispatch(|s| s.set_all_selected(selected));
    }

    /// Restart the debounce window; only the last edit in a burst is checked
    fn schedule_code_check(&self) {
        let delay = self
            .state
            .with_untracked(|s| s.settings().code_check_debounce_ms);
        let vm = *self;
        // Replacing the stored timeout drops, and so cancels, the previous one
        self.debounce
            .set_value(Some(Timeout::new(delay, move || vm.check_codes_now())));
    }

    pub fn check_codes_now(&self) {
        self.debounce.set_value(None);
        let Some(Some(request)) = self.dispatch(|s| s.begin_code_check()) else {
            return;
        };
        let vm = *self;
        let seq = request.seq;

        spawn_local(async move {
            match api::check_codes(request.codes).await {
                Ok(response) => {
                    let found = response.existing.len();
                    if vm.dispatch(|s| s.resolve_code_check(seq, response.existing)) == Some(true) {
                        log::debug!("Code check #{}: {} codes already in catalog", seq, found);
                    } else {
                        log::debug!("Discarded stale code check #{}", seq);
                    }
                }
                Err(e) => {
                    if vm.dispatch(|s| s.fail_code_check(seq)) == Some(true) {
                        vm.notifications.warning("Could not check existing products", &e);
                    }
                }
            }
        });
    }

    pub fn apply_margin(&self, multiplier: MarginMultiplier) {
        if let Some(updated) = self.dispatch(|s| s.apply_margin(multiplier)) {
            log::debug!("Margin {} applied to {} rows", multiplier.label(), updated);
        }
    }

    pub fn apply_custom_margin(&self) {
        let value = self
            .custom_margin
            .get_untracked()
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .unwrap_or(f64::NAN);
        if let Some(Err(e)) = self.dispatch(|s| s.apply_custom_margin(value)) {
            self.notifications.warning("Invalid margin", &e.to_string());
        }
    }

    pub fn set_supplier(&self, supplier_id: String) {
        self.dispatch(|s| s.set_supplier(Some(supplier_id)));
    }

    pub fn set_category(&self, category_id: String) {
        self.dispatch(|s| s.set_category(Some(category_id)));
    }

    /// Исправить номер, прочитанный из накладной
    pub fn edit_invoice_number(&self, number: String) {
        self.dispatch(|s| {
            let invoice = s.invoice().cloned().map(|mut invoice| {
                invoice.number = number.trim().to_string();
                invoice
            });
            s.set_invoice(invoice);
        });
    }

    pub fn go_to_confirm(&self) {
        if let Some(Err(e)) = self.dispatch(|s| s.go_to_confirm()) {
            self.notifications.warning("Cannot continue", &e.to_string());
        }
    }

    // === Шаг 4: подтверждение ===

    pub fn execute_import(&self) {
        if self.importing.get_untracked() {
            return;
        }
        let plan = match self.state.with_untracked(|s| s.build_execute_request()) {
            Ok(plan) => plan,
            Err(e) => {
                self.notifications.warning("Cannot import", &e.to_string());
                return;
            }
        };

        let vm = *self;
        let file = self.file.get_value();
        self.importing.set(true);
        log::info!(
            "Importing {} items from source {}",
            plan.request.items.len(),
            plan.request.source_id
        );

        spawn_local(async move {
            match api::execute(&plan.request, file.as_ref()).await {
                Ok(result) => {
                    vm.notifications.success(
                        "Import finished",
                        &format!(
                            "{} created, {} stock updated",
                            result.imported, result.stock_updated
                        ),
                    );
                    if result.has_partial_failure() {
                        vm.notifications.warning(
                            "Some products were not imported",
                            &format!("{} skipped, {} failed", result.skipped, result.errors),
                        );
                    }
                    if !plan.locally_skipped.is_empty() {
                        vm.notifications.warning(
                            "Duplicate codes submitted once",
                            &plan.locally_skipped.join(", "),
                        );
                    }
                    if let Some(Err(e)) = vm.dispatch(|s| s.complete_import(result)) {
                        log::error!("Import result not applied: {}", e);
                    }
                }
                Err(e) => vm.notifications.error("Import failed", &e),
            }
            vm.importing.set(false);
        });
    }

    // === Навигация ===

    pub fn back(&self) {
        let leaving_search = self.state.with_untracked(|s| s.step()) == WizardStep::Search;
        self.dispatch(|s| s.back());
        if leaving_search {
            self.clear_inputs();
        }
    }

    /// Начать заново с выбора источника
    pub fn start_over(&self) {
        self.dispatch(|s| s.reset());
        self.clear_inputs();
    }

    fn clear_inputs(&self) {
        self.debounce.set_value(None);
        self.file.set_value(None);
        self.file_name.set(None);
        self.query.set(String::new());
        self.custom_margin.set(String::new());
        self.supplier_value.set(String::new());
        self.category_value.set(String::new());
    }
}
