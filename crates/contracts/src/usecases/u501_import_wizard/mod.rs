//! u501: multi-step product import wizard
//!
//! Source selection → search/upload → configure/price → confirm. All of the
//! wizard's business rules live here as plain data and pure functions so the
//! views only hold a single `ImportWizardState` and forward user events to it.

pub mod code_check;
pub mod gate;
pub mod pagination;
pub mod pricing;
pub mod product;
pub mod reconcile;
pub mod request;
pub mod response;
pub mod settings;
pub mod source;
pub mod state;

pub use code_check::{CodeCheckRequest, CodeCheckSequencer};
pub use gate::{can_proceed, proceed_blocker, ProceedBlocker};
pub use pagination::{PageRequest, SearchPager};
pub use pricing::{apply_margin, round_to_cents, MarginError, MarginMultiplier};
pub use product::{ProductToImport, RowStatus};
pub use reconcile::{apply_existing_codes, classify, unique_codes};
pub use request::{CheckCodesRequest, ExecuteRequest, ImportAction, ImportItem, SearchParams};
pub use response::{
    CheckCodesResponse, ExecuteResponse, InvoiceHeader, ParsedFileResponse, SearchItem,
    SearchResponse,
};
pub use settings::WizardSettings;
pub use source::{ImportSource, SourceKind};
pub use state::{BatchSummary, ImportWizardState, SubmissionPlan, WizardError, WizardStep};

use crate::usecases::common::UseCaseMetadata;

pub struct ImportWizard;

impl UseCaseMetadata for ImportWizard {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_wizard"
    }

    fn display_name() -> &'static str {
        "Import products"
    }

    fn description() -> &'static str {
        "Bring products from supplier catalogs, invoices, emails and Excel sheets into the catalog"
    }
}
