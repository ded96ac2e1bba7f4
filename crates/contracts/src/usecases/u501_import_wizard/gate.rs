//! Whether the configure step may advance to confirmation

use super::product::ProductToImport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProceedBlocker {
    NothingSelected,
    /// Selected rows to be created without a positive retail price
    MissingRetailPrice { count: usize },
}

impl std::fmt::Display for ProceedBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProceedBlocker::NothingSelected => write!(f, "Select at least one product"),
            ProceedBlocker::MissingRetailPrice { count: 1 } => {
                write!(f, "1 selected product has no retail price")
            }
            ProceedBlocker::MissingRetailPrice { count } => {
                write!(f, "{} selected products have no retail price", count)
            }
        }
    }
}

/// First reason the batch cannot proceed. Stock additions never block.
pub fn proceed_blocker(rows: &[ProductToImport]) -> Option<ProceedBlocker> {
    if !rows.iter().any(|row| row.selected) {
        return Some(ProceedBlocker::NothingSelected);
    }
    let missing = rows
        .iter()
        .filter(|row| row.needs_retail_price() && !row.has_valid_retail_price())
        .count();
    if missing > 0 {
        return Some(ProceedBlocker::MissingRetailPrice { count: missing });
    }
    None
}

pub fn can_proceed(rows: &[ProductToImport]) -> bool {
    proceed_blocker(rows).is_none()
}
