//! Duplicate and existing-code detection over a batch

use std::collections::{BTreeSet, HashMap};

use super::product::{ProductToImport, RowStatus};

/// Occurrences of every non-empty code in the batch
fn code_counts(rows: &[ProductToImport]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for code in rows.iter().filter_map(ProductToImport::normalized_code) {
        *counts.entry(code).or_insert(0) += 1;
    }
    counts
}

fn status_of(
    row: &ProductToImport,
    counts: &HashMap<&str, usize>,
    existing: &BTreeSet<String>,
) -> RowStatus {
    let Some(code) = row.normalized_code() else {
        return RowStatus::New;
    };
    if counts.get(code).copied().unwrap_or(0) > 1 {
        RowStatus::DuplicateInBatch
    } else if existing.contains(code) {
        RowStatus::ExistsInCatalog
    } else {
        RowStatus::New
    }
}

/// Status of every row, in row order.
///
/// Duplicates are decided from the batch alone and win over catalog
/// existence; `existing` only holds server-confirmed codes.
pub fn classify(rows: &[ProductToImport], existing: &BTreeSet<String>) -> Vec<RowStatus> {
    let counts = code_counts(rows);
    rows.iter()
        .map(|row| status_of(row, &counts, existing))
        .collect()
}

/// Non-empty codes that appear more than once
pub fn duplicate_codes(rows: &[ProductToImport]) -> BTreeSet<String> {
    code_counts(rows)
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(code, _)| code.to_string())
        .collect()
}

/// Distinct non-empty codes, sorted, as sent to `check-codes`
pub fn unique_codes(rows: &[ProductToImport]) -> Vec<String> {
    rows.iter()
        .filter_map(ProductToImport::normalized_code)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Apply a resolved existence check to the batch.
///
/// Rows whose code is confirmed become stock additions and are selected again
/// even if the user had unticked them. Rows whose code is not confirmed lose
/// the flag. Returns how many rows are flagged as existing.
pub fn apply_existing_codes(rows: &mut [ProductToImport], existing: &BTreeSet<String>) -> usize {
    let mut flagged = 0;
    for row in rows.iter_mut() {
        let exists = row
            .normalized_code()
            .map_or(false, |code| existing.contains(code));
        row.exists = exists;
        if exists {
            row.selected = true;
            flagged += 1;
        }
    }
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(row_id: usize, code: &str, selected: bool) -> ProductToImport {
        ProductToImport {
            row_id,
            external_id: format!("ext-{}", row_id),
            code: code.to_string(),
            name: format!("Product {}", row_id),
            cost_price: 10.0,
            price_retail: None,
            price_wholesale: None,
            image_url: None,
            stock_quantity: 1,
            selected,
            exists: false,
        }
    }

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_classify_statuses() {
        let rows = vec![
            row(0, "A", false),
            row(1, "B", false),
            row(2, "A", false),
            row(3, "", false),
            row(4, "C", false),
        ];
        let statuses = classify(&rows, &set(&["C"]));
        assert_eq!(
            statuses,
            vec![
                RowStatus::DuplicateInBatch,
                RowStatus::New,
                RowStatus::DuplicateInBatch,
                RowStatus::New,
                RowStatus::ExistsInCatalog,
            ]
        );
    }

    #[test]
    fn test_duplicates_do_not_depend_on_server_data() {
        let rows = vec![row(0, "X", false), row(1, "X", false), row(2, "Y", false)];
        let without = classify(&rows, &BTreeSet::new());
        let with = classify(&rows, &set(&["X", "Y"]));
        assert_eq!(without[0], RowStatus::DuplicateInBatch);
        assert_eq!(with[0], RowStatus::DuplicateInBatch);
        assert_eq!(with[1], RowStatus::DuplicateInBatch);
        assert_eq!(with[2], RowStatus::ExistsInCatalog);
    }

    #[test]
    fn test_empty_codes_are_never_duplicates() {
        let rows = vec![row(0, "", false), row(1, "  ", false)];
        assert_eq!(classify(&rows, &set(&[""])), vec![RowStatus::New, RowStatus::New]);
        assert!(duplicate_codes(&rows).is_empty());
    }

    #[test]
    fn test_codes_compare_trimmed() {
        let rows = vec![row(0, "A-1 ", false), row(1, " A-1", false)];
        assert_eq!(duplicate_codes(&rows), set(&["A-1"]));
        assert_eq!(unique_codes(&rows), vec!["A-1".to_string()]);
    }

    #[test]
    fn test_apply_existing_codes_forces_selection() {
        let mut rows = vec![row(0, "A", false), row(1, "B", true), row(2, "", false)];
        let flagged = apply_existing_codes(&mut rows, &set(&["A"]));
        assert_eq!(flagged, 1);
        assert!(rows[0].exists && rows[0].selected);
        assert!(!rows[1].exists && rows[1].selected);
        assert!(!rows[2].exists && !rows[2].selected);

        // Deselected again by the user, the next resolution selects it again
        rows[0].selected = false;
        apply_existing_codes(&mut rows, &set(&["A"]));
        assert!(rows[0].selected);
    }

    #[test]
    fn test_apply_existing_codes_clears_stale_flag() {
        let mut rows = vec![row(0, "A", true)];
        apply_existing_codes(&mut rows, &set(&["A"]));
        rows[0].code = "A2".to_string();
        apply_existing_codes(&mut rows, &set(&[]));
        assert!(!rows[0].exists);
        assert!(rows[0].selected);
    }
}
