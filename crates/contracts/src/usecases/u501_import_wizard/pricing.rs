//! Margin multipliers and price rounding

use serde::{Deserialize, Serialize};

use super::product::ProductToImport;

/// Factor applied to the cost price to obtain retail and wholesale prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginMultiplier(f64);

impl MarginMultiplier {
    pub const DOUBLE: MarginMultiplier = MarginMultiplier(2.0);
    pub const DOUBLE_AND_HALF: MarginMultiplier = MarginMultiplier(2.5);

    /// Preset from configuration; presets are trusted as-is
    pub fn preset(factor: f64) -> Self {
        Self(factor)
    }

    /// Value typed by the user, accepted only inside `[min, max]`
    pub fn custom(value: f64, min: f64, max: f64) -> Result<Self, MarginError> {
        if !value.is_finite() {
            return Err(MarginError::NotANumber);
        }
        if value < min || value > max {
            return Err(MarginError::OutOfRange { value, min, max });
        }
        Ok(Self(value))
    }

    pub fn factor(&self) -> f64 {
        self.0
    }

    pub fn label(&self) -> String {
        format!("×{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginError {
    NotANumber,
    OutOfRange { value: f64, min: f64, max: f64 },
}

impl std::fmt::Display for MarginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginError::NotANumber => write!(f, "Margin must be a number"),
            MarginError::OutOfRange { value, min, max } => {
                write!(f, "Margin {} is outside the allowed range {}–{}", value, min, max)
            }
        }
    }
}

impl std::error::Error for MarginError {}

/// Round half away from zero to two decimals
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn price_with_margin(cost_price: f64, multiplier: MarginMultiplier) -> f64 {
    round_to_cents(cost_price * multiplier.factor())
}

/// Reprice every selected row that will be created.
///
/// Stock additions keep the catalog price, so existing rows are skipped.
/// Returns the number of repriced rows.
pub fn apply_margin(rows: &mut [ProductToImport], multiplier: MarginMultiplier) -> usize {
    let mut repriced = 0;
    for row in rows.iter_mut().filter(|row| row.selected && !row.exists) {
        let price = price_with_margin(row.cost_price, multiplier);
        row.price_retail = Some(price);
        row.price_wholesale = Some(price);
        repriced += 1;
    }
    repriced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cost: f64, selected: bool, exists: bool) -> ProductToImport {
        ProductToImport {
            row_id: 0,
            external_id: String::new(),
            code: "C".to_string(),
            name: "Row".to_string(),
            cost_price: cost,
            price_retail: None,
            price_wholesale: None,
            image_url: None,
            stock_quantity: 0,
            selected,
            exists,
        }
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(24.69), 24.69);
        assert_eq!(round_to_cents(19.999), 20.0);
        assert_eq!(round_to_cents(3.14159), 3.14);
        assert_eq!(round_to_cents(0.0), 0.0);
    }

    #[test]
    fn test_price_with_margin() {
        assert_eq!(price_with_margin(12.345, MarginMultiplier::DOUBLE), 24.69);
        assert_eq!(price_with_margin(10.0, MarginMultiplier::DOUBLE_AND_HALF), 25.0);
        assert_eq!(price_with_margin(4.2, MarginMultiplier::DOUBLE_AND_HALF), 10.5);
    }

    #[test]
    fn test_apply_margin_only_selected_new_rows() {
        let mut rows = vec![
            row(12.345, true, false),
            row(5.0, false, false),
            row(8.0, true, true),
        ];
        let repriced = apply_margin(&mut rows, MarginMultiplier::DOUBLE);
        assert_eq!(repriced, 1);
        assert_eq!(rows[0].price_retail, Some(24.69));
        assert_eq!(rows[0].price_wholesale, Some(24.69));
        assert_eq!(rows[1].price_retail, None);
        assert_eq!(rows[2].price_retail, None);
    }

    #[test]
    fn test_custom_margin_bounds() {
        assert!(MarginMultiplier::custom(1.0, 1.0, 10.0).is_ok());
        assert!(MarginMultiplier::custom(10.0, 1.0, 10.0).is_ok());
        assert_eq!(
            MarginMultiplier::custom(0.5, 1.0, 10.0),
            Err(MarginError::OutOfRange { value: 0.5, min: 1.0, max: 10.0 })
        );
        assert!(MarginMultiplier::custom(10.5, 1.0, 10.0).is_err());
        assert_eq!(
            MarginMultiplier::custom(f64::NAN, 1.0, 10.0),
            Err(MarginError::NotANumber)
        );
    }
}
