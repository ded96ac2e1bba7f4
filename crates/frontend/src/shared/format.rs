//! Number formatting for the batch tables

/// Price with two decimals and a space as thousands separator: `12 345.60`
pub fn format_price(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Empty cell for a missing price
pub fn format_optional_price(value: Option<f64>) -> String {
    value.map(format_price).unwrap_or_default()
}

/// Parse a price typed by the user. Accepts a comma as decimal separator and
/// spaces between digit groups; blank input means "no price".
pub fn parse_price_input(input: &str) -> Result<Option<f64>, String> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| format!("\"{}\" is not a number", input.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(999.5), "999.50");
        assert_eq!(format_price(1234.5), "1 234.50");
        assert_eq!(format_price(1234567.891), "1 234 567.89");
    }

    #[test]
    fn test_format_price_negative() {
        assert_eq!(format_price(-1500.0), "-1 500.00");
        assert_eq!(format_price(-0.001), "0.00");
    }

    #[test]
    fn test_format_optional_price() {
        assert_eq!(format_optional_price(None), "");
        assert_eq!(format_optional_price(Some(24.69)), "24.69");
    }

    #[test]
    fn test_parse_price_input() {
        assert_eq!(parse_price_input(""), Ok(None));
        assert_eq!(parse_price_input("   "), Ok(None));
        assert_eq!(parse_price_input("12,5"), Ok(Some(12.5)));
        assert_eq!(parse_price_input("1 234.50"), Ok(Some(1234.5)));
        assert!(parse_price_input("abc").is_err());
        assert!(parse_price_input("inf").is_err());
    }
}
