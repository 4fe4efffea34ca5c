//! Display formatting for portfolio rows
//!
//! `None` values render as "-". Kept in the core so every frontend table
//! shows the same thing.

/// Two-decimal money value
pub fn fmt_money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Two-decimal percentage with trailing `%`
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "-".to_string(),
    }
}

/// Signed value with explicit `+` for gains
pub fn fmt_signed(value: Option<f64>) -> String {
    match value {
        Some(v) if v >= 0.0 => format!("+{:.2}", v),
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Money value prefixed with a currency symbol when one is known
pub fn fmt_currency(value: Option<f64>, symbol: &str) -> String {
    match value {
        Some(v) if !symbol.is_empty() => format!("{}{:.2}", symbol, v),
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_money() {
        assert_eq!(fmt_money(Some(1234.567)), "1234.57");
        assert_eq!(fmt_money(None), "-");
    }

    #[test]
    fn test_fmt_percent() {
        assert_eq!(fmt_percent(Some(50.0)), "50.00%");
        assert_eq!(fmt_percent(None), "-");
    }

    #[test]
    fn test_fmt_signed() {
        assert_eq!(fmt_signed(Some(12.5)), "+12.50");
        assert_eq!(fmt_signed(Some(0.0)), "+0.00");
        assert_eq!(fmt_signed(Some(-3.2)), "-3.20");
        assert_eq!(fmt_signed(None), "-");
    }

    #[test]
    fn test_fmt_currency() {
        assert_eq!(fmt_currency(Some(65000.0), "$"), "$65000.00");
        assert_eq!(fmt_currency(Some(65000.0), ""), "65000.00");
        assert_eq!(fmt_currency(None, "$"), "-");
    }
}
