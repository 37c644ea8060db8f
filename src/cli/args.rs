use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Parse a decimal amount, accepting both `30.50` and the pt-BR `30,50`
pub fn parse_decimal(s: &str) -> Result<Decimal, String> {
    let normalized = s.trim().replace(',', ".");
    normalized
        .parse::<Decimal>()
        .map_err(|_| format!("'{}' is not a valid decimal amount", s))
}

/// Parse a calendar date in the backend's YYYY-MM-DD format
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid date (expected YYYY-MM-DD)", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_accepts_both_separators() {
        assert_eq!(parse_decimal("30.50").unwrap(), dec!(30.50));
        assert_eq!(parse_decimal("30,50").unwrap(), dec!(30.50));
        assert_eq!(parse_decimal(" 100 ").unwrap(), dec!(100));
        assert!(parse_decimal("abc").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(parse_date("15/01/2024").is_err());
    }
}
