use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value,
            source: e,
        })?;

    Ok(result)
}

/// Parses a user-supplied numeric input as a positive number.
///
/// Accepts integer or decimal text (`"10"`, `"4.5"`). Anything that fails to
/// parse, is not finite, or is not strictly positive returns `None`, and the
/// caller reports the raw text back to the user.
///
/// # Arguments
/// - `raw` - The raw user input
///
/// # Returns
/// - `Some(f64)` - Parsed positive number
/// - `None` - Input is not a positive number
pub fn parse_positive_number(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_text() {
        assert_eq!(parse_positive_number("10"), Some(10.0));
    }

    #[test]
    fn parses_decimal_text() {
        assert_eq!(parse_positive_number("4.5"), Some(4.5));
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(parse_positive_number(" 12 "), Some(12.0));
    }

    #[test]
    fn rejects_words() {
        assert_eq!(parse_positive_number("ten"), None);
        assert_eq!(parse_positive_number("lots"), None);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(parse_positive_number("0"), None);
        assert_eq!(parse_positive_number("-5"), None);
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(parse_positive_number("inf"), None);
        assert_eq!(parse_positive_number("NaN"), None);
    }

    #[test]
    fn parses_stored_discord_id() {
        assert_eq!(
            parse_u64_from_string("800000000000000001".to_string()).unwrap(),
            800000000000000001
        );
        assert!(parse_u64_from_string("not-an-id".to_string()).is_err());
    }
}
