use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Minimum length of a court name, in characters.
pub const MIN_NAME_LEN: usize = 3;
/// Maximum number of photos per court.
pub const MAX_PHOTOS: usize = 5;

/// Validation errors for domain model fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be at least {} characters", MIN_NAME_LEN)]
    NameTooShort,
    #[error("select a sport type")]
    MissingSport,
    #[error("price must be greater than zero")]
    NonPositivePrice,
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("add at least 1 photo")]
    NoPhotos,
    #[error("at most {} photos are allowed", MAX_PHOTOS)]
    TooManyPhotos,
    #[error("add-on name cannot be empty")]
    EmptyAddOnName,
    #[error("add-on name {0} is reserved")]
    ReservedAddOnName(String),
}

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:R\$\s*)?(\d+)(?:[.,](\d{1,2}))?$").expect("valid hardcoded regex")
});

/// Validates a court name: at least [`MIN_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() >= MIN_NAME_LEN {
        Ok(())
    } else {
        Err(ValidationError::NameTooShort)
    }
}

/// Validates a base hourly price: must be strictly positive.
pub fn validate_base_price(price: Decimal) -> Result<(), ValidationError> {
    if price > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::NonPositivePrice)
    }
}

/// Validates a photo count for submission: between 1 and [`MAX_PHOTOS`].
pub fn validate_photo_count(count: usize) -> Result<(), ValidationError> {
    match count {
        0 => Err(ValidationError::NoPhotos),
        n if n > MAX_PHOTOS => Err(ValidationError::TooManyPhotos),
        _ => Ok(()),
    }
}

/// Parses a price typed by the user (e.g. `80`, `80.5`, `80,50`, `R$ 80,50`).
///
/// Surrounding whitespace is ignored. Anything else, including an empty
/// string, is [`ValidationError::InvalidPrice`] rather than zero.
pub fn parse_price(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidPrice(trimmed.to_string());
    let caps = PRICE_RE.captures(trimmed).ok_or_else(invalid)?;
    let whole = caps.get(1).map_or("", |m| m.as_str());
    let normalized = match caps.get(2) {
        Some(cents) => format!("{whole}.{}", cents.as_str()),
        None => whole.to_string(),
    };
    Decimal::from_str(&normalized).map_err(|_| invalid())
}

/// Formats a price the way the dashboard shows it, e.g. `R$ 80,50`.
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp(2);
    if rounded.fract().is_zero() {
        format!("R$ {}", rounded.trunc())
    } else {
        format!("R$ {:.2}", rounded).replace('.', ",")
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    // --- validate_name ---

    #[test]
    fn name_three_chars_ok() {
        assert_eq!(validate_name("Q10"), Ok(()));
    }

    #[test]
    fn name_two_chars_too_short() {
        assert_eq!(validate_name("Ab"), Err(ValidationError::NameTooShort));
    }

    #[test]
    fn name_counts_chars_not_bytes() {
        // "Vô" is three bytes but two characters.
        assert_eq!(validate_name("Vô"), Err(ValidationError::NameTooShort));
        assert_eq!(validate_name("Vôl"), Ok(()));
    }

    #[test]
    fn name_empty_too_short() {
        assert_eq!(validate_name(""), Err(ValidationError::NameTooShort));
    }

    // --- validate_base_price ---

    #[test]
    fn base_price_positive_ok() {
        assert_eq!(validate_base_price(Decimal::from(80)), Ok(()));
        assert_eq!(validate_base_price(Decimal::new(1, 2)), Ok(()));
    }

    #[test]
    fn base_price_zero_rejected() {
        assert_eq!(
            validate_base_price(Decimal::ZERO),
            Err(ValidationError::NonPositivePrice)
        );
    }

    #[test]
    fn base_price_negative_rejected() {
        assert_eq!(
            validate_base_price(Decimal::from(-5)),
            Err(ValidationError::NonPositivePrice)
        );
    }

    // --- validate_photo_count ---

    #[test]
    fn photo_count_bounds() {
        assert_eq!(validate_photo_count(0), Err(ValidationError::NoPhotos));
        assert_eq!(validate_photo_count(1), Ok(()));
        assert_eq!(validate_photo_count(5), Ok(()));
        assert_eq!(
            validate_photo_count(6),
            Err(ValidationError::TooManyPhotos)
        );
    }

    // --- parse_price ---

    #[test]
    fn price_integer() {
        assert_eq!(parse_price("80"), Ok(Decimal::from(80)));
    }

    #[test]
    fn price_dot_decimal() {
        assert_eq!(parse_price("80.5"), Ok(Decimal::new(805, 1)));
    }

    #[test]
    fn price_comma_decimal() {
        assert_eq!(parse_price("80,50"), Ok(Decimal::new(8050, 2)));
    }

    #[test]
    fn price_with_currency_prefix() {
        assert_eq!(parse_price("R$ 20,00"), Ok(Decimal::new(2000, 2)));
        assert_eq!(parse_price("R$15"), Ok(Decimal::from(15)));
    }

    #[test]
    fn price_surrounding_whitespace_ignored() {
        assert_eq!(parse_price("  12 "), Ok(Decimal::from(12)));
    }

    #[test]
    fn price_empty_is_invalid_not_zero() {
        assert_eq!(
            parse_price(""),
            Err(ValidationError::InvalidPrice(String::new()))
        );
    }

    #[test]
    fn price_garbage_rejected() {
        assert_eq!(
            parse_price("abc"),
            Err(ValidationError::InvalidPrice("abc".to_string()))
        );
        assert_eq!(
            parse_price("1.234"),
            Err(ValidationError::InvalidPrice("1.234".to_string()))
        );
        assert_eq!(
            parse_price("-5"),
            Err(ValidationError::InvalidPrice("-5".to_string()))
        );
    }

    #[quickcheck]
    fn price_whole_numbers_always_parse(n: u32) -> bool {
        parse_price(&n.to_string()) == Ok(Decimal::from(n))
    }

    #[quickcheck]
    fn price_cents_with_comma_always_parse(whole: u16, cents: u8) -> bool {
        let cents = cents % 100;
        let input = format!("{whole},{cents:02}");
        parse_price(&input) == Ok(Decimal::from(whole) + Decimal::new(i64::from(cents), 2))
    }

    // --- format_price ---

    #[test]
    fn format_whole_price() {
        assert_eq!(format_price(Decimal::from(120)), "R$ 120");
    }

    #[test]
    fn format_fractional_price_uses_comma() {
        assert_eq!(format_price(Decimal::new(805, 1)), "R$ 80,50");
    }
}
