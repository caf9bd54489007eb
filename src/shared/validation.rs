use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Regex for catalog slugs (collections, categories)
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "linen-summer", "fw24", "hand-woven-bags"
    /// - Invalid: "-linen", "linen-", "linen--summer", "Linen", "linen_summer"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Catalog slug filter (`category`, `collection`)
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if !SLUG_REGEX.is_match(value) {
        let mut err = ValidationError::new("slug");
        err.message = Some("Must be a lowercase slug (letters, digits, single hyphens)".into());
        return Err(err);
    }
    Ok(())
}

/// Rejects negative money amounts (price filters)
pub fn non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Amount must not be negative".into());
        return Err(err);
    }
    Ok(())
}
