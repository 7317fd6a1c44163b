//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Maximum length of a client or template identifier.
pub const MAX_ID_LENGTH: usize = 64;

/// Lowest accepted review rating.
pub const MIN_RATING: i64 = 1;

/// Highest accepted review rating.
pub const MAX_RATING: i64 = 5;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid");
    static ref RECORD_ID: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("record id pattern is valid");
}

/// Validates a CSS hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("hex_color");
        err.message = Some("Color must be a hex value such as #00A859".into());
        Err(err)
    }
}

/// Validates a client or template identifier used in URL paths.
///
/// Identifiers are 1 to 64 characters of ASCII letters, digits, `-` and `_`,
/// starting with a letter or digit (e.g. `services-demo`, `42`).
pub fn validate_record_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > MAX_ID_LENGTH || !RECORD_ID.is_match(value) {
        let mut err = ValidationError::new("record_id");
        err.message = Some(
            "Identifier must be 1-64 characters of letters, digits, '-' or '_'".into(),
        );
        return Err(err);
    }
    Ok(())
}

/// Validates that a review rating is within 1 to 5.
pub fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        let mut err = ValidationError::new("rating_range");
        err.message = Some("Rating must be between 1 and 5".into());
        Err(err)
    }
}

/// Validates that an image opacity is within 0 to 1.
pub fn validate_opacity(opacity: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&opacity) {
        Ok(())
    } else {
        let mut err = ValidationError::new("opacity_range");
        err.message = Some("Opacity must be between 0 and 1".into());
        Err(err)
    }
}
