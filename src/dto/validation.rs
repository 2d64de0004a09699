//! Validation helpers for DTOs.

use validator::ValidationError;

/// Whether `value` is a `#RRGGBB` color.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validates that a team color is written as `#RRGGBB`.
///
/// # Examples
///
/// ```ignore
/// validate_hex_color("#E74C3C") // Ok
/// validate_hex_color("E74C3C")  // Err - missing hash
/// validate_hex_color("#E74C3")  // Err - too short
/// ```
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if is_hex_color(color) {
        return Ok(());
    }

    let mut err = ValidationError::new("hex_color");
    err.message = Some(format!("Color must look like #RRGGBB (got `{color}`)").into());
    Err(err)
}

/// Validates that a display name contains something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that `value`, once trimmed, holds at most `max` characters.
pub fn validate_max_chars(value: &str, max: usize) -> Result<(), ValidationError> {
    let count = value.trim().chars().count();
    if count > max {
        let mut err = ValidationError::new("length");
        err.message = Some(format!("Value must be at most {max} characters (got {count})").into());
        return Err(err);
    }

    Ok(())
}
