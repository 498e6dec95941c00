//! Form validation helpers
//!
//! Write inputs derive [`validator::Validate`]; this module holds the custom
//! field checks they reference and the mapping from `validator`'s error
//! report to [`ValidationError`].

pub mod filters;

use crate::core::error::{FieldValidationError, ValidationError};
use std::borrow::Cow;

/// Custom validator: English names are printable ASCII (letters, digits,
/// spaces and punctuation), since slugs are derived from them
pub fn english_phrase(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("english_phrase");
        err.message = Some(Cow::from("must contain only English letters, digits and punctuation"));
        Err(err)
    }
}

/// Flatten a `validator` report into field errors, sorted by field name so
/// responses are stable
///
/// Field names are reported as they appear on the wire (`english_name` →
/// `englishName`).
pub fn field_errors(errors: &validator::ValidationErrors) -> ValidationError {
    let mut fields: Vec<FieldValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldValidationError {
                field: wire_name(&field),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    fields.sort_by(|a, b| a.field.cmp(&b.field));
    ValidationError::FieldErrors(fields)
}

/// camelCase form of a snake_case field name
fn wire_name(field: &str) -> String {
    let mut parts = field.split('_');
    let mut name = parts.next().unwrap_or_default().to_string();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name
}
