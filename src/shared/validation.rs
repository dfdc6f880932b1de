//! Validation Utilities

use validator::ValidationErrors;

use super::error::AppError;

/// Convert validation errors to AppError, reporting the first failing field
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                )
            })
        })
        .collect();
    fields.sort();

    let message = fields
        .first()
        .map(|(field, message)| format!("{}: {}", field, message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation(message)
}
