use serde::Serialize;

use crate::{error::AppError, store::Document};

/// Length in characters, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let length = char_len(value);
    if length < min || length > max {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {} characters long (got {})",
            field, min, max, length
        )));
    }

    Ok(())
}

pub fn check_optional_length(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(value) => check_length(field, value, 0, max),
        None => Ok(()),
    }
}

/// Serializes a payload struct into a storable document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, AppError> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(document)) => Ok(document),
        Ok(_) => Err(AppError::Internal(
            "payload did not serialize to a document".to_string(),
        )),
        Err(error) => Err(AppError::Internal(error.to_string())),
    }
}
