use thiserror::Error;

use crate::models::MetaField;

/// Why an object could not be classified.
///
/// Placements registered before the error stay registered; the host
/// decides whether to skip the object or abort the scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("required field {field} is missing")]
    MissingField { field: String },

    #[error("field {field} is malformed: {value:?}")]
    MalformedField { field: String, value: String },
}

impl ClassifyError {
    pub fn missing(field: MetaField) -> Self {
        ClassifyError::MissingField {
            field: field.key().to_string(),
        }
    }

    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        ClassifyError::MalformedField {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub type ClassifyResult<T> = Result<T, ClassifyError>;
