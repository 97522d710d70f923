//! Validation functions for mapping paths.

use thiserror::Error;

use crate::path::Path;
use crate::types::{Accessor, PathStep};

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Path too long: {len} steps")]
    PathTooLong { len: usize },
    #[error("Invalid field name {name:?} at step {position}")]
    InvalidFieldName { name: String, position: usize },
    #[error("Write step at {position} in a read path")]
    WriteStep { position: usize },
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Check if `name` can be written as `.name` in path notation.
///
/// # Example
///
/// ```
/// use object_mapper_path::is_identifier;
///
/// assert!(is_identifier("egg_bread2"));
/// assert!(!is_identifier(""));
/// assert!(!is_identifier("two words"));
/// ```
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_identifier_char)
}

/// Validate a path used as one side of a mapping.
///
/// # Errors
///
/// Returns an error if:
/// - The path exceeds the maximum length (256 steps)
/// - A field step has an empty or non-identifier name
/// - The path contains a write step
///
/// # Example
///
/// ```
/// use object_mapper_path::{obj, validate_path};
/// use serde_json::json;
///
/// validate_path(&obj().key("a").index(0).freeze()).unwrap();
/// validate_path(&obj().field("").freeze()).unwrap_err();
/// validate_path(&obj().key("a").freeze().to_setter(json!(1))).unwrap_err();
/// ```
pub fn validate_path(path: &Path) -> Result<(), ValidationError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong { len: path.len() });
    }
    for (position, step) in path.iter().enumerate() {
        validate_step(step, position)?;
    }
    Ok(())
}

fn validate_step(step: &PathStep, position: usize) -> Result<(), ValidationError> {
    if step.is_write() {
        return Err(ValidationError::WriteStep { position });
    }
    if let Accessor::Field { name, .. } = step.accessor() {
        if !is_identifier(name) {
            return Err(ValidationError::InvalidFieldName {
                name: name.clone(),
                position,
            });
        }
    }
    Ok(())
}
