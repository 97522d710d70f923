//! Error types for registration and mapping.

use object_mapper_path::{PathStep, ValidationError};
use thiserror::Error;

use crate::direction::Side;
use crate::shape::{RootKind, Shape};

// ── Registration ──────────────────────────────────────────────────────────

/// A malformed mapping set. Only ever returned at registration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("mapping #{mapping}: more than one transform declared")]
    DuplicateTransform { mapping: usize },
    #[error("mapping #{mapping}: function pair and delegate declared together")]
    CompetingTransforms { mapping: usize },
    #[error("mapping #{mapping}: inline transform in a delegated mapping set")]
    DelegateWithInlineTransforms { mapping: usize },
    #[error("mapping #{mapping}: invalid {side} path: {source}")]
    InvalidPath {
        mapping: usize,
        side: Side,
        #[source]
        source: ValidationError,
    },
    #[error("mapping #{mapping}: {side} root would be a {found}, earlier mappings start a {expected}")]
    ConflictingRootKind {
        mapping: usize,
        side: Side,
        expected: RootKind,
        found: RootKind,
    },
    #[error("unknown transform {0:?}")]
    UnknownTransform(String),
    #[error("invalid mapping document: {0}")]
    Document(String),
}

// ── Access ────────────────────────────────────────────────────────────────

/// Why a single step could not be applied.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccessFailure {
    #[error("expected a {expected}")]
    ShapeMismatch { expected: Shape },
    #[error("no such field")]
    MissingField,
    #[error("fields take no arguments, {found} given")]
    Arity { found: usize },
    #[error("index out of range for length {len}")]
    IndexOutOfRange { len: usize },
    #[error("index {index} too far past length {len}")]
    IndexTooLarge { index: i64, len: usize },
    #[error("write step in a read path")]
    WriteStep,
}

/// Reading along a path failed on an existing value.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("cannot read {step} (step {position}) from {shape} value: {reason}")]
pub struct InputAccessError {
    pub step: PathStep,
    pub position: usize,
    pub shape: Shape,
    pub reason: AccessFailure,
}

/// Writing along a path failed even after autovivification.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("cannot write {step} (step {position}) into {shape} value: {reason}")]
pub struct OutputAccessError {
    pub step: PathStep,
    pub position: usize,
    pub shape: Shape,
    pub reason: AccessFailure,
}

// ── Mapping ───────────────────────────────────────────────────────────────

/// A map or reverse-map call aborted. No output is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    #[error("mapping #{mapping}: {source}")]
    Input {
        mapping: usize,
        #[source]
        source: InputAccessError,
    },
    #[error("mapping #{mapping}: {source}")]
    Output {
        mapping: usize,
        #[source]
        source: OutputAccessError,
    },
}

impl MapError {
    /// Index of the mapping that failed, in declaration order.
    pub fn mapping(&self) -> usize {
        match self {
            MapError::Input { mapping, .. } | MapError::Output { mapping, .. } => *mapping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_mapper_path::Accessor;

    #[test]
    fn test_access_error_message() {
        let err = InputAccessError {
            step: PathStep::Read(Accessor::field("one")),
            position: 1,
            shape: Shape::Mapping,
            reason: AccessFailure::MissingField,
        };
        assert_eq!(
            err.to_string(),
            "cannot read .one (step 1) from mapping value: no such field"
        );
    }

    #[test]
    fn test_map_error_mapping_index() {
        let err = MapError::Output {
            mapping: 3,
            source: OutputAccessError {
                step: PathStep::Read(Accessor::Index(-5)),
                position: 0,
                shape: Shape::Sequence,
                reason: AccessFailure::IndexOutOfRange { len: 2 },
            },
        };
        assert_eq!(err.mapping(), 3);
        assert_eq!(
            err.to_string(),
            "mapping #3: cannot write [-5] (step 0) into sequence value: index out of range for length 2"
        );
    }
}
