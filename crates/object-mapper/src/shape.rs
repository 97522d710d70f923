//! Shape classification of values, and the root container kinds.

use std::fmt;

use object_mapper_path::StepClass;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The shape of a value, as reported in access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Boolean,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Array(_) => Shape::Sequence,
            Value::Object(_) => Shape::Mapping,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Boolean => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, Shape::Sequence | Shape::Mapping)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container kind a side of a mapping set starts out as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    Sequence,
    Mapping,
}

impl RootKind {
    /// A fresh, empty container of this kind.
    pub fn empty(&self) -> Value {
        match self {
            RootKind::Sequence => Value::Array(Vec::new()),
            RootKind::Mapping => Value::Object(Map::new()),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            RootKind::Sequence => Shape::Sequence,
            RootKind::Mapping => Shape::Mapping,
        }
    }
}

impl From<StepClass> for RootKind {
    fn from(class: StepClass) -> Self {
        match class {
            StepClass::SequenceLike => RootKind::Sequence,
            StepClass::MappingLike => RootKind::Mapping,
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.shape().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_of() {
        assert_eq!(Shape::of(&json!(null)), Shape::Null);
        assert_eq!(Shape::of(&json!(true)), Shape::Boolean);
        assert_eq!(Shape::of(&json!(1.5)), Shape::Number);
        assert_eq!(Shape::of(&json!("x")), Shape::String);
        assert_eq!(Shape::of(&json!([])), Shape::Sequence);
        assert_eq!(Shape::of(&json!({})), Shape::Mapping);
        assert!(Shape::Null.is_scalar());
        assert!(!Shape::Mapping.is_scalar());
    }

    #[test]
    fn test_root_kind() {
        assert_eq!(RootKind::Sequence.empty(), json!([]));
        assert_eq!(RootKind::Mapping.empty(), json!({}));
        assert_eq!(RootKind::from(StepClass::SequenceLike), RootKind::Sequence);
        assert_eq!(RootKind::from(StepClass::MappingLike), RootKind::Mapping);
        assert_eq!(RootKind::Mapping.to_string(), "mapping");
        assert_eq!(serde_json::to_value(RootKind::Sequence).unwrap(), json!("sequence"));
    }
}
