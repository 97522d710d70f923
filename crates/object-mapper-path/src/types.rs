//! Step types for access paths.

use serde_json::Value;

/// The addressing part of a path step.
#[derive(Debug, Clone, PartialEq)]
pub enum Accessor {
    /// Attribute-style access. `args` holds call arguments and is empty for
    /// plain field access.
    Field { name: String, args: Vec<Value> },
    /// Sequence position. Negative values count from the end.
    Index(i64),
    /// Mapping key.
    Key(String),
}

impl Accessor {
    /// Plain field access without arguments.
    pub fn field(name: impl Into<String>) -> Self {
        Accessor::Field {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn class(&self) -> StepClass {
        match self {
            Accessor::Index(_) => StepClass::SequenceLike,
            Accessor::Field { .. } | Accessor::Key(_) => StepClass::MappingLike,
        }
    }
}

/// Which container kind a step addresses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepClass {
    SequenceLike,
    MappingLike,
}

/// Flat classification of a step: accessor kind crossed with read/write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    FieldRead,
    FieldWrite,
    IndexRead,
    IndexWrite,
    KeyRead,
    KeyWrite,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::FieldRead => "field_read",
            StepKind::FieldWrite => "field_write",
            StepKind::IndexRead => "index_read",
            StepKind::IndexWrite => "index_write",
            StepKind::KeyRead => "key_read",
            StepKind::KeyWrite => "key_write",
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(
            self,
            StepKind::FieldWrite | StepKind::IndexWrite | StepKind::KeyWrite
        )
    }
}

/// One accessor in a path.
///
/// Read steps are what [`PathBuilder`](crate::PathBuilder) records. Write
/// steps carry the value to assign and only come into being through
/// [`PathStep::to_write_variant`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathStep {
    Read(Accessor),
    Write(Accessor, Value),
}

impl PathStep {
    pub fn accessor(&self) -> &Accessor {
        match self {
            PathStep::Read(accessor) | PathStep::Write(accessor, _) => accessor,
        }
    }

    pub fn class(&self) -> StepClass {
        self.accessor().class()
    }

    pub fn kind(&self) -> StepKind {
        match (self.accessor(), self.is_write()) {
            (Accessor::Field { .. }, false) => StepKind::FieldRead,
            (Accessor::Field { .. }, true) => StepKind::FieldWrite,
            (Accessor::Index(_), false) => StepKind::IndexRead,
            (Accessor::Index(_), true) => StepKind::IndexWrite,
            (Accessor::Key(_), false) => StepKind::KeyRead,
            (Accessor::Key(_), true) => StepKind::KeyWrite,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, PathStep::Write(..))
    }

    /// The value a write step assigns.
    pub fn assigned(&self) -> Option<&Value> {
        match self {
            PathStep::Read(_) => None,
            PathStep::Write(_, value) => Some(value),
        }
    }

    /// Returns the write form of this step assigning `value`.
    ///
    /// A write step keeps its accessor and has its value replaced; a read
    /// step becomes the write step with the same accessor. `self` is left
    /// unchanged either way.
    ///
    /// # Example
    ///
    /// ```
    /// use object_mapper_path::{Accessor, PathStep, StepKind};
    /// use serde_json::json;
    ///
    /// let read = PathStep::Read(Accessor::Index(3));
    /// let write = read.to_write_variant(json!("hello"));
    /// assert_eq!(write.kind(), StepKind::IndexWrite);
    /// assert_eq!(write.assigned(), Some(&json!("hello")));
    /// assert_eq!(read.kind(), StepKind::IndexRead);
    /// ```
    pub fn to_write_variant(&self, value: Value) -> PathStep {
        PathStep::Write(self.accessor().clone(), value)
    }
}

impl From<Accessor> for PathStep {
    fn from(accessor: Accessor) -> Self {
        PathStep::Read(accessor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify() {
        assert_eq!(
            PathStep::Read(Accessor::Index(0)).class(),
            StepClass::SequenceLike
        );
        assert_eq!(
            PathStep::Read(Accessor::Key("hello".into())).class(),
            StepClass::MappingLike
        );
        assert_eq!(
            PathStep::Read(Accessor::field("egg")).class(),
            StepClass::MappingLike
        );
        // Assigned value does not change classification
        assert_eq!(
            PathStep::Write(Accessor::Index(-1), json!("x")).class(),
            StepClass::SequenceLike
        );
    }

    #[test]
    fn test_kinds() {
        let cases = [
            (PathStep::Read(Accessor::field("a")), StepKind::FieldRead),
            (PathStep::Write(Accessor::field("a"), json!(1)), StepKind::FieldWrite),
            (PathStep::Read(Accessor::Index(1)), StepKind::IndexRead),
            (PathStep::Write(Accessor::Index(1), json!(1)), StepKind::IndexWrite),
            (PathStep::Read(Accessor::Key("k".into())), StepKind::KeyRead),
            (PathStep::Write(Accessor::Key("k".into()), json!(1)), StepKind::KeyWrite),
        ];
        for (step, kind) in cases {
            assert_eq!(step.kind(), kind);
            assert_eq!(step.is_write(), kind.is_write());
        }
    }

    #[test]
    fn test_read_to_write_variant() {
        let read = PathStep::Read(Accessor::Key("there".into()));
        let write = read.to_write_variant(json!(4));
        assert_eq!(write, PathStep::Write(Accessor::Key("there".into()), json!(4)));
        // Original untouched
        assert_eq!(read, PathStep::Read(Accessor::Key("there".into())));
    }

    #[test]
    fn test_write_to_write_variant_replaces_value() {
        let write = PathStep::Write(Accessor::Index(3), json!(5));
        let rewritten = write.to_write_variant(json!("hello"));
        assert_eq!(rewritten, PathStep::Write(Accessor::Index(3), json!("hello")));
        assert_eq!(write.assigned(), Some(&json!(5)));
    }

    #[test]
    fn test_call_to_write_variant_keeps_args() {
        let call = PathStep::Read(Accessor::Field {
            name: "hello".into(),
            args: vec![json!("there")],
        });
        let write = call.to_write_variant(json!(65));
        assert_eq!(write.kind(), StepKind::FieldWrite);
        assert_eq!(
            write.accessor(),
            &Accessor::Field {
                name: "hello".into(),
                args: vec![json!("there")],
            }
        );
        assert_eq!(write.assigned(), Some(&json!(65)));
    }

    #[test]
    fn test_equality_is_structural() {
        let a = PathStep::Read(Accessor::Field {
            name: "yes".into(),
            args: vec![json!("sadf"), json!(4)],
        });
        let b = PathStep::Read(Accessor::Field {
            name: "yes".into(),
            args: vec![json!("sadf"), json!(4)],
        });
        let c = PathStep::Read(Accessor::Field {
            name: "no".into(),
            args: vec![json!("sadf"), json!(4)],
        });
        let d = PathStep::Read(Accessor::Field {
            name: "yes".into(),
            args: vec![json!("sadf")],
        });
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
