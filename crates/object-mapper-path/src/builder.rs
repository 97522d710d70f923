//! Fluent path capture.

use serde_json::Value;

use crate::path::Path;
use crate::types::{Accessor, PathStep};

/// Argument of [`PathBuilder::at`]: integers select sequence positions,
/// strings select mapping keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Subscript {
    Index(i64),
    Key(String),
}

impl From<i64> for Subscript {
    fn from(index: i64) -> Self {
        Subscript::Index(index)
    }
}

impl From<i32> for Subscript {
    fn from(index: i32) -> Self {
        Subscript::Index(index.into())
    }
}

impl From<usize> for Subscript {
    fn from(index: usize) -> Self {
        Subscript::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Subscript {
    fn from(key: &str) -> Self {
        Subscript::Key(key.to_string())
    }
}

impl From<String> for Subscript {
    fn from(key: String) -> Self {
        Subscript::Key(key)
    }
}

impl From<Subscript> for Accessor {
    fn from(subscript: Subscript) -> Self {
        match subscript {
            Subscript::Index(index) => Accessor::Index(index),
            Subscript::Key(key) => Accessor::Key(key),
        }
    }
}

/// Records chained accessor calls into a [`Path`].
///
/// Each call appends one read step and hands the builder back for further
/// chaining; [`freeze`](Self::freeze) takes an immutable snapshot.
///
/// # Example
///
/// ```
/// use object_mapper_path::{obj, Accessor, PathStep};
///
/// let path = obj().at("hello").at(2).freeze();
/// assert_eq!(
///     path.steps(),
///     &[
///         PathStep::Read(Accessor::Key("hello".into())),
///         PathStep::Read(Accessor::Index(2)),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    steps: Vec<PathStep>,
}

/// Starts a fresh, empty capture.
pub fn obj() -> PathBuilder {
    PathBuilder::new()
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, accessor: Accessor) -> Self {
        self.steps.push(PathStep::Read(accessor));
        self
    }

    /// Attribute-style access, e.g. `.name`.
    pub fn field(self, name: impl Into<String>) -> Self {
        self.push(Accessor::field(name))
    }

    /// Attribute-style access with call arguments, e.g. `.how("are")`.
    pub fn call<I>(self, name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.push(Accessor::Field {
            name: name.into(),
            args: args.into_iter().collect(),
        })
    }

    pub fn index(self, index: i64) -> Self {
        self.push(Accessor::Index(index))
    }

    pub fn key(self, key: impl Into<String>) -> Self {
        self.push(Accessor::Key(key.into()))
    }

    /// Subscript access: an integer records an index step, a string a key
    /// step.
    pub fn at(self, subscript: impl Into<Subscript>) -> Self {
        self.push(subscript.into().into())
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Snapshot of the recorded steps. Recording more steps afterwards does
    /// not affect the returned path.
    pub fn freeze(&self) -> Path {
        Path::new(self.steps.clone())
    }
}

impl From<PathBuilder> for Path {
    fn from(builder: PathBuilder) -> Self {
        Path::new(builder.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_in_order() {
        let path = obj()
            .field("this")
            .call("should", [json!("be")])
            .at("saved")
            .freeze();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Read(Accessor::field("this")),
                PathStep::Read(Accessor::Field {
                    name: "should".into(),
                    args: vec![json!("be")],
                }),
                PathStep::Read(Accessor::Key("saved".into())),
            ]
        );
    }

    #[test]
    fn test_subscript_classification() {
        assert_eq!(obj().at(7).freeze(), obj().index(7).freeze());
        assert_eq!(obj().at(7usize).freeze(), obj().index(7).freeze());
        assert_eq!(obj().at(-1i64).freeze(), obj().index(-1).freeze());
        assert_eq!(obj().at("7").freeze(), obj().key("7").freeze());
        assert_eq!(
            obj().at(String::from("there")).freeze(),
            obj().key("there").freeze()
        );
    }

    #[test]
    fn test_freeze_is_a_snapshot() {
        let builder = obj().field("once");
        let first = builder.freeze();
        let builder = builder.field("twice");
        let second = builder.freeze();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(first, obj().field("once").freeze());
    }

    #[test]
    fn test_independent_builders() {
        let a = obj().key("a");
        let b = obj();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        assert!(b.freeze().is_root());
    }

    #[test]
    fn test_into_path() {
        let path: Path = obj().key("hello").index(2).into();
        assert_eq!(path, obj().key("hello").index(2).freeze());
    }
}
