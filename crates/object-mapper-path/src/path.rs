//! The immutable [`Path`] type and its text form.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::parser::{ParseError, PathParser};
use crate::types::{Accessor, PathStep, StepClass};

/// An ordered, immutable list of [`PathStep`]s.
///
/// The empty path addresses the whole value. Cloning is cheap: the steps are
/// shared, never copied.
#[derive(Clone, PartialEq)]
pub struct Path {
    steps: Arc<[PathStep]>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Path {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check if this path addresses the whole value.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<&PathStep> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&PathStep> {
        self.steps.last()
    }

    /// Class of the first step; decides the container a value written along
    /// this path starts from.
    pub fn first_class(&self) -> Option<StepClass> {
        self.first().map(PathStep::class)
    }

    /// Check if `self` is a strict prefix of `other`.
    ///
    /// # Example
    ///
    /// ```
    /// use object_mapper_path::obj;
    ///
    /// let parent = obj().key("foo").freeze();
    /// let child = obj().key("foo").index(2).freeze();
    /// assert!(parent.is_parent_of(&child));
    /// assert!(!child.is_parent_of(&parent));
    /// assert!(!parent.is_parent_of(&parent));
    /// ```
    pub fn is_parent_of(&self, other: &Path) -> bool {
        self.len() < other.len() && other.steps.starts_with(&self.steps)
    }

    /// Check if writes along `self` and `other` can touch the same location,
    /// i.e. one path equals or extends the other. Only accessors are
    /// compared.
    pub fn overlaps(&self, other: &Path) -> bool {
        self.steps
            .iter()
            .zip(other.steps.iter())
            .all(|(a, b)| a.accessor() == b.accessor())
    }

    /// Copy of this path whose last step is the write variant assigning
    /// `value`. The root path has no step to convert and is returned as is.
    pub fn to_setter(&self, value: Value) -> Path {
        match self.steps.split_last() {
            None => self.clone(),
            Some((last, init)) => {
                let mut steps = init.to_vec();
                steps.push(last.to_write_variant(value));
                Path::new(steps)
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep> {
        self.steps.iter()
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Path::new(steps)
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Path::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

// ── Text form ─────────────────────────────────────────────────────────────

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field { name, args } if args.is_empty() => write!(f, ".{}", name),
            Accessor::Field { name, args } => {
                write!(f, ".{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Accessor::Index(index) => write!(f, "[{}]", index),
            // JSON string quoting keeps any key parseable.
            Accessor::Key(key) => write!(f, "[{}]", Value::String(key.clone())),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Read(accessor) => write!(f, "{}", accessor),
            PathStep::Write(accessor, value) => write!(f, "{} = {}", accessor, value),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.steps.iter() {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({:?})", self.to_string())
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathParser::parse(s)
    }
}

/// Serializes to the text notation. Write steps have no parseable text
/// form, so paths containing them fail to serialize.
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(position) = self.steps.iter().position(PathStep::is_write) {
            return Err(serde::ser::Error::custom(format!(
                "write step at {} has no text form",
                position
            )));
        }
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
