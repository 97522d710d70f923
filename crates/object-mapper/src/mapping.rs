//! Field mappings, transforms and mapping-set registration.

use std::fmt;
use std::sync::Arc;

use object_mapper_path::{validate_path, Path};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::direction::{Direction, Side};
use crate::error::ConfigurationError;
use crate::shape::RootKind;

// ── Transforms ────────────────────────────────────────────────────────────

/// A leaf-value function.
pub type LeafFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// An external bidirectional converter.
pub trait Bidirectional: Send + Sync {
    /// Left-to-right conversion.
    fn forward(&self, value: Value) -> Value;
    /// Right-to-left conversion.
    fn inverse(&self, value: Value) -> Value;
}

/// Leaf transform of one mapping.
#[derive(Clone)]
pub enum Transform {
    Functions {
        left_to_right: LeafFn,
        right_to_left: LeafFn,
    },
    Delegate(Arc<dyn Bidirectional>),
}

impl Transform {
    pub fn functions<F, G>(left_to_right: F, right_to_left: G) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
        G: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Transform::Functions {
            left_to_right: Arc::new(left_to_right),
            right_to_left: Arc::new(right_to_left),
        }
    }

    pub fn delegate(delegate: impl Bidirectional + 'static) -> Self {
        Transform::Delegate(Arc::new(delegate))
    }

    /// Applies the transform in the sense of `direction`.
    pub fn apply(&self, direction: Direction, value: Value) -> Value {
        match (self, direction) {
            (Transform::Functions { left_to_right, .. }, Direction::LeftToRight) => {
                left_to_right(value)
            }
            (Transform::Functions { right_to_left, .. }, Direction::RightToLeft) => {
                right_to_left(value)
            }
            (Transform::Delegate(delegate), direction) => {
                apply_delegate(delegate.as_ref(), direction, value)
            }
        }
    }

    fn is_delegate(&self) -> bool {
        matches!(self, Transform::Delegate(_))
    }
}

fn apply_delegate(delegate: &dyn Bidirectional, direction: Direction, value: Value) -> Value {
    match direction {
        Direction::LeftToRight => delegate.forward(value),
        Direction::RightToLeft => delegate.inverse(value),
    }
}

/// A transform can stand in as the delegate of a whole set.
impl Bidirectional for Transform {
    fn forward(&self, value: Value) -> Value {
        self.apply(Direction::LeftToRight, value)
    }

    fn inverse(&self, value: Value) -> Value {
        self.apply(Direction::RightToLeft, value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Functions { .. } => f.write_str("Transform::Functions"),
            Transform::Delegate(_) => f.write_str("Transform::Delegate"),
        }
    }
}

// ── Declarations ──────────────────────────────────────────────────────────

/// One declared correspondence, before registration checks it.
///
/// Every `with_*` call adds a transform declaration; registration accepts
/// at most one per entry.
#[derive(Debug, Clone)]
pub struct MappingEntry {
    left: Path,
    right: Path,
    transforms: Vec<Transform>,
}

impl MappingEntry {
    pub fn new(left: impl Into<Path>, right: impl Into<Path>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            transforms: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn with_functions<F, G>(self, left_to_right: F, right_to_left: G) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
        G: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.with_transform(Transform::functions(left_to_right, right_to_left))
    }

    pub fn with_delegate(self, delegate: impl Bidirectional + 'static) -> Self {
        self.with_transform(Transform::delegate(delegate))
    }
}

/// Explicitly declared root container kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootKinds {
    #[serde(default)]
    pub left: Option<RootKind>,
    #[serde(default)]
    pub right: Option<RootKind>,
}

impl RootKinds {
    pub fn new(left: RootKind, right: RootKind) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn get(&self, side: Side) -> Option<RootKind> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

// ── Registered form ───────────────────────────────────────────────────────

/// A registered correspondence between a left and a right path.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    left: Path,
    right: Path,
    transform: Option<Transform>,
}

impl FieldMapping {
    pub fn left(&self) -> &Path {
        &self.left
    }

    pub fn right(&self) -> &Path {
        &self.right
    }

    pub fn path(&self, side: Side) -> &Path {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }
}

/// An ordered, immutable set of field mappings.
///
/// Built once by [`register`](Self::register) or
/// [`register_delegated`](Self::register_delegated) and then shared by any
/// number of map calls, from any number of threads.
#[derive(Clone)]
pub struct MappingSet {
    mappings: Vec<FieldMapping>,
    delegate: Option<Arc<dyn Bidirectional>>,
    roots: RootKinds,
}

impl MappingSet {
    /// Registers a mapping set from entries in declaration order.
    ///
    /// A root kind given in `roots` must agree with the first step of every
    /// path on its side; a side without one gets its kind from those steps.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationError`]. Nothing is checked again at map time.
    ///
    /// # Example
    ///
    /// ```
    /// use object_mapper::{MappingEntry, MappingSet, RootKind};
    /// use object_mapper_path::obj;
    ///
    /// let set = MappingSet::register(
    ///     [MappingEntry::new(obj().key("hello").index(2), obj().index(1).key("this"))],
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(set.root_kinds().left, Some(RootKind::Mapping));
    /// assert_eq!(set.root_kinds().right, Some(RootKind::Sequence));
    /// ```
    pub fn register<I>(entries: I, roots: Option<RootKinds>) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = MappingEntry>,
    {
        let mut mappings = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            mappings.push(field_mapping(index, entry)?);
        }
        Self::finish(mappings, None, roots.unwrap_or_default())
    }

    /// Registers a mapping set whose every value passes through one
    /// external delegate. Entries must not declare transforms of their own.
    pub fn register_delegated<D, I>(delegate: D, entries: I) -> Result<Self, ConfigurationError>
    where
        D: Bidirectional + 'static,
        I: IntoIterator<Item = MappingEntry>,
    {
        Self::delegated(Arc::new(delegate), entries, RootKinds::default())
    }

    pub(crate) fn delegated<I>(
        delegate: Arc<dyn Bidirectional>,
        entries: I,
        roots: RootKinds,
    ) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = MappingEntry>,
    {
        let mut mappings = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.transforms.is_empty() {
                return Err(ConfigurationError::DelegateWithInlineTransforms { mapping: index });
            }
            mappings.push(field_mapping(index, entry)?);
        }
        Self::finish(mappings, Some(delegate), roots)
    }

    fn finish(
        mappings: Vec<FieldMapping>,
        delegate: Option<Arc<dyn Bidirectional>>,
        declared: RootKinds,
    ) -> Result<Self, ConfigurationError> {
        let roots = RootKinds {
            left: resolve_root_kind(&mappings, Side::Left, declared.left)?,
            right: resolve_root_kind(&mappings, Side::Right, declared.right)?,
        };
        note_overlaps(&mappings);
        debug!(
            mappings = mappings.len(),
            delegated = delegate.is_some(),
            left_root = ?roots.left,
            right_root = ?roots.right,
            "registered mapping set"
        );
        Ok(Self {
            mappings,
            delegate,
            roots,
        })
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Resolved root kinds, declared or inferred.
    pub fn root_kinds(&self) -> RootKinds {
        self.roots
    }

    pub fn is_delegated(&self) -> bool {
        self.delegate.is_some()
    }

    /// Transforms `value` read by `mapping` for the given direction, using
    /// the set-wide delegate if there is one.
    pub(crate) fn transform(
        &self,
        mapping: &FieldMapping,
        direction: Direction,
        value: Value,
    ) -> Value {
        if let Some(delegate) = &self.delegate {
            return apply_delegate(delegate.as_ref(), direction, value);
        }
        match &mapping.transform {
            Some(transform) => transform.apply(direction, value),
            None => value,
        }
    }
}

impl fmt::Debug for MappingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingSet")
            .field("mappings", &self.mappings)
            .field("delegated", &self.delegate.is_some())
            .field("roots", &self.roots)
            .finish()
    }
}

fn field_mapping(index: usize, entry: MappingEntry) -> Result<FieldMapping, ConfigurationError> {
    for (side, path) in [(Side::Left, &entry.left), (Side::Right, &entry.right)] {
        validate_path(path).map_err(|source| ConfigurationError::InvalidPath {
            mapping: index,
            side,
            source,
        })?;
    }
    let mut transforms = entry.transforms.into_iter();
    let transform = transforms.next();
    if let Some(extra) = transforms.next() {
        let competing = transform
            .as_ref()
            .is_some_and(|first| first.is_delegate() != extra.is_delegate());
        return Err(if competing {
            ConfigurationError::CompetingTransforms { mapping: index }
        } else {
            ConfigurationError::DuplicateTransform { mapping: index }
        });
    }
    Ok(FieldMapping {
        left: entry.left,
        right: entry.right,
        transform,
    })
}

/// The kind every non-root path on `side` starts with. A declared kind is
/// the expected kind from the start; otherwise the first path decides.
fn resolve_root_kind(
    mappings: &[FieldMapping],
    side: Side,
    declared: Option<RootKind>,
) -> Result<Option<RootKind>, ConfigurationError> {
    let mut resolved = declared;
    for (index, mapping) in mappings.iter().enumerate() {
        let Some(class) = mapping.path(side).first_class() else {
            continue;
        };
        let found = RootKind::from(class);
        match resolved {
            None => resolved = Some(found),
            Some(expected) if expected != found => {
                return Err(ConfigurationError::ConflictingRootKind {
                    mapping: index,
                    side,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
    }
    Ok(resolved)
}

/// Later mappings win where paths overlap; worth a note when debugging.
fn note_overlaps(mappings: &[FieldMapping]) {
    for (later, mapping) in mappings.iter().enumerate() {
        for (earlier, previous) in mappings[..later].iter().enumerate() {
            for side in [Side::Left, Side::Right] {
                let (path, other) = (mapping.path(side), previous.path(side));
                if path.overlaps(other) {
                    let nested = path.is_parent_of(other) || other.is_parent_of(path);
                    debug!(
                        %side,
                        earlier,
                        later,
                        nested,
                        path = %path,
                        "mapping paths overlap, the later write wins"
                    );
                }
            }
        }
    }
}
