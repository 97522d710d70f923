//! Writing values along a path, creating containers on the way.

use object_mapper_path::{Accessor, Path, PathStep};
use serde_json::{Map, Value};

use crate::error::{AccessFailure, OutputAccessError};
use crate::get::resolve_index;
use crate::shape::Shape;

/// Set a value in a tree by path and return the updated tree.
///
/// Before a step is applied, the value it is applied to is made a container
/// of the step's class (a sequence for index steps, a mapping for key and
/// field steps) unless it already is one; field steps only ever vivify a
/// null. Containers that already have the
/// right shape are kept with all their contents. Sequence writes past the
/// end pad with null; mapping writes insert or overwrite one key.
///
/// # Errors
///
/// - a negative index reaching before the start of a sequence
/// - an index more than [`MAX_PADDING`] past the end of a sequence
/// - a field step with call arguments
/// - a field step applied to a value that is neither a mapping nor null
///
/// # Example
///
/// ```
/// use object_mapper::set;
/// use object_mapper_path::obj;
/// use serde_json::json;
///
/// let path = obj().index(1).key("this").freeze();
/// assert_eq!(set(&path, json!(null), json!(100)).unwrap(), json!([null, {"this": 100}]));
///
/// let path = obj().key("a").freeze();
/// assert_eq!(set(&path, json!({"b": "x"}), json!("new")).unwrap(), json!({"a": "new", "b": "x"}));
/// ```
pub fn set(path: &Path, mut root: Value, value: Value) -> Result<Value, OutputAccessError> {
    if path.is_root() {
        return Ok(value);
    }
    let mut current = &mut root;
    for (position, step) in path.iter().enumerate() {
        current = slot_mut(current, step, position)?;
    }
    *current = value;
    Ok(root)
}

/// Most nulls a single sequence write may pad with.
pub const MAX_PADDING: usize = 1 << 16;

/// Returns the slot `step` addresses inside `value`, shaping `value` for the
/// step first and creating the slot as null if it does not exist yet.
fn slot_mut<'a>(
    value: &'a mut Value,
    step: &PathStep,
    position: usize,
) -> Result<&'a mut Value, OutputAccessError> {
    let fail = |shape, reason| OutputAccessError {
        step: step.clone(),
        position,
        shape,
        reason,
    };
    match step.accessor() {
        Accessor::Index(index) => {
            let items = vivify_sequence(value);
            let slot =
                sequence_slot(items, *index).map_err(|reason| fail(Shape::Sequence, reason))?;
            Ok(&mut items[slot])
        }
        Accessor::Key(key) => Ok(vivify_mapping(value)
            .entry(key.clone())
            .or_insert(Value::Null)),
        Accessor::Field { name, args } => {
            if !args.is_empty() {
                return Err(fail(
                    Shape::of(value),
                    AccessFailure::Arity { found: args.len() },
                ));
            }
            // Fields exist on mappings only; nothing but null is vivified.
            if !value.is_null() && !value.is_object() {
                return Err(fail(
                    Shape::of(value),
                    AccessFailure::ShapeMismatch {
                        expected: Shape::Mapping,
                    },
                ));
            }
            Ok(vivify_mapping(value)
                .entry(name.clone())
                .or_insert(Value::Null))
        }
    }
}

/// Resolves `index` in `items`, padding with null so that the position
/// exists.
fn sequence_slot(items: &mut Vec<Value>, index: i64) -> Result<usize, AccessFailure> {
    let len = items.len();
    let slot = match resolve_index(index, len) {
        Some(slot) => slot,
        None if index < 0 => return Err(AccessFailure::IndexOutOfRange { len }),
        None => return Err(AccessFailure::IndexTooLarge { index, len }),
    };
    if slot >= len {
        let new_len = slot
            .checked_add(1)
            .filter(|_| slot - len <= MAX_PADDING)
            .ok_or(AccessFailure::IndexTooLarge { index, len })?;
        items.resize(new_len, Value::Null);
    }
    Ok(slot)
}

fn vivify_sequence(value: &mut Value) -> &mut Vec<Value> {
    if !value.is_array() {
        *value = Value::Array(Vec::new());
    }
    match value {
        Value::Array(items) => items,
        _ => unreachable!("value was just made a sequence"),
    }
}

fn vivify_mapping(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just made a mapping"),
    }
}
