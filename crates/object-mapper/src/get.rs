//! Reading values along a path.

use object_mapper_path::{Accessor, Path, PathStep};
use serde_json::Value;

use crate::error::{AccessFailure, InputAccessError};
use crate::shape::Shape;

/// Get a value from a tree by path.
///
/// Absent indices and keys read as null. Anything else that does not fit
/// the value it is applied to is an error: a missing field, a field called
/// with arguments, an index or key applied to the wrong kind of value, and
/// any step applied to a null (including one read as absent).
///
/// # Example
///
/// ```
/// use object_mapper::get;
/// use object_mapper_path::obj;
/// use serde_json::json;
///
/// let doc = json!({"yo": 3, "hello": [88, 99, 100, 333]});
/// assert_eq!(get(&obj().key("hello").index(2).freeze(), &doc).unwrap(), json!(100));
/// assert_eq!(get(&obj().key("hello").index(9).freeze(), &doc).unwrap(), json!(null));
/// assert_eq!(get(&obj().key("nope").freeze(), &doc).unwrap(), json!(null));
/// assert!(get(&obj().field("nope").freeze(), &doc).is_err());
/// ```
pub fn get(path: &Path, root: &Value) -> Result<Value, InputAccessError> {
    Ok(get_ref(path, root)?.cloned().unwrap_or(Value::Null))
}

/// Like [`get`], without cloning. `None` stands for an absent index or key.
pub fn get_ref<'a>(path: &Path, root: &'a Value) -> Result<Option<&'a Value>, InputAccessError> {
    let mut current = Some(root);
    for (position, step) in path.iter().enumerate() {
        current = read_step(current.unwrap_or(&Value::Null), step, position)?;
    }
    Ok(current)
}

fn read_step<'a>(
    value: &'a Value,
    step: &PathStep,
    position: usize,
) -> Result<Option<&'a Value>, InputAccessError> {
    let fail = |reason| InputAccessError {
        step: step.clone(),
        position,
        shape: Shape::of(value),
        reason,
    };
    let accessor = match step {
        PathStep::Read(accessor) => accessor,
        PathStep::Write(..) => return Err(fail(AccessFailure::WriteStep)),
    };
    match (accessor, value) {
        (Accessor::Field { name, args }, Value::Object(map)) => {
            if !args.is_empty() {
                return Err(fail(AccessFailure::Arity { found: args.len() }));
            }
            match map.get(name) {
                Some(field) => Ok(Some(field)),
                None => Err(fail(AccessFailure::MissingField)),
            }
        }
        (Accessor::Key(key), Value::Object(map)) => Ok(map.get(key)),
        (Accessor::Index(index), Value::Array(items)) => {
            Ok(resolve_index(*index, items.len()).and_then(|i| items.get(i)))
        }
        (Accessor::Index(_), _) => Err(fail(AccessFailure::ShapeMismatch {
            expected: Shape::Sequence,
        })),
        (Accessor::Field { .. } | Accessor::Key(_), _) => Err(fail(AccessFailure::ShapeMismatch {
            expected: Shape::Mapping,
        })),
    }
}

/// Resolves a possibly negative index against a sequence of length `len`.
/// Negative indices count from the end; `None` if that lands before the
/// start. Non-negative indices are returned as is, even past the end.
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        return usize::try_from(index).ok();
    }
    let back = usize::try_from(index.unsigned_abs()).ok()?;
    len.checked_sub(back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_mapper_path::obj;
    use serde_json::json;

    #[test]
    fn test_get_root() {
        let doc = json!({"a": 1});
        assert_eq!(get(&Path::root(), &doc).unwrap(), doc);
        assert_eq!(get(&Path::root(), &json!("hello")).unwrap(), json!("hello"));
        assert_eq!(get(&Path::root(), &json!(null)).unwrap(), json!(null));
    }

    #[test]
    fn test_get_nested() {
        let doc = json!({"a": {"b": [1, {"c": "deep"}]}});
        let path = obj().key("a").key("b").index(1).key("c").freeze();
        assert_eq!(get(&path, &doc).unwrap(), json!("deep"));
    }

    #[test]
    fn test_get_absent_is_null() {
        let doc = json!({"list": [1, 2, 3]});
        assert_eq!(get(&obj().key("list").index(3).freeze(), &doc).unwrap(), json!(null));
        assert_eq!(get(&obj().key("missing").freeze(), &doc).unwrap(), json!(null));
        assert_eq!(get_ref(&obj().key("missing").freeze(), &doc).unwrap(), None);
    }

    #[test]
    fn test_get_explicit_null() {
        let doc = json!({"foo": null});
        assert_eq!(
            get_ref(&obj().key("foo").freeze(), &doc).unwrap(),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_get_negative_index() {
        let doc = json!([1, 2, 3]);
        assert_eq!(get(&obj().index(-1).freeze(), &doc).unwrap(), json!(3));
        assert_eq!(get(&obj().index(-3).freeze(), &doc).unwrap(), json!(1));
        assert_eq!(get(&obj().index(-4).freeze(), &doc).unwrap(), json!(null));
        assert_eq!(get(&obj().index(i64::MIN).freeze(), &doc).unwrap(), json!(null));
    }

    #[test]
    fn test_get_field() {
        let doc = json!({"hi": {"one": 1}});
        assert_eq!(get(&obj().key("hi").field("one").freeze(), &doc).unwrap(), json!(1));

        let err = get(&obj().key("hi").field("two").freeze(), &doc).unwrap_err();
        assert_eq!(err.reason, AccessFailure::MissingField);
        assert_eq!(err.position, 1);
        assert_eq!(err.shape, Shape::Mapping);
    }

    #[test]
    fn test_get_field_with_arguments() {
        let doc = json!({"one": 1});
        let err = get(&obj().call("one", [json!("arg")]).freeze(), &doc).unwrap_err();
        assert_eq!(err.reason, AccessFailure::Arity { found: 1 });
    }

    #[test]
    fn test_get_shape_mismatch() {
        let doc = json!({"a": "scalar", "b": [1]});

        let err = get(&obj().key("a").index(0).freeze(), &doc).unwrap_err();
        assert_eq!(err.shape, Shape::String);
        assert_eq!(
            err.reason,
            AccessFailure::ShapeMismatch {
                expected: Shape::Sequence
            }
        );

        let err = get(&obj().key("b").key("x").freeze(), &doc).unwrap_err();
        assert_eq!(err.shape, Shape::Sequence);
        assert_eq!(
            err.reason,
            AccessFailure::ShapeMismatch {
                expected: Shape::Mapping
            }
        );

        // Index on a mapping is a mismatch, not a lookup of key "0"
        assert!(get(&obj().index(0).freeze(), &json!({"0": 1})).is_err());
    }

    #[test]
    fn test_get_through_absent_fails() {
        let doc = json!({"yo": 3});
        let err = get(&obj().key("hello").index(2).freeze(), &doc).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.shape, Shape::Null);
    }

    #[test]
    fn test_get_write_step() {
        let path = obj().key("a").freeze().to_setter(json!(1));
        let err = get(&path, &json!({"a": 2})).unwrap_err();
        assert_eq!(err.reason, AccessFailure::WriteStep);
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(0, 0), Some(0));
        assert_eq!(resolve_index(5, 2), Some(5));
        assert_eq!(resolve_index(-1, 2), Some(1));
        assert_eq!(resolve_index(-2, 2), Some(0));
        assert_eq!(resolve_index(-3, 2), None);
        assert_eq!(resolve_index(i64::MIN, 2), None);
    }
}
