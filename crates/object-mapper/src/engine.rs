//! Running a mapping set over an input tree.

use serde_json::Value;
use tracing::trace;

use crate::direction::Direction;
use crate::error::MapError;
use crate::get::get;
use crate::mapping::MappingSet;
use crate::set::set;

impl MappingSet {
    /// Maps a left-shaped `input` to its right-shaped counterpart.
    ///
    /// # Example
    ///
    /// ```
    /// use object_mapper::{MappingEntry, MappingSet};
    /// use object_mapper_path::obj;
    /// use serde_json::json;
    ///
    /// let set = MappingSet::register(
    ///     [MappingEntry::new(obj().key("hello").index(2), obj().index(1).key("this"))],
    ///     None,
    /// )
    /// .unwrap();
    /// let output = set.map(&json!({"yo": 3, "hello": [88, 99, 100, 333]})).unwrap();
    /// assert_eq!(output, json!([null, {"this": 100}]));
    /// ```
    pub fn map(&self, input: &Value) -> Result<Value, MapError> {
        self.map_in(Direction::LeftToRight, input)
    }

    /// Maps a right-shaped `input` back to its left-shaped counterpart.
    ///
    /// Mappings still run in declaration order; only their source and
    /// target sides and the transform direction are swapped.
    pub fn reverse_map(&self, input: &Value) -> Result<Value, MapError> {
        self.map_in(Direction::RightToLeft, input)
    }

    /// Runs every mapping in declaration order in the given direction.
    ///
    /// The output is built in a local value that is only returned once all
    /// mappings succeeded.
    pub fn map_in(&self, direction: Direction, input: &Value) -> Result<Value, MapError> {
        let mut output = self
            .root_kinds()
            .get(direction.target())
            .map(|kind| kind.empty())
            .unwrap_or(Value::Null);

        for (index, mapping) in self.mappings().iter().enumerate() {
            let from = mapping.path(direction.source());
            let to = mapping.path(direction.target());
            trace!(mapping = index, ?direction, %from, %to, "applying mapping");

            let value = get(from, input).map_err(|source| MapError::Input {
                mapping: index,
                source,
            })?;
            let value = self.transform(mapping, direction, value);
            output = set(to, output, value).map_err(|source| MapError::Output {
                mapping: index,
                source,
            })?;
        }
        Ok(output)
    }
}
