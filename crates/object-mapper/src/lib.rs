//! Declarative, bidirectional mapping between nested sequences and mappings.
//!
//! A [`MappingSet`] pairs a left and a right [`Path`] per field. Mapping an
//! input reads each left path, optionally transforms the value, and writes
//! it along the right path into the output, creating missing containers on
//! the way. Reverse mapping runs the same set right to left.
//!
//! # Example
//!
//! ```
//! use object_mapper::{MappingEntry, MappingSet};
//! use object_mapper_path::obj;
//! use serde_json::json;
//!
//! let set = MappingSet::register(
//!     [
//!         MappingEntry::new(obj().key("hello").index(1), obj().index(1).key("this")),
//!         MappingEntry::new(obj().key("hello").index(0), obj().index(1).key("chump")),
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! let from = json!({"hello": ["one", "two"]});
//! let to = json!([null, {"this": "two", "chump": "one"}]);
//! assert_eq!(set.map(&from).unwrap(), to);
//! assert_eq!(set.reverse_map(&to).unwrap(), from);
//! ```

pub use object_mapper_path::{obj, Accessor, Path, PathBuilder, PathStep, StepClass, StepKind};

mod direction;
pub use direction::{Direction, Side};

mod shape;
pub use shape::{RootKind, Shape};

pub mod error;
pub use error::{AccessFailure, ConfigurationError, InputAccessError, MapError, OutputAccessError};

mod get;
pub use get::{get, get_ref};

mod set;
pub use set::{set, MAX_PADDING};

mod mapping;
pub use mapping::{Bidirectional, FieldMapping, LeafFn, MappingEntry, MappingSet, RootKinds, Transform};

mod engine;

pub mod document;
pub use document::{MappingDeclaration, MappingDocument, TransformRegistry};
