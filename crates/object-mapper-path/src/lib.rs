//! Access paths for structural mapping.
//!
//! A [`Path`] is an ordered list of [`PathStep`]s, each one a field, index or
//! key accessor. Paths are captured with the fluent [`PathBuilder`] (or its
//! shorthand [`obj`]) or parsed from the text notation, and are immutable
//! once built.
//!
//! # Example
//!
//! ```
//! use object_mapper_path::{obj, Path, StepClass};
//!
//! // Capture a path with chained accessor calls
//! let path = obj().at("hello").at(2).freeze();
//! assert_eq!(path.len(), 2);
//! assert_eq!(path.first_class(), Some(StepClass::MappingLike));
//!
//! // The same path in text notation
//! assert_eq!(path.to_string(), r#"["hello"][2]"#);
//! let parsed: Path = r#"["hello"][2]"#.parse().unwrap();
//! assert_eq!(parsed, path);
//! ```

pub mod types;
pub use types::{Accessor, PathStep, StepClass, StepKind};

mod path;
pub use path::Path;

mod builder;
pub use builder::{obj, PathBuilder, Subscript};

mod parser;
pub use parser::{ParseError, PathParser};

pub mod validate;
pub use validate::{is_identifier, validate_path, ValidationError, MAX_PATH_LENGTH};
