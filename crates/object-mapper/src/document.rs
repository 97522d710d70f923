//! Mapping sets declared as data.
//!
//! A [`MappingDocument`] is the serde form of a mapping set: paths in text
//! notation, optional root kinds, and transforms referred to by name. Names
//! are resolved against a [`TransformRegistry`] when the document is
//! registered.
//!
//! ```json
//! {
//!   "roots": { "left": "mapping" },
//!   "mappings": [
//!     { "left": "[\"hello\"][2]", "right": "[1][\"this\"]", "transform": "double" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use object_mapper_path::Path;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigurationError;
use crate::mapping::{MappingEntry, MappingSet, RootKinds, Transform};

/// Named transforms available to documents.
#[derive(Debug, Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, Transform>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named transform, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, transform: Transform) -> Option<Transform> {
        self.transforms.insert(name.into(), transform)
    }

    pub fn with(mut self, name: impl Into<String>, transform: Transform) -> Self {
        self.insert(name, transform);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }

    fn resolve(&self, name: &str) -> Result<Transform, ConfigurationError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownTransform(name.to_string()))
    }
}

/// One mapping as declared in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingDeclaration {
    #[serde(default)]
    pub left: Path,
    #[serde(default)]
    pub right: Path,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

/// A mapping set in declarative form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingDocument {
    #[serde(default)]
    pub roots: RootKinds,
    /// Name of a registry transform applied to every mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<String>,
    #[serde(default)]
    pub mappings: Vec<MappingDeclaration>,
}

impl MappingDocument {
    /// Parses a document from JSON.
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(text).map_err(|err| ConfigurationError::Document(err.to_string()))
    }

    /// Resolves transform names and registers the mapping set.
    ///
    /// # Errors
    ///
    /// - `UnknownTransform` for a name missing from `registry`
    /// - every registration error of [`MappingSet::register`] and
    ///   [`MappingSet::register_delegated`]
    pub fn register(&self, registry: &TransformRegistry) -> Result<MappingSet, ConfigurationError> {
        let mut entries = Vec::with_capacity(self.mappings.len());
        for declaration in &self.mappings {
            let mut entry = MappingEntry::new(declaration.left.clone(), declaration.right.clone());
            if let Some(name) = &declaration.transform {
                entry = entry.with_transform(registry.resolve(name)?);
            }
            entries.push(entry);
        }
        debug!(
            mappings = entries.len(),
            delegate = self.delegate.as_deref(),
            "registering mapping document"
        );
        match &self.delegate {
            Some(name) => {
                MappingSet::delegated(Arc::new(registry.resolve(name)?), entries, self.roots)
            }
            None => MappingSet::register(entries, Some(self.roots)),
        }
    }
}
