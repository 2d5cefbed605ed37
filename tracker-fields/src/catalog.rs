//! Display-name localization.
//!
//! Column display names are localization keys. A missing translation never
//! blocks rendering: [`Localizer::resolve`] falls back to the key itself.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::error::{FieldsError, Result};

/// Resolves localization keys to display text.
pub trait Localizer {
    /// Look up a translation, `None` when the key is unknown.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Resolve a key, falling back to the key unchanged.
    fn resolve(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(text) => text,
            None => {
                debug!(key = %key, "no translation, using key");
                key.to_string()
            }
        }
    }
}

impl<L: Localizer + ?Sized> Localizer for Rc<L> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<L: Localizer + ?Sized> Localizer for &L {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Localizer that knows no translations; every key resolves to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocalizer;

impl Localizer for NoLocalizer {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory translation table, typically loaded from a flat YAML map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation.
    pub fn entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    /// Parse a flat `key: text` YAML map.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_yaml_ng::from_str(yaml)?;
        Ok(Self { entries })
    }

    /// Load a flat `key: text` YAML map from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FieldsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&content)?;
        debug!(path = %path.display(), entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for Catalog {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
