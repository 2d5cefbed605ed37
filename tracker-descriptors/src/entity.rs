//! The entity contract descriptors adapt.
//!
//! Entities are owned by the data layer and shared with descriptors through
//! [`EntityRef`]. All access is single-threaded, so writes go through `&self`
//! and implementations use interior mutability.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::AttributeError;

/// Attribute holding an entity's display label.
pub const NAME_ATTRIBUTE: &str = "Name";

/// Stable identity of an entity, the server's object token (e.g. `Story:1042`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// A selectable option as delivered by the server for list attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueOption {
    /// Server token of the option, e.g. `WorkitemPriority:139`.
    pub token: String,
    pub label: String,
}

impl ValueOption {
    pub fn new(token: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            label: label.into(),
        }
    }
}

/// A raw attribute value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum AttributeValue {
    #[default]
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Single-select option (`List` columns).
    Choice(ValueOption),
    /// Multi-select options (`Multi` columns).
    Choices(Vec<ValueOption>),
    /// Icon resource name.
    Image(String),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => Ok(()),
            AttributeValue::Text(text) | AttributeValue::Image(text) => f.write_str(text),
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Choice(option) => f.write_str(&option.label),
            AttributeValue::Choices(options) => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&option.label)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(text: &str) -> Self {
        AttributeValue::Text(text.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(text: String) -> Self {
        AttributeValue::Text(text)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<ValueOption> for AttributeValue {
    fn from(option: ValueOption) -> Self {
        AttributeValue::Choice(option)
    }
}

impl From<Vec<ValueOption>> for AttributeValue {
    fn from(options: Vec<ValueOption>) -> Self {
        AttributeValue::Choices(options)
    }
}

/// A work-tracking domain object with server-defined attributes.
pub trait Entity {
    /// Identity used for equality and hashing of descriptors.
    fn key(&self) -> &EntityKey;

    fn attribute(&self, name: &str) -> Result<AttributeValue, AttributeError>;

    fn set_attribute(&self, name: &str, value: AttributeValue) -> Result<(), AttributeError>;
}

/// Shared, non-owning-from-the-core handle to an entity.
pub type EntityRef = Rc<dyn Entity>;

/// In-memory entity.
///
/// Without a declared attribute set every name is accepted and unset names read
/// as [`AttributeValue::Null`]. With one, undeclared names fail with
/// [`AttributeError::Unknown`].
pub struct MemoryEntity {
    key: EntityKey,
    declared: Option<HashSet<String>>,
    read_only: HashSet<String>,
    values: RefCell<HashMap<String, AttributeValue>>,
}

impl MemoryEntity {
    pub fn new(key: impl Into<EntityKey>) -> Self {
        Self {
            key: key.into(),
            declared: None,
            read_only: HashSet::new(),
            values: RefCell::new(HashMap::new()),
        }
    }

    /// Set an initial attribute value.
    ///
    /// Initial values are not checked against the declared set; reads and
    /// writes are, so an undeclared initial value is unreachable.
    pub fn with(self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.values.borrow_mut().insert(name.into(), value.into());
        self
    }

    /// Restrict the entity to the given attribute names.
    pub fn with_declared<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Refuse writes to an attribute.
    pub fn with_read_only(mut self, name: impl Into<String>) -> Self {
        self.read_only.insert(name.into());
        self
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> EntityRef {
        Rc::new(self)
    }

    fn check_declared(&self, name: &str) -> Result<(), AttributeError> {
        match &self.declared {
            Some(declared) if !declared.contains(name) => Err(AttributeError::unknown(name)),
            _ => Ok(()),
        }
    }
}

impl Entity for MemoryEntity {
    fn key(&self) -> &EntityKey {
        &self.key
    }

    fn attribute(&self, name: &str) -> Result<AttributeValue, AttributeError> {
        self.check_declared(name)?;
        Ok(self
            .values
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn set_attribute(&self, name: &str, value: AttributeValue) -> Result<(), AttributeError> {
        self.check_declared(name)?;
        if self.read_only.contains(name) {
            return Err(AttributeError::rejected(name, "attribute is read-only"));
        }
        self.values.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }
}

impl fmt::Debug for MemoryEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryEntity")
            .field("key", &self.key)
            .field("attributes", &self.values.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_attribute_reads_null() {
        let entity = MemoryEntity::new("Task:1");
        assert_eq!(entity.attribute("Owner").unwrap(), AttributeValue::Null);
    }

    #[test]
    fn declared_set_rejects_unknown_names() {
        let entity = MemoryEntity::new("Task:1").with_declared(["Name"]);
        assert_eq!(
            entity.attribute("Estimate"),
            Err(AttributeError::unknown("Estimate"))
        );
        assert!(entity.set_attribute("Estimate", 3.0.into()).is_err());
        assert!(entity.set_attribute("Name", "Fix login".into()).is_ok());
    }

    #[test]
    fn declared_set_checked_on_access_regardless_of_order() {
        let before = MemoryEntity::new("Task:1")
            .with("Estimate", 2.0)
            .with_declared(["Name"]);
        let after = MemoryEntity::new("Task:1")
            .with_declared(["Name"])
            .with("Estimate", 2.0);

        for entity in [before, after] {
            assert_eq!(
                entity.attribute("Estimate"),
                Err(AttributeError::unknown("Estimate"))
            );
        }
    }

    #[test]
    fn read_only_attribute_rejects_writes() {
        let entity = MemoryEntity::new("Task:1")
            .with("Number", "T-01001")
            .with_read_only("Number");
        let err = entity.set_attribute("Number", "T-9".into()).unwrap_err();
        assert!(matches!(err, AttributeError::Rejected { .. }));
        assert_eq!(entity.attribute("Number").unwrap(), "T-01001".into());
    }

    #[test]
    fn display_forms() {
        assert_eq!(AttributeValue::Null.to_string(), "");
        assert_eq!(AttributeValue::from(2.5).to_string(), "2.5");
        assert_eq!(
            AttributeValue::from(ValueOption::new("WorkitemPriority:139", "High")).to_string(),
            "High"
        );
        let owners = AttributeValue::from(vec![
            ValueOption::new("Member:20", "Alice"),
            ValueOption::new("Member:21", "Bob"),
        ]);
        assert_eq!(owners.to_string(), "Alice, Bob");
    }

    #[test]
    fn value_serializes_tagged() {
        let json = serde_json::to_string(&AttributeValue::from("x")).unwrap();
        assert_eq!(json, r#"{"kind":"text","value":"x"}"#);
    }
}
