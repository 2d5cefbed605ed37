//! Error types for descriptors and entity stores

use thiserror::Error;

/// Result type for descriptor operations
pub type Result<T> = std::result::Result<T, DescriptorError>;

/// Rejection raised by an entity store for a get or set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    /// The entity does not carry this attribute
    #[error("attribute not recognized: {attribute}")]
    Unknown { attribute: String },

    /// The entity refused the value
    #[error("attribute '{attribute}' rejected value: {message}")]
    Rejected { attribute: String, message: String },
}

impl AttributeError {
    /// Create an unknown attribute error
    pub fn unknown(attribute: impl Into<String>) -> Self {
        Self::Unknown {
            attribute: attribute.into(),
        }
    }

    /// Create a rejected value error
    pub fn rejected(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced to the UI layer by descriptors and projections
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    /// The entity store rejected a read or write of a configured attribute
    #[error("cannot access property '{attribute}': {source}")]
    PropertyAccess {
        attribute: String,
        #[source]
        source: AttributeError,
    },

    /// No configured column produced the requested property
    #[error("property not bound: {name}")]
    PropertyNotBound { name: String },

    /// Name is not one of the well-known shortcuts (`Title`, `ID`, `Owner`, `Icon`)
    #[error("unknown well-known property: {name}")]
    UnknownShortcut { name: String },
}

impl DescriptorError {
    /// Create a property access error
    pub fn access(attribute: impl Into<String>, source: AttributeError) -> Self {
        Self::PropertyAccess {
            attribute: attribute.into(),
            source,
        }
    }

    /// Create a property not bound error
    pub fn not_bound(name: impl Into<String>) -> Self {
        Self::PropertyNotBound { name: name.into() }
    }

    /// Create an unknown shortcut error
    pub fn unknown_shortcut(name: impl Into<String>) -> Self {
        Self::UnknownShortcut { name: name.into() }
    }
}
