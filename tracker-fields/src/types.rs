//! Core column types.
//!
//! A [`ColumnSpec`] names one server attribute, the category it is grouped
//! under, the key of its display name and a [`TypeTag`] that picks the editor.
//! Column specs are read-only configuration; nothing in the workspace mutates
//! them once loaded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldsError;

/// The configured type of a column — determines which editor edits it.
///
/// Unknown tags are preserved in [`TypeTag::Other`] rather than rejected, so a
/// configuration written for a newer server still loads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    String,
    Effort,
    List,
    Multi,
    RichText,
    Other(String),
}

impl TypeTag {
    /// The editor used for values of this type.
    ///
    /// Total over every tag, including [`TypeTag::Other`].
    pub fn editor(&self) -> EditorKind {
        match self {
            TypeTag::List => EditorKind::SingleSelect,
            TypeTag::Multi => EditorKind::MultiValue,
            TypeTag::RichText => EditorKind::RichText,
            TypeTag::String | TypeTag::Effort | TypeTag::Other(_) => EditorKind::None,
        }
    }

    /// Whether values are selectable options rather than free values.
    pub fn is_list_valued(&self) -> bool {
        matches!(self, TypeTag::List | TypeTag::Multi)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::String => "String",
            TypeTag::Effort => "Effort",
            TypeTag::List => "List",
            TypeTag::Multi => "Multi",
            TypeTag::RichText => "RichText",
            TypeTag::Other(tag) => tag,
        }
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        match tag {
            "String" => TypeTag::String,
            "Effort" => TypeTag::Effort,
            "List" => TypeTag::List,
            "Multi" => TypeTag::Multi,
            "RichText" => TypeTag::RichText,
            other => TypeTag::Other(other.to_string()),
        }
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        TypeTag::from(tag.as_str())
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a property value is edited in the property grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorKind {
    /// Plain in-place text editing.
    None,
    SingleSelect,
    MultiValue,
    RichText,
}

/// A single configured column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Server attribute the column reads and writes.
    pub attribute: String,
    /// Localization key of the display name.
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default = "default_type_tag")]
    pub type_: TypeTag,
    /// Only shown when the server has effort tracking enabled.
    #[serde(default)]
    pub effort_tracking: bool,
}

fn default_type_tag() -> TypeTag {
    TypeTag::String
}

impl ColumnSpec {
    pub fn new(
        attribute: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        type_: impl Into<TypeTag>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            name: name.into(),
            category: category.into(),
            type_: type_.into(),
            effort_tracking: false,
        }
    }

    /// Mark the column as requiring effort tracking.
    pub fn with_effort_tracking(mut self, effort_tracking: bool) -> Self {
        self.effort_tracking = effort_tracking;
        self
    }

    pub fn editor(&self) -> EditorKind {
        self.type_.editor()
    }
}

/// Server asset types exposed through descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Task,
    Story,
    Defect,
    Test,
    Project,
}

impl AssetType {
    /// Workitem asset types that share the grid columns.
    pub const WORKITEMS: [AssetType; 4] = [
        AssetType::Task,
        AssetType::Story,
        AssetType::Defect,
        AssetType::Test,
    ];

    /// Asset type prefix used by the server in object tokens and queries.
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetType::Task => "Task",
            AssetType::Story => "Story",
            AssetType::Defect => "Defect",
            AssetType::Test => "Test",
            AssetType::Project => "Scope",
        }
    }
}

impl FromStr for AssetType {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "task" => Ok(AssetType::Task),
            "story" => Ok(AssetType::Story),
            "defect" => Ok(AssetType::Defect),
            "test" => Ok(AssetType::Test),
            "project" | "scope" => Ok(AssetType::Project),
            _ => Err(FieldsError::UnknownAssetType {
                name: s.to_string(),
            }),
        }
    }
}
