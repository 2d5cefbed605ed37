//! ColumnConfiguration — the per-view column layout document.
//!
//! One YAML document lists the columns for each asset's detail panel, the
//! shared workitem grid and the project tree:
//!
//! ```text
//! asset_detail:
//!   task_columns:   [...]
//!   story_columns:  [...]
//!   defect_columns: [...]
//!   test_columns:   [...]
//! grid:
//!   columns: [...]
//! project_tree:
//!   columns: [...]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::{AssetType, ColumnSpec};

/// Detail-panel columns, one list per workitem asset type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDetailColumns {
    pub task_columns: Vec<ColumnSpec>,
    pub story_columns: Vec<ColumnSpec>,
    pub defect_columns: Vec<ColumnSpec>,
    pub test_columns: Vec<ColumnSpec>,
}

/// An ordered list of columns for a single view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnGroup {
    pub columns: Vec<ColumnSpec>,
}

/// An attribute the data layer must fetch for an asset type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRegistration {
    pub asset_type: AssetType,
    pub attribute: String,
    /// Values arrive as selectable options (`List` or `Multi` columns).
    pub list_valued: bool,
}

/// Column configuration for every view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfiguration {
    pub asset_detail: AssetDetailColumns,
    pub grid: ColumnGroup,
    pub project_tree: ColumnGroup,
}

impl ColumnConfiguration {
    /// Parse a configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a configuration document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FieldsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        debug!(
            path = %path.display(),
            grid = config.grid.columns.len(),
            project_tree = config.project_tree.columns.len(),
            "column configuration loaded"
        );
        Ok(config)
    }

    /// Detail-panel columns for an asset type.
    ///
    /// Projects have no detail panel of their own; they use the tree columns.
    pub fn detail_columns(&self, asset_type: AssetType) -> &[ColumnSpec] {
        match asset_type {
            AssetType::Task => &self.asset_detail.task_columns,
            AssetType::Story => &self.asset_detail.story_columns,
            AssetType::Defect => &self.asset_detail.defect_columns,
            AssetType::Test => &self.asset_detail.test_columns,
            AssetType::Project => &self.project_tree.columns,
        }
    }

    pub fn grid_columns(&self) -> &[ColumnSpec] {
        &self.grid.columns
    }

    pub fn project_tree_columns(&self) -> &[ColumnSpec] {
        &self.project_tree.columns
    }

    /// Every attribute the data layer needs, in configuration order.
    ///
    /// Detail columns register against their own asset type, grid columns
    /// against every workitem type and project-tree columns against projects.
    /// Repeated attributes are registered repeatedly; the data layer treats
    /// registration as idempotent.
    pub fn attribute_registrations(&self) -> Vec<AttributeRegistration> {
        let mut registrations = Vec::new();

        for asset_type in AssetType::WORKITEMS {
            for column in self.detail_columns(asset_type) {
                registrations.push(register(column, asset_type));
            }
        }

        for column in &self.grid.columns {
            for asset_type in AssetType::WORKITEMS {
                registrations.push(register(column, asset_type));
            }
        }

        for column in &self.project_tree.columns {
            registrations.push(register(column, AssetType::Project));
        }

        registrations
    }
}

fn register(column: &ColumnSpec, asset_type: AssetType) -> AttributeRegistration {
    AttributeRegistration {
        asset_type,
        attribute: column.attribute.clone(),
        list_valued: column.type_.is_list_valued(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeTag;

    const SAMPLE: &str = r#"
asset_detail:
  task_columns:
    - attribute: Name
      name: ColumnTitle'Title
      category: General
    - attribute: ToDo
      name: ColumnTitle'ToDo
      category: Tracking
      type: Effort
      effort_tracking: true
  story_columns:
    - attribute: Status
      name: ColumnTitle'Status
      category: General
      type: List
grid:
  columns:
    - attribute: Owners
      name: ColumnTitle'Owner
      type: Multi
project_tree:
  columns:
    - attribute: Name
      name: ColumnTitle'Name
"#;

    #[test]
    fn parses_all_views() {
        let config = ColumnConfiguration::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.detail_columns(AssetType::Task).len(), 2);
        assert_eq!(config.detail_columns(AssetType::Story).len(), 1);
        assert!(config.detail_columns(AssetType::Defect).is_empty());
        assert_eq!(config.grid_columns()[0].type_, TypeTag::Multi);
        assert_eq!(config.project_tree_columns()[0].attribute, "Name");
        assert_eq!(
            config.detail_columns(AssetType::Project),
            config.project_tree_columns()
        );
    }

    #[test]
    fn registrations_follow_configuration_order() {
        let config = ColumnConfiguration::from_yaml_str(SAMPLE).unwrap();
        let registrations = config.attribute_registrations();

        // 2 task + 1 story + 4 grid + 1 project
        assert_eq!(registrations.len(), 8);
        assert_eq!(registrations[0].asset_type, AssetType::Task);
        assert_eq!(registrations[0].attribute, "Name");
        assert_eq!(registrations[1].attribute, "ToDo");
        assert_eq!(registrations[2].asset_type, AssetType::Story);
        assert!(registrations[2].list_valued);

        let grid: Vec<_> = registrations[3..7].iter().map(|r| r.asset_type).collect();
        assert_eq!(grid, AssetType::WORKITEMS.to_vec());
        assert!(registrations[3..7].iter().all(|r| r.list_valued));

        assert_eq!(registrations[7].asset_type, AssetType::Project);
        assert!(!registrations[7].list_valued);
    }

    #[test]
    fn empty_document_is_empty_configuration() {
        let config = ColumnConfiguration::from_yaml_str("{}").unwrap();
        assert_eq!(config, ColumnConfiguration::default());
        assert!(config.attribute_registrations().is_empty());
    }

    #[test]
    fn malformed_document_is_yaml_error() {
        let err = ColumnConfiguration::from_yaml_str("grid: [not, a, group").unwrap_err();
        assert!(matches!(err, FieldsError::Yaml(_)));
    }
}
