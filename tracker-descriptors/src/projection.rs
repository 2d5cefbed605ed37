//! PropertyProjection — the per-column adapter between an entity attribute
//! and the value a property grid shows and edits.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use tracker_fields::{ColumnSpec, EditorKind};

use crate::entity::{AttributeValue, EntityRef};
use crate::error::{DescriptorError, Result};
use crate::update::{PropertyUpdate, UpdateChannel};

/// Attribute and display name of the icon pseudo-property.
pub const ICON_ATTRIBUTE: &str = "Icon";

/// Where a projection's value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionSource {
    /// A configured column.
    Column(ColumnSpec),
    /// The read-only icon appended for tree rows.
    Icon,
}

/// One row of a descriptor: a single attribute of a single entity.
#[derive(Clone)]
pub struct PropertyProjection {
    entity: EntityRef,
    source: ProjectionSource,
    category: String,
    display_name: String,
    editor: EditorKind,
    update_channel: UpdateChannel,
}

impl PropertyProjection {
    /// Projection for a configured column.
    pub fn column(
        entity: EntityRef,
        column: ColumnSpec,
        display_name: impl Into<String>,
        update_channel: UpdateChannel,
    ) -> Self {
        Self {
            entity,
            category: column.category.clone(),
            editor: column.editor(),
            source: ProjectionSource::Column(column),
            display_name: display_name.into(),
            update_channel,
        }
    }

    /// Read-only projection of the entity's icon.
    pub fn icon(entity: EntityRef, update_channel: UpdateChannel) -> Self {
        Self {
            entity,
            source: ProjectionSource::Icon,
            category: String::new(),
            display_name: ICON_ATTRIBUTE.to_string(),
            editor: EditorKind::None,
            update_channel,
        }
    }

    /// The entity attribute this projection reads and writes.
    pub fn attribute(&self) -> &str {
        match &self.source {
            ProjectionSource::Column(column) => &column.attribute,
            ProjectionSource::Icon => ICON_ATTRIBUTE,
        }
    }

    /// The source column, `None` for the icon.
    pub fn column_spec(&self) -> Option<&ColumnSpec> {
        match &self.source {
            ProjectionSource::Column(column) => Some(column),
            ProjectionSource::Icon => None,
        }
    }

    pub fn source(&self) -> &ProjectionSource {
        &self.source
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn editor(&self) -> EditorKind {
        self.editor
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.source, ProjectionSource::Icon)
    }

    /// Whether the value is a selectable option or list of options.
    pub fn is_list_valued(&self) -> bool {
        self.column_spec()
            .map(|column| column.type_.is_list_valued())
            .unwrap_or(false)
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    /// Current raw value of the attribute.
    ///
    /// Option values for `List`/`Multi` columns are returned exactly as the
    /// entity holds them.
    pub fn read(&self) -> Result<AttributeValue> {
        self.entity
            .attribute(self.attribute())
            .map_err(|source| DescriptorError::access(self.attribute(), source))
    }

    /// Current value rendered as text.
    pub fn display_text(&self) -> Result<String> {
        Ok(self.read()?.to_string())
    }

    /// Write a value to the entity and announce it on the update channel.
    ///
    /// Writing the icon is a no-op. A rejected write is returned without
    /// notifying.
    pub fn write(&self, value: AttributeValue) -> Result<()> {
        if self.is_read_only() {
            debug!(attribute = self.attribute(), "ignoring write to read-only property");
            return Ok(());
        }

        let attribute = self.attribute();
        self.entity
            .set_attribute(attribute, value.clone())
            .map_err(|source| DescriptorError::access(attribute, source))?;

        self.update_channel.notify(PropertyUpdate {
            entity: self.entity.key().clone(),
            attribute: attribute.to_string(),
            value,
        });
        Ok(())
    }

    /// Snapshot of this projection for the host UI.
    pub fn row(&self) -> PropertyRow {
        PropertyRow {
            attribute: self.attribute().to_string(),
            category: self.category.clone(),
            display_name: self.display_name.clone(),
            editor: self.editor,
            read_only: self.is_read_only(),
            value: self.read(),
        }
    }
}

impl fmt::Debug for PropertyProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyProjection")
            .field("entity", self.entity.key())
            .field("attribute", &self.attribute())
            .field("category", &self.category)
            .field("display_name", &self.display_name)
            .field("editor", &self.editor)
            .finish()
    }
}

/// What a property grid renders for one projection.
///
/// A failed read is kept in `value` so the row can be shown as unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRow {
    pub attribute: String,
    pub category: String,
    pub display_name: String,
    pub editor: EditorKind,
    pub read_only: bool,
    #[serde(serialize_with = "serialize_row_value")]
    pub value: Result<AttributeValue>,
}

fn serialize_row_value<S>(
    value: &Result<AttributeValue>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Ok(value) => value.serialize(serializer),
        Err(_) => serializer.serialize_none(),
    }
}
