//! EntityDescriptor — the object a property grid or tree binds to.
//!
//! A descriptor wraps one entity and the [`DescriptorSet`] built for it. Its
//! identity is the entity's identity: a compact, icon-bearing descriptor bound
//! in a tree and a detailed descriptor shown in a detail panel compare equal
//! and hash alike when they wrap the same entity, so a selection map keyed by
//! descriptor coalesces them.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use tracker_fields::ColumnSpec;

use crate::builder::{DescriptorSet, DescriptorSetBuilder};
use crate::entity::{AttributeValue, EntityKey, EntityRef, NAME_ATTRIBUTE};
use crate::error::{DescriptorError, Result};
use crate::projection::{PropertyProjection, PropertyRow, ICON_ATTRIBUTE};
use crate::update::UpdateChannel;

/// Caption the property grid shows for the kind of object being inspected.
pub const CLASS_NAME: &str = "Details";

/// Properties tree rows bind to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownProperty {
    Title,
    Id,
    Owner,
    Icon,
}

impl WellKnownProperty {
    pub const ALL: [WellKnownProperty; 4] = [
        WellKnownProperty::Title,
        WellKnownProperty::Id,
        WellKnownProperty::Owner,
        WellKnownProperty::Icon,
    ];

    /// Attribute the property is projected from.
    pub fn attribute(&self) -> &'static str {
        match self {
            WellKnownProperty::Title => "Title",
            WellKnownProperty::Id => "ID",
            WellKnownProperty::Owner => "Owner",
            WellKnownProperty::Icon => ICON_ATTRIBUTE,
        }
    }
}

impl FromStr for WellKnownProperty {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self> {
        WellKnownProperty::ALL
            .into_iter()
            .find(|property| property.attribute() == s)
            .ok_or_else(|| DescriptorError::unknown_shortcut(s))
    }
}

/// Adapter exposing an entity through configured properties.
pub struct EntityDescriptor {
    entity: EntityRef,
    properties: DescriptorSet,
    update_channel: UpdateChannel,
    iconless: bool,
    builder: DescriptorSetBuilder,
}

impl EntityDescriptor {
    /// Compact descriptor with a trailing icon property, for tree rows.
    pub fn new(
        builder: &DescriptorSetBuilder,
        entity: EntityRef,
        columns: &[ColumnSpec],
        update_channel: UpdateChannel,
    ) -> Self {
        Self::build(builder, entity, columns, update_channel, false)
    }

    /// Descriptor without the icon property.
    pub fn iconless(
        builder: &DescriptorSetBuilder,
        entity: EntityRef,
        columns: &[ColumnSpec],
        update_channel: UpdateChannel,
    ) -> Self {
        Self::build(builder, entity, columns, update_channel, true)
    }

    fn build(
        builder: &DescriptorSetBuilder,
        entity: EntityRef,
        columns: &[ColumnSpec],
        update_channel: UpdateChannel,
        iconless: bool,
    ) -> Self {
        let properties = builder.build(&entity, columns, &update_channel, !iconless);
        Self {
            entity,
            properties,
            update_channel,
            iconless,
            builder: builder.clone(),
        }
    }

    /// Detailed, iconless descriptor over the same entity.
    ///
    /// The result equals `self`; only the exposed properties differ.
    pub fn create_detailed_view(
        &self,
        columns: &[ColumnSpec],
        update_channel: UpdateChannel,
    ) -> EntityDescriptor {
        Self::iconless(&self.builder, self.entity.clone(), columns, update_channel)
    }

    /// The configured properties, built once at construction.
    pub fn properties(&self) -> &DescriptorSet {
        &self.properties
    }

    /// Projection for an attribute.
    pub fn property(&self, attribute: &str) -> Result<&PropertyProjection> {
        self.properties
            .get(attribute)
            .ok_or_else(|| DescriptorError::not_bound(attribute))
    }

    /// Current value of a well-known property.
    ///
    /// Fails with [`DescriptorError::PropertyNotBound`] when the configuration
    /// has no column for it.
    pub fn display_property(&self, property: WellKnownProperty) -> Result<AttributeValue> {
        self.property(property.attribute())?.read()
    }

    pub fn title(&self) -> Result<String> {
        Ok(self.display_property(WellKnownProperty::Title)?.to_string())
    }

    pub fn id(&self) -> Result<String> {
        Ok(self.display_property(WellKnownProperty::Id)?.to_string())
    }

    pub fn owner(&self) -> Result<String> {
        Ok(self.display_property(WellKnownProperty::Owner)?.to_string())
    }

    pub fn icon(&self) -> Result<AttributeValue> {
        self.display_property(WellKnownProperty::Icon)
    }

    /// The entity's `Name`, used as the tree-node caption.
    pub fn component_name(&self) -> Result<String> {
        self.entity
            .attribute(NAME_ATTRIBUTE)
            .map(|name| name.to_string())
            .map_err(|source| DescriptorError::access(NAME_ATTRIBUTE, source))
    }

    pub fn class_name(&self) -> &'static str {
        CLASS_NAME
    }

    /// Row snapshots for every property, in order.
    pub fn rows(&self) -> Vec<PropertyRow> {
        self.properties.iter().map(PropertyProjection::row).collect()
    }

    /// The wrapped entity; owner of every property value.
    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn key(&self) -> &EntityKey {
        self.entity.key()
    }

    pub fn update_channel(&self) -> &UpdateChannel {
        &self.update_channel
    }

    pub fn is_iconless(&self) -> bool {
        self.iconless
    }
}

impl PartialEq for EntityDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for EntityDescriptor {}

impl Hash for EntityDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("entity", self.key())
            .field("properties", &self.properties.attributes().collect::<Vec<_>>())
            .field("iconless", &self.iconless)
            .finish()
    }
}
