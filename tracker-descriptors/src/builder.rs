//! Descriptor set construction.
//!
//! The builder turns a column list into the ordered projections a descriptor
//! exposes. Settings and localization are injected once; the effort-tracking
//! flag is read on every build so toggling it takes effect on the next rebuild.

use std::fmt;
use std::iter::Chain;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};
use tracker_config::EffortTracking;
use tracker_fields::{ColumnSpec, Localizer};

use crate::entity::EntityRef;
use crate::projection::PropertyProjection;
use crate::update::UpdateChannel;

/// Ordered projections of one entity, keyed by attribute.
///
/// Order is column configuration order, with the icon (when present) last.
/// The icon is held apart from the configured columns, so a column that
/// happens to be named `Icon` is never displaced by it.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSet {
    projections: IndexMap<String, PropertyProjection>,
    icon: Option<PropertyProjection>,
}

impl DescriptorSet {
    pub fn len(&self) -> usize {
        self.projections.len() + usize::from(self.icon.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Projection for an attribute.
    ///
    /// A configured column takes precedence over the icon for the `Icon`
    /// attribute; both read the same entity attribute.
    pub fn get(&self, attribute: &str) -> Option<&PropertyProjection> {
        self.projections.get(attribute).or_else(|| {
            self.icon
                .as_ref()
                .filter(|icon| icon.attribute() == attribute)
        })
    }

    /// The trailing read-only icon, if the set was built with one.
    pub fn icon(&self) -> Option<&PropertyProjection> {
        self.icon.as_ref()
    }

    pub fn get_index(&self, index: usize) -> Option<&PropertyProjection> {
        self.iter().nth(index)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.get(attribute).is_some()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.projections.values().chain(self.icon.iter())
    }

    /// Attributes in order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.iter().map(PropertyProjection::attribute)
    }

    /// Add a configured projection. A projection for the same attribute is
    /// replaced and the new one takes the last position.
    fn push(&mut self, projection: PropertyProjection) {
        let attribute = projection.attribute().to_string();
        if self.projections.shift_remove(&attribute).is_some() {
            warn!(attribute = %attribute, "duplicate column, later configuration wins");
        }
        self.projections.insert(attribute, projection);
    }
}

/// Iterator over a [`DescriptorSet`] in order.
pub type Iter<'a> = Chain<
    indexmap::map::Values<'a, String, PropertyProjection>,
    std::option::Iter<'a, PropertyProjection>,
>;

impl<'a> IntoIterator for &'a DescriptorSet {
    type Item = &'a PropertyProjection;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds [`DescriptorSet`]s from column configuration.
#[derive(Clone)]
pub struct DescriptorSetBuilder {
    settings: Rc<dyn EffortTracking>,
    localizer: Rc<dyn Localizer>,
}

impl DescriptorSetBuilder {
    pub fn new(settings: Rc<dyn EffortTracking>, localizer: Rc<dyn Localizer>) -> Self {
        Self {
            settings,
            localizer,
        }
    }

    /// Project `entity` through `columns`.
    ///
    /// Effort-only columns are skipped while effort tracking is off. Display
    /// names fall back to their key when no translation exists. With
    /// `include_icon`, a read-only icon projection is appended last.
    pub fn build(
        &self,
        entity: &EntityRef,
        columns: &[ColumnSpec],
        update_channel: &UpdateChannel,
        include_icon: bool,
    ) -> DescriptorSet {
        let track_effort = self.settings.track_effort();
        let mut set = DescriptorSet::default();

        for column in columns {
            if column.effort_tracking && !track_effort {
                trace!(attribute = %column.attribute, "skipping effort column");
                continue;
            }

            let display_name = self.localizer.resolve(&column.name);
            set.push(PropertyProjection::column(
                entity.clone(),
                column.clone(),
                display_name,
                update_channel.clone(),
            ));
        }

        if include_icon {
            set.icon = Some(PropertyProjection::icon(
                entity.clone(),
                update_channel.clone(),
            ));
        }

        debug!(
            entity = %entity.key(),
            columns = columns.len(),
            properties = set.len(),
            track_effort = track_effort,
            include_icon = include_icon,
            "descriptor set built"
        );
        set
    }
}

impl fmt::Debug for DescriptorSetBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorSetBuilder")
            .field("track_effort", &self.settings.track_effort())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MemoryEntity;
    use crate::projection::ICON_ATTRIBUTE;
    use std::cell::Cell;
    use tracker_fields::{Catalog, EditorKind, NoLocalizer};

    fn builder(track_effort: bool) -> DescriptorSetBuilder {
        DescriptorSetBuilder::new(Rc::new(track_effort), Rc::new(NoLocalizer))
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("Priority", "ColumnTitle'Priority", "Planning", "List"),
            ColumnSpec::new("Estimate", "ColumnTitle'Estimate", "Planning", "Effort")
                .with_effort_tracking(true),
        ]
    }

    #[test_log::test]
    fn effort_column_skipped_when_tracking_off() {
        let entity = MemoryEntity::new("Story:1").into_ref();
        let set = builder(false).build(&entity, &columns(), &UpdateChannel::new(), false);

        assert_eq!(set.len(), 1);
        let priority = set.get_index(0).unwrap();
        assert_eq!(priority.attribute(), "Priority");
        assert_eq!(priority.editor(), EditorKind::SingleSelect);
        assert!(!set.contains("Estimate"));
    }

    #[test_log::test]
    fn rebuild_observes_toggled_setting() {
        let flag = Rc::new(Cell::new(false));
        let builder = DescriptorSetBuilder::new(flag.clone(), Rc::new(NoLocalizer));
        let entity = MemoryEntity::new("Story:1").into_ref();
        let channel = UpdateChannel::new();

        assert_eq!(builder.build(&entity, &columns(), &channel, false).len(), 1);

        flag.set(true);
        let set = builder.build(&entity, &columns(), &channel, false);
        let attributes: Vec<_> = set.attributes().collect();
        assert_eq!(attributes, vec!["Priority", "Estimate"]);
    }

    #[test]
    fn icon_appended_last() {
        let entity = MemoryEntity::new("Task:2").into_ref();
        let set = builder(true).build(&entity, &columns(), &UpdateChannel::new(), true);

        assert_eq!(set.len(), 3);
        let last = set.get_index(2).unwrap();
        assert_eq!(last.attribute(), ICON_ATTRIBUTE);
        assert!(last.is_read_only());
    }

    #[test]
    fn display_names_are_localized_with_fallback() {
        let catalog = Catalog::new().entry("ColumnTitle'Priority", "Priority");
        let builder = DescriptorSetBuilder::new(Rc::new(true), Rc::new(catalog));
        let entity = MemoryEntity::new("Task:2").into_ref();
        let set = builder.build(&entity, &columns(), &UpdateChannel::new(), false);

        assert_eq!(set.get("Priority").unwrap().display_name(), "Priority");
        assert_eq!(
            set.get("Estimate").unwrap().display_name(),
            "ColumnTitle'Estimate"
        );
        assert_eq!(set.get("Priority").unwrap().category(), "Planning");
    }

    #[test_log::test]
    fn duplicate_attribute_last_wins() {
        let entity = MemoryEntity::new("Task:2").into_ref();
        let columns = vec![
            ColumnSpec::new("Name", "Title", "General", "String"),
            ColumnSpec::new("Owners", "Owner", "General", "Multi"),
            ColumnSpec::new("Name", "Summary", "Detail", "RichText"),
        ];
        let set = builder(true).build(&entity, &columns, &UpdateChannel::new(), false);

        let attributes: Vec<_> = set.attributes().collect();
        assert_eq!(attributes, vec!["Owners", "Name"]);
        let name = set.get("Name").unwrap();
        assert_eq!(name.display_name(), "Summary");
        assert_eq!(name.editor(), EditorKind::RichText);
    }

    #[test]
    fn configured_icon_column_kept_alongside_icon() {
        let entity = MemoryEntity::new("Task:2")
            .with(ICON_ATTRIBUTE, "task")
            .into_ref();
        let columns = vec![
            ColumnSpec::new(ICON_ATTRIBUTE, "Icon", "General", "String"),
            ColumnSpec::new("Name", "Title", "General", "String"),
        ];
        let set = builder(true).build(&entity, &columns, &UpdateChannel::new(), true);

        assert_eq!(set.len(), columns.len() + 1);
        let attributes: Vec<_> = set.attributes().collect();
        assert_eq!(attributes, vec![ICON_ATTRIBUTE, "Name", ICON_ATTRIBUTE]);

        // the configured column answers lookups; the trailing icon stays read-only
        let configured = set.get(ICON_ATTRIBUTE).unwrap();
        assert!(!configured.is_read_only());
        assert!(configured.column_spec().is_some());
        assert!(set.get_index(2).unwrap().is_read_only());
        assert!(set.icon().unwrap().is_read_only());
    }

    #[test]
    fn icon_lookup_without_configured_column() {
        let entity = MemoryEntity::new("Task:2").into_ref();
        let set = builder(true).build(&entity, &columns(), &UpdateChannel::new(), true);
        assert!(set.get(ICON_ATTRIBUTE).unwrap().is_read_only());
        assert!(set.contains(ICON_ATTRIBUTE));

        let set = builder(true).build(&entity, &columns(), &UpdateChannel::new(), false);
        assert!(set.get(ICON_ATTRIBUTE).is_none());
        assert!(set.icon().is_none());
    }

    #[test]
    fn empty_configuration() {
        let entity = MemoryEntity::new("Task:2").into_ref();
        let set = builder(true).build(&entity, &[], &UpdateChannel::new(), false);
        assert!(set.is_empty());
        assert_eq!((&set).into_iter().count(), 0);
    }
}
