//! Configuration-driven property descriptors for work-tracking entities
//!
//! This crate adapts opaque server entities (tasks, stories, defects, tests,
//! projects) to a generic property grid or tree view. Which properties are
//! visible, how they are grouped and which editor edits them is decided at
//! runtime from column configuration, not from compile-time types.
//!
//! ## Overview
//!
//! - **[`DescriptorSetBuilder`]** - turns a column list into ordered [`PropertyProjection`]s
//! - **[`EntityDescriptor`]** - what the UI binds to; equality follows the wrapped entity
//! - **[`PropertyProjection`]** - reads an attribute, writes edits back and announces them
//! - **[`UpdateChannel`]** - synchronous broadcast of every successful write
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::rc::Rc;
//! use tracker_descriptors::{
//!     ColumnSpec, DescriptorSetBuilder, EntityDescriptor, MemoryEntity, NoLocalizer,
//!     UpdateChannel,
//! };
//!
//! let builder = DescriptorSetBuilder::new(Rc::new(true), Rc::new(NoLocalizer));
//! let entity = MemoryEntity::new("Task:1001").with("Name", "Fix login").into_ref();
//! let columns = vec![ColumnSpec::new("Name", "Title", "General", "String")];
//!
//! let channel = UpdateChannel::new();
//! channel.subscribe(|update| println!("{} changed", update.attribute));
//!
//! let descriptor = EntityDescriptor::new(&builder, entity, &columns, channel);
//! let name = descriptor.properties().get("Name").unwrap();
//! name.write("Fix login redirect".into())?;
//! assert_eq!(descriptor.component_name()?, "Fix login redirect");
//! # Ok::<(), tracker_descriptors::DescriptorError>(())
//! ```
//!
//! Everything here is single-threaded: handles are `Rc`-based and listeners
//! run on the caller's stack.

pub mod builder;
pub mod descriptor;
pub mod entity;
mod error;
pub mod projection;
pub mod update;

pub use builder::{DescriptorSet, DescriptorSetBuilder};
pub use descriptor::{EntityDescriptor, WellKnownProperty, CLASS_NAME};
pub use entity::{AttributeValue, Entity, EntityKey, EntityRef, MemoryEntity, ValueOption};
pub use error::{AttributeError, DescriptorError, Result};
pub use projection::{PropertyProjection, PropertyRow, ProjectionSource, ICON_ATTRIBUTE};
pub use update::{PropertyUpdate, SubscriptionId, UpdateChannel};

pub use tracker_config::EffortTracking;
pub use tracker_fields::{ColumnSpec, EditorKind, Localizer, NoLocalizer, TypeTag};
