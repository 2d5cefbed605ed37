//! Column specifications and localization for work-item descriptors
//!
//! `tracker-fields` is a schema-only crate. It describes which server attributes
//! a view exposes and how each one is edited, but knows nothing about entity
//! values or the UI that renders them.
//!
//! # Architecture
//!
//! - **Column specs**: one [`ColumnSpec`] per exposed attribute, tagged with a [`TypeTag`]
//! - **Per-view configuration**: [`ColumnConfiguration`] groups columns by asset detail, grid and project tree
//! - **Registrations**: [`ColumnConfiguration::attribute_registrations`] tells the data layer what to fetch
//! - **Localization**: [`Localizer`] resolves display-name keys, falling back to the key itself

pub mod catalog;
pub mod config;
pub mod error;
pub mod types;

pub use catalog::{Catalog, Localizer, NoLocalizer};
pub use config::{AssetDetailColumns, AttributeRegistration, ColumnConfiguration, ColumnGroup};
pub use error::{FieldsError, Result};
pub use types::{AssetType, ColumnSpec, EditorKind, TypeTag};
