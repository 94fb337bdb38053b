//! Tabforge Core -- host-facing types for data-driven content tabs.
//!
//! This crate provides the building blocks the resolution engine in
//! `tabforge-data` assembles and the host consumes: namespaced resource
//! identifiers, item stacks with their host-catalog collaborator traits,
//! tab objects with deferred content generation, and the tab registry
//! with its ordering-edge multimap and atomically-replaceable installed
//! snapshot.
//!
//! # Key Types
//!
//! - [`id::ResourceId`] -- `namespace:path` identifier used as the primary
//!   key for tabs, items, and textures.
//! - [`item::ItemCatalog`] -- the host-owned item lookup with
//!   feature-flag-aware enablement.
//! - [`tab::Tab`] -- a constructed tab: icon, display options, and a pure,
//!   repeatable content generator.
//! - [`registry::TabRegistry`] -- bijective id-to-tab table plus the
//!   ordering-edge multimap handed to the host's display sorter.
//! - [`registry::InstalledTabs`] -- process-wide snapshot of the installed
//!   registry, replaced atomically on each load.

pub mod id;
pub mod item;
pub mod registry;
pub mod tab;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use id::ResourceId;
pub use item::{FeatureSet, ItemCatalog, ItemStack};
pub use registry::{InstalledTabs, TabRegistry};
pub use tab::{ContentEntry, DisplayOptions, Tab, TabBuilder, TabContents};
