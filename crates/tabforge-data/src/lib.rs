//! Declarative tab configuration for the content browser.
//!
//! Tabs are declared in JSON documents in a user-editable directory; this
//! crate discovers and decodes them, validates the result against the
//! built-in tab vocabulary, and builds the registry (tab table plus
//! ordering-edge multimap) that the host installs.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tabforge_core::InstalledTabs;
//! use tabforge_data::loader;
//!
//! let installed = InstalledTabs::new();
//! loader::load_and_install(Path::new("config/tabs"), &installed);
//! ```
//!
//! Loading never fails: any structural problem (unreadable directory,
//! malformed document, duplicated tab name, empty set) falls back wholesale
//! to the built-in vanilla tabs, so the registry is never empty or partial.

pub mod loader;
pub mod pack;
pub mod schema;
pub mod vanilla;

pub use loader::{TabLoadError, load_and_install, load_tabs};
pub use schema::{TabDefinition, TabEntry};
