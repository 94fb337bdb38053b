use crate::id::ResourceId;
use crate::item::{FeatureSet, ItemCatalog, ItemStack, TagValue};

/// One content reference inside a tab: an item identifier plus raw tag text.
///
/// The data string is kept unparsed until a stack is built, so an invalid
/// tag degrades at generation time instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub item: ResourceId,
    pub data: String,
}

impl ContentEntry {
    pub fn new(item: ResourceId) -> Self {
        Self {
            item,
            data: String::new(),
        }
    }

    pub fn with_data(item: ResourceId, data: impl Into<String>) -> Self {
        Self {
            item,
            data: data.into(),
        }
    }

    /// Resolve this entry into a stack against the host catalog.
    ///
    /// Returns `None` if the identifier is unknown; the caller decides how
    /// to phrase the diagnostic. A malformed tag is dropped with a warning
    /// and the stack is still produced.
    pub fn to_stack(&self, tab: &ResourceId, catalog: &dyn ItemCatalog) -> Option<ItemStack> {
        if !catalog.contains(&self.item) {
            return None;
        }
        let tag = if self.data.is_empty() {
            None
        } else {
            match serde_json::from_str::<TagValue>(&self.data) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::error!(
                        "found invalid tag data on item '{}' in tab '{}', tag will not be attached: {e}",
                        self.item,
                        tab
                    );
                    None
                }
            }
        };
        Some(ItemStack {
            item: self.item.clone(),
            tag,
        })
    }
}

/// Per-tab display options. Every field is optional so "absent" stays
/// distinguishable from "explicitly set to the default"; absent means the
/// host default applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub hide_title: Option<bool>,
    pub hide_scrollbar: Option<bool>,
    pub background: Option<ResourceId>,
    pub label_color: Option<u32>,
    pub search_bar: Option<bool>,
    pub search_bar_width: Option<i32>,
    pub slot_color: Option<u32>,
    pub tab_image: Option<ResourceId>,
}

/// The deferred content generator for a tab.
///
/// Captures only the immutable entry list from the definition, so the host
/// can invoke it any number of times (e.g. when the active feature flags
/// change) without re-running the load pipeline. Generation mutates nothing
/// but the caller-supplied collector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabContents {
    entries: Vec<ContentEntry>,
}

impl TabContents {
    pub fn new(entries: Vec<ContentEntry>) -> Self {
        Self { entries }
    }

    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ContentEntry] {
        &self.entries
    }

    /// Append the resolvable, enabled entries to `out` in declared order.
    ///
    /// Entries whose identifier is unknown or whose item is disabled under
    /// `features` are skipped with a warning; the remaining entries keep
    /// their relative order.
    pub fn generate(
        &self,
        tab: &ResourceId,
        catalog: &dyn ItemCatalog,
        features: FeatureSet,
        out: &mut Vec<ItemStack>,
    ) {
        for entry in &self.entries {
            let Some(stack) = entry.to_stack(tab, catalog) else {
                log::warn!(
                    "found invalid entry '{}' in tab definition '{}', ignoring",
                    entry.item,
                    tab
                );
                continue;
            };
            if !catalog.enabled(&entry.item, features) {
                log::warn!(
                    "entry '{}' in tab definition '{}' is disabled by the active feature flags, ignoring",
                    entry.item,
                    tab
                );
                continue;
            }
            out.push(stack);
        }
    }
}

/// A constructed content tab, ready for installation into the registry.
///
/// Built-in tabs stand in for host-owned tab objects and carry no icon,
/// options, or contents of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    name: ResourceId,
    title_key: String,
    icon: Option<ContentEntry>,
    options: DisplayOptions,
    contents: TabContents,
    builtin: bool,
}

impl Tab {
    /// Start building a new tab with the given name.
    pub fn builder(name: ResourceId) -> TabBuilder {
        TabBuilder {
            title_key: title_key(&name),
            name,
            icon: None,
            options: DisplayOptions::default(),
            contents: TabContents::empty(),
        }
    }

    /// A placeholder for a host-owned built-in tab.
    pub fn builtin(name: ResourceId) -> Self {
        Self {
            title_key: title_key(&name),
            name,
            icon: None,
            options: DisplayOptions::default(),
            contents: TabContents::empty(),
            builtin: true,
        }
    }

    pub fn name(&self) -> &ResourceId {
        &self.name
    }

    /// Translation key for the tab's title.
    pub fn title_key(&self) -> &str {
        &self.title_key
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn contents(&self) -> &TabContents {
        &self.contents
    }

    /// Resolve the tab's button icon lazily against the host catalog.
    ///
    /// An unknown icon identifier yields `None` (a no-render icon) with a
    /// warning instead of failing.
    pub fn icon_stack(&self, catalog: &dyn ItemCatalog) -> Option<ItemStack> {
        let icon = self.icon.as_ref()?;
        let stack = icon.to_stack(&self.name, catalog);
        if stack.is_none() {
            log::warn!(
                "invalid icon '{}' in tab definition '{}', ignoring",
                icon.item,
                self.name
            );
        }
        stack
    }

    /// Run the content generator, appending to `out`. Safe to call
    /// repeatedly; see [`TabContents::generate`].
    pub fn generate_contents(
        &self,
        catalog: &dyn ItemCatalog,
        features: FeatureSet,
        out: &mut Vec<ItemStack>,
    ) {
        self.contents.generate(&self.name, catalog, features, out);
    }
}

/// Translation key derived from the tab name, e.g. `tab.mymod.fancy`.
/// Only the namespace separator is flattened; path separators survive.
fn title_key(name: &ResourceId) -> String {
    format!("tab.{}.{}", name.namespace(), name.path())
}

/// Phased construction for [`Tab`]: set the icon, options, and contents,
/// then `build`.
#[derive(Debug)]
pub struct TabBuilder {
    name: ResourceId,
    title_key: String,
    icon: Option<ContentEntry>,
    options: DisplayOptions,
    contents: TabContents,
}

impl TabBuilder {
    pub fn icon(mut self, icon: ContentEntry) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    pub fn contents(mut self, contents: TabContents) -> Self {
        self.contents = contents;
        self
    }

    pub fn build(self) -> Tab {
        Tab {
            name: self.name,
            title_key: self.title_key,
            icon: self.icon,
            options: self.options,
            contents: self.contents,
            builtin: false,
        }
    }
}
