//! On-disk schema for tab definition documents.
//!
//! A definition document is one JSON object per file (see [`TabDefinition`]
//! for the field set). Content references decode from either of two shapes
//! via [`TabEntry`], and color fields accept a native integer or a hex
//! string via the [`color`] adapter.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tabforge_core::id::ResourceId;
use tabforge_core::tab::{ContentEntry, DisplayOptions};

// ===========================================================================
// Entry codec
// ===========================================================================

/// A single content reference: an item identifier with optional raw tag data.
///
/// Two on-disk shapes map onto this one value: a bare identifier string
/// (implying empty data) or an object carrying both `name` and `data`.
/// Encoding is shape-minimal: empty data always writes the bare string,
/// non-empty data always writes the object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub name: ResourceId,
    pub data: String,
}

impl TabEntry {
    pub fn new(name: ResourceId) -> Self {
        Self {
            name,
            data: String::new(),
        }
    }

    pub fn with_data(name: ResourceId, data: impl Into<String>) -> Self {
        Self {
            name,
            data: data.into(),
        }
    }

    pub fn to_content(&self) -> ContentEntry {
        ContentEntry::with_data(self.name.clone(), self.data.clone())
    }
}

impl Serialize for TabEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.data.is_empty() {
            self.name.serialize(serializer)
        } else {
            let mut state = serializer.serialize_struct("TabEntry", 2)?;
            state.serialize_field("name", &self.name)?;
            state.serialize_field("data", &self.data)?;
            state.end()
        }
    }
}

impl<'de> Deserialize<'de> for TabEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Two parse attempts in fixed order: bare identifier first, then
        // the object shape. The first success wins.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Simple(ResourceId),
            WithData { name: ResourceId, data: String },
        }

        match Raw::deserialize(deserializer)? {
            Raw::Simple(name) => Ok(TabEntry::new(name)),
            Raw::WithData { name, data } => Ok(TabEntry::with_data(name, data)),
        }
    }
}

// ===========================================================================
// Color codec
// ===========================================================================

/// Serde adapter for color fields: accepts a native integer or a string in
/// hex (`0x`/`#` prefix) or decimal form; always writes a `0x` hex string.
pub mod color {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<u32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format!("0x{v:X}")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u32>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flexible {
            Number(i64),
            Text(String),
        }

        match Flexible::deserialize(deserializer)? {
            Flexible::Number(n) => Ok(Some(n as u32)),
            Flexible::Text(text) => parse_flexible_int(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }

    /// Parse a decimal or prefixed-hex integer string, with optional sign.
    pub fn parse_flexible_int(text: &str) -> Result<u32, String> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let parsed = if let Some(hex) = rest
            .strip_prefix("0x")
            .or_else(|| rest.strip_prefix("0X"))
            .or_else(|| rest.strip_prefix('#'))
        {
            i64::from_str_radix(hex, 16)
        } else {
            rest.parse::<i64>()
        };
        let value = parsed.map_err(|e| format!("invalid color value '{text}': {e}"))?;
        Ok(if negative { -value } else { value } as u32)
    }
}

// ===========================================================================
// Definition codec
// ===========================================================================

/// One tab's full declaration, decoded from a definition document.
///
/// `name`, `after`, `before`, `icon`, and `contents` are required; every
/// other field is optional, with absence kept distinguishable from an
/// explicit value so the ignored-option checks can tell the two apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabDefinition {
    pub name: ResourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_vanilla: Option<bool>,
    pub after: Vec<ResourceId>,
    pub before: Vec<ResourceId>,
    pub icon: TabEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_title: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_scrollbar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<ResourceId>,
    #[serde(default, with = "color", skip_serializing_if = "Option::is_none")]
    pub label_color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_bar: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_bar_width: Option<i32>,
    #[serde(default, with = "color", skip_serializing_if = "Option::is_none")]
    pub slot_color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_image: Option<ResourceId>,
    pub contents: Vec<TabEntry>,
}

impl TabDefinition {
    /// Whether this definition maps onto a built-in tab by name.
    pub fn is_vanilla(&self) -> bool {
        self.use_vanilla.unwrap_or(false)
    }

    pub fn has_search_bar(&self) -> bool {
        self.search_bar.unwrap_or(false)
    }

    /// Warn about options that are present but inapplicable given the
    /// other fields. Never affects control flow; downstream code proceeds
    /// as if the flagged options were absent.
    pub fn check_ignored_options(&self) {
        if self.is_vanilla() {
            let vanilla_ignored = |what: &str| {
                log::warn!(
                    "tab definition '{}' is set to use a vanilla tab, specified {} will be ignored",
                    self.name,
                    what
                );
            };
            if self.no_title.is_some() {
                vanilla_ignored("'no title' setting");
            }
            if self.no_scrollbar.is_some() {
                vanilla_ignored("'no scrollbar' setting");
            }
            if self.background.is_some() {
                vanilla_ignored("background");
            }
            if self.label_color.is_some() {
                vanilla_ignored("label color");
            }
            if self.search_bar.is_some() {
                vanilla_ignored("'search bar' option");
            }
            if self.search_bar_width.is_some() {
                vanilla_ignored("search bar width");
            }
            if self.slot_color.is_some() {
                vanilla_ignored("slot color");
            }
            if self.tab_image.is_some() {
                vanilla_ignored("tab image");
            }
        }

        if !self.has_search_bar() && self.search_bar_width.is_some() {
            log::warn!(
                "tab definition '{}' has no search bar, specified search bar width will be ignored",
                self.name
            );
        }
    }

    /// The display options to apply; each stays `None` when absent so the
    /// host default applies. A width without a search bar was already
    /// flagged by [`Self::check_ignored_options`] and is dropped here, so
    /// the built tab never carries it.
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            hide_title: self.no_title,
            hide_scrollbar: self.no_scrollbar,
            background: self.background.clone(),
            label_color: self.label_color,
            search_bar: self.search_bar,
            search_bar_width: self.search_bar_width.filter(|_| self.has_search_bar()),
            slot_color: self.slot_color,
            tab_image: self.tab_image.clone(),
        }
    }

    pub fn content_entries(&self) -> Vec<ContentEntry> {
        self.contents.iter().map(TabEntry::to_content).collect()
    }
}

/// Decode one definition document from JSON text.
pub fn parse_definition(text: &str) -> Result<TabDefinition, serde_json::Error> {
    serde_json::from_str(text)
}
