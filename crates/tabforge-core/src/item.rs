use crate::id::ResourceId;

/// Parsed structured data attached to a content entry.
///
/// Entries carry their data as raw text on disk; it is parsed into this
/// form when a stack is built.
pub type TagValue = serde_json::Value;

/// A displayable content item: an identifier plus optional attached tag data.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub item: ResourceId,
    pub tag: Option<TagValue>,
}

impl ItemStack {
    pub fn new(item: ResourceId) -> Self {
        Self { item, tag: None }
    }

    pub fn with_tag(item: ResourceId, tag: TagValue) -> Self {
        Self {
            item,
            tag: Some(tag),
        }
    }
}

/// The set of feature flags active in the host session.
///
/// An opaque bitmask; the host defines what each bit means. Items may
/// require flags to be enabled, and content generation re-runs whenever
/// the active set changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureSet(u64);

impl FeatureSet {
    pub const NONE: FeatureSet = FeatureSet(0);
    pub const ALL: FeatureSet = FeatureSet(u64::MAX);

    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether every flag in `other` is active in this set.
    pub const fn contains(self, other: FeatureSet) -> bool {
        self.0 & other.0 == other.0
    }
}

/// The host-owned item system: identifier lookup plus feature-flag-aware
/// enablement.
pub trait ItemCatalog {
    /// Whether an item with this identifier exists at all.
    fn contains(&self, id: &ResourceId) -> bool;

    /// Whether the item exists and is enabled under the given feature set.
    fn enabled(&self, id: &ResourceId, features: FeatureSet) -> bool;
}
