use crate::id::ResourceId;
use crate::tab::Tab;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;

/// The output of one load pass: a bijective tab table plus the accumulated
/// ordering-edge multimap.
///
/// An edge `(a, b)` means "tab `a` must precede tab `b`". The registry only
/// accumulates edges; producing a total order (and handling cycles) is the
/// host's job. Edge multiplicity is preserved: if two definitions each
/// contribute the same edge, it appears twice.
#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    tabs: HashMap<ResourceId, Tab>,
    edges: Vec<(ResourceId, ResourceId)>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tab with its ordering edges: each `after` entry
    /// contributes `after -> name`, each `before` entry `name -> before`.
    pub fn add_tab(&mut self, tab: Tab, after: &[ResourceId], before: &[ResourceId]) {
        let name = tab.name().clone();
        for a in after {
            self.edges.push((a.clone(), name.clone()));
        }
        for b in before {
            self.edges.push((name.clone(), b.clone()));
        }
        self.tabs.insert(name, tab);
    }

    pub fn get(&self, name: &ResourceId) -> Option<&Tab> {
        self.tabs.get(name)
    }

    pub fn contains(&self, name: &ResourceId) -> bool {
        self.tabs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> impl Iterator<Item = (&ResourceId, &Tab)> {
        self.tabs.iter()
    }

    /// The ordering-edge multimap, in insertion order.
    pub fn edges(&self) -> &[(ResourceId, ResourceId)] {
        &self.edges
    }

    /// Occurrences of a specific edge (multiplicity-aware).
    pub fn edge_count(&self, from: &ResourceId, to: &ResourceId) -> usize {
        self.edges
            .iter()
            .filter(|(a, b)| a == from && b == to)
            .count()
    }
}

/// Process-wide snapshot of the installed tab registry.
///
/// Each load builds a fresh [`TabRegistry`]; committing it replaces the
/// whole snapshot in one atomic swap, so a reader observes either the
/// previous set or the new one in full, never a mix of both.
#[derive(Debug)]
pub struct InstalledTabs {
    current: ArcSwap<TabRegistry>,
}

impl InstalledTabs {
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(TabRegistry::new()),
        }
    }

    /// Clear-and-replace commit of a freshly built registry.
    pub fn install(&self, registry: TabRegistry) {
        self.current.store(Arc::new(registry));
    }

    /// The currently installed snapshot.
    pub fn current(&self) -> Arc<TabRegistry> {
        self.current.load_full()
    }
}

impl Default for InstalledTabs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(text: &str) -> ResourceId {
        text.parse().unwrap()
    }

    #[test]
    fn add_tab_records_edges_both_directions() {
        let mut registry = TabRegistry::new();
        registry.add_tab(
            Tab::builder(id("mymod:middle")).build(),
            &[id("mymod:first")],
            &[id("mymod:last")],
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.edges(),
            &[
                (id("mymod:first"), id("mymod:middle")),
                (id("mymod:middle"), id("mymod:last")),
            ]
        );
    }

    #[test]
    fn edge_multiplicity_preserved() {
        let mut registry = TabRegistry::new();
        // A declares before: [B], B declares after: [A] -- same edge twice.
        registry.add_tab(Tab::builder(id("m:a")).build(), &[], &[id("m:b")]);
        registry.add_tab(Tab::builder(id("m:b")).build(), &[id("m:a")], &[]);
        assert_eq!(registry.edge_count(&id("m:a"), &id("m:b")), 2);
        assert_eq!(registry.edges().len(), 2);
    }

    #[test]
    fn install_replaces_whole_snapshot() {
        let installed = InstalledTabs::new();
        assert!(installed.current().is_empty());

        let mut first = TabRegistry::new();
        first.add_tab(Tab::builder(id("m:a")).build(), &[], &[]);
        installed.install(first);

        let held = installed.current();
        assert!(held.contains(&id("m:a")));

        let mut second = TabRegistry::new();
        second.add_tab(Tab::builder(id("m:b")).build(), &[], &[]);
        installed.install(second);

        // The old snapshot stays intact for readers that grabbed it.
        assert!(held.contains(&id("m:a")));
        let now = installed.current();
        assert!(!now.contains(&id("m:a")));
        assert!(now.contains(&id("m:b")));
    }
}
