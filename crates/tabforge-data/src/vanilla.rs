//! The fixed vocabulary of built-in tabs and the wholesale fallback.

use tabforge_core::id::ResourceId;
use tabforge_core::registry::TabRegistry;
use tabforge_core::tab::Tab;

pub const BUILDING_BLOCKS: &str = "building_blocks";
pub const COLORED_BLOCKS: &str = "colored_blocks";
pub const NATURAL_BLOCKS: &str = "natural_blocks";
pub const FUNCTIONAL_BLOCKS: &str = "functional_blocks";
pub const REDSTONE_BLOCKS: &str = "redstone_blocks";
pub const TOOLS_AND_UTILITIES: &str = "tools_and_utilities";
pub const COMBAT: &str = "combat";
pub const FOOD_AND_DRINKS: &str = "food_and_drinks";
pub const INGREDIENTS: &str = "ingredients";
pub const SPAWN_EGGS: &str = "spawn_eggs";

const ORDERED: [&str; 10] = [
    BUILDING_BLOCKS,
    COLORED_BLOCKS,
    NATURAL_BLOCKS,
    FUNCTIONAL_BLOCKS,
    REDSTONE_BLOCKS,
    TOOLS_AND_UTILITIES,
    COMBAT,
    FOOD_AND_DRINKS,
    INGREDIENTS,
    SPAWN_EGGS,
];

/// All built-in tab identifiers in their default display order.
pub fn ordered_ids() -> [ResourceId; 10] {
    ORDERED.map(ResourceId::core)
}

/// Whether `name` is one of the built-in tabs.
pub fn is_vanilla(name: &ResourceId) -> bool {
    name.namespace() == tabforge_core::id::DEFAULT_NAMESPACE
        && ORDERED.contains(&name.path())
}

/// The host's built-in tab object for `name`, if it is a vanilla tab.
pub fn builtin_tab(name: &ResourceId) -> Option<Tab> {
    is_vanilla(name).then(|| Tab::builtin(name.clone()))
}

/// The complete fallback registry: all ten built-in tabs, chained pairwise
/// in their default order (nine edges).
pub fn fallback_registry() -> TabRegistry {
    let ids = ordered_ids();
    let mut registry = TabRegistry::new();
    registry.add_tab(Tab::builtin(ids[0].clone()), &[], &[]);
    for pair in ids.windows(2) {
        registry.add_tab(
            Tab::builtin(pair[1].clone()),
            std::slice::from_ref(&pair[0]),
            &[],
        );
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_all_builtin_ids() {
        for id in ordered_ids() {
            assert!(is_vanilla(&id), "{id} should be a vanilla tab");
        }
    }

    #[test]
    fn rejects_unknown_and_foreign_namespace() {
        assert!(!is_vanilla(&"core:secret_blocks".parse().unwrap()));
        assert!(!is_vanilla(&"mymod:combat".parse().unwrap()));
    }

    #[test]
    fn builtin_tab_lookup() {
        let tab = builtin_tab(&ResourceId::core(COMBAT)).unwrap();
        assert!(tab.is_builtin());
        assert!(builtin_tab(&"mymod:combat".parse().unwrap()).is_none());
    }

    #[test]
    fn fallback_has_ten_tabs_and_nine_chain_edges() {
        let registry = fallback_registry();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.edges().len(), 9);

        let ids = ordered_ids();
        for pair in ids.windows(2) {
            assert_eq!(registry.edge_count(&pair[0], &pair[1]), 1);
        }
    }
}
