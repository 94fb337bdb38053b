//! Tab resolution engine: discovers definition documents, decodes and
//! validates them, and builds the tab registry with its ordering edges.
//!
//! Error handling is deliberately coarse at the file-scan level -- any
//! single bad file fails the whole batch and triggers the vanilla fallback,
//! because a partial tab set of unknown validity is worse than a known-good
//! baseline -- and fine-grained below it: bad options, icons, and content
//! entries degrade with a diagnostic and never abort the load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tabforge_core::id::ResourceId;
use tabforge_core::registry::{InstalledTabs, TabRegistry};
use tabforge_core::tab::{Tab, TabContents};

use crate::schema::TabDefinition;
use crate::vanilla;

/// File extension recognized as a tab definition document.
const DEFINITION_EXT: &str = "json";

// ===========================================================================
// Errors
// ===========================================================================

/// Structural failures that abort a whole load batch. Every variant maps to
/// the vanilla fallback; none of them escapes [`load_tabs`].
#[derive(Debug, thiserror::Error)]
pub enum TabLoadError {
    /// The definitions directory could not be created.
    #[error("failed to create tab definitions directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    /// The definitions directory could not be enumerated.
    #[error("failed to scan tab definitions directory {dir}: {source}")]
    Scan {
        dir: PathBuf,
        source: std::io::Error,
    },

    /// A definition file could not be read.
    #[error("failed to read tab definition file {file}: {source}")]
    Read {
        file: PathBuf,
        source: std::io::Error,
    },

    /// A definition file failed to decode.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Two files declared the same tab name.
    #[error("found duplicated tab name '{name}' in file '{file}', previously found in '{previous}'")]
    DuplicateName {
        name: ResourceId,
        file: PathBuf,
        previous: PathBuf,
    },

    /// The directory held no definition documents at all.
    #[error("no tab definitions found in {dir}")]
    NoDefinitions { dir: PathBuf },
}

// ===========================================================================
// Load pipeline
// ===========================================================================

/// Load all tab definitions from `dir`, creating the directory if absent.
///
/// Never fails and never returns an empty registry: any structural failure
/// (inaccessible directory, malformed document, duplicated name, empty set)
/// is logged and the fixed vanilla tab table is returned instead.
pub fn load_tabs(dir: &Path) -> TabRegistry {
    match try_load_tabs(dir) {
        Ok(registry) => registry,
        Err(e @ TabLoadError::NoDefinitions { .. }) => {
            log::info!("{e}, falling back to vanilla tabs");
            vanilla::fallback_registry()
        }
        Err(e) => {
            log::error!("encountered an error while loading tab definitions, falling back to vanilla tabs: {e}");
            vanilla::fallback_registry()
        }
    }
}

/// Load from `dir` and commit the result as one atomic snapshot replace.
pub fn load_and_install(dir: &Path, installed: &InstalledTabs) {
    installed.install(load_tabs(dir));
}

fn try_load_tabs(dir: &Path) -> Result<TabRegistry, TabLoadError> {
    std::fs::create_dir_all(dir).map_err(|source| TabLoadError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let definitions = discover_definitions(dir)?;
    if definitions.is_empty() {
        return Err(TabLoadError::NoDefinitions {
            dir: dir.to_path_buf(),
        });
    }

    let mut registry = TabRegistry::new();
    for def in &definitions {
        apply_definition(def, &mut registry);
    }
    Ok(registry)
}

/// Enumerate and decode every definition document in `dir` (non-recursive).
///
/// Files are processed in sorted path order so duplicate diagnostics are
/// deterministic. Any unreadable or malformed file, or a duplicated tab
/// name across files, aborts the whole batch.
fn discover_definitions(dir: &Path) -> Result<Vec<TabDefinition>, TabLoadError> {
    let scan_err = |source| TabLoadError::Scan {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_err)? {
        let path = entry.map_err(scan_err)?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(DEFINITION_EXT) {
            files.push(path);
        }
    }
    files.sort();

    let mut processed: HashMap<ResourceId, PathBuf> = HashMap::new();
    let mut definitions = Vec::new();
    for file in files {
        let content = std::fs::read_to_string(&file).map_err(|source| TabLoadError::Read {
            file: file.clone(),
            source,
        })?;
        let def: TabDefinition =
            serde_json::from_str(&content).map_err(|e| TabLoadError::Parse {
                file: file.clone(),
                detail: e.to_string(),
            })?;
        if let Some(previous) = processed.get(&def.name) {
            return Err(TabLoadError::DuplicateName {
                name: def.name.clone(),
                file,
                previous: previous.clone(),
            });
        }
        processed.insert(def.name.clone(), file);
        definitions.push(def);
    }
    Ok(definitions)
}

/// Apply one decoded definition to the registry under construction.
///
/// Failures at this level degrade to diagnostics: an unknown vanilla name
/// drops the definition (no tab, no edges), everything else loads.
fn apply_definition(def: &TabDefinition, registry: &mut TabRegistry) {
    def.check_ignored_options();

    if def.is_vanilla() {
        let Some(tab) = vanilla::builtin_tab(&def.name) else {
            log::error!(
                "tab definition '{}' is set to use a vanilla tab but is not a known vanilla tab, tab will not be added",
                def.name
            );
            return;
        };
        if !def.contents.is_empty() {
            log::warn!(
                "tab definition '{}' is set to use a vanilla tab and specifies contents, contents will be ignored",
                def.name
            );
        }
        registry.add_tab(tab, &def.after, &def.before);
        return;
    }

    if def.contents.is_empty() {
        log::warn!("tab definition '{}' doesn't specify any contents", def.name);
    }

    let tab = Tab::builder(def.name.clone())
        .icon(def.icon.to_content())
        .options(def.display_options())
        .contents(TabContents::new(def.content_entries()))
        .build();
    registry.add_tab(tab, &def.after, &def.before);
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tabforge_loader_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    fn id(text: &str) -> ResourceId {
        text.parse().unwrap()
    }

    fn write_definition(dir: &Path, file: &str, body: &str) {
        fs::write(dir.join(file), body).unwrap();
    }

    const MINIMAL: &str = r#"{
        "name": "mymod:fancy",
        "after": ["core:building_blocks"],
        "before": ["core:combat"],
        "icon": "core:stone",
        "contents": ["core:stone"]
    }"#;

    #[test]
    fn empty_directory_falls_back_to_vanilla() {
        let dir = make_test_dir("empty");
        let registry = load_tabs(&dir);
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.edges().len(), 9);
        cleanup(&dir);
    }

    #[test]
    fn creates_missing_directory() {
        let dir = make_test_dir("missing").join("definitions");
        assert!(!dir.exists());
        let registry = load_tabs(&dir);
        assert!(dir.is_dir());
        assert_eq!(registry.len(), 10);
        cleanup(dir.parent().unwrap());
    }

    #[test]
    fn loads_single_definition() {
        let dir = make_test_dir("single");
        write_definition(&dir, "fancy.json", MINIMAL);

        let registry = load_tabs(&dir);
        assert_eq!(registry.len(), 1);
        let tab = registry.get(&id("mymod:fancy")).unwrap();
        assert!(!tab.is_builtin());
        assert_eq!(
            registry.edges(),
            &[
                (id("core:building_blocks"), id("mymod:fancy")),
                (id("mymod:fancy"), id("core:combat")),
            ]
        );
        cleanup(&dir);
    }

    #[test]
    fn malformed_file_fails_whole_batch() {
        let dir = make_test_dir("malformed");
        write_definition(&dir, "fancy.json", MINIMAL);
        write_definition(&dir, "broken.json", "{not valid json");

        let registry = load_tabs(&dir);
        // Even the valid definition is discarded.
        assert!(!registry.contains(&id("mymod:fancy")));
        assert_eq!(registry.len(), 10);
        cleanup(&dir);
    }

    #[test]
    fn schema_violation_fails_whole_batch() {
        let dir = make_test_dir("schema");
        // Missing required `icon`.
        write_definition(
            &dir,
            "bad.json",
            r#"{"name": "m:t", "after": [], "before": [], "contents": []}"#,
        );

        let registry = load_tabs(&dir);
        assert_eq!(registry.len(), 10);
        cleanup(&dir);
    }

    #[test]
    fn duplicate_name_fails_whole_batch() {
        let dir = make_test_dir("duplicate");
        write_definition(&dir, "a.json", MINIMAL);
        write_definition(&dir, "b.json", MINIMAL);
        write_definition(
            &dir,
            "c.json",
            r#"{"name": "mymod:other", "after": [], "before": [],
                "icon": "core:stone", "contents": []}"#,
        );

        let registry = load_tabs(&dir);
        assert!(!registry.contains(&id("mymod:fancy")));
        assert!(!registry.contains(&id("mymod:other")));
        assert_eq!(registry.len(), 10);
        cleanup(&dir);
    }

    #[test]
    fn duplicate_error_names_both_files() {
        let dir = make_test_dir("duplicate_files");
        write_definition(&dir, "a.json", MINIMAL);
        write_definition(&dir, "b.json", MINIMAL);

        let err = try_load_tabs(&dir).unwrap_err();
        match err {
            TabLoadError::DuplicateName {
                name,
                file,
                previous,
            } => {
                assert_eq!(name, id("mymod:fancy"));
                assert_eq!(previous, dir.join("a.json"));
                assert_eq!(file, dir.join("b.json"));
            }
            other => panic!("expected DuplicateName, got {other:?}"),
        }
        cleanup(&dir);
    }

    #[test]
    fn non_definition_files_are_ignored() {
        let dir = make_test_dir("extensions");
        write_definition(&dir, "fancy.json", MINIMAL);
        write_definition(&dir, "notes.txt", "not a definition");
        write_definition(&dir, "fancy.json.bak", "{broken");

        let registry = load_tabs(&dir);
        assert_eq!(registry.len(), 1);
        cleanup(&dir);
    }

    #[test]
    fn subdirectories_are_not_scanned() {
        let dir = make_test_dir("subdir");
        write_definition(&dir, "fancy.json", MINIMAL);
        let sub = dir.join("nested");
        fs::create_dir(&sub).unwrap();
        write_definition(&sub, "broken.json", "{not json");

        let registry = load_tabs(&dir);
        assert_eq!(registry.len(), 1);
        cleanup(&dir);
    }

    #[test]
    fn use_vanilla_maps_builtin_tab() {
        let dir = make_test_dir("vanilla_map");
        write_definition(
            &dir,
            "combat.json",
            r#"{"name": "core:combat", "use_vanilla": true,
                "after": ["core:ingredients"], "before": [],
                "icon": "core:stone", "contents": []}"#,
        );

        let registry = load_tabs(&dir);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&id("core:combat")).unwrap().is_builtin());
        assert_eq!(
            registry.edges(),
            &[(id("core:ingredients"), id("core:combat"))]
        );
        cleanup(&dir);
    }

    #[test]
    fn use_vanilla_unknown_name_skips_definition_only() {
        let dir = make_test_dir("vanilla_unknown");
        write_definition(
            &dir,
            "bogus.json",
            r#"{"name": "core:secret_blocks", "use_vanilla": true,
                "after": ["core:combat"], "before": [],
                "icon": "core:stone", "contents": []}"#,
        );
        write_definition(&dir, "fancy.json", MINIMAL);

        let registry = load_tabs(&dir);
        // The bogus definition contributes neither a tab nor edges; the
        // sibling definition still loads.
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&id("mymod:fancy")));
        assert_eq!(registry.edge_count(&id("core:combat"), &id("core:secret_blocks")), 0);
        cleanup(&dir);
    }

    #[test]
    fn use_vanilla_ignores_contents_and_options() {
        let dir = make_test_dir("vanilla_ignored");
        write_definition(
            &dir,
            "combat.json",
            r#"{"name": "core:combat", "use_vanilla": true,
                "after": [], "before": [],
                "icon": "core:stone", "no_title": true, "label_color": 255,
                "contents": ["core:stone"]}"#,
        );

        let registry = load_tabs(&dir);
        let tab = registry.get(&id("core:combat")).unwrap();
        assert!(tab.is_builtin());
        assert!(tab.contents().is_empty());
        assert_eq!(tab.options().hide_title, None);
        assert_eq!(tab.options().label_color, None);
        cleanup(&dir);
    }

    #[test]
    fn search_bar_width_without_search_bar_loads_and_drops_width() {
        let dir = make_test_dir("search_width");
        write_definition(
            &dir,
            "fancy.json",
            r#"{"name": "mymod:fancy", "after": [], "before": [],
                "icon": "core:stone", "search_bar_width": 120,
                "contents": []}"#,
        );

        let registry = load_tabs(&dir);
        assert_eq!(registry.len(), 1);
        // The diagnostic flagged the width as ignored; the built tab must
        // not carry it.
        assert_eq!(
            registry.get(&id("mymod:fancy")).unwrap().options().search_bar_width,
            None
        );
        cleanup(&dir);
    }

    #[test]
    fn search_bar_width_with_search_bar_is_applied() {
        let dir = make_test_dir("search_width_applied");
        write_definition(
            &dir,
            "fancy.json",
            r#"{"name": "mymod:fancy", "after": [], "before": [],
                "icon": "core:stone", "search_bar": true, "search_bar_width": 120,
                "contents": []}"#,
        );

        let registry = load_tabs(&dir);
        let options = registry.get(&id("mymod:fancy")).unwrap().options().clone();
        assert_eq!(options.search_bar, Some(true));
        assert_eq!(options.search_bar_width, Some(120));
        cleanup(&dir);
    }

    #[test]
    fn negative_search_bar_width_does_not_fail_batch() {
        let dir = make_test_dir("search_width_negative");
        write_definition(
            &dir,
            "fancy.json",
            r#"{"name": "mymod:fancy", "after": [], "before": [],
                "icon": "core:stone", "search_bar": true, "search_bar_width": -1,
                "contents": []}"#,
        );

        let registry = load_tabs(&dir);
        // An odd width is an option-level misuse, never a structural
        // failure; the batch still loads.
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&id("mymod:fancy")).unwrap().options().search_bar_width,
            Some(-1)
        );
        cleanup(&dir);
    }

    #[test]
    fn edge_multiplicity_across_definitions() {
        let dir = make_test_dir("multiplicity");
        write_definition(
            &dir,
            "a.json",
            r#"{"name": "m:a", "after": [], "before": ["m:b"],
                "icon": "core:stone", "contents": []}"#,
        );
        write_definition(
            &dir,
            "b.json",
            r#"{"name": "m:b", "after": ["m:a"], "before": [],
                "icon": "core:stone", "contents": []}"#,
        );

        let registry = load_tabs(&dir);
        assert_eq!(registry.edge_count(&id("m:a"), &id("m:b")), 2);
        cleanup(&dir);
    }

    #[test]
    fn load_and_install_commits_snapshot() {
        let dir = make_test_dir("install");
        write_definition(&dir, "fancy.json", MINIMAL);

        let installed = InstalledTabs::new();
        load_and_install(&dir, &installed);
        assert!(installed.current().contains(&id("mymod:fancy")));

        // A second load over a now-broken directory replaces the whole
        // snapshot with the fallback, not a partial mix.
        write_definition(&dir, "broken.json", "{nope");
        load_and_install(&dir, &installed);
        let current = installed.current();
        assert!(!current.contains(&id("mymod:fancy")));
        assert_eq!(current.len(), 10);
        cleanup(&dir);
    }
}
