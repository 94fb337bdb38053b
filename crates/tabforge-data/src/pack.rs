//! Resource-pack directory bootstrap.
//!
//! The host's asset pipeline reads a side-channel resource directory next
//! to the tab definitions (custom backgrounds, tab-strip images). This
//! module only makes sure the directory exists and carries a manifest; it
//! is structural plumbing, not part of the resolution engine, and callers
//! log its errors without aborting tab loading.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Directory created inside the tab definitions directory.
pub const PACK_DIR: &str = "resources";

/// Manifest file the asset pipeline expects at the pack root.
pub const PACK_MANIFEST: &str = "pack.json";

/// Manifest format version written into generated manifests.
pub const PACK_FORMAT: u32 = 1;

/// Errors from the resource-pack bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("failed to create resource pack directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write pack manifest {file}: {source}")]
    WriteManifest {
        file: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Serialize)]
struct PackManifest {
    pack: PackInfo,
}

#[derive(Debug, Serialize)]
struct PackInfo {
    description: String,
    format: u32,
}

/// Ensure `<dir>/resources/` exists with a manifest, generating a default
/// manifest if none is present. An existing manifest is left untouched.
/// Returns the resource pack path.
pub fn ensure_resource_pack(dir: &Path) -> Result<PathBuf, PackError> {
    let pack_dir = dir.join(PACK_DIR);
    std::fs::create_dir_all(&pack_dir).map_err(|source| PackError::CreateDir {
        dir: pack_dir.clone(),
        source,
    })?;

    let manifest_path = pack_dir.join(PACK_MANIFEST);
    if !manifest_path.exists() {
        let manifest = PackManifest {
            pack: PackInfo {
                description: "tabforge builtin resources".to_string(),
                format: PACK_FORMAT,
            },
        };
        // Serializing this fixed structure cannot fail; pretty output keeps
        // the generated file hand-editable.
        let content = serde_json::to_string_pretty(&manifest)
            .unwrap_or_else(|_| String::from("{}"));
        std::fs::write(&manifest_path, content).map_err(|source| PackError::WriteManifest {
            file: manifest_path.clone(),
            source,
        })?;
    }

    Ok(pack_dir)
}
