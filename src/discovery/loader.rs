//! Cabinet loader - reads a cabinet folder into a validated detail.
//!
//! `load_description` is strict and reports a missing description as an
//! error. `load_cabinet` is the boundary the CLI uses: it never fails and
//! turns missing or unreadable folders into cabinet-level statuses.

use std::fs;
use std::path::Path;

use crate::error::{CabError, Result};
use crate::overrides::OverrideStore;
use crate::parser::decode_named;
use crate::types::{CabinetDescription, FileInventory};
use crate::validation::{reconcile, CabinetDetail, ReconcileOptions};

use super::scanner::scan_inventory;
use super::DESCRIPTION_FILENAME;

/// Read and decode a cabinet's `description.yaml`.
///
/// The description name defaults to the folder name. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn load_description(dir: &Path) -> Result<CabinetDescription> {
    let path = dir.join(DESCRIPTION_FILENAME);
    if !path.is_file() {
        return Err(CabError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let bytes = fs::read(&path).map_err(|e| CabError::Io {
        path: path.clone(),
        message: format!("Failed to read description: {}", e),
    })?;
    // Descriptions written by older tools are not always UTF-8.
    let source = String::from_utf8_lossy(&bytes);

    let folder = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(decode_named(&source, &folder))
}

/// Load, override and reconcile a cabinet folder.
///
/// A missing description becomes a "No description.yaml found" detail and
/// an unreadable one a cabinet-level error carrying the read failure. An
/// unreadable folder is treated as having no files.
pub fn load_cabinet(
    dir: &Path,
    store: Option<&OverrideStore>,
    options: &ReconcileOptions,
) -> CabinetDetail {
    let inventory = match scan_inventory(dir) {
        Ok(inventory) => inventory,
        Err(e) => {
            log::warn!("{}", e);
            FileInventory::new()
        }
    };

    let description = match load_description(dir) {
        Ok(description) => Some(description),
        Err(e) if e.is_not_found() => None,
        Err(CabError::Io { path, message }) => {
            log::warn!("{}: {}", path.display(), message);
            return CabinetDetail::failed(dir, inventory, message);
        }
        Err(e) => {
            log::warn!("{}", e);
            return CabinetDetail::failed(dir, inventory, e.to_string());
        }
    };

    let overrides = store.and_then(|s| s.get(dir));
    reconcile(dir, description.as_ref(), &inventory, overrides, options)
}
