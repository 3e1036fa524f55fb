//! File system scanning for cabinets.
//!
//! Two scans live here: a shallow listing of one cabinet folder into a
//! classified [`FileInventory`], and a recursive walk that finds cabinet
//! folders (directories holding a `description.yaml`) under a root.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{CabError, Result};
use crate::types::{FileEntry, FileInventory};

use super::manifest::Manifest;
use super::DESCRIPTION_FILENAME;

/// List a cabinet folder.
///
/// Returns the non-hidden entries of `dir` (one level, no recursion),
/// sorted by name and classified by extension. Fails only when the
/// directory cannot be listed.
pub fn scan_inventory(dir: &Path) -> Result<FileInventory> {
    fs::read_dir(dir).map_err(|e| CabError::io(dir, format!("Failed to list directory: {}", e)))?;

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let Some(filename) = entry.file_name().to_str() else {
            log::debug!("skipping non UTF-8 filename {:?}", entry.file_name());
            continue;
        };
        if filename.starts_with('.') {
            continue;
        }

        entries.push(FileEntry::new(filename, entry.path()));
    }

    Ok(FileInventory::from_entries(entries))
}

/// Whether `dir` holds a `description.yaml`.
pub fn is_cabinet_dir(dir: &Path) -> bool {
    dir.join(DESCRIPTION_FILENAME).is_file()
}

/// Recursively find cabinet folders under `root`.
///
/// Hidden directories are not descended into. Results are sorted and
/// unique.
pub fn find_cabinets(root: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut cabinets = Vec::new();

    if !root.exists() {
        return cabinets;
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || entry.file_name() != DESCRIPTION_FILENAME {
            continue;
        }

        let Some(dir) = entry.path().parent() else {
            continue;
        };

        if manifest.is_excluded(dir) {
            log::debug!("excluded cabinet {}", dir.display());
            continue;
        }

        cabinets.push(dir.to_path_buf());
    }

    cabinets.sort();
    cabinets.dedup();
    cabinets
}

/// Find cabinets under each manifest source.
pub fn find_in_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> Vec<PathBuf> {
    let mut cabinets = Vec::new();

    for source in sources {
        let source_path = if matches!(source.as_str(), "." | "./") {
            base_path.to_path_buf()
        } else if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        cabinets.extend(find_cabinets(&source_path, manifest));
    }

    cabinets.sort();
    cabinets.dedup();
    cabinets
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}
