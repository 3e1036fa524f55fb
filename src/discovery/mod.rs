//! Cabinet discovery and loading.
//!
//! This module handles finding cabinet folders under a collection root,
//! either by walking the whole root or the sources named in a
//! `cabinetry.yaml` manifest, and loading each folder into a validated
//! [`CabinetDetail`](crate::validation::CabinetDetail).
//!
//! # Example
//!
//! ```ignore
//! use cabinetry::discovery::discover;
//!
//! let result = discover("./cabinets")?;
//! println!("Found {} cabinets", result.cabinets.len());
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::validation::ReconcileOptions;

pub use loader::{load_cabinet, load_description};
pub use manifest::{unknown_template, Manifest};
pub use scanner::{find_cabinets, find_in_sources, is_cabinet_dir, scan_inventory};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "cabinetry.yaml";

/// The name of a cabinet's description file.
pub const DESCRIPTION_FILENAME: &str = "description.yaml";

/// Result of discovering cabinets in a collection.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The collection root directory.
    pub root: PathBuf,

    /// The loaded manifest (may be default if no cabinetry.yaml found).
    pub manifest: Manifest,

    /// Whether a cabinetry.yaml manifest was found.
    pub has_manifest: bool,

    /// Cabinet folders, sorted.
    pub cabinets: Vec<PathBuf>,
}

impl DiscoveryResult {
    /// Reconcile options from the manifest.
    pub fn reconcile_options(&self) -> Result<ReconcileOptions> {
        Ok(ReconcileOptions {
            warn_missing_art: self.manifest.warn_missing_art,
            strict: self.manifest.strict,
            template: self.manifest.resolve_template()?,
        })
    }

    /// Override store path from the manifest, if it names one.
    pub fn overrides_path(&self) -> Option<PathBuf> {
        self.manifest.overrides_path(&self.root)
    }
}

/// Discover cabinets in a collection directory.
///
/// Looks for a `cabinetry.yaml` manifest in the root directory. If found,
/// searches the manifest's source paths. Otherwise, walks the entire
/// directory for folders holding a `description.yaml`.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    let sources = manifest.effective_sources();
    let cabinets = find_in_sources(&sources, &root, &manifest);
    log::debug!("found {} cabinet(s) under {}", cabinets.len(), root.display());

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        cabinets,
    })
}

/// Find the manifest governing `path` and the collection root holding it.
///
/// Searches `path` and then its ancestors for a `cabinetry.yaml`. A cabinet
/// folder's own directory is skipped, so a cabinet resolves to the manifest
/// of the collection around it. Relative paths are canonicalized first.
pub fn locate_manifest(path: &Path) -> Result<Option<(PathBuf, Manifest)>> {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let start = if is_cabinet_dir(&path) {
        path.parent()
    } else {
        Some(path.as_path())
    };

    for dir in start.into_iter().flat_map(Path::ancestors) {
        let candidate = dir.join(MANIFEST_FILENAME);
        if candidate.is_file() {
            log::debug!("using manifest {}", candidate.display());
            return Ok(Some((dir.to_path_buf(), Manifest::load(&candidate)?)));
        }
    }
    Ok(None)
}

/// Discover cabinets from specific paths.
///
/// A path that is itself a cabinet folder is used as-is. Any other
/// directory is searched like a collection root, and is reported as a
/// cabinet (without a description) when nothing is found inside it.
///
/// The manifest is the one enclosing the first path (see
/// [`locate_manifest`]), so its template, options and store location apply
/// the same way they do when the whole collection is discovered.
pub fn discover_paths(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    let located = match paths.first() {
        Some(first) => locate_manifest(first)?,
        None => None,
    };
    let has_manifest = located.is_some();
    let (root, manifest) = match located {
        Some(found) => found,
        None => {
            let root = paths
                .first()
                .and_then(|p| p.parent())
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (root, Manifest::default())
        }
    };

    let mut cabinets = Vec::new();
    for path in paths {
        if is_cabinet_dir(path) {
            cabinets.push(path.clone());
            continue;
        }

        let found = find_cabinets(path, &manifest);
        if found.is_empty() {
            cabinets.push(path.clone());
        } else {
            cabinets.extend(found);
        }
    }

    cabinets.sort();
    cabinets.dedup();

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        cabinets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_cabinet(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(DESCRIPTION_FILENAME), format!("name: {}\n", name)).unwrap();
        dir
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();

        let result = discover(dir.path()).unwrap();

        assert!(!result.has_manifest);
        assert!(result.cabinets.is_empty());
    }

    #[test]
    fn test_discover_without_manifest() {
        let dir = tempdir().unwrap();
        let galaga = write_cabinet(dir.path(), "galaga");
        let pacman = write_cabinet(dir.path(), "pacman");

        let result = discover(dir.path()).unwrap();

        assert_eq!(result.cabinets, vec![galaga, pacman]);
    }

    #[test]
    fn test_discover_with_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "sources:\n  - uprights/\ntemplate: cabinet\nwarn_missing_art: true\n",
        )
        .unwrap();
        let galaga = write_cabinet(&dir.path().join("uprights"), "galaga");
        write_cabinet(&dir.path().join("incoming"), "unsorted");

        let result = discover(dir.path()).unwrap();

        assert!(result.has_manifest);
        assert_eq!(result.cabinets, vec![galaga]);

        let options = result.reconcile_options().unwrap();
        assert!(options.warn_missing_art);
        assert_eq!(options.template.map(|t| t.name), Some("cabinet"));
    }

    #[test]
    fn test_discover_with_bad_template() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "template: pinball\n").unwrap();

        let result = discover(dir.path()).unwrap();
        assert!(result.reconcile_options().is_err());
    }

    #[test]
    fn test_discover_paths_mixed() {
        let dir = tempdir().unwrap();
        let galaga = write_cabinet(dir.path(), "galaga");
        let collection = dir.path().join("collection");
        let dkong = write_cabinet(&collection, "dkong");
        let bare = dir.path().join("bare");
        fs::create_dir_all(&bare).unwrap();

        let result = discover_paths(&[galaga.clone(), collection, bare.clone()]).unwrap();

        let mut expected = vec![galaga, dkong, bare];
        expected.sort();
        assert_eq!(result.cabinets, expected);
    }

    #[test]
    fn test_locate_manifest_from_cabinet() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILENAME), "overrides: fixes.json\n").unwrap();
        let galaga = write_cabinet(&dir.path().join("uprights"), "galaga");
        fs::write(galaga.join(MANIFEST_FILENAME), "template: pinball\n").unwrap();

        let (root, manifest) = locate_manifest(&galaga).unwrap().unwrap();

        assert_eq!(root, dir.path().canonicalize().unwrap());
        assert_eq!(manifest.overrides.as_deref(), Some(Path::new("fixes.json")));
    }

    #[test]
    fn test_locate_manifest_none() {
        let dir = tempdir().unwrap();
        let galaga = write_cabinet(dir.path(), "galaga");
        assert!(locate_manifest(&galaga).unwrap().is_none());
    }

    #[test]
    fn test_discover_paths_uses_enclosing_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILENAME),
            "template: cabinet\noverrides: fixes.json\n",
        )
        .unwrap();
        let galaga = write_cabinet(dir.path(), "galaga");

        let result = discover_paths(&[galaga.clone()]).unwrap();

        assert!(result.has_manifest);
        assert_eq!(result.cabinets, vec![galaga]);
        assert_eq!(
            result.overrides_path(),
            Some(dir.path().canonicalize().unwrap().join("fixes.json"))
        );
        let options = result.reconcile_options().unwrap();
        assert_eq!(options.template.map(|t| t.name), Some("cabinet"));
    }
}
