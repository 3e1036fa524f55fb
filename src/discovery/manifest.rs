//! Collection manifest (cabinetry.yaml) parsing.
//!
//! The manifest sits at the root of a cabinet collection and configures
//! where cabinets are found and how they are validated.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CabError, Result};
use crate::types::Template;

/// Collection manifest loaded from cabinetry.yaml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directories to search for cabinets.
    /// Defaults to the collection root if empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,

    /// Patterns to exclude from discovery.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,

    /// Template every cabinet is checked against (e.g., "cabinet", "driving").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Override store location, relative to the collection root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<PathBuf>,

    /// Report parts without artwork as warnings.
    pub warn_missing_art: bool,

    /// Also warn about non-image art, out-of-range colour intensity and
    /// parts missing from the template.
    pub strict: bool,
}

impl Manifest {
    /// Load manifest from a cabinetry.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CabError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| CabError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check cabinetry.yaml syntax".to_string()),
        })
    }

    /// Resolve the configured template name.
    pub fn resolve_template(&self) -> Result<Option<&'static Template>> {
        match &self.template {
            None => Ok(None),
            Some(name) => Template::find(name).map(Some).ok_or_else(|| unknown_template(name)),
        }
    }

    /// Override store path, resolved against `root`.
    pub fn overrides_path(&self, root: &Path) -> Option<PathBuf> {
        self.overrides.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Get effective source paths, defaulting to the collection root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }
}

/// Error for a template name no stock template answers to.
pub fn unknown_template(name: &str) -> CabError {
    let known: Vec<&str> = Template::all().iter().map(|t| t.name).collect();
    CabError::Parse {
        message: format!("Unknown template '{}'", name),
        help: Some(format!("Use one of: {}", known.join(", "))),
    }
}

/// Simple glob matching: `*` suffixes, `dir/*` prefixes and `**/dir/*` anywhere.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.contains(&format!("/{}/", dir))
                || path.starts_with(&format!("{}/", dir))
                || path.ends_with(&format!("/{}", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix))
            || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
