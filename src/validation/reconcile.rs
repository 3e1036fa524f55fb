//! Cabinet reconciliation.
//!
//! Combines a decoded description, the folder's file inventory and the
//! user's overrides into a [`CabinetDetail`]: a status per part, a video
//! status, file assignments and an aggregate cabinet status.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::output::plural;
use crate::overrides::{apply_overrides, CabinetOverrides};
use crate::types::{CabinetDescription, CabinetPart, FileInventory, FileType, Template};

use super::status::ValidationStatus;
use super::template::{check_template, TemplateSuggestion};

/// Message for a cabinet folder without a description.
pub const NO_DESCRIPTION: &str = "No description.yaml found";

/// Knobs for reconciliation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Report parts without artwork as warnings instead of valid.
    pub warn_missing_art: bool,
    /// Add the advisory warnings for non-image art, colour intensity
    /// outside 0-1 and parts missing from the template.
    pub strict: bool,
    /// Template the cabinet will be converted onto.
    pub template: Option<&'static Template>,
}

/// Validation result for one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartDetail {
    /// The part after overrides.
    pub part: CabinetPart,
    pub status: ValidationStatus,
    /// Whether an override touched this part.
    pub overridden: bool,
}

/// Validation result for the attract video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDetail {
    pub file: Option<String>,
    pub status: ValidationStatus,
    pub overridden: bool,
}

/// Validated view of a cabinet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CabinetDetail {
    pub path: PathBuf,
    pub name: String,
    /// The description after overrides, if the folder has one.
    pub description: Option<CabinetDescription>,
    pub parts: Vec<PartDetail>,
    pub video: VideoDetail,
    /// Folder listing with assignments filled in.
    pub files: FileInventory,
    pub template: Option<String>,
    pub suggestions: Vec<TemplateSuggestion>,
    pub status: ValidationStatus,
}

impl CabinetDetail {
    /// Detail for a folder without a description.
    pub fn missing_description(path: &Path, files: FileInventory) -> Self {
        Self::failed(path, files, NO_DESCRIPTION)
    }

    /// A cabinet that could not be reconciled at all, with `message` as its
    /// error status.
    pub fn failed(path: &Path, files: FileInventory, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            name: folder_name(path),
            description: None,
            parts: Vec::new(),
            video: VideoDetail {
                file: None,
                status: ValidationStatus::Valid,
                overridden: false,
            },
            files,
            template: None,
            suggestions: Vec::new(),
            status: ValidationStatus::error(message),
        }
    }

    pub fn part(&self, name: &str) -> Option<&PartDetail> {
        self.parts.iter().find(|p| p.part.name == name)
    }

    pub fn error_count(&self) -> usize {
        self.parts.iter().filter(|p| p.status.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.parts.iter().filter(|p| p.status.is_warning()).count()
    }

    /// Whether the cabinet is ready to convert.
    pub fn is_ready(&self) -> bool {
        self.status.is_valid()
    }

    /// One-line status: `Ready`, `2 errors`, `No description.yaml found`, ...
    pub fn summary(&self) -> String {
        match self.status.message() {
            Some(message) => message.to_string(),
            None => "Ready".to_string(),
        }
    }
}

/// Reconcile a cabinet.
///
/// `description` is `None` when the folder has no `description.yaml`.
/// Art and video files are checked at `<cabinet_path>/<file>`.
pub fn reconcile(
    cabinet_path: &Path,
    description: Option<&CabinetDescription>,
    inventory: &FileInventory,
    overrides: Option<&CabinetOverrides>,
    options: &ReconcileOptions,
) -> CabinetDetail {
    let mut files = inventory.clone();

    let Some(description) = description else {
        return CabinetDetail::missing_description(cabinet_path, files);
    };

    let resolved = match overrides {
        Some(o) => apply_overrides(description, o),
        None => description.clone(),
    };

    let parts: Vec<PartDetail> = resolved
        .parts
        .iter()
        .map(|part| {
            let part_override = overrides.and_then(|o| o.part(&part.name));
            let override_file = overrides.and_then(|o| o.art_file(&part.name));
            PartDetail {
                part: part.clone(),
                status: part_status(cabinet_path, part, override_file, options),
                overridden: part_override.is_some_and(|o| !o.is_empty()),
            }
        })
        .collect();

    let video = video_detail(cabinet_path, &resolved, overrides);

    for part in &resolved.parts {
        if let Some(file) = part.art_file() {
            if let Some(entry) = files.get_mut(file) {
                entry.assign(&part.name);
            }
        }
    }
    if let Some(entry) = resolved.model_file().and_then(|f| files.get_mut(f)) {
        entry.assign("model");
    }
    if let Some(entry) = resolved.video_file().and_then(|f| files.get_mut(f)) {
        entry.assign("video");
    }

    let suggestions = match options.template {
        Some(template) => check_template(&resolved, &files, template),
        None => Vec::new(),
    };

    let status = aggregate_status(&parts);
    log::debug!(
        "reconciled '{}' at {}: {}",
        resolved.name,
        cabinet_path.display(),
        status
    );

    CabinetDetail {
        path: cabinet_path.to_path_buf(),
        name: resolved.name.clone(),
        parts,
        video,
        files,
        template: options.template.map(|t| t.name.to_string()),
        suggestions,
        status,
        description: Some(resolved),
    }
}

fn part_status(
    cabinet_path: &Path,
    part: &CabinetPart,
    override_file: Option<&str>,
    options: &ReconcileOptions,
) -> ValidationStatus {
    match part.art_file() {
        Some(file) => {
            if !cabinet_path.join(file).exists() {
                if override_file == Some(file) {
                    return ValidationStatus::error(format!("Override file not found: {}", file));
                }
                return ValidationStatus::error(format!("Art file not found: {}", file));
            }
            if options.strict && FileType::from_filename(file) != FileType::Image {
                return ValidationStatus::warning(format!("Art file is not an image: {}", file));
            }
        }
        None if options.warn_missing_art => {
            return ValidationStatus::warning("No artwork assigned");
        }
        None => {}
    }

    if !options.strict {
        return ValidationStatus::Valid;
    }

    if part.color.is_some_and(|c| !c.intensity_in_range()) {
        return ValidationStatus::warning("Color intensity out of range");
    }

    if let Some(template) = options.template {
        if !template.has_part(&part.name) {
            return ValidationStatus::warning(format!(
                "Part is not in the {} template",
                template.name
            ));
        }
    }

    ValidationStatus::Valid
}

fn video_detail(
    cabinet_path: &Path,
    resolved: &CabinetDescription,
    overrides: Option<&CabinetOverrides>,
) -> VideoDetail {
    let video_override = overrides.and_then(|o| o.video.as_ref());
    let overridden = video_override.is_some();

    if video_override.is_some_and(|v| v.is_cleared) {
        return VideoDetail {
            file: None,
            status: ValidationStatus::Valid,
            overridden,
        };
    }

    let Some(file) = resolved.video_file() else {
        return VideoDetail {
            file: None,
            status: ValidationStatus::warning("No video configured"),
            overridden,
        };
    };

    let status = if cabinet_path.join(file).exists() {
        ValidationStatus::Valid
    } else if overrides.and_then(|o| o.video_file()) == Some(file) {
        ValidationStatus::error(format!("Override video not found: {}", file))
    } else {
        ValidationStatus::error(format!("Video file not found: {}", file))
    };

    VideoDetail {
        file: Some(file.to_string()),
        status,
        overridden,
    }
}

fn aggregate_status(parts: &[PartDetail]) -> ValidationStatus {
    let errors = parts.iter().filter(|p| p.status.is_error()).count();
    if errors > 0 {
        return ValidationStatus::error(plural(errors, "error", "errors"));
    }

    let warnings = parts.iter().filter(|p| p.status.is_warning()).count();
    if warnings > 0 {
        return ValidationStatus::warning(plural(warnings, "warning", "warnings"));
    }

    ValidationStatus::Valid
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
