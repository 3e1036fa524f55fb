//! User overrides for cabinet descriptions.
//!
//! Overrides are corrections recorded on top of a parsed description:
//! a cleared or substituted texture, a different material, a rotation or
//! flip. They never touch `description.yaml`; [`apply_overrides`] derives a
//! patched copy of the description at reconciliation time.
//!
//! The [`OverrideStore`] keeps every cabinet's overrides keyed by cabinet
//! path and persists them as JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CabError, Result};
use crate::types::{ArtSpec, CabinetDescription, CabinetPart, VideoSpec};

const STORE_VERSION: u32 = 1;

/// Correction for a single part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartOverride {
    /// Replacement art file. With `is_cleared` the texture is removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_x: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_y: Option<bool>,
    pub is_cleared: bool,
}

impl PartOverride {
    /// Override that removes the part's texture.
    pub fn cleared() -> Self {
        Self {
            is_cleared: true,
            ..Default::default()
        }
    }

    /// Override that substitutes the art file.
    pub fn with_art(file: impl Into<String>) -> Self {
        Self {
            art_file: Some(file.into()),
            ..Default::default()
        }
    }

    /// Whether this override changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Correction for the cabinet's attract video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_x: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_y: Option<bool>,
    pub is_cleared: bool,
}

/// All overrides recorded for one cabinet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetOverrides {
    /// Part overrides keyed by part name.
    pub parts: BTreeMap<String, PartOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoOverride>,
    pub last_modified: DateTime<Utc>,
}

impl CabinetOverrides {
    pub fn part(&self, name: &str) -> Option<&PartOverride> {
        self.parts.get(name)
    }

    /// The override art file for a part, unless the part is cleared.
    pub fn art_file(&self, part: &str) -> Option<&str> {
        self.parts
            .get(part)
            .filter(|o| !o.is_cleared)
            .and_then(|o| o.art_file.as_deref())
    }

    /// The override video file, unless the video is cleared.
    pub fn video_file(&self) -> Option<&str> {
        self.video
            .as_ref()
            .filter(|v| !v.is_cleared)
            .and_then(|v| v.file.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.video.is_none()
    }

    fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

/// Derive a description with `overrides` applied.
///
/// Overrides for parts the description does not declare are ignored.
pub fn apply_overrides(
    description: &CabinetDescription,
    overrides: &CabinetOverrides,
) -> CabinetDescription {
    let mut patched = description.clone();

    for part in &mut patched.parts {
        if let Some(part_override) = overrides.parts.get(&part.name) {
            *part = apply_part_override(part, part_override);
        }
    }

    if let Some(video_override) = &overrides.video {
        patched.video = apply_video_override(patched.video.as_ref(), video_override);
    }

    for name in overrides.parts.keys() {
        if description.part(name).is_none() {
            log::debug!("override for unknown part '{}' in '{}'", name, description.name);
        }
    }

    patched
}

/// Apply one part override.
pub fn apply_part_override(part: &CabinetPart, part_override: &PartOverride) -> CabinetPart {
    let mut patched = part.clone();

    if part_override.is_cleared {
        patched.art = None;
    } else if let Some(file) = &part_override.art_file {
        let art = patched.art.get_or_insert_with(ArtSpec::default);
        art.file = Some(file.clone());
    }

    if let Some(art) = patched.art.as_mut() {
        if let Some(rotate) = part_override.rotate {
            art.rotate = rotate;
        }
        if let Some(invert_x) = part_override.invert_x {
            art.invert_x = invert_x;
        }
        if let Some(invert_y) = part_override.invert_y {
            art.invert_y = invert_y;
        }
    }

    if let Some(material) = &part_override.material {
        patched.material = Some(material.clone());
    }

    patched
}

fn apply_video_override(video: Option<&VideoSpec>, video_override: &VideoOverride) -> Option<VideoSpec> {
    if video_override.is_cleared {
        return None;
    }

    let mut patched = video.cloned();
    if let Some(file) = &video_override.file {
        patched.get_or_insert_with(VideoSpec::default).file = Some(file.clone());
    }

    if let Some(spec) = patched.as_mut() {
        if let Some(invert_x) = video_override.invert_x {
            spec.invert_x = invert_x;
        }
        if let Some(invert_y) = video_override.invert_y {
            spec.invert_y = invert_y;
        }
    }

    patched
}

/// Persisted overrides for every cabinet, keyed by cabinet path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideStore {
    version: u32,
    cabinets: BTreeMap<String, CabinetOverrides>,
}

impl Default for OverrideStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideStore {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            cabinets: BTreeMap::new(),
        }
    }

    /// Default store location: `<config dir>/cabinetry/overrides.json`.
    pub fn default_path() -> PathBuf {
        let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config.join("cabinetry").join("overrides.json")
    }

    /// Normalized store key for a cabinet path.
    pub fn key(cabinet: &Path) -> String {
        cabinet
            .canonicalize()
            .unwrap_or_else(|_| cabinet.to_path_buf())
            .to_string_lossy()
            .into_owned()
    }

    /// Load a store. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no override store at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| CabError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read override store: {}", e),
        })?;

        let store: Self = serde_json::from_str(&content).map_err(|e| CabError::Parse {
            message: format!("Invalid override store {}: {}", path.display(), e),
            help: Some("Delete or repair the file to start over".to_string()),
        })?;

        if store.version > STORE_VERSION {
            log::warn!(
                "override store {} has newer version {} (expected {})",
                path.display(),
                store.version,
                STORE_VERSION
            );
        }

        Ok(store)
    }

    /// Write the store as pretty JSON, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| CabError::io(parent, e))?;
            }
        }

        let serialized = serde_json::to_string_pretty(self).map_err(|e| CabError::Parse {
            message: format!("Failed to serialize override store: {}", e),
            help: None,
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serialized).map_err(|e| CabError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| CabError::io(path, e))?;

        Ok(())
    }

    /// Overrides for a cabinet, if any.
    pub fn get(&self, cabinet: &Path) -> Option<&CabinetOverrides> {
        self.cabinets.get(&Self::key(cabinet))
    }

    /// Iterate over `(cabinet key, overrides)`.
    pub fn cabinets(&self) -> impl Iterator<Item = (&str, &CabinetOverrides)> {
        self.cabinets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cabinets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cabinets.is_empty()
    }

    /// Replace a part's override.
    pub fn set_part(&mut self, cabinet: &Path, part: &str, part_override: PartOverride) {
        let entry = self.entry(cabinet);
        entry.parts.insert(part.to_string(), part_override);
        entry.touch();
    }

    /// Edit a part's override in place, creating it if needed.
    pub fn update_part(&mut self, cabinet: &Path, part: &str, edit: impl FnOnce(&mut PartOverride)) {
        let entry = self.entry(cabinet);
        edit(entry.parts.entry(part.to_string()).or_default());
        entry.touch();
    }

    /// Mark a part's texture as removed.
    pub fn clear_part_art(&mut self, cabinet: &Path, part: &str) {
        self.update_part(cabinet, part, |o| {
            o.art_file = None;
            o.is_cleared = true;
        });
    }

    /// Drop a part's override. Returns whether one existed.
    pub fn remove_part(&mut self, cabinet: &Path, part: &str) -> bool {
        let key = Self::key(cabinet);
        let Some(entry) = self.cabinets.get_mut(&key) else {
            return false;
        };

        let removed = entry.parts.remove(part).is_some();
        if removed {
            entry.touch();
        }
        if entry.is_empty() {
            self.cabinets.remove(&key);
        }
        removed
    }

    /// Replace the video override.
    pub fn set_video(&mut self, cabinet: &Path, video: VideoOverride) {
        let entry = self.entry(cabinet);
        entry.video = Some(video);
        entry.touch();
    }

    /// Drop the video override. Returns whether one existed.
    pub fn remove_video(&mut self, cabinet: &Path) -> bool {
        let key = Self::key(cabinet);
        let Some(entry) = self.cabinets.get_mut(&key) else {
            return false;
        };

        let removed = entry.video.take().is_some();
        if removed {
            entry.touch();
        }
        if entry.is_empty() {
            self.cabinets.remove(&key);
        }
        removed
    }

    /// Drop every override for a cabinet.
    pub fn remove_cabinet(&mut self, cabinet: &Path) -> bool {
        self.cabinets.remove(&Self::key(cabinet)).is_some()
    }

    fn entry(&mut self, cabinet: &Path) -> &mut CabinetOverrides {
        self.cabinets.entry(Self::key(cabinet)).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorSpec;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn galaga() -> CabinetDescription {
        let mut desc = CabinetDescription::new("galaga");
        let mut bezel = CabinetPart::new("bezel");
        bezel.art = Some(ArtSpec {
            file: Some("bezel.png".to_string()),
            rotate: 90,
            ..Default::default()
        });
        bezel.material = Some("black".to_string());
        bezel.color = Some(ColorSpec::default());
        desc.parts.push(bezel);
        desc.parts.push(CabinetPart::new("left"));
        desc.video = Some(VideoSpec {
            file: Some("galaga.mp4".to_string()),
            ..Default::default()
        });
        desc
    }

    fn overrides(parts: &[(&str, PartOverride)]) -> CabinetOverrides {
        CabinetOverrides {
            parts: parts
                .iter()
                .map(|(name, o)| (name.to_string(), o.clone()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_cleared_removes_art() {
        let desc = galaga();
        let patched = apply_overrides(&desc, &overrides(&[("bezel", PartOverride::cleared())]));

        let bezel = patched.part("bezel").unwrap();
        assert!(bezel.art.is_none());
        assert_eq!(bezel.material.as_deref(), Some("black"));
        // Source description is untouched.
        assert_eq!(desc.part("bezel").unwrap().art_file(), Some("bezel.png"));
    }

    #[test]
    fn test_apply_substitutes_art_keeping_transform() {
        let patched = apply_overrides(
            &galaga(),
            &overrides(&[("bezel", PartOverride::with_art("bezel-hd.png"))]),
        );

        let art = patched.part("bezel").unwrap().art.clone().unwrap();
        assert_eq!(art.file.as_deref(), Some("bezel-hd.png"));
        assert_eq!(art.rotate, 90);
    }

    #[test]
    fn test_apply_creates_art_for_textureless_part() {
        let part_override = PartOverride {
            art_file: Some("left.png".to_string()),
            invert_x: Some(true),
            ..Default::default()
        };
        let patched = apply_overrides(&galaga(), &overrides(&[("left", part_override)]));

        let art = patched.part("left").unwrap().art.clone().unwrap();
        assert_eq!(art.file.as_deref(), Some("left.png"));
        assert!(art.invert_x);
        assert_eq!(art.rotate, 0);
    }

    #[test]
    fn test_apply_material_independent_of_art() {
        let part_override = PartOverride {
            material: Some("chrome".to_string()),
            rotate: Some(180),
            ..Default::default()
        };
        let patched = apply_overrides(&galaga(), &overrides(&[("bezel", part_override)]));

        let bezel = patched.part("bezel").unwrap();
        assert_eq!(bezel.material.as_deref(), Some("chrome"));
        assert_eq!(bezel.art_file(), Some("bezel.png"));
        assert_eq!(bezel.art.as_ref().unwrap().rotate, 180);
    }

    #[test]
    fn test_apply_ignores_unknown_parts() {
        let desc = galaga();
        let patched = apply_overrides(&desc, &overrides(&[("roof", PartOverride::with_art("x.png"))]));
        assert_eq!(patched, desc);
    }

    #[test]
    fn test_apply_video_overrides() {
        let desc = galaga();

        let cleared = CabinetOverrides {
            video: Some(VideoOverride {
                is_cleared: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(apply_overrides(&desc, &cleared).video.is_none());

        let replaced = CabinetOverrides {
            video: Some(VideoOverride {
                file: Some("attract.mov".to_string()),
                invert_y: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let video = apply_overrides(&CabinetDescription::new("x"), &replaced).video.unwrap();
        assert_eq!(video.file.as_deref(), Some("attract.mov"));
        assert!(video.invert_y);
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/overrides.json");
        let cabinet = dir.path().join("galaga");

        let mut store = OverrideStore::new();
        store.set_part(&cabinet, "bezel", PartOverride::with_art("bezel-hd.png"));
        store.clear_part_art(&cabinet, "left");
        store.set_video(
            &cabinet,
            VideoOverride {
                file: Some("attract.mp4".to_string()),
                ..Default::default()
            },
        );
        store.save(&path).unwrap();

        let loaded = OverrideStore::load(&path).unwrap();
        assert_eq!(loaded, store);

        let entry = loaded.get(&cabinet).unwrap();
        assert_eq!(entry.art_file("bezel"), Some("bezel-hd.png"));
        assert!(entry.part("left").unwrap().is_cleared);
        assert_eq!(entry.art_file("left"), None);
        assert_eq!(entry.video_file(), Some("attract.mp4"));
    }

    #[test]
    fn test_store_load_missing_is_empty() {
        let dir = tempdir().unwrap();
        let store = OverrideStore::load(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_load_corrupt_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(OverrideStore::load(&path), Err(CabError::Parse { .. })));
    }

    #[test]
    fn test_store_update_last_write_wins() {
        let cabinet = Path::new("/cabinets/galaga");
        let mut store = OverrideStore::new();

        store.update_part(cabinet, "bezel", |o| o.material = Some("wood".to_string()));
        let first = store.get(cabinet).unwrap().last_modified;
        store.update_part(cabinet, "bezel", |o| o.material = Some("metal".to_string()));

        let entry = store.get(cabinet).unwrap();
        assert_eq!(entry.part("bezel").unwrap().material.as_deref(), Some("metal"));
        assert!(entry.last_modified >= first);
    }

    #[test]
    fn test_store_remove_drops_empty_cabinets() {
        let cabinet = Path::new("/cabinets/galaga");
        let mut store = OverrideStore::new();
        store.set_part(cabinet, "bezel", PartOverride::cleared());

        assert!(!store.remove_part(cabinet, "left"));
        assert!(store.remove_part(cabinet, "bezel"));
        assert!(store.get(cabinet).is_none());
        assert!(!store.remove_cabinet(cabinet));
        assert!(!store.remove_video(cabinet));
    }

    #[test]
    fn test_store_remove_video_stamps_entry() {
        let cabinet = Path::new("/cabinets/galaga");
        let mut store = OverrideStore::new();
        store.set_part(cabinet, "bezel", PartOverride::cleared());
        store.set_video(cabinet, VideoOverride::default());

        let stale = DateTime::<Utc>::UNIX_EPOCH;
        for entry in store.cabinets.values_mut() {
            entry.last_modified = stale;
        }

        assert!(store.remove_video(cabinet));
        let entry = store.get(cabinet).unwrap();
        assert!(entry.video.is_none());
        assert!(entry.last_modified > stale);
    }

    #[test]
    fn test_part_override_is_empty() {
        assert!(PartOverride::default().is_empty());
        assert!(!PartOverride::cleared().is_empty());
    }
}
