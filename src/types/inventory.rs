//! File inventory types.
//!
//! An inventory is the classified listing of a single cabinet directory.
//! It is rebuilt on every scan; assignment flags are derived during
//! reconciliation and never persisted.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Classification of a file by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Model,
    Video,
    Descriptor,
    Other,
}

impl FileType {
    /// Classify a filename by its lower-cased extension.
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png" | "jpg" | "jpeg" | "gif" | "bmp" | "tiff" | "webp") => FileType::Image,
            Some("glb" | "gltf" | "obj" | "fbx") => FileType::Model,
            Some("mp4" | "mov" | "avi" | "webm") => FileType::Video,
            Some("yaml" | "yml") => FileType::Descriptor,
            _ => FileType::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Model => "model",
            FileType::Video => "video",
            FileType::Descriptor => "descriptor",
            FileType::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One entry discovered in a cabinet directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    pub full_path: PathBuf,
    pub file_type: FileType,
    pub is_assigned: bool,
    /// The part name, or `model` / `video`, that claimed this file.
    pub assigned_to: Option<String>,
}

impl FileEntry {
    pub fn new(filename: impl Into<String>, full_path: impl Into<PathBuf>) -> Self {
        let filename = filename.into();
        let file_type = FileType::from_filename(&filename);
        Self {
            filename,
            full_path: full_path.into(),
            file_type,
            is_assigned: false,
            assigned_to: None,
        }
    }

    /// Filename without its extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.filename)
    }

    /// Mark the entry as claimed. The first claim wins.
    pub fn assign(&mut self, owner: &str) {
        if !self.is_assigned {
            self.is_assigned = true;
            self.assigned_to = Some(owner.to_string());
        }
    }
}

/// Sorted listing of a cabinet directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileInventory {
    entries: Vec<FileEntry>,
}

impl FileInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory, sorting entries by filename.
    pub fn from_entries(mut entries: Vec<FileEntry>) -> Self {
        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        entries.dedup_by(|a, b| a.filename == b.filename);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.get(filename).is_some()
    }

    pub fn get(&self, filename: &str) -> Option<&FileEntry> {
        self.entries
            .binary_search_by(|e| e.filename.as_str().cmp(filename))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn get_mut(&mut self, filename: &str) -> Option<&mut FileEntry> {
        self.entries
            .binary_search_by(|e| e.filename.as_str().cmp(filename))
            .ok()
            .map(move |i| &mut self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    /// Entries of one file type.
    pub fn of_type(&self, file_type: FileType) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(move |e| e.file_type == file_type)
    }

    /// Entries nothing has claimed yet.
    pub fn unassigned(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(|e| !e.is_assigned)
    }

    /// Whether the inventory lists a `description.yaml`.
    pub fn has_description(&self) -> bool {
        self.contains(crate::discovery::DESCRIPTION_FILENAME)
    }

    pub fn into_entries(self) -> Vec<FileEntry> {
        self.entries
    }
}
