//! Core domain types for cabinetry.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `CabinetDescription` - a decoded `description.yaml`
//! - `FileInventory` - the classified listing of a cabinet folder
//! - `Template` - stock cabinet models and the parts they provide

mod description;
mod inventory;
mod template;

pub use description::{
    ArtSpec, CabinetDescription, CabinetPart, ColorSpec, CrtSpec, ModelSpec, Orientation,
    PartType, VideoSpec,
};
pub use inventory::{FileEntry, FileInventory, FileType};
pub use template::Template;
