//! cabinetry - Age of Joy cabinet asset checker
//!
//! A library for reading arcade cabinet `description.yaml` files, checking
//! them against the artwork in their folders, and keeping user corrections
//! in an override store.

pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod overrides;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use discovery::{
    discover, discover_paths, load_cabinet, load_description, locate_manifest, scan_inventory,
    DiscoveryResult, Manifest,
};
pub use error::{CabError, Result};
pub use overrides::{
    apply_overrides, CabinetOverrides, OverrideStore, PartOverride, VideoOverride,
};
pub use parser::{decode, decode_named, tokenize, Token, TokenKind};
pub use registry::DetailCache;
pub use types::{
    ArtSpec, CabinetDescription, CabinetPart, ColorSpec, CrtSpec, FileEntry, FileInventory,
    FileType, ModelSpec, Orientation, PartType, Template, VideoSpec,
};
pub use validation::{
    reconcile, CabinetDetail, PartDetail, ReconcileOptions, TemplateSuggestion, ValidationStatus,
    VideoDetail,
};
