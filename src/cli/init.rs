//! Init command implementation.
//!
//! Generates a `cabinetry.yaml` manifest from the cabinets found under a
//! collection root.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, unknown_template, Manifest, MANIFEST_FILENAME};
use crate::error::{CabError, Result};
use crate::output::{display_path, plural, Printer};
use crate::types::Template;

/// Initialize a collection by generating a cabinetry.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Collection directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Template every cabinet is checked against
    #[arg(long)]
    pub template: Option<String>,

    /// Overwrite existing cabinetry.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(CabError::Validation {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    if let Some(name) = &args.template {
        Template::find(name).ok_or_else(|| unknown_template(name))?;
    }

    printer.status("Scanning", &display_path(&args.path));
    let discovery = discover(&args.path)?;

    // Cabinets are grouped by the folder that holds them.
    let mut source_dirs = BTreeSet::new();
    for cabinet in &discovery.cabinets {
        let Some(parent) = cabinet.parent() else {
            continue;
        };
        let relative = parent.strip_prefix(&discovery.root).unwrap_or(parent);
        let dir = if relative == Path::new("") {
            ".".to_string()
        } else {
            format!("{}/", relative.display())
        };
        source_dirs.insert(dir);
    }

    let only_root = source_dirs.len() == 1 && source_dirs.contains(".");
    let manifest = Manifest {
        sources: if only_root {
            Vec::new()
        } else {
            source_dirs.iter().cloned().collect()
        },
        template: args.template.as_ref().map(|t| t.to_ascii_lowercase()),
        ..Manifest::default()
    };
    let yaml = serde_yaml::to_string(&manifest).map_err(|e| CabError::Parse {
        message: format!("Failed to serialize manifest: {}", e),
        help: None,
    })?;

    fs::write(&manifest_path, &yaml).map_err(|e| CabError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    if !source_dirs.is_empty() {
        let dirs: Vec<&str> = source_dirs.iter().map(|s| s.as_str()).collect();
        printer.info("Discovered", &dirs.join(", "));
    }

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(discovery.cabinets.len(), "cabinet", "cabinets")
        ),
    );

    Ok(())
}
