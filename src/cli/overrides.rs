//! Override command implementation.
//!
//! Edits the override store for one cabinet. The description file is never
//! touched.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::discovery::{load_description, locate_manifest};
use crate::error::{CabError, Result};
use crate::output::{display_path, plural, Printer};
use crate::overrides::{OverrideStore, VideoOverride};

/// Record corrections for a cabinet without editing its description
#[derive(Args, Debug)]
pub struct OverrideArgs {
    /// Cabinet folder
    pub cabinet: PathBuf,

    #[command(subcommand)]
    pub action: OverrideAction,
}

#[derive(Subcommand, Debug)]
pub enum OverrideAction {
    /// Set part fields (only the given fields change)
    Set {
        /// Part name
        part: String,

        /// Replacement art file, relative to the cabinet folder
        #[arg(long)]
        art: Option<String>,

        #[arg(long)]
        material: Option<String>,

        /// Rotation in degrees
        #[arg(long, allow_hyphen_values = true)]
        rotate: Option<i32>,

        #[arg(long)]
        invert_x: Option<bool>,

        #[arg(long)]
        invert_y: Option<bool>,
    },

    /// Remove a part's texture
    ClearArt {
        /// Part name
        part: String,
    },

    /// Drop a part's override, or every override for the cabinet
    Remove {
        /// Part name (all overrides when omitted)
        part: Option<String>,
    },

    /// Set, clear or drop the video override
    Video {
        /// Replacement video file, relative to the cabinet folder
        #[arg(long, conflicts_with_all = ["clear", "remove"])]
        file: Option<String>,

        /// Remove the video
        #[arg(long)]
        clear: bool,

        /// Drop the video override
        #[arg(long, conflicts_with = "clear")]
        remove: bool,

        #[arg(long)]
        invert_x: Option<bool>,

        #[arg(long)]
        invert_y: Option<bool>,
    },

    /// Show the overrides recorded for the cabinet
    List,
}

pub fn run(args: OverrideArgs, overrides: Option<&Path>, printer: &Printer) -> Result<()> {
    if !args.cabinet.is_dir() {
        return Err(CabError::Io {
            path: args.cabinet.clone(),
            message: "Not a directory".to_string(),
        });
    }

    let cabinet = args
        .cabinet
        .canonicalize()
        .map_err(|e| CabError::io(&args.cabinet, e))?;
    let configured = locate_manifest(&cabinet)?.and_then(|(root, m)| m.overrides_path(&root));
    let path = super::store_path(overrides, configured);
    let mut store = OverrideStore::load(&path)?;
    let cabinet = cabinet.as_path();
    let shown = display_path(cabinet);

    match args.action {
        OverrideAction::Set {
            part,
            art,
            material,
            rotate,
            invert_x,
            invert_y,
        } => {
            if art.is_none()
                && material.is_none()
                && rotate.is_none()
                && invert_x.is_none()
                && invert_y.is_none()
            {
                return Err(CabError::Validation {
                    message: "Nothing to set".to_string(),
                    help: Some(
                        "Pass --art, --material, --rotate, --invert-x or --invert-y".to_string(),
                    ),
                });
            }
            warn_unknown_part(cabinet, &part, printer);
            if let Some(file) = &art {
                if !cabinet.join(file).exists() {
                    printer.warning("Missing", &format!("{} is not in {}", file, shown));
                }
            }

            store.update_part(cabinet, &part, |o| {
                if art.is_some() {
                    o.art_file = art;
                    o.is_cleared = false;
                }
                if material.is_some() {
                    o.material = material;
                }
                if rotate.is_some() {
                    o.rotate = rotate;
                }
                if invert_x.is_some() {
                    o.invert_x = invert_x;
                }
                if invert_y.is_some() {
                    o.invert_y = invert_y;
                }
            });
            store.save(&path)?;
            printer.success("Updated", &format!("{} in {}", part, shown));
        }

        OverrideAction::ClearArt { part } => {
            warn_unknown_part(cabinet, &part, printer);
            store.clear_part_art(cabinet, &part);
            store.save(&path)?;
            printer.success("Cleared", &format!("{} art in {}", part, shown));
        }

        OverrideAction::Remove { part: Some(part) } => {
            if store.remove_part(cabinet, &part) {
                store.save(&path)?;
                printer.success("Removed", &format!("{} override in {}", part, shown));
            } else {
                printer.warning("Skipping", &format!("no override for {} in {}", part, shown));
            }
        }

        OverrideAction::Remove { part: None } => {
            if store.remove_cabinet(cabinet) {
                store.save(&path)?;
                printer.success("Removed", &format!("all overrides for {}", shown));
            } else {
                printer.warning("Skipping", &format!("no overrides for {}", shown));
            }
        }

        OverrideAction::Video {
            file,
            clear,
            remove,
            invert_x,
            invert_y,
        } => {
            if remove {
                if store.remove_video(cabinet) {
                    store.save(&path)?;
                    printer.success("Removed", &format!("video override for {}", shown));
                } else {
                    printer.warning("Skipping", &format!("no video override for {}", shown));
                }
                return Ok(());
            }

            let video = VideoOverride {
                file,
                invert_x,
                invert_y,
                is_cleared: clear,
            };
            if video == VideoOverride::default() {
                return Err(CabError::Validation {
                    message: "Nothing to set".to_string(),
                    help: Some("Pass --file, --clear, --remove or an --invert flag".to_string()),
                });
            }
            store.set_video(cabinet, video);
            store.save(&path)?;
            printer.success("Updated", &format!("video for {}", shown));
        }

        OverrideAction::List => list(&store, cabinet, printer),
    }

    Ok(())
}

fn list(store: &OverrideStore, cabinet: &Path, printer: &Printer) {
    let Some(overrides) = store.get(cabinet) else {
        printer.info("Overrides", &format!("none for {}", display_path(cabinet)));
        return;
    };

    printer.info(
        "Overrides",
        &format!(
            "{} for {} {}",
            plural(overrides.parts.len(), "part", "parts"),
            display_path(cabinet),
            printer.dim(&format!("(modified {})", overrides.last_modified.format("%Y-%m-%d %H:%M"))),
        ),
    );

    for (part, o) in &overrides.parts {
        let mut fields = Vec::new();
        if o.is_cleared {
            fields.push("art cleared".to_string());
        } else if let Some(file) = &o.art_file {
            fields.push(format!("art {}", file));
        }
        if let Some(material) = &o.material {
            fields.push(format!("material {}", material));
        }
        if let Some(rotate) = o.rotate {
            fields.push(format!("rotate {}", rotate));
        }
        if let Some(x) = o.invert_x {
            fields.push(format!("invert-x {}", x));
        }
        if let Some(y) = o.invert_y {
            fields.push(format!("invert-y {}", y));
        }
        printer.info(part, &fields.join(", "));
    }

    if let Some(video) = &overrides.video {
        let text = match (&video.file, video.is_cleared) {
            (_, true) => "cleared".to_string(),
            (Some(file), false) => file.clone(),
            (None, false) => printer.dim("flips only"),
        };
        printer.info("video", &text);
    }
}

/// Overrides for parts the description lacks are ignored at reconcile time.
fn warn_unknown_part(cabinet: &Path, part: &str, printer: &Printer) {
    if let Ok(description) = load_description(cabinet) {
        if description.part(part).is_none() {
            printer.warning(
                "Unknown",
                &format!("{} has no part named {}", description.name, part),
            );
        }
    }
}
