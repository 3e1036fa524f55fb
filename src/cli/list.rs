//! List command implementation.
//!
//! Discovers cabinets and prints one status line for each.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::load_cabinet;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::overrides::OverrideStore;
use crate::registry::DetailCache;
use crate::validation::{CabinetDetail, ValidationStatus};

/// List cabinets with a one-line status each
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Cabinet folders or collections to list (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Also list files not assigned to any part
    #[arg(long)]
    pub unassigned: bool,
}

pub fn run(args: ListArgs, overrides: Option<&Path>, printer: &Printer) -> Result<()> {
    let discovery = super::discover_args(&args.paths)?;
    let options = super::reconcile_options(&discovery, None, false, false)?;
    let store = OverrideStore::load(&super::store_path(overrides, discovery.overrides_path()))?;

    let mut cache = DetailCache::new();
    for path in &discovery.cabinets {
        let detail = cache.get_or_load(path, |p| load_cabinet(p, Some(&store), &options));
        print_row(detail, printer);

        if args.unassigned {
            let loose: Vec<&str> = detail
                .files
                .unassigned()
                .map(|e| e.filename.as_str())
                .filter(|f| *f != crate::discovery::DESCRIPTION_FILENAME)
                .collect();
            if !loose.is_empty() {
                printer.info("Unassigned", &printer.dim(&loose.join(", ")));
            }
        }
    }

    let ready = cache.details().filter(|d| d.is_ready()).count();
    printer.info(
        "Listed",
        &format!(
            "{} ({} ready)",
            plural(cache.len(), "cabinet", "cabinets"),
            ready
        ),
    );
    Ok(())
}

fn print_row(detail: &CabinetDetail, printer: &Printer) {
    let subject = format!("{} {}", detail.name, printer.cyan(&display_path(&detail.path)));
    match &detail.status {
        ValidationStatus::Valid => printer.success("Ready", &subject),
        status => printer.validation(status, &subject),
    }
}
