//! Check command implementation.
//!
//! Reconciles every discovered cabinet and prints a line per part.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::load_cabinet;
use crate::error::{CabError, Result};
use crate::output::{display_path, plural, Printer};
use crate::overrides::OverrideStore;
use crate::validation::CabinetDetail;

/// Check cabinet folders against their descriptions
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Cabinet folders or collections to check (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Template to check parts against (cabinet, cocktail, driving, lightgun)
    #[arg(long)]
    pub template: Option<String>,

    /// Report parts without artwork as warnings
    #[arg(long)]
    pub warn_missing_art: bool,

    /// Also warn about non-image art, out-of-range colours and parts the
    /// template does not know
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: CheckArgs, overrides: Option<&Path>, printer: &Printer) -> Result<()> {
    let discovery = super::discover_args(&args.paths)?;
    let options = super::reconcile_options(
        &discovery,
        args.template.as_deref(),
        args.warn_missing_art,
        args.strict,
    )?;
    let store = OverrideStore::load(&super::store_path(overrides, discovery.overrides_path()))?;

    if discovery.cabinets.is_empty() {
        printer.warning("Skipping", "no cabinets found");
        return Ok(());
    }

    let mut failed = 0;
    let mut warned = 0;
    for path in &discovery.cabinets {
        printer.status("Checking", &display_path(path));
        let detail = load_cabinet(path, Some(&store), &options);
        print_detail(&detail, printer);

        if detail.status.is_error() {
            failed += 1;
        } else if detail.status.is_warning() {
            warned += 1;
        }
    }

    let total = discovery.cabinets.len();
    if failed > 0 {
        return Err(CabError::Validation {
            message: format!(
                "{} of {} failed",
                failed,
                plural(total, "cabinet", "cabinets")
            ),
            help: Some(
                "Add the missing files or record a correction with `cabinetry override`"
                    .to_string(),
            ),
        });
    }

    let mut message = format!("{} checked", plural(total, "cabinet", "cabinets"));
    if warned > 0 {
        message.push_str(&format!(" ({} with warnings)", warned));
    }
    printer.success("Finished", &message);
    Ok(())
}

/// Print part, video and suggestion lines for one cabinet.
pub fn print_detail(detail: &CabinetDetail, printer: &Printer) {
    if detail.description.is_none() {
        printer.validation(&detail.status, &detail.name);
        return;
    }

    for part in &detail.parts {
        let subject = if part.overridden {
            format!("{} {}", part.part.name, printer.dim("(override)"))
        } else {
            part.part.name.clone()
        };
        printer.validation(&part.status, &subject);
    }

    printer.validation(&detail.video.status, "video");

    for suggestion in &detail.suggestions {
        printer.validation(&suggestion.status, &suggestion.part);
    }
}
