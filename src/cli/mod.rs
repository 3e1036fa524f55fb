pub mod check;
pub mod completions;
pub mod init;
pub mod list;
pub mod overrides;
pub mod show;
pub mod templates;
pub mod watch;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::discovery::{discover, discover_paths, is_cabinet_dir, unknown_template, DiscoveryResult};
use crate::error::Result;
use crate::overrides::OverrideStore;
use crate::types::Template;
use crate::validation::ReconcileOptions;

/// cabinetry - Age of Joy cabinet asset checker
#[derive(Parser, Debug)]
#[command(name = "cabinetry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override store to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub overrides: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check cabinet folders against their descriptions
    Check(check::CheckArgs),

    /// List cabinets with a one-line status each
    List(list::ListArgs),

    /// Show the full detail of one cabinet
    Show(show::ShowArgs),

    /// Initialize a collection (generates cabinetry.yaml)
    Init(init::InitArgs),

    /// Record corrections for a cabinet without editing its description
    Override(overrides::OverrideArgs),

    /// List the stock cabinet templates and their parts
    Templates(templates::TemplatesArgs),

    /// Re-check cabinets whenever their folders change
    Watch(watch::WatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Discover cabinets from command-line paths, or the current directory.
///
/// Run from inside a cabinet folder, the current directory is treated as
/// an explicit path so the enclosing collection's manifest still applies.
pub(crate) fn discover_args(paths: &[PathBuf]) -> Result<DiscoveryResult> {
    if !paths.is_empty() {
        discover_paths(paths)
    } else if is_cabinet_dir(Path::new(".")) {
        discover_paths(&[PathBuf::from(".")])
    } else {
        discover(".")
    }
}

/// Reconcile options from the manifest with command-line flags on top.
pub(crate) fn reconcile_options(
    discovery: &DiscoveryResult,
    template: Option<&str>,
    warn_missing_art: bool,
    strict: bool,
) -> Result<ReconcileOptions> {
    let mut options = discovery.reconcile_options()?;
    if let Some(name) = template {
        options.template = Some(Template::find(name).ok_or_else(|| unknown_template(name))?);
    }
    options.warn_missing_art |= warn_missing_art;
    options.strict |= strict;
    Ok(options)
}

/// Store location: the `--overrides` flag, then the manifest's setting,
/// then the per-user default.
pub(crate) fn store_path(flag: Option<&Path>, configured: Option<PathBuf>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or(configured)
        .unwrap_or_else(OverrideStore::default_path)
}
