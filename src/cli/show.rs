//! Show command implementation.
//!
//! Prints everything known about one cabinet, or the detail as JSON.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{load_cabinet, locate_manifest, unknown_template};
use crate::error::{CabError, Result};
use crate::output::{display_path, Printer};
use crate::overrides::OverrideStore;
use crate::types::Template;
use crate::validation::{CabinetDetail, ReconcileOptions};

use super::check::print_detail;

/// Show the full detail of one cabinet
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Cabinet folder
    pub cabinet: PathBuf,

    /// Template to check parts against
    #[arg(long)]
    pub template: Option<String>,

    /// Print the detail as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, overrides: Option<&Path>, printer: &Printer) -> Result<()> {
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

    // The enclosing collection may carry a manifest with a template and store.
    let (root, manifest) = locate_manifest(&cabinet)?.unwrap_or_default();

    let template = match &args.template {
        Some(name) => Some(Template::find(name).ok_or_else(|| unknown_template(name))?),
        None => manifest.resolve_template()?,
    };
    let options = ReconcileOptions {
        warn_missing_art: manifest.warn_missing_art,
        strict: manifest.strict,
        template,
    };

    let store = OverrideStore::load(&super::store_path(overrides, manifest.overrides_path(&root)))?;
    let detail = load_cabinet(&cabinet, Some(&store), &options);

    if args.json {
        let json = serde_json::to_string_pretty(&detail).map_err(|e| CabError::Parse {
            message: format!("Failed to serialize cabinet detail: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    print_summary(&detail, printer);
    print_detail(&detail, printer);
    print_files(&detail, printer);
    Ok(())
}

fn print_summary(detail: &CabinetDetail, printer: &Printer) {
    printer.info("Cabinet", &printer.bold(&detail.name));
    printer.info("Path", &printer.cyan(&display_path(&detail.path)));

    if let Some(desc) = &detail.description {
        let fields = [
            ("Year", desc.year.as_deref()),
            ("Rom", desc.rom.as_deref()),
            ("Style", desc.style.as_deref()),
            ("Material", desc.material.as_deref()),
            ("Model", desc.model_file()),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                printer.info(label, value);
            }
        }
        if let Some(crt) = &desc.crt {
            printer.info("Crt", &crt.orientation.to_string());
        }
    }

    if let Some(template) = &detail.template {
        printer.info("Template", template);
    }
    printer.info("Status", &detail.summary());
}

fn print_files(detail: &CabinetDetail, printer: &Printer) {
    for entry in detail.files.iter() {
        let owner = match &entry.assigned_to {
            Some(owner) => owner.clone(),
            None => printer.dim("unassigned"),
        };
        printer.info(
            entry.file_type.name(),
            &format!("{} {} {}", entry.filename, printer.dim("->"), owner),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_show_requires_directory() {
        let args = ShowArgs {
            cabinet: PathBuf::from("/nonexistent/galaga"),
            template: None,
            json: false,
        };
        assert!(run(args, Some(Path::new("/nonexistent/o.json")), &Printer::plain()).is_err());
    }

    #[test]
    fn test_show_json() {
        let dir = tempdir().unwrap();
        let cab = dir.path().join("galaga");
        fs::create_dir_all(&cab).unwrap();
        fs::write(cab.join("description.yaml"), "name: galaga\n").unwrap();

        let args = ShowArgs {
            cabinet: cab,
            template: None,
            json: true,
        };
        run(args, Some(&dir.path().join("o.json")), &Printer::plain()).unwrap();
    }
}
