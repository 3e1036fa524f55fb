//! Templates command implementation.

use clap::Args;

use crate::error::{CabError, Result};
use crate::output::{plural, Printer};
use crate::types::Template;

/// List the stock cabinet templates and their parts
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Only show this template
    pub name: Option<String>,

    /// Print templates as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TemplatesArgs, printer: &Printer) -> Result<()> {
    let templates: Vec<&Template> = match &args.name {
        Some(name) => vec![Template::find(name)
            .ok_or_else(|| crate::discovery::unknown_template(name))?],
        None => Template::all().iter().collect(),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&templates).map_err(|e| CabError::Parse {
            message: format!("Failed to serialize templates: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    for template in templates {
        printer.info(
            template.name,
            &format!(
                "{} {}",
                template.description,
                printer.dim(&format!("({})", plural(template.parts.len(), "part", "parts")))
            ),
        );
        printer.info("", &printer.dim(&template.parts.join(", ")));
    }

    Ok(())
}
