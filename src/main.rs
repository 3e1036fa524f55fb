use clap::Parser;
use miette::Result;

use cabinetry::cli::{Cli, Commands};
use cabinetry::output::Printer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();
    let overrides = cli.overrides.as_deref();

    match cli.command {
        Commands::Check(args) => cabinetry::cli::check::run(args, overrides, &printer)?,
        Commands::List(args) => cabinetry::cli::list::run(args, overrides, &printer)?,
        Commands::Show(args) => cabinetry::cli::show::run(args, overrides, &printer)?,
        Commands::Init(args) => cabinetry::cli::init::run(args, &printer)?,
        Commands::Override(args) => cabinetry::cli::overrides::run(args, overrides, &printer)?,
        Commands::Templates(args) => cabinetry::cli::templates::run(args, &printer)?,
        Commands::Watch(args) => cabinetry::cli::watch::run(args, overrides, &printer)?,
        Commands::Completions(args) => cabinetry::cli::completions::run(args)?,
    }

    Ok(())
}
