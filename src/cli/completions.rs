//! Shell completions generation.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use clap_complete::Shell;

use crate::error::{CabError, Result};

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = <super::Cli as clap::CommandFactory>::command();
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).map_err(|e| CabError::io(path, e))?),
        None => Box::new(io::stdout()),
    };
    clap_complete::generate(args.shell, &mut cmd, "cabinetry", &mut out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cabinetry.bash");

        run(CompletionsArgs {
            shell: Shell::Bash,
            output: Some(path.clone()),
        })
        .unwrap();

        let script = std::fs::read_to_string(&path).unwrap();
        assert!(script.contains("cabinetry"));
    }
}
