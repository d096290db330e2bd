//! `vsselect completions` command

use std::fs::{self, File};
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};

pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();

    let Some(path) = args.output else {
        generate(args.shell, &mut cmd, bin, &mut io::stdout());
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    generate(args.shell, &mut cmd, bin, &mut file);
    file.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!("wrote {} completions to {}", args.shell, path.display());
    Ok(())
}
