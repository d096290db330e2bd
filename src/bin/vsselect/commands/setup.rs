//! `vsselect setup` command

use anyhow::Result;

use super::Selection;
use crate::cli::SetupArgs;

pub fn execute(args: SetupArgs) -> Result<()> {
    let selection = Selection::from_args(&args.selection)?;
    let version = selection.select()?;

    if version.path().is_none() {
        tracing::warn!("{} is not installed; the setup script will not exist", version);
    }

    let command = version.setup_script(&args.arch, &selection.env)?;
    println!("{}", command);

    Ok(())
}
