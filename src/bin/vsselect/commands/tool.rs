//! `vsselect tool` command

use anyhow::Result;

use super::Selection;
use crate::cli::ToolArgs;

pub fn execute(args: ToolArgs) -> Result<()> {
    let selection = Selection::from_args(&args.selection)?;
    let version = selection.select()?;

    println!("{}", version.tool_path(&args.name).display());

    Ok(())
}
