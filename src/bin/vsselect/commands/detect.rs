//! `vsselect detect` command

use anyhow::{Context, Result};

use super::show::DescriptorView;
use super::Selection;
use crate::cli::DetectArgs;

pub fn execute(args: DetectArgs) -> Result<()> {
    let selection = Selection::from_args(&args.selection)?;
    let versions = selection.detect_all()?;

    if args.json {
        let views: Vec<_> = versions.iter().map(DescriptorView::new).collect();
        let json = serde_json::to_string_pretty(&views).context("failed to serialize versions")?;
        println!("{}", json);
        return Ok(());
    }

    if versions.is_empty() {
        eprintln!("No Visual Studio installation found");
        return Ok(());
    }

    for version in &versions {
        let path = version
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let sdk = if version.sdk_based() { "  (SDK)" } else { "" };
        println!("{:<6} {:<20} {}{}", version.short_name(), version.description(), path, sdk);
    }

    Ok(())
}
