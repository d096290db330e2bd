//! `vsselect show` command

use anyhow::{Context, Result};
use serde::Serialize;

use super::Selection;
use crate::cli::ShowArgs;
use vsselect::VersionDescriptor;

/// A descriptor plus the values derived from it.
#[derive(Serialize)]
pub struct DescriptorView<'a> {
    #[serde(flatten)]
    pub descriptor: &'a VersionDescriptor,
    pub project_extension: &'static str,
}

impl<'a> DescriptorView<'a> {
    pub fn new(descriptor: &'a VersionDescriptor) -> Self {
        DescriptorView {
            descriptor,
            project_extension: descriptor.project_extension(),
        }
    }
}

pub fn execute(args: ShowArgs) -> Result<()> {
    let selection = Selection::from_args(&args.selection)?;
    let version = selection.select()?;

    if args.json {
        let json = serde_json::to_string_pretty(&DescriptorView::new(&version))
            .context("failed to serialize version")?;
        println!("{}", json);
        return Ok(());
    }

    println!("{}", version);
    println!();

    match version.path() {
        Some(path) => println!("  Path:              {}", path.display()),
        None => println!("  Path:              not found"),
    }
    println!("  Solution version:  {}", version.solution_version());
    println!("  Project version:   {}", version.project_version());
    println!("  Project extension: {}", version.project_extension());
    println!("  Default toolset:   {}", version.default_toolset().unwrap_or("(none)"));
    println!("  Flat solution:     {}", yes_no(version.flat_solution()));
    println!("  SDK based:         {}", yes_no(version.sdk_based()));

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
