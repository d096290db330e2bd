//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// vsselect - Find the Visual Studio version to generate projects for
#[derive(Parser)]
#[command(name = "vsselect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the selected Visual Studio version
    Show(ShowArgs),

    /// List every detected installation, in preference order
    Detect(DetectArgs),

    /// Print the command that sets up a build environment
    Setup(SetupArgs),

    /// Print the path of a compiler tool
    Tool(ToolArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that selects a version.
#[derive(Args)]
pub struct SelectionArgs {
    /// Version to select (auto, 2005, 2005e, 2008, 2008e, 2010, 2010e,
    /// 2012, 2012e, 2017)
    #[arg(long = "msvs-version", value_name = "VERSION")]
    pub msvs_version: Option<String>,

    /// Read registry entries from a TOML file instead of the system registry
    #[arg(long, value_name = "FILE")]
    pub registry: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DetectArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SetupArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Target architecture (x86 or x64)
    #[arg(long, default_value = "x64")]
    pub arch: String,
}

#[derive(Args)]
pub struct ToolArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Tool executable name (e.g. cl.exe)
    pub name: String,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
