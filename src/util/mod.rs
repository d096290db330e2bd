//! Shared utilities

pub mod config;
pub mod fs;
pub mod process;

pub use config::Config;
pub use process::ProcessBuilder;
