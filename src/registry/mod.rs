//! Access to the Windows registry.
//!
//! Detection only needs two questions answered: "what is this value?" and
//! "does this key exist?". [`ConfigurationOracle`] captures exactly that, so
//! the detector never touches an OS API directly. Two implementations exist:
//! - [`RegExeOracle`]: shells out to `reg.exe`
//! - [`MemoryOracle`]: an in-memory registry for tests and dry runs
//!
//! A missing key or value is an ordinary answer (`Ok(None)`); only a
//! failure to ask the question at all is an [`OracleError`].

mod memory;
mod reg_exe;

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub use memory::MemoryOracle;
pub use reg_exe::{parse_value, RegExeOracle};

/// Infrastructure failure while querying the registry.
#[derive(Debug, Error, Diagnostic)]
pub enum OracleError {
    #[error("failed to launch registry helper `{}`", .program.display())]
    #[diagnostic(
        code(vsselect::registry::spawn),
        help("check that WINDIR points at a Windows installation")
    )]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read-only view of a hierarchical configuration store.
pub trait ConfigurationOracle {
    /// Read `value` under `key`, or the key's `(Default)` data when `value`
    /// is `None`.
    ///
    /// Returns `Ok(None)` when the key or value is absent or unreadable.
    fn query_value(&self, key: &str, value: Option<&str>) -> Result<Option<String>, OracleError>;

    /// Whether `key` is present, whether or not it holds any values.
    fn key_exists(&self, key: &str) -> Result<bool, OracleError>;
}
