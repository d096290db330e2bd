//! Registry access through `reg.exe`.

use std::io;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use super::{ConfigurationOracle, OracleError};
use crate::core::env::HostEnv;
use crate::util::process::ProcessBuilder;

/// Typed value line in `reg query` output, e.g.
/// `    InstallDir    REG_SZ    C:\VS10\Common7\IDE\`.
static VALUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"REG_\w+\s+([^\r]+)\r\n").unwrap());

/// Extract the data of the first typed value in `reg query` output.
pub fn parse_value(text: &str) -> Option<String> {
    VALUE_LINE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Queries the registry by running `reg.exe`.
///
/// `reg.exe` is launched from `%WINDIR%\Sysnative` first: a 32-bit process
/// on a 64-bit host otherwise gets the redirected 32-bit registry view.
/// Sysnative does not exist for 64-bit processes (or old hosts), in which
/// case `%WINDIR%\System32` is used.
#[derive(Debug, Clone)]
pub struct RegExeOracle {
    windir: PathBuf,
    windows_host: bool,
}

impl RegExeOracle {
    /// Create an oracle for the Windows installation at `windir`.
    pub fn new(windir: impl Into<PathBuf>) -> Self {
        RegExeOracle {
            windir: windir.into(),
            windows_host: cfg!(windows),
        }
    }

    /// Create an oracle using `WINDIR` from the captured environment.
    pub fn from_env(env: &HostEnv) -> Self {
        Self::new(env.windir.clone().unwrap_or_default())
    }

    /// Override host detection.
    ///
    /// On non-Windows hosts every query answers "not found" without running
    /// anything; this allows driving a stand-in `reg.exe` regardless.
    pub fn assume_windows(mut self, windows_host: bool) -> Self {
        self.windows_host = windows_host;
        self
    }

    /// Run `reg query <key> <selector>` and return its stdout, or `None` on
    /// a non-zero exit.
    fn query(&self, key: &str, selector: &[&str]) -> Result<Option<String>, OracleError> {
        if !self.windows_host {
            return Ok(None);
        }

        match self.query_from("Sysnative", key, selector) {
            Err(OracleError::Spawn { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::trace!("Sysnative reg.exe unavailable, falling back to System32");
                self.query_from("System32", key, selector)
            }
            other => other,
        }
    }

    fn query_from(
        &self,
        sysdir: &str,
        key: &str,
        selector: &[&str],
    ) -> Result<Option<String>, OracleError> {
        let cmd = ProcessBuilder::new(self.reg_exe(sysdir))
            .args(["query", key])
            .args(selector.iter().copied());

        tracing::trace!("running {}", cmd.display_command());
        let output = cmd.output().map_err(|source| OracleError::Spawn {
            program: cmd.get_program().to_path_buf(),
            source,
        })?;

        // reg.exe exits with 0 on success and 1 on any failure, including
        // a missing key or value.
        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
    }

    fn reg_exe(&self, sysdir: &str) -> PathBuf {
        self.windir.join(sysdir).join("reg.exe")
    }
}

impl ConfigurationOracle for RegExeOracle {
    fn query_value(&self, key: &str, value: Option<&str>) -> Result<Option<String>, OracleError> {
        let selector = match value {
            Some(value) => vec!["/v", value],
            None => vec!["/ve"],
        };
        Ok(self.query(key, &selector)?.as_deref().and_then(parse_value))
    }

    fn key_exists(&self, key: &str) -> Result<bool, OracleError> {
        Ok(self.query(key, &[])?.is_some())
    }
}
