//! Snapshot of the host environment variables that influence selection.

use std::ffi::OsString;
use std::path::PathBuf;

/// Overrides the requested version token when "auto" is requested.
pub const MSVS_VERSION_VAR: &str = "GYP_MSVS_VERSION";
/// Set by the Windows SDK command prompt.
pub const WINDOWS_SDK_DIR_VAR: &str = "WindowsSDKDir";
/// Windows system root, home of `System32` and `Sysnative`.
pub const WINDIR_VAR: &str = "WINDIR";
/// Architecture of the current process.
pub const PROCESSOR_ARCHITECTURE_VAR: &str = "PROCESSOR_ARCHITECTURE";
/// Native architecture, only set for 32-bit processes on a 64-bit host.
pub const PROCESSOR_ARCHITEW6432_VAR: &str = "PROCESSOR_ARCHITEW6432";
/// Installation root for versions without registry entries.
pub const VS_INSTALL_DIR_VAR: &str = "VS_INSTALL_DIR";

/// The environment variables consulted during selection.
///
/// Library code never reads the process environment directly; callers
/// capture it once with [`HostEnv::from_process`] (or build one by hand in
/// tests) and pass it down. Empty variables are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnv {
    pub msvs_version: Option<String>,
    pub windows_sdk_dir: Option<PathBuf>,
    pub windir: Option<PathBuf>,
    pub processor_architecture: Option<String>,
    pub processor_architew6432: Option<String>,
    pub vs_install_dir: Option<PathBuf>,
}

impl HostEnv {
    /// Capture the relevant variables from the current process.
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let string = |name: &str| non_empty(name).map(|v| v.to_string_lossy().into_owned());
        let path = |name: &str| non_empty(name).map(PathBuf::from);

        HostEnv {
            msvs_version: string(MSVS_VERSION_VAR),
            windows_sdk_dir: path(WINDOWS_SDK_DIR_VAR),
            windir: path(WINDIR_VAR),
            processor_architecture: string(PROCESSOR_ARCHITECTURE_VAR),
            processor_architew6432: string(PROCESSOR_ARCHITEW6432_VAR),
            vs_install_dir: path(VS_INSTALL_DIR_VAR),
        }
    }

    /// Whether the host is 64-bit, regardless of the bitness of this process.
    pub fn is_amd64_host(&self) -> bool {
        [&self.processor_architecture, &self.processor_architew6432]
            .into_iter()
            .any(|arch| arch.as_deref() == Some("AMD64"))
    }
}
