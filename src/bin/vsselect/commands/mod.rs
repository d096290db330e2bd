//! Command implementations

pub mod completions;
pub mod detect;
pub mod setup;
pub mod show;
pub mod tool;

use anyhow::{Context, Result};

use crate::cli::SelectionArgs;
use vsselect::core::AUTO_TOKEN;
use vsselect::util::config::{global_config_path, load_config, project_config_path};
use vsselect::{
    detect_versions, select_version, ConfigurationOracle, HostEnv, MemoryOracle, RegExeOracle,
    VersionCatalog, VersionDescriptor,
};

/// Everything a command needs to select a version.
pub struct Selection {
    pub token: String,
    pub env: HostEnv,
    pub oracle: Box<dyn ConfigurationOracle>,
    pub catalog: VersionCatalog,
}

impl Selection {
    /// Combine command-line options, config files and the environment.
    ///
    /// The version token comes from `--msvs-version`, then the config file,
    /// then defaults to "auto". `VS_INSTALL_DIR` beats the config file's
    /// `install_dir`.
    pub fn from_args(args: &SelectionArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(&cwd));

        let mut env = HostEnv::from_process();
        if env.vs_install_dir.is_none() {
            env.vs_install_dir = config.msvs.install_dir;
        }

        let token = args
            .msvs_version
            .clone()
            .or(config.msvs.version)
            .unwrap_or_else(|| AUTO_TOKEN.to_string());

        let oracle: Box<dyn ConfigurationOracle> = match &args.registry {
            Some(path) => {
                tracing::debug!("using registry file {}", path.display());
                Box::new(MemoryOracle::load(path)?)
            }
            None => Box::new(RegExeOracle::from_env(&env)),
        };

        Ok(Selection {
            token,
            env,
            oracle,
            catalog: VersionCatalog::builtin(),
        })
    }

    /// The selected version (possibly a placeholder).
    pub fn select(&self) -> Result<VersionDescriptor> {
        Ok(select_version(
            &self.token,
            &self.env,
            &*self.oracle,
            &self.catalog,
        )?)
    }

    /// Every detected installation, without placeholder.
    pub fn detect_all(&self) -> Result<Vec<VersionDescriptor>> {
        Ok(detect_versions(
            &self.token,
            &self.env,
            &*self.oracle,
            &self.catalog,
        )?)
    }
}
