//! Visual Studio version selection.
//!
//! This is the entry point used by project generators: turn a requested
//! version token into the descriptor of the version to generate for.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::catalog::{VersionCatalog, AUTO_TOKEN, EXPRESS_SUFFIX};
use crate::core::descriptor::VersionDescriptor;
use crate::core::env::HostEnv;
use crate::detect::VersionDetector;
use crate::registry::{ConfigurationOracle, OracleError};

/// Error selecting a Visual Studio version.
#[derive(Debug, Error, Diagnostic)]
pub enum SelectError {
    #[error("unknown Visual Studio version `{token}`")]
    #[diagnostic(
        code(vsselect::select::unknown_version),
        help("supported versions: {supported}")
    )]
    UnknownVersion { token: String, supported: String },

    #[error("no catalog entry for Visual Studio `{short_name}`")]
    #[diagnostic(code(vsselect::select::missing_profile))]
    MissingProfile { short_name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] OracleError),
}

/// Apply the `GYP_MSVS_VERSION` override to an automatic request.
pub fn effective_token(requested: &str, env: &HostEnv) -> String {
    match (requested, env.msvs_version.as_deref()) {
        (AUTO_TOKEN, Some(from_env)) => from_env.to_string(),
        _ => requested.to_string(),
    }
}

/// Detect every installed version matching `requested`, in preference order.
///
/// The list may contain the same install more than once; see
/// [`VersionDetector::detect`].
pub fn detect_versions<O: ConfigurationOracle + ?Sized>(
    requested: &str,
    env: &HostEnv,
    oracle: &O,
    catalog: &VersionCatalog,
) -> Result<Vec<VersionDescriptor>, SelectError> {
    let token = effective_token(requested, env);
    detect_for_token(&token, env, oracle, catalog)
}

/// Select the Visual Studio version to generate projects for.
///
/// `requested` is a token such as "2010", "2012e" or "auto". The first
/// detected install wins. When nothing is installed a descriptor without an
/// installation path is returned: the catalog's fallback version for "auto",
/// otherwise the requested version itself.
pub fn select_version<O: ConfigurationOracle + ?Sized>(
    requested: &str,
    env: &HostEnv,
    oracle: &O,
    catalog: &VersionCatalog,
) -> Result<VersionDescriptor, SelectError> {
    let token = effective_token(requested, env);
    let detected = detect_for_token(&token, env, oracle, catalog)?;

    if let Some(selected) = detected.into_iter().next() {
        tracing::info!("Selected {}", selected);
        return Ok(selected);
    }

    let short_name = if token == AUTO_TOKEN {
        catalog.fallback()
    } else {
        token.as_str()
    };

    tracing::warn!(
        "No Visual Studio installation found for `{}`, assuming {}",
        token,
        short_name
    );

    catalog
        .create(short_name, None, false)
        .ok_or_else(|| SelectError::MissingProfile {
            short_name: short_name.to_string(),
        })
}

fn detect_for_token<O: ConfigurationOracle + ?Sized>(
    token: &str,
    env: &HostEnv,
    oracle: &O,
    catalog: &VersionCatalog,
) -> Result<Vec<VersionDescriptor>, SelectError> {
    let versions = catalog
        .versions_for(token)
        .ok_or_else(|| SelectError::UnknownVersion {
            token: token.to_string(),
            supported: catalog.tokens().collect::<Vec<_>>().join(", "),
        })?;
    let force_express = token.ends_with(EXPRESS_SUFFIX);

    tracing::debug!(
        "probing Visual Studio versions {:?} for `{}`{}",
        versions,
        token,
        if force_express { " (Express)" } else { "" }
    );

    let detector = VersionDetector::new(oracle, catalog)
        .with_install_dir(env.vs_install_dir.as_deref());
    Ok(detector.detect(versions, force_express)?)
}
