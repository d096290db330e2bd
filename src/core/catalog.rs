//! Known Visual Studio versions and the selection policy.
//!
//! Everything here is immutable data. The built-in tables are exposed through
//! [`VersionCatalog::builtin`] and passed explicitly to the detector and
//! selector, so tests can substitute their own.

use std::path::Path;

use crate::core::descriptor::VersionDescriptor;
use crate::util::fs::normalize_path;

/// Token that asks for automatic selection.
pub const AUTO_TOKEN: &str = "auto";

/// Suffix marking an Express edition short name (e.g. "2010e").
pub const EXPRESS_SUFFIX: &str = "e";

/// Construction parameters for one descriptor short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionProfile {
    pub short_name: &'static str,
    pub description: &'static str,
    pub solution_version: &'static str,
    pub project_version: &'static str,
    pub flat_solution: bool,
    pub uses_vcxproj: bool,
    pub default_toolset: Option<&'static str>,
}

const PROFILES: &[VersionProfile] = &[
    VersionProfile {
        short_name: "2017",
        description: "Visual Studio 2017",
        solution_version: "12.0",
        project_version: "14.0",
        flat_solution: false,
        uses_vcxproj: true,
        default_toolset: Some("v141"),
    },
    VersionProfile {
        short_name: "2012",
        description: "Visual Studio 2012",
        solution_version: "12.00",
        project_version: "4.0",
        flat_solution: false,
        uses_vcxproj: true,
        default_toolset: Some("v110"),
    },
    VersionProfile {
        short_name: "2012e",
        description: "Visual Studio 2012",
        solution_version: "12.00",
        project_version: "4.0",
        flat_solution: true,
        uses_vcxproj: true,
        default_toolset: Some("v110"),
    },
    VersionProfile {
        short_name: "2010",
        description: "Visual Studio 2010",
        solution_version: "11.00",
        project_version: "4.0",
        flat_solution: false,
        uses_vcxproj: true,
        default_toolset: None,
    },
    VersionProfile {
        short_name: "2010e",
        description: "Visual Studio 2010",
        solution_version: "11.00",
        project_version: "4.0",
        flat_solution: true,
        uses_vcxproj: true,
        default_toolset: None,
    },
    VersionProfile {
        short_name: "2008",
        description: "Visual Studio 2008",
        solution_version: "10.00",
        project_version: "9.00",
        flat_solution: false,
        uses_vcxproj: false,
        default_toolset: None,
    },
    VersionProfile {
        short_name: "2008e",
        description: "Visual Studio 2008",
        solution_version: "10.00",
        project_version: "9.00",
        flat_solution: true,
        uses_vcxproj: false,
        default_toolset: None,
    },
    VersionProfile {
        short_name: "2005",
        description: "Visual Studio 2005",
        solution_version: "9.00",
        project_version: "8.00",
        flat_solution: false,
        uses_vcxproj: false,
        default_toolset: None,
    },
    VersionProfile {
        short_name: "2005e",
        description: "Visual Studio 2005",
        solution_version: "9.00",
        project_version: "8.00",
        flat_solution: true,
        uses_vcxproj: false,
        default_toolset: None,
    },
];

/// Internal version number to product year.
const YEARS: &[(&str, &str)] = &[
    ("8.0", "2005"),
    ("9.0", "2008"),
    ("10.0", "2010"),
    ("11.0", "2012"),
    ("14.0", "2015"),
    ("15.0", "2017"),
];

/// Requested token to the internal versions probed, in preference order.
const POLICY: &[(&str, &[&str])] = &[
    (AUTO_TOKEN, &["10.0", "9.0", "8.0", "11.0", "12.0"]),
    ("2005", &["8.0"]),
    ("2005e", &["8.0"]),
    ("2008", &["9.0"]),
    ("2008e", &["9.0"]),
    ("2010", &["10.0"]),
    ("2010e", &["10.0"]),
    ("2012", &["11.0"]),
    ("2012e", &["11.0"]),
    ("2017", &["15.0"]),
];

/// Versions that leave no registry trace, with their default IDE directory.
const REGISTRYLESS: &[(&str, &str)] = &[(
    "15.0",
    r"C:\Program Files (x86)\Microsoft Visual Studio\2017\Professional\Common7\IDE",
)];

/// Immutable tables driving detection and selection.
#[derive(Debug, Clone, Copy)]
pub struct VersionCatalog {
    profiles: &'static [VersionProfile],
    years: &'static [(&'static str, &'static str)],
    policy: &'static [(&'static str, &'static [&'static str])],
    registryless: &'static [(&'static str, &'static str)],
    fallback: &'static str,
}

impl VersionCatalog {
    /// The catalog of Visual Studio 2005 through 2017.
    pub const fn builtin() -> Self {
        VersionCatalog {
            profiles: PROFILES,
            years: YEARS,
            policy: POLICY,
            registryless: REGISTRYLESS,
            fallback: "2005",
        }
    }

    /// Build a catalog from custom tables.
    pub const fn new(
        profiles: &'static [VersionProfile],
        years: &'static [(&'static str, &'static str)],
        policy: &'static [(&'static str, &'static [&'static str])],
        registryless: &'static [(&'static str, &'static str)],
        fallback: &'static str,
    ) -> Self {
        VersionCatalog {
            profiles,
            years,
            policy,
            registryless,
            fallback,
        }
    }

    /// Product year for an internal version number ("10.0" -> "2010").
    pub fn year_for(&self, version: &str) -> Option<&'static str> {
        lookup(self.years, version)
    }

    /// Internal versions to probe for a requested token.
    pub fn versions_for(&self, token: &str) -> Option<&'static [&'static str]> {
        lookup(self.policy, token)
    }

    /// All tokens accepted by [`versions_for`](Self::versions_for).
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.policy.iter().map(|(token, _)| *token)
    }

    /// Default IDE directory for a version without registry entries.
    pub fn registryless_ide_dir(&self, version: &str) -> Option<&'static str> {
        lookup(self.registryless, version)
    }

    /// Short name assumed when automatic selection finds nothing.
    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Construction parameters for a short name.
    pub fn profile(&self, short_name: &str) -> Option<&'static VersionProfile> {
        self.profiles.iter().find(|p| p.short_name == short_name)
    }

    /// Create a descriptor for `short_name` installed at `path`.
    ///
    /// The path is normalized. Returns `None` for unknown short names.
    pub fn create(
        &self,
        short_name: &str,
        path: Option<&Path>,
        sdk_based: bool,
    ) -> Option<VersionDescriptor> {
        let profile = self.profile(short_name)?;
        Some(VersionDescriptor::new(
            profile.short_name,
            profile.description,
            profile.solution_version,
            profile.project_version,
            profile.flat_solution,
            profile.uses_vcxproj,
            path.map(normalize_path),
            sdk_based,
            profile.default_toolset.map(str::to_string),
        ))
    }
}

impl Default for VersionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn lookup<V: Copy>(table: &[(&'static str, V)], key: &str) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
