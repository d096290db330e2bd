//! Detection of installed Visual Studio versions.
//!
//! Installs are found through the registry plus a quick check for the IDE
//! executable, since the registry alone cannot tell a full edition from
//! an Express one:
//! - `devenv.exe` marks a full edition (e.g. "2010")
//! - `vcexpress.exe` marks an Express edition (e.g. "2010e")
//!
//! A compiler-only install (Windows SDK) has no IDE keys at all and is found
//! through the side-by-side `SxS\VC7` key instead. Visual Studio 2017 writes
//! no usable registry entries, so it is found by looking in its install
//! directory.

use std::path::{Path, PathBuf};

use crate::core::catalog::{VersionCatalog, EXPRESS_SUFFIX};
use crate::core::descriptor::VersionDescriptor;
use crate::registry::{ConfigurationOracle, OracleError};

const FULL_EXE: &str = "devenv.exe";
const EXPRESS_EXE: &str = "vcexpress.exe";
const INSTALL_DIR_VALUE: &str = "InstallDir";

/// Compiler-only install locations, one value per internal version.
const SIDE_BY_SIDE_KEYS: [&str; 2] = [
    r"HKLM\Software\Microsoft\VisualStudio\SxS\VC7",
    r"HKLM\Software\Wow6432Node\Microsoft\VisualStudio\SxS\VC7",
];

/// IDE install keys for `version`: full and Express, each in the native and
/// the WOW64-redirected view.
fn ide_keys(version: &str) -> [String; 4] {
    [
        format!(r"HKLM\Software\Microsoft\VisualStudio\{version}"),
        format!(r"HKLM\Software\Wow6432Node\Microsoft\VisualStudio\{version}"),
        format!(r"HKLM\Software\Microsoft\VCExpress\{version}"),
        format!(r"HKLM\Software\Wow6432Node\Microsoft\VCExpress\{version}"),
    ]
}

/// Finds installed Visual Studio versions.
pub struct VersionDetector<'a, O: ConfigurationOracle + ?Sized> {
    oracle: &'a O,
    catalog: &'a VersionCatalog,
    install_dir: Option<&'a Path>,
}

impl<'a, O: ConfigurationOracle + ?Sized> VersionDetector<'a, O> {
    pub fn new(oracle: &'a O, catalog: &'a VersionCatalog) -> Self {
        VersionDetector {
            oracle,
            catalog,
            install_dir: None,
        }
    }

    /// Installation root to probe for versions without registry entries,
    /// instead of the catalog's default location.
    pub fn with_install_dir(mut self, install_dir: Option<&'a Path>) -> Self {
        self.install_dir = install_dir;
        self
    }

    /// Collect the installed versions among `versions` (internal version
    /// numbers such as "10.0"), in probe order.
    ///
    /// Each registry location is probed independently and hits are not
    /// merged, so one install may show up more than once; callers take
    /// the first entry. With `force_express`, full editions are skipped
    /// in the IDE keys.
    pub fn detect(
        &self,
        versions: &[&str],
        force_express: bool,
    ) -> Result<Vec<VersionDescriptor>, OracleError> {
        let mut found = Vec::new();

        for &version in versions {
            let Some(year) = self.catalog.year_for(version) else {
                tracing::debug!("skipping unknown Visual Studio version {}", version);
                continue;
            };

            if let Some(default_dir) = self.catalog.registryless_ide_dir(version) {
                self.detect_in_install_dir(year, default_dir, &mut found);
                continue;
            }

            self.detect_ide(version, year, force_express, &mut found)?;
            self.detect_side_by_side(version, year, &mut found)?;
        }

        Ok(found)
    }

    fn detect_in_install_dir(
        &self,
        year: &str,
        default_dir: &str,
        found: &mut Vec<VersionDescriptor>,
    ) {
        let ide_dir = match self.install_dir {
            Some(root) => root.join("Common7").join("IDE"),
            None => PathBuf::from(default_dir),
        };

        let devenv = ide_dir.join(FULL_EXE);
        if !devenv.exists() {
            tracing::debug!("{} not found", devenv.display());
            return;
        }

        tracing::debug!("found Visual Studio {} at {}", year, ide_dir.display());
        self.push(year, &ide_dir.join("..").join(".."), false, found);
    }

    fn detect_ide(
        &self,
        version: &str,
        year: &str,
        force_express: bool,
        found: &mut Vec<VersionDescriptor>,
    ) -> Result<(), OracleError> {
        for key in ide_keys(version) {
            let install_dir = self
                .oracle
                .query_value(&key, Some(INSTALL_DIR_VALUE))?
                .filter(|v| !v.is_empty());
            let Some(install_dir) = install_dir else {
                tracing::debug!("no {} under {}", INSTALL_DIR_VALUE, key);
                continue;
            };
            let install_dir = PathBuf::from(install_dir);
            let root = install_dir.join("..").join("..");

            if !force_express && install_dir.join(FULL_EXE).exists() {
                tracing::debug!("found Visual Studio {} via {}", year, key);
                self.push(year, &root, false, found);
            } else if install_dir.join(EXPRESS_EXE).exists() {
                tracing::debug!("found Visual Studio {} Express via {}", year, key);
                self.push(&express(year), &root, false, found);
            } else {
                tracing::debug!(
                    "{} from {} has no usable IDE executable",
                    install_dir.display(),
                    key
                );
            }
        }
        Ok(())
    }

    fn detect_side_by_side(
        &self,
        version: &str,
        year: &str,
        found: &mut Vec<VersionDescriptor>,
    ) -> Result<(), OracleError> {
        for key in SIDE_BY_SIDE_KEYS {
            let vc_dir = self
                .oracle
                .query_value(key, Some(version))?
                .filter(|v| !v.is_empty());
            let Some(vc_dir) = vc_dir else {
                continue;
            };

            tracing::debug!("found Visual C++ {} compiler via {}", year, key);
            self.push(&express(year), &Path::new(&vc_dir).join(".."), true, found);
        }
        Ok(())
    }

    fn push(
        &self,
        short_name: &str,
        path: &Path,
        sdk_based: bool,
        found: &mut Vec<VersionDescriptor>,
    ) {
        match self.catalog.create(short_name, Some(path), sdk_based) {
            Some(descriptor) => found.push(descriptor),
            None => tracing::debug!("no catalog entry for Visual Studio {}", short_name),
        }
    }
}

fn express(year: &str) -> String {
    format!("{year}{EXPRESS_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryOracle;
    use std::fs;
    use tempfile::TempDir;

    /// Create `<root>/Common7/IDE` with the given executables and return it.
    fn ide_dir(root: &Path, exes: &[&str]) -> PathBuf {
        let ide = root.join("Common7").join("IDE");
        fs::create_dir_all(&ide).unwrap();
        for exe in exes {
            fs::write(ide.join(exe), "").unwrap();
        }
        ide
    }

    fn install_dir_value(ide: &Path) -> String {
        ide.display().to_string()
    }

    #[test]
    fn test_full_edition() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[FULL_EXE]);
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Microsoft\VisualStudio\10.0",
            "InstallDir",
            install_dir_value(&ide),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short_name(), "2010");
        assert!(!found[0].flat_solution());
        assert_eq!(found[0].path(), Some(tmp.path()));
    }

    #[test]
    fn test_express_only_key() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[EXPRESS_EXE]);
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Microsoft\VCExpress\10.0",
            "InstallDir",
            install_dir_value(&ide),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short_name(), "2010e");
        assert!(found[0].flat_solution());
        assert!(!found[0].sdk_based());
    }

    #[test]
    fn test_both_editions_prefer_full() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[FULL_EXE, EXPRESS_EXE]);
        let oracle = MemoryOracle::new()
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\9.0",
                "InstallDir",
                install_dir_value(&ide),
            )
            .with_value(
                r"HKLM\Software\Microsoft\VCExpress\9.0",
                "InstallDir",
                install_dir_value(&ide),
            );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["9.0"], false)
            .unwrap();

        // One entry per key, neither merged away.
        let names: Vec<_> = found.iter().map(|d| d.short_name()).collect();
        assert_eq!(names, vec!["2008", "2008"]);
    }

    #[test]
    fn test_force_express() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[FULL_EXE, EXPRESS_EXE]);
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Microsoft\VisualStudio\9.0",
            "InstallDir",
            install_dir_value(&ide),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["9.0"], true)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short_name(), "2008e");
    }

    #[test]
    fn test_force_express_skips_full_only_install() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[FULL_EXE]);
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Microsoft\VisualStudio\9.0",
            "InstallDir",
            install_dir_value(&ide),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["9.0"], true)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_registry_hit_without_executable() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[]);
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Microsoft\VisualStudio\10.0",
            "InstallDir",
            install_dir_value(&ide),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_native_and_wow64_keys_both_reported() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[FULL_EXE]);
        let oracle = MemoryOracle::new()
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\11.0",
                "InstallDir",
                install_dir_value(&ide),
            )
            .with_value(
                r"HKLM\Software\Wow6432Node\Microsoft\VisualStudio\11.0",
                "InstallDir",
                install_dir_value(&ide),
            );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["11.0"], false)
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0], found[1]);
        assert_eq!(found[0].default_toolset(), Some("v110"));
    }

    #[test]
    fn test_side_by_side_sdk() {
        let tmp = TempDir::new().unwrap();
        let vc = tmp.path().join("VC");
        fs::create_dir_all(&vc).unwrap();
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Wow6432Node\Microsoft\VisualStudio\SxS\VC7",
            "10.0",
            format!("{}/", vc.display()),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short_name(), "2010e");
        assert!(found[0].sdk_based());
        assert_eq!(found[0].path(), Some(tmp.path()));
    }

    #[test]
    fn test_side_by_side_native_key() {
        let tmp = TempDir::new().unwrap();
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Microsoft\VisualStudio\SxS\VC7",
            "9.0",
            tmp.path().join("VC").display().to_string(),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["9.0"], false)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short_name(), "2008e");
        assert!(found[0].sdk_based());
        assert_eq!(found[0].path(), Some(tmp.path()));
    }

    #[test]
    fn test_both_side_by_side_keys_reported() {
        let tmp = TempDir::new().unwrap();
        let vc = tmp.path().join("VC").display().to_string();
        let oracle = MemoryOracle::new()
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\SxS\VC7",
                "10.0",
                vc.clone(),
            )
            .with_value(
                r"HKLM\Software\Wow6432Node\Microsoft\VisualStudio\SxS\VC7",
                "10.0",
                vc,
            );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();

        let names: Vec<_> = found.iter().map(|d| (d.short_name(), d.sdk_based())).collect();
        assert_eq!(names, vec![("2010e", true), ("2010e", true)]);
    }

    #[test]
    fn test_empty_install_dir_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[FULL_EXE]);
        let oracle = MemoryOracle::new()
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\10.0",
                "InstallDir",
                "",
            )
            .with_value(
                r"HKLM\Software\Wow6432Node\Microsoft\VisualStudio\10.0",
                "InstallDir",
                install_dir_value(&ide),
            );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path(), Some(tmp.path()));
    }

    #[test]
    fn test_empty_side_by_side_value_is_skipped() {
        let oracle = MemoryOracle::new()
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\SxS\VC7",
                "10.0",
                "",
            )
            .with_value(
                r"HKLM\Software\Wow6432Node\Microsoft\VisualStudio\SxS\VC7",
                "10.0",
                "",
            );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_ide_hits_precede_side_by_side() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[FULL_EXE]);
        let oracle = MemoryOracle::new()
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\SxS\VC7",
                "10.0",
                tmp.path().join("VC").display().to_string(),
            )
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\10.0",
                "InstallDir",
                install_dir_value(&ide),
            );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["10.0"], false)
            .unwrap();

        let names: Vec<_> = found.iter().map(|d| (d.short_name(), d.sdk_based())).collect();
        assert_eq!(names, vec![("2010", false), ("2010e", true)]);
    }

    #[test]
    fn test_probe_order_follows_input() {
        let tmp = TempDir::new().unwrap();
        let vs8 = ide_dir(&tmp.path().join("vs8"), &[FULL_EXE]);
        let vs10 = ide_dir(&tmp.path().join("vs10"), &[FULL_EXE]);
        let oracle = MemoryOracle::new()
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\8.0",
                "InstallDir",
                install_dir_value(&vs8),
            )
            .with_value(
                r"HKLM\Software\Microsoft\VisualStudio\10.0",
                "InstallDir",
                install_dir_value(&vs10),
            );
        let catalog = VersionCatalog::builtin();
        let detector = VersionDetector::new(&oracle, &catalog);

        let names = |versions: &[&str]| -> Vec<String> {
            detector
                .detect(versions, false)
                .unwrap()
                .iter()
                .map(|d| d.short_name().to_string())
                .collect()
        };

        assert_eq!(names(&["10.0", "9.0", "8.0"]), vec!["2010", "2005"]);
        assert_eq!(names(&["8.0", "10.0"]), vec!["2005", "2010"]);
    }

    #[test]
    fn test_unknown_version_is_skipped() {
        let oracle = MemoryOracle::new();
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .detect(&["12.0", "99.0"], false)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_registryless_with_install_dir() {
        let tmp = TempDir::new().unwrap();
        ide_dir(tmp.path(), &[FULL_EXE]);
        let oracle = MemoryOracle::new();
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .with_install_dir(Some(tmp.path()))
            .detect(&["15.0"], false)
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short_name(), "2017");
        assert!(found[0].uses_vcxproj());
        assert_eq!(found[0].path(), Some(tmp.path()));
    }

    #[test]
    fn test_registryless_ignores_registry_and_express() {
        let tmp = TempDir::new().unwrap();
        let ide = ide_dir(tmp.path(), &[EXPRESS_EXE]);
        let oracle = MemoryOracle::new().with_value(
            r"HKLM\Software\Microsoft\VisualStudio\15.0",
            "InstallDir",
            install_dir_value(&ide),
        );
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .with_install_dir(Some(tmp.path()))
            .detect(&["15.0"], true)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_registryless_nothing_installed() {
        let tmp = TempDir::new().unwrap();
        let oracle = MemoryOracle::new();
        let catalog = VersionCatalog::builtin();

        let found = VersionDetector::new(&oracle, &catalog)
            .with_install_dir(Some(tmp.path()))
            .detect(&["15.0"], false)
            .unwrap();
        assert!(found.is_empty());
    }
}
