//! Description of one Visual Studio installation (found or assumed).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::env::HostEnv;
use crate::util::fs::join_normalized;

/// Errors raised by descriptor operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("unsupported target architecture `{arch}`")]
    #[diagnostic(
        code(vsselect::descriptor::invalid_arch),
        help("expected `x86` or `x64`")
    )]
    InvalidArch { arch: String },
}

/// Target CPU architecture for an environment setup script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetArch {
    X86,
    X64,
}

impl TargetArch {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetArch::X86 => "x86",
            TargetArch::X64 => "x64",
        }
    }
}

impl FromStr for TargetArch {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86" => Ok(TargetArch::X86),
            "x64" => Ok(TargetArch::X64),
            other => Err(DescriptorError::InvalidArch {
                arch: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TargetArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command (with arguments) that sets up a build environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupCommand {
    /// Batch file to run
    pub program: PathBuf,
    /// Arguments passed to it
    pub args: Vec<String>,
}

impl SetupCommand {
    fn new(program: PathBuf) -> Self {
        SetupCommand {
            program,
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The command as an argv vector.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = vec![self.program.display().to_string()];
        argv.extend(self.args.iter().cloned());
        argv
    }
}

/// Renders the command the way `cmd.exe` reads it: words containing
/// whitespace are double-quoted.
impl fmt::Display for SetupCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<String> = self.to_argv().iter().map(|w| quote(w)).collect();
        write!(f, "{}", words.join(" "))
    }
}

fn quote(word: &str) -> String {
    if word.is_empty() || word.contains(char::is_whitespace) {
        format!("\"{word}\"")
    } else {
        word.to_string()
    }
}

/// Information regarding one version of Visual Studio.
///
/// Created by the detector (or as a placeholder by the selector) through
/// [`VersionCatalog`](crate::core::catalog::VersionCatalog) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionDescriptor {
    short_name: String,
    description: String,
    solution_version: String,
    project_version: String,
    flat_solution: bool,
    uses_vcxproj: bool,
    path: Option<PathBuf>,
    sdk_based: bool,
    default_toolset: Option<String>,
}

impl VersionDescriptor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        short_name: impl Into<String>,
        description: impl Into<String>,
        solution_version: impl Into<String>,
        project_version: impl Into<String>,
        flat_solution: bool,
        uses_vcxproj: bool,
        path: Option<PathBuf>,
        sdk_based: bool,
        default_toolset: Option<String>,
    ) -> Self {
        VersionDescriptor {
            short_name: short_name.into(),
            description: description.into(),
            solution_version: solution_version.into(),
            project_version: project_version.into(),
            flat_solution,
            uses_vcxproj,
            path,
            sdk_based,
            default_toolset,
        }
    }

    /// Short name such as "2010" or "2010e".
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Full display name, e.g. "Visual Studio 2010".
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Format version written into `.sln` files.
    pub fn solution_version(&self) -> &str {
        &self.solution_version
    }

    /// Format version of `.vcproj` / `.vcxproj` files.
    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    /// Whether solutions must be written without folders (Express editions).
    pub fn flat_solution(&self) -> bool {
        self.flat_solution
    }

    /// Whether this version uses MSBuild `.vcxproj` files.
    pub fn uses_vcxproj(&self) -> bool {
        self.uses_vcxproj
    }

    /// Installation root, `None` when nothing was found.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether this was found through the compiler-only SxS registry key.
    pub fn sdk_based(&self) -> bool {
        self.sdk_based
    }

    /// The MSBuild toolset used in the absence of a user override.
    pub fn default_toolset(&self) -> Option<&str> {
        self.default_toolset.as_deref()
    }

    /// File extension of generated project files.
    pub fn project_extension(&self) -> &'static str {
        if self.uses_vcxproj {
            ".vcxproj"
        } else {
            ".vcproj"
        }
    }

    /// Path to a compiler tool under `VC/bin`.
    ///
    /// The installation path is not checked; a placeholder yields a
    /// relative path that points nowhere.
    pub fn tool_path(&self, tool: &str) -> PathBuf {
        join_normalized(self.install_root(), &format!("VC/bin/{tool}"))
    }

    /// Command (with arguments) that sets up the build environment for
    /// `target_arch`, which must be `x86` or `x64`.
    pub fn setup_script(
        &self,
        target_arch: &str,
        env: &HostEnv,
    ) -> Result<SetupCommand, DescriptorError> {
        let arch: TargetArch = target_arch.parse()?;

        // Inside an SDK command prompt the SDK's own script knows the layout.
        let sdk_dir = env.windows_sdk_dir.as_deref().filter(|_| self.sdk_based);
        if let Some(sdk_dir) = sdk_dir {
            return Ok(
                SetupCommand::new(join_normalized(sdk_dir, "Bin/SetEnv.Cmd"))
                    .arg(format!("/{arch}")),
            );
        }

        let root = self.install_root();
        let command = match arch {
            // vcvarsall.bat for x86 calls vcvars32, which it can only find
            // when VS??COMNTOOLS is set.
            TargetArch::X86 => {
                SetupCommand::new(join_normalized(root, "Common7/Tools/vsvars32.bat"))
            }
            TargetArch::X64 => {
                let arg = if env.is_amd64_host() { "amd64" } else { "x86_amd64" };
                SetupCommand::new(join_normalized(root, "VC/vcvarsall.bat")).arg(arg)
            }
        };
        Ok(command)
    }

    fn install_root(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.short_name)
    }
}
