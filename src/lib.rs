//! vsselect - Visual Studio version selection for project generators
//!
//! This crate works out which installed Visual Studio version a
//! solution/project generator should target, and describes it: project and
//! solution format versions, project file extension, default toolset, and
//! the script that sets up a build environment.
//!
//! ```rust,no_run
//! use vsselect::{select_version, HostEnv, RegExeOracle, VersionCatalog};
//!
//! let env = HostEnv::from_process();
//! let oracle = RegExeOracle::from_env(&env);
//! let version = select_version("auto", &env, &oracle, &VersionCatalog::builtin())?;
//! println!("{}", version.project_extension());
//! # Ok::<(), vsselect::SelectError>(())
//! ```

pub mod core;
pub mod detect;
pub mod ops;
pub mod registry;
pub mod util;

pub use core::{
    catalog::VersionCatalog,
    descriptor::{DescriptorError, SetupCommand, TargetArch, VersionDescriptor},
    env::HostEnv,
};

pub use detect::VersionDetector;
pub use ops::{detect_versions, select_version, SelectError};
pub use registry::{ConfigurationOracle, MemoryOracle, OracleError, RegExeOracle};
