//! Core data types: version descriptors, the version catalog, and the
//! captured host environment.

pub mod catalog;
pub mod descriptor;
pub mod env;

pub use catalog::{VersionCatalog, VersionProfile, AUTO_TOKEN, EXPRESS_SUFFIX};
pub use descriptor::{DescriptorError, SetupCommand, TargetArch, VersionDescriptor};
pub use env::HostEnv;
