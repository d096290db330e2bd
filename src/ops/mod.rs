//! High-level operations.
//!
//! This module contains the operations behind the vsselect commands.

pub mod select;

pub use select::{detect_versions, effective_token, select_version, SelectError};
