//! Capture schema version policy.
//!
//! # Compatibility contract
//!
//! - **Patch bumps** are additive: new optional fields only.
//! - **Minor bumps** may add required fields, provided defaults exist for
//!   captures written under the previous minor.
//! - **Major bumps** are breaking.
//!
//! Validators accept any member of [`SUPPORTED_SCHEMA_VERSIONS`]; everything
//! else is rejected at parse time with `WS_UNSUPPORTED_VERSION`.

/// Version written by this implementation.
pub const CURRENT_SCHEMA_VERSION: &str = "0.1";

/// Versions this implementation can read.
pub const SUPPORTED_SCHEMA_VERSIONS: &[&str] = &["0.1"];

/// True exactly when `version` is a member of the supported set.
#[must_use]
pub fn is_supported_schema_version(version: &str) -> bool {
    SUPPORTED_SCHEMA_VERSIONS.contains(&version)
}
