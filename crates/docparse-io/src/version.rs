//! Version constants reported by tooling.

/// Version of this client library.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse API version whose schemas are compiled in.
pub const API_VERSION: &str = "v1";

/// Bump when a bundled schema changes shape (new required field, renamed
/// wire key), even if `API_VERSION` stays the same.
pub const SCHEMA_BUNDLE_V: u8 = 1;
