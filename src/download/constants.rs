//! Constants for the download module (timeouts, accepted content types).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default whole-request timeout (15 minutes for large files and slow servers).
pub const REQUEST_TIMEOUT_SECS: u64 = 900;

/// `Content-Type` fragments accepted as a real document.
///
/// `octet-stream` covers both `application/octet-stream` and the
/// `binary/octet-stream` some object stores send.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &["application/pdf", "octet-stream"];

/// Suffix for in-progress writes, renamed away once the file is complete.
pub const TEMP_SUFFIX: &str = ".part";
