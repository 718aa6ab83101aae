//! Typed error variants for the omero-login-config crate.
//!
//! Construction of [`LoginCredentials`](crate::LoginCredentials) fails
//! synchronously with one of these; no partially built value is ever returned.
//! Profile I/O shares the same type so callers only match on one enum.

use thiserror::Error;

/// Errors produced while building, validating or persisting login credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------
    /// A required input was absent or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Port resolution hit a URL whose protocol has no known default port.
    ///
    /// `supported` lists every protocol name the lookup accepts.
    #[error("{protocol} is not supported. Supported protocols: {supported}")]
    UnsupportedProtocol {
        /// The protocol that was looked up, as given.
        protocol: String,
        /// Comma separated list of supported protocol names.
        supported: String,
    },

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------
    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Credentials validation error: {0}")]
    Validation(String),

    // -----------------------------------------------------------------------
    // Profile persistence
    // -----------------------------------------------------------------------
    /// An I/O error occurred reading or writing a profile file.
    #[error("I/O error reading profile: {0}")]
    Io(#[from] std::io::Error),

    /// The profile file contained invalid YAML.
    #[error("YAML parse error in profile: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CredentialsError>;
