//! Login credentials for OMERO server clients.
//!
//! This crate holds everything a client gathers before asking for a server
//! connection. It includes:
//!
//! - [`LoginCredentials`]: user, server address and connection flags
//! - [`DefaultPort`]: default ports for `ws`, `wss`, `http` and `https` URLs
//! - Raw `--omero.*` argument interpretation
//! - YAML login profiles with environment variable substitution
//!
//! Connecting, authenticating and encrypting are left to the session layer.

pub mod arguments;
pub mod credentials;
pub mod default_port;
pub mod defaults;
pub mod env_vars;
pub mod error;
pub mod profile;
pub mod server;
pub mod user;

// Re-export main types for convenience
pub use arguments::parse_arguments;
pub use credentials::{LoginCredentials, SealedCredentials};
pub use default_port::DefaultPort;
pub use defaults::{DEFAULT_CONNECTION_PORT, DEFAULT_GROUP_ID};
pub use error::CredentialsError;
pub use profile::LoginProfile;
pub use server::ServerInformation;
pub use user::UserCredentials;
