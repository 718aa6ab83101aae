//! `LoginCredentials` — everything needed to ask for a server connection.
//!
//! Built once per connection attempt, adjusted through setters, then handed to
//! the connection layer. [`LoginCredentials::seal`] offers a frozen, read-only
//! form for callers that want the hand-off enforced.

use crate::default_port::DefaultPort;
use crate::defaults::{self, DEFAULT_CONNECTION_PORT, DEFAULT_GROUP_ID};
use crate::error::{CredentialsError, Result};
use crate::server::ServerInformation;
use crate::user::UserCredentials;

/// User identity, server address and connection behaviour flags.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginCredentials {
    user: UserCredentials,
    server: ServerInformation,
    application_name: Option<String>,
    encryption: bool,
    check_network: bool,
    check_version: bool,
    /// Compression level, nominally 0.0 to 1.0. Only checked by [`Self::validate`].
    compression: f32,
    /// `-1` selects the user's default group.
    group_id: i64,
    /// Raw connection arguments. `#` must be escaped as `\#` by the caller.
    arguments: Option<Box<[String]>>,
}

impl Default for LoginCredentials {
    fn default() -> Self {
        Self {
            user: UserCredentials::default(),
            server: ServerInformation::default(),
            application_name: None,
            encryption: defaults::bool_true(),
            check_network: defaults::bool_true(),
            check_version: defaults::bool_true(),
            compression: defaults::compression(),
            group_id: defaults::group_id(),
            arguments: None,
        }
    }
}

impl LoginCredentials {
    /// Empty credentials with default flags.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credentials carrying a raw argument vector for a downstream parser.
    ///
    /// The sequence is copied; later changes to the caller's buffer do not
    /// affect the stored arguments. `None` fails with
    /// [`CredentialsError::InvalidArgument`]. An empty sequence is accepted.
    pub fn from_arguments<I, S>(args: Option<I>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.ok_or_else(|| {
            CredentialsError::InvalidArgument("No connection arguments".to_string())
        })?;
        let arguments: Box<[String]> = args.into_iter().map(Into::into).collect();
        log::debug!("Login credentials created from {} raw arguments", arguments.len());
        Ok(Self {
            arguments: Some(arguments),
            ..Self::default()
        })
    }

    /// Credentials for `host`, deriving the port from the host.
    ///
    /// `username` may instead be a session id, in which case the password is
    /// ignored by the server.
    pub fn with_host(
        username: impl Into<String>,
        password: impl Into<String>,
        host: &str,
    ) -> Result<Self> {
        Self::with_host_and_port(username, password, host, None)
    }

    /// Credentials for `host`, using `port` when given.
    ///
    /// Without an explicit port: a port embedded in a host URL is kept; a bare
    /// hostname gets [`DEFAULT_CONNECTION_PORT`]; otherwise the URL protocol
    /// is looked up in [`DefaultPort`], failing with
    /// [`CredentialsError::UnsupportedProtocol`] for unknown protocols.
    pub fn with_host_and_port(
        username: impl Into<String>,
        password: impl Into<String>,
        host: &str,
        port: Option<u16>,
    ) -> Result<Self> {
        let mut credentials = Self::default();
        credentials.user = UserCredentials::new(username, password);
        credentials.server.set_host(host)?;

        match (port, credentials.server.port()) {
            (Some(port), _) => credentials.server.set_port(port),
            (None, Some(_)) => {}
            (None, None) => {
                let resolved = match credentials.server.protocol() {
                    None => DEFAULT_CONNECTION_PORT,
                    Some(protocol) => DefaultPort::from_protocol(protocol)?.port(),
                };
                credentials.server.set_port(resolved);
            }
        }

        log::debug!(
            "Login credentials for {:?} on {}",
            credentials.user.username(),
            credentials.server.connection_string()
        );
        Ok(credentials)
    }

    /// Raw arguments as a read-only slice, if this was built from them.
    pub fn arguments(&self) -> Option<&[String]> {
        self.arguments.as_deref()
    }

    pub fn user(&self) -> &UserCredentials {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut UserCredentials {
        &mut self.user
    }

    pub fn set_user(&mut self, user: UserCredentials) {
        self.user = user;
    }

    pub fn server(&self) -> &ServerInformation {
        &self.server
    }

    pub fn server_mut(&mut self) -> &mut ServerInformation {
        &mut self.server
    }

    pub fn set_server(&mut self, server: ServerInformation) {
        self.server = server;
    }

    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    pub fn set_application_name(&mut self, name: Option<String>) {
        self.application_name = name;
    }

    pub fn encryption(&self) -> bool {
        self.encryption
    }

    pub fn set_encryption(&mut self, encryption: bool) {
        self.encryption = encryption;
    }

    pub fn check_network(&self) -> bool {
        self.check_network
    }

    pub fn set_check_network(&mut self, check_network: bool) {
        self.check_network = check_network;
    }

    /// Whether client and server versions are checked for compatibility.
    pub fn check_version(&self) -> bool {
        self.check_version
    }

    pub fn set_check_version(&mut self, check_version: bool) {
        self.check_version = check_version;
    }

    pub fn compression(&self) -> f32 {
        self.compression
    }

    /// Stored as given; see [`Self::validate`] for the range check.
    pub fn set_compression(&mut self, compression: f32) {
        self.compression = compression;
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn set_group_id(&mut self, group_id: i64) {
        self.group_id = group_id;
    }

    /// Explicit group to join, or `None` for the user's default group.
    pub fn group(&self) -> Option<i64> {
        (self.group_id != DEFAULT_GROUP_ID).then_some(self.group_id)
    }

    /// Check field values the setters accept unchecked.
    ///
    /// `compression` must be finite and within 0.0 to 1.0; `group_id` must be
    /// a non-negative id or `-1`.
    pub fn validate(&self) -> Result<()> {
        if !self.compression.is_finite() || !(0.0..=1.0).contains(&self.compression) {
            return Err(CredentialsError::Validation(format!(
                "compression must be between 0.0 and 1.0, got {}",
                self.compression
            )));
        }
        if self.group_id < DEFAULT_GROUP_ID {
            return Err(CredentialsError::Validation(format!(
                "group_id must be -1 or a non-negative group id, got {}",
                self.group_id
            )));
        }
        Ok(())
    }

    /// Validate and freeze the credentials for hand-off to the connection layer.
    pub fn seal(self) -> Result<SealedCredentials> {
        self.validate()?;
        log::info!(
            "Credentials sealed for {:?} on {}",
            self.user.username(),
            self.server.connection_string()
        );
        Ok(SealedCredentials(self))
    }
}

/// Read-only credentials produced by [`LoginCredentials::seal`].
///
/// Derefs to [`LoginCredentials`] so every getter is available, but no setter
/// can be reached.
#[derive(Debug, Clone, PartialEq)]
pub struct SealedCredentials(LoginCredentials);

impl SealedCredentials {
    /// Give up the seal and get the mutable credentials back.
    pub fn into_inner(self) -> LoginCredentials {
        self.0
    }
}

impl std::ops::Deref for SealedCredentials {
    type Target = LoginCredentials;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
