//! `LoginProfile` — YAML representation of login credentials.
//!
//! A profile is the on-disk form of [`LoginCredentials`]. Loading runs the
//! same construction path as the explicit constructors, so port resolution
//! and protocol checks apply to profiles too. Passwords are never written;
//! reference `${OMERO_PASSWORD}` in the file instead.

use crate::credentials::LoginCredentials;
use crate::env_vars::expand_with;
use crate::error::{CredentialsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Saved connection settings.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginProfile {
    /// Server hostname or URL
    #[serde(default)]
    pub host: String,

    /// Server port (derived from the host when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Username or session id
    #[serde(default)]
    pub username: String,

    /// Password, read from the file but never written back
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Name reported to the server for this client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,

    /// Enable transport encryption
    #[serde(default = "crate::defaults::bool_true")]
    pub encryption: bool,

    /// Check network reachability before connecting
    #[serde(default = "crate::defaults::bool_true")]
    pub check_network: bool,

    /// Check client and server versions are compatible
    #[serde(default = "crate::defaults::bool_true")]
    pub check_version: bool,

    /// Data compression level (0.0 to 1.0)
    #[serde(default = "crate::defaults::compression")]
    pub compression: f32,

    /// Group to join, -1 for the user's default group
    #[serde(default = "crate::defaults::group_id")]
    pub group_id: i64,

    /// Resolve every `${VAR}` reference, not just allowlisted ones
    #[serde(default)]
    pub allow_all_env_vars: bool,
}

impl Default for LoginProfile {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: None,
            username: String::new(),
            password: String::new(),
            application_name: None,
            encryption: crate::defaults::bool_true(),
            check_network: crate::defaults::bool_true(),
            check_version: crate::defaults::bool_true(),
            compression: crate::defaults::compression(),
            group_id: crate::defaults::group_id(),
            allow_all_env_vars: false,
        }
    }
}

impl LoginProfile {
    /// Parse a profile from YAML text, expanding `${VAR}` in string fields
    /// from the process environment.
    pub fn from_yaml(contents: &str) -> Result<Self> {
        Self::from_yaml_with(contents, &|name| std::env::var(name).ok())
    }

    /// Parse a profile, resolving `${VAR}` references through `lookup`.
    pub fn from_yaml_with(
        contents: &str,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut profile: Self = serde_yaml_ng::from_str(contents)?;
        profile.expand_variables(lookup);
        Ok(profile)
    }

    fn expand_variables(&mut self, lookup: &dyn Fn(&str) -> Option<String>) {
        let allow_all = self.allow_all_env_vars;
        for field in [&mut self.host, &mut self.username, &mut self.password] {
            *field = expand_with(field.as_str(), allow_all, lookup);
        }
        if let Some(name) = self.application_name.as_mut() {
            *name = expand_with(name.as_str(), allow_all, lookup);
        }
    }

    /// Load a profile from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading login profile from {:?}", path);

        // The file may hold a password; warn if other users can read it.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = fs::metadata(path) {
                let mode = metadata.permissions().mode();
                if mode & 0o044 != 0 {
                    log::warn!(
                        "Profile {:?} has insecure permissions (mode {:04o}). Run: chmod 600 {:?}",
                        path,
                        mode & 0o777,
                        path,
                    );
                }
            }
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Save the profile to `path` (password omitted).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Saved login profile to {:?}", path);
        Ok(())
    }

    /// Default profile location, `~/.config/omero-login/profile.yaml`.
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("omero-login").join("profile.yaml")
            } else {
                PathBuf::from("profile.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".config")
                    .join("omero-login")
                    .join("profile.yaml")
            } else {
                PathBuf::from("profile.yaml")
            }
        }
    }

    /// Build credentials from this profile.
    ///
    /// Fails with [`CredentialsError::InvalidArgument`] when no host is set,
    /// or with whatever port resolution reports for the host.
    pub fn to_credentials(&self) -> Result<LoginCredentials> {
        if self.host.trim().is_empty() {
            return Err(CredentialsError::InvalidArgument(
                "Profile has no host".to_string(),
            ));
        }
        let mut credentials = LoginCredentials::with_host_and_port(
            self.username.clone(),
            self.password.clone(),
            &self.host,
            self.port,
        )?;
        credentials.set_application_name(self.application_name.clone());
        credentials.set_encryption(self.encryption);
        credentials.set_check_network(self.check_network);
        credentials.set_check_version(self.check_version);
        credentials.set_compression(self.compression);
        credentials.set_group_id(self.group_id);
        Ok(credentials)
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for LoginProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("LoginProfile")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &password)
            .field("application_name", &self.application_name)
            .field("encryption", &self.encryption)
            .field("check_network", &self.check_network)
            .field("check_version", &self.check_version)
            .field("compression", &self.compression)
            .field("group_id", &self.group_id)
            .field("allow_all_env_vars", &self.allow_all_env_vars)
            .finish()
    }
}

impl From<&LoginCredentials> for LoginProfile {
    fn from(credentials: &LoginCredentials) -> Self {
        Self {
            host: credentials.server().host().to_string(),
            port: credentials.server().port(),
            username: credentials.user().username().to_string(),
            password: credentials.user().password().to_string(),
            application_name: credentials.application_name().map(String::from),
            encryption: credentials.encryption(),
            check_network: credentials.check_network(),
            check_version: credentials.check_version(),
            compression: credentials.compression(),
            group_id: credentials.group_id(),
            allow_all_env_vars: false,
        }
    }
}
