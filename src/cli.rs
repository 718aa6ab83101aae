//! Command-line interface for omero-login.
//!
//! Builds login credentials from a saved profile, raw `--omero.*` arguments
//! and command-line flags, then prints a redacted summary.

use crate::debug::LogLevel;
use anyhow::{Context, Result};
use clap::Parser;
use omero_login_config::{LoginCredentials, LoginProfile, SealedCredentials};
use std::fmt::Write as _;
use std::path::PathBuf;

/// omero-login - Resolve OMERO server login settings
#[derive(Parser)]
#[command(name = "omero-login")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Server hostname or URL (ws://, wss://, http://, https://)
    #[arg(short = 's', long, value_name = "HOST")]
    pub host: Option<String>,

    /// Server port (derived from the host when omitted)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Username or session id
    #[arg(short, long, value_name = "USER")]
    pub user: Option<String>,

    /// Password
    #[arg(short = 'w', long, env = "OMERO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Group id to join (-1 for the user's default group)
    #[arg(short, long, value_name = "ID", allow_negative_numbers = true)]
    pub group: Option<i64>,

    /// Application name reported to the server
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Disable transport encryption
    #[arg(long)]
    pub no_encryption: bool,

    /// Skip the network reachability check
    #[arg(long)]
    pub no_check_network: bool,

    /// Skip the client/server version check
    #[arg(long)]
    pub no_check_version: bool,

    /// Compression level (0.0 to 1.0)
    #[arg(long, value_name = "LEVEL")]
    pub compression: Option<f32>,

    /// Load settings from a YAML profile
    #[arg(long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Load settings from the default profile location
    #[arg(long, conflicts_with = "profile")]
    pub default_profile: bool,

    /// Save the resolved settings to a YAML profile (password omitted)
    #[arg(long, value_name = "PATH")]
    pub save: Option<PathBuf>,

    /// Log level (overrides DEBUG_LEVEL)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Raw connection arguments, e.g. `-- --omero.host=localhost --omero.user=root`
    #[arg(
        last = true,
        value_name = "ARGS",
        conflicts_with_all = ["profile", "default_profile"]
    )]
    pub raw_args: Vec<String>,
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = self.password.as_ref().map(|_| "***");
        // Raw arguments may carry --omero.pass=...
        let raw_args: Vec<&str> = self
            .raw_args
            .iter()
            .map(|arg| {
                if arg.starts_with("--omero.pass=") {
                    "--omero.pass=***"
                } else {
                    arg.as_str()
                }
            })
            .collect();
        f.debug_struct("Cli")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &password)
            .field("group", &self.group)
            .field("app_name", &self.app_name)
            .field("no_encryption", &self.no_encryption)
            .field("no_check_network", &self.no_check_network)
            .field("no_check_version", &self.no_check_version)
            .field("compression", &self.compression)
            .field("profile", &self.profile)
            .field("default_profile", &self.default_profile)
            .field("save", &self.save)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .field("raw_args", &raw_args)
            .finish()
    }
}

/// Build credentials from the parsed command line.
///
/// Sources are layered: raw arguments or a profile (never both) form the
/// base; flags override it. Changing the host without a port re-derives the port.
pub fn build_credentials(cli: &Cli) -> Result<LoginCredentials> {
    let mut profile = if !cli.raw_args.is_empty() {
        let stored = LoginCredentials::from_arguments(Some(&cli.raw_args))?;
        let resolved = stored
            .resolve_arguments()
            .context("Failed to interpret raw connection arguments")?;
        LoginProfile::from(&resolved)
    } else if let Some(path) = profile_path(cli) {
        LoginProfile::load(&path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?
    } else {
        LoginProfile::default()
    };

    if let Some(host) = &cli.host {
        profile.host = host.clone();
        profile.port = None;
    }
    if let Some(port) = cli.port {
        profile.port = Some(port);
    }
    if let Some(user) = &cli.user {
        profile.username = user.clone();
    }
    if let Some(password) = &cli.password {
        profile.password = password.clone();
    }
    if let Some(group) = cli.group {
        profile.group_id = group;
    }
    if let Some(name) = &cli.app_name {
        profile.application_name = Some(name.clone());
    }
    if let Some(compression) = cli.compression {
        profile.compression = compression;
    }
    profile.encryption &= !cli.no_encryption;
    profile.check_network &= !cli.no_check_network;
    profile.check_version &= !cli.no_check_version;

    Ok(profile.to_credentials()?)
}

fn profile_path(cli: &Cli) -> Option<PathBuf> {
    if cli.default_profile {
        Some(LoginProfile::default_path())
    } else {
        cli.profile.clone()
    }
}

/// Human readable summary with the password redacted.
pub fn format_summary(credentials: &SealedCredentials) -> String {
    let server = credentials.server();
    let user = credentials.user();
    let mut out = String::new();

    let _ = writeln!(out, "host:            {}", server.host());
    if server.is_url() {
        let _ = writeln!(out, "hostname:        {}", server.hostname());
        let _ = writeln!(out, "protocol:        {}", server.protocol().unwrap_or_default());
    }
    match server.port() {
        Some(port) => {
            let _ = writeln!(out, "port:            {port}");
        }
        None => {
            let _ = writeln!(out, "port:            (unset)");
        }
    }
    let _ = writeln!(out, "user:            {}", user.username());
    let password = if user.password().is_empty() { "(none)" } else { "***" };
    let _ = writeln!(out, "password:        {password}");
    match credentials.group() {
        Some(group) => {
            let _ = writeln!(out, "group:           {group}");
        }
        None => {
            let _ = writeln!(out, "group:           (default)");
        }
    }
    if let Some(name) = credentials.application_name() {
        let _ = writeln!(out, "application:     {name}");
    }
    let _ = writeln!(out, "encryption:      {}", credentials.encryption());
    let _ = writeln!(out, "check network:   {}", credentials.check_network());
    let _ = writeln!(out, "check version:   {}", credentials.check_version());
    let _ = writeln!(out, "compression:     {}", credentials.compression());
    out
}

/// Run the command: build, seal, optionally save, print.
pub fn run(cli: &Cli) -> Result<()> {
    let credentials = build_credentials(cli)?;
    let sealed = credentials.seal()?;

    if let Some(path) = &cli.save {
        LoginProfile::from(&*sealed)
            .save(path)
            .with_context(|| format!("Failed to save profile {}", path.display()))?;
    }

    print!("{}", format_summary(&sealed));
    Ok(())
}
