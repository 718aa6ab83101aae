//! Interpreter for raw connection arguments.
//!
//! Arguments use Ice property syntax, `--omero.<key>=<value>`. Recognised keys:
//!
//! | key | meaning |
//! |---|---|
//! | `host` | server hostname or URL (required) |
//! | `port` | server port |
//! | `user` | username |
//! | `pass` | password |
//! | `session` | session id, used instead of `user`/`pass` |
//! | `group` | group id to join |
//!
//! An unescaped `#` starts a comment that runs to the end of the argument;
//! `\#` yields a literal `#`. Other arguments are skipped.

use crate::credentials::LoginCredentials;
use crate::error::{CredentialsError, Result};

const PROPERTY_PREFIX: &str = "--omero.";

impl LoginCredentials {
    /// Interpret the stored raw arguments into structured credentials.
    ///
    /// Fails with [`CredentialsError::InvalidArgument`] if these credentials
    /// were not built from arguments, or if the arguments are incomplete.
    pub fn resolve_arguments(&self) -> Result<LoginCredentials> {
        let args = self.arguments().ok_or_else(|| {
            CredentialsError::InvalidArgument("No connection arguments".to_string())
        })?;
        parse_arguments(args)
    }
}

/// Build credentials from Ice style `--omero.*` arguments.
pub fn parse_arguments<S: AsRef<str>>(args: &[S]) -> Result<LoginCredentials> {
    let mut host: Option<String> = None;
    let mut port: Option<u16> = None;
    let mut user = String::new();
    let mut pass = String::new();
    let mut session: Option<String> = None;
    let mut group: Option<i64> = None;

    for arg in args {
        let arg = arg.as_ref();
        let Some(property) = arg.strip_prefix(PROPERTY_PREFIX) else {
            log::debug!("Skipping unrecognised connection argument {arg:?}");
            continue;
        };
        let Some((key, raw_value)) = property.split_once('=') else {
            log::debug!("Skipping connection argument without value {arg:?}");
            continue;
        };
        let key = key.trim();
        let value = unescape_value(raw_value);

        match key {
            "host" => host = Some(value),
            "port" => port = Some(parse_number(key, &value)?),
            "user" => user = value,
            "pass" => pass = value,
            "session" => session = Some(value),
            "group" => group = Some(parse_number(key, &value)?),
            other => log::debug!("Ignoring unknown property omero.{other}"),
        }
    }

    let host = host
        .filter(|h| !h.is_empty())
        .ok_or_else(|| CredentialsError::InvalidArgument("Missing --omero.host".to_string()))?;

    let mut credentials = match session {
        Some(session) => LoginCredentials::with_host_and_port(session, "", &host, port)?,
        None => LoginCredentials::with_host_and_port(user, pass, &host, port)?,
    };
    if let Some(group) = group {
        credentials.set_group_id(group);
    }
    Ok(credentials)
}

/// Strip an unescaped `#` comment and turn `\#` into `#`.
fn unescape_value(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                value.push('#');
                chars.next();
            }
            '#' => break,
            _ => value.push(c),
        }
    }
    value.trim().to_string()
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CredentialsError::InvalidArgument(format!("Invalid value for omero.{key}: {value:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_CONNECTION_PORT;

    #[test]
    fn test_parse_basic() {
        let creds = parse_arguments(&[
            "--omero.host=omero.example.org",
            "--omero.user=root",
            "--omero.pass=omero",
        ])
        .unwrap();
        assert_eq!(creds.server().host(), "omero.example.org");
        assert_eq!(creds.server().port(), Some(DEFAULT_CONNECTION_PORT));
        assert_eq!(creds.user().username(), "root");
        assert_eq!(creds.user().password(), "omero");
        assert_eq!(creds.group_id(), -1);
    }

    #[test]
    fn test_parse_port_and_group() {
        let creds = parse_arguments(&[
            "--omero.host=localhost",
            "--omero.port=14064",
            "--omero.group=3",
        ])
        .unwrap();
        assert_eq!(creds.server().port(), Some(14064));
        assert_eq!(creds.group(), Some(3));
    }

    #[test]
    fn test_session_replaces_user() {
        let creds = parse_arguments(&[
            "--omero.host=wss://omero.example.org/omero-ws",
            "--omero.user=ignored",
            "--omero.session=8d7c1f52-6d51-4c5c-9f0a-3b9e3d4d6b11",
        ])
        .unwrap();
        assert_eq!(
            creds.user().username(),
            "8d7c1f52-6d51-4c5c-9f0a-3b9e3d4d6b11"
        );
        assert_eq!(creds.user().password(), "");
        assert_eq!(creds.server().port(), Some(443));
    }

    #[test]
    fn test_escaped_hash_in_password() {
        let creds = parse_arguments(&[r"--omero.host=localhost", r"--omero.pass=a\#b#comment"])
            .unwrap();
        assert_eq!(creds.user().password(), "a#b");
    }

    #[test]
    fn test_unknown_arguments_skipped() {
        let creds = parse_arguments(&[
            "-v",
            "--Ice.Default.Router=x",
            "--omero.host=localhost",
            "--omero.flavour=vanilla",
            "--omero.user",
        ])
        .unwrap();
        assert_eq!(creds.server().host(), "localhost");
        assert_eq!(creds.user().username(), "");
    }

    #[test]
    fn test_missing_host() {
        let err = parse_arguments(&["--omero.user=root"]).unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidArgument(_)));
    }

    #[test]
    fn test_bad_port() {
        let err = parse_arguments(&["--omero.host=h", "--omero.port=abc"]).unwrap_err();
        assert!(err.to_string().contains("omero.port"));
    }

    #[test]
    fn test_bad_number_error_names_trimmed_key() {
        let err = parse_arguments(&["--omero.host=h", "--omero.group =x"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: Invalid value for omero.group: \"x\""
        );
    }

    #[test]
    fn test_unsupported_protocol_propagates() {
        let err = parse_arguments(&["--omero.host=ftp://server"]).unwrap_err();
        assert!(matches!(err, CredentialsError::UnsupportedProtocol { .. }));
    }

    #[test]
    fn test_resolve_stored_arguments() {
        let stored = LoginCredentials::from_arguments(Some([
            "--omero.host=localhost",
            "--omero.user=root",
        ]))
        .unwrap();
        let resolved = stored.resolve_arguments().unwrap();
        assert_eq!(resolved.user().username(), "root");
        assert_eq!(resolved.arguments(), None);
    }

    #[test]
    fn test_resolve_without_arguments() {
        assert!(LoginCredentials::new().resolve_arguments().is_err());
    }
}
