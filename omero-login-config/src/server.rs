//! Server address half of the login credentials.
//!
//! A host is either a bare hostname (`omero.example.org`) or a full URL
//! (`wss://omero.example.org/omero-ws`). Anything containing `://` is treated
//! as a URL and parsed; the scheme becomes the protocol and an explicit port
//! in the URL becomes the resolved port.

use crate::error::{CredentialsError, Result};
use url::Url;

/// Where to connect: host string, resolved port and (for URLs) protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInformation {
    host: String,
    hostname: String,
    port: Option<u16>,
    protocol: Option<String>,
}

impl ServerInformation {
    /// Create server information for `host`, parsing it if it is a URL.
    pub fn new(host: &str) -> Result<Self> {
        let mut server = Self::default();
        server.set_host(host)?;
        Ok(server)
    }

    /// Host exactly as it was given.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Replace the host, re-deriving hostname, protocol and URL port.
    ///
    /// A previously set port is kept unless the new host is a URL carrying
    /// its own port. Fails with [`CredentialsError::InvalidArgument`] for a
    /// malformed URL, leaving `self` untouched.
    pub fn set_host(&mut self, host: &str) -> Result<()> {
        if host.contains("://") {
            let url = Url::parse(host).map_err(|e| {
                CredentialsError::InvalidArgument(format!("Invalid server URL '{host}': {e}"))
            })?;
            self.hostname = url.host_str().unwrap_or_default().to_string();
            self.protocol = Some(url.scheme().to_string());
            if let Some(port) = url.port() {
                self.port = Some(port);
            }
        } else {
            self.hostname = host.to_string();
            self.protocol = None;
        }
        self.host = host.to_string();
        log::debug!(
            "Server host set to {:?} (url={}, port={:?})",
            self.host,
            self.is_url(),
            self.port
        );
        Ok(())
    }

    /// Host name without scheme, path or port.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Resolved port, `None` while unspecified.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = Some(port);
    }

    /// Lowercase URL scheme, `None` for a bare hostname.
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Whether the host was given as a URL.
    pub fn is_url(&self) -> bool {
        self.protocol.is_some()
    }

    /// `host:port` for display, or just the host if no port is resolved.
    pub fn connection_string(&self) -> String {
        match self.port {
            Some(port) if !self.is_url() => format!("{}:{}", self.host, port),
            Some(port) => format!("{} (port {})", self.host, port),
            None => self.host.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_hostname() {
        let server = ServerInformation::new("omero.example.org").unwrap();
        assert_eq!(server.host(), "omero.example.org");
        assert_eq!(server.hostname(), "omero.example.org");
        assert!(!server.is_url());
        assert_eq!(server.protocol(), None);
        assert_eq!(server.port(), None);
    }

    #[test]
    fn test_websocket_url() {
        let server = ServerInformation::new("wss://omero.example.org/omero-ws").unwrap();
        assert_eq!(server.host(), "wss://omero.example.org/omero-ws");
        assert_eq!(server.hostname(), "omero.example.org");
        assert!(server.is_url());
        assert_eq!(server.protocol(), Some("wss"));
        assert_eq!(server.port(), None);
    }

    #[test]
    fn test_url_with_port() {
        let server = ServerInformation::new("ws://localhost:4065/omero-ws").unwrap();
        assert_eq!(server.port(), Some(4065));
        assert_eq!(server.hostname(), "localhost");
    }

    #[test]
    fn test_scheme_is_lowercased() {
        let server = ServerInformation::new("HTTPS://omero.example.org").unwrap();
        assert_eq!(server.protocol(), Some("https"));
    }

    #[test]
    fn test_malformed_url_rejected() {
        let err = ServerInformation::new("http://").unwrap_err();
        assert!(matches!(err, CredentialsError::InvalidArgument(_)));
    }

    #[test]
    fn test_failed_set_host_keeps_previous() {
        let mut server = ServerInformation::new("omero.example.org").unwrap();
        assert!(server.set_host("http://").is_err());
        assert_eq!(server.host(), "omero.example.org");
    }

    #[test]
    fn test_switch_from_url_to_hostname() {
        let mut server = ServerInformation::new("wss://a.example.org").unwrap();
        server.set_host("b.example.org").unwrap();
        assert!(!server.is_url());
        assert_eq!(server.hostname(), "b.example.org");
    }

    #[test]
    fn test_connection_string() {
        let mut server = ServerInformation::new("omero.example.org").unwrap();
        assert_eq!(server.connection_string(), "omero.example.org");
        server.set_port(4064);
        assert_eq!(server.connection_string(), "omero.example.org:4064");
    }
}
