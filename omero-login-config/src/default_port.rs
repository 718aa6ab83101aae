//! Default ports for URL style server addresses.

use crate::error::{CredentialsError, Result};

/// Protocols a server URL may use, each with its canonical port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultPort {
    Ws,
    Wss,
    Http,
    Https,
}

impl DefaultPort {
    /// Every supported protocol, in lookup order.
    pub const ALL: [DefaultPort; 4] = [Self::Ws, Self::Wss, Self::Http, Self::Https];

    /// Lowercase protocol name as it appears in a URL scheme.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ws => "ws",
            Self::Wss => "wss",
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Canonical port for this protocol.
    pub fn port(self) -> u16 {
        match self {
            Self::Ws | Self::Http => 80,
            Self::Wss | Self::Https => 443,
        }
    }

    /// Look up a protocol by name, ignoring case.
    ///
    /// Fails with [`CredentialsError::UnsupportedProtocol`] listing every
    /// supported name when nothing matches.
    pub fn from_protocol(protocol: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(protocol))
            .ok_or_else(|| CredentialsError::UnsupportedProtocol {
                protocol: protocol.to_string(),
                supported: Self::supported_names(),
            })
    }

    /// Comma separated list of supported protocol names.
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for DefaultPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ports() {
        assert_eq!(DefaultPort::from_protocol("ws").unwrap().port(), 80);
        assert_eq!(DefaultPort::from_protocol("wss").unwrap().port(), 443);
        assert_eq!(DefaultPort::from_protocol("http").unwrap().port(), 80);
        assert_eq!(DefaultPort::from_protocol("https").unwrap().port(), 443);
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(DefaultPort::from_protocol("WSS").unwrap(), DefaultPort::Wss);
        assert_eq!(DefaultPort::from_protocol("Http").unwrap(), DefaultPort::Http);
    }

    #[test]
    fn test_unknown_protocol_lists_supported() {
        let err = DefaultPort::from_protocol("ftp").unwrap_err();
        match err {
            CredentialsError::UnsupportedProtocol {
                protocol,
                supported,
            } => {
                assert_eq!(protocol, "ftp");
                assert_eq!(supported, "ws, wss, http, https");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_protocol_is_unsupported() {
        assert!(DefaultPort::from_protocol("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DefaultPort::Https.to_string(), "https");
    }
}
