//! User identity half of the login credentials.

/// Username (or session id) and password.
///
/// When `username` holds a session id the connection service ignores the
/// password.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserCredentials {
    username: String,
    password: String,
}

impl UserCredentials {
    /// Create credentials from a username and password, stored verbatim.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let user = UserCredentials::default();
        assert_eq!(user.username(), "");
        assert_eq!(user.password(), "");
    }

    #[test]
    fn test_setters() {
        let mut user = UserCredentials::default();
        user.set_username("root");
        user.set_password("omero");
        assert_eq!(user, UserCredentials::new("root", "omero"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let user = UserCredentials::new("root", "s3cret");
        let debug = format!("{user:?}");
        assert!(debug.contains("root"));
        assert!(!debug.contains("s3cret"));
    }
}
