//! `${VAR}` expansion inside login profile fields.
//!
//! Expansion runs on field values after the YAML is parsed, so whatever a
//! variable holds (`#`, `{`, `: ` ...) ends up in the field unchanged.
//! Only `OMERO_*` variables and a few identity variables are expanded unless
//! the profile sets `allow_all_env_vars: true`.
//!
//! Syntax: `${NAME}`, `${NAME:-fallback}`, and `$$` for a literal `$`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `$$`, or `${NAME}` with an optional `:-fallback`.
static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\$|\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\})")
        .expect("profile variable regex is a compile-time constant and must be valid")
});

/// Non-`OMERO_*` variables a profile may reference.
pub const ALLOWED_ENV_VARS: &[&str] = &["HOME", "USER", "USERNAME", "LOGNAME", "HOSTNAME"];

/// Whether a profile may expand `name` without `allow_all_env_vars`.
pub fn is_env_var_allowed(name: &str) -> bool {
    name.starts_with("OMERO_") || ALLOWED_ENV_VARS.contains(&name)
}

/// Expand variables in `value` from the process environment.
pub fn expand(value: &str, allow_all: bool) -> String {
    expand_with(value, allow_all, &|name| std::env::var(name).ok())
}

/// Expand variables in `value`, resolving names through `lookup`.
///
/// A reference that is not allowed, or that is unset and has no fallback,
/// is left in place. Expanded text is not scanned again.
pub fn expand_with(
    value: &str,
    allow_all: bool,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> String {
    VARIABLE
        .replace_all(value, |caps: &Captures| {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                return "$".to_string();
            };
            if !allow_all && !is_env_var_allowed(name) {
                log::warn!(
                    "Profile references ${{{name}}}, which is not an OMERO_* variable; \
                     left unexpanded (set allow_all_env_vars: true to permit it)"
                );
                return caps[0].to_string();
            }
            lookup(name)
                .or_else(|| caps.get(2).map(|m| m.as_str().to_string()))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "OMERO_PASSWORD" => Some("p@ss #1 {x}".to_string()),
            "OMERO_HOST" => Some("omero.example.org".to_string()),
            "SOME_PRIVATE_TOKEN" => Some("leaked".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_allowlist() {
        assert!(is_env_var_allowed("HOME"));
        assert!(is_env_var_allowed("OMERO_PASSWORD"));
        assert!(!is_env_var_allowed("AWS_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn test_value_inserted_verbatim() {
        assert_eq!(expand_with("${OMERO_PASSWORD}", false, &env), "p@ss #1 {x}");
    }

    #[test]
    fn test_embedded_reference() {
        assert_eq!(
            expand_with("wss://${OMERO_HOST}/omero-ws", false, &env),
            "wss://omero.example.org/omero-ws"
        );
    }

    #[test]
    fn test_fallback_for_unset() {
        assert_eq!(expand_with("${OMERO_PORT_HOST:-localhost}", false, &env), "localhost");
    }

    #[test]
    fn test_unset_without_fallback_left_in_place() {
        assert_eq!(expand_with("${OMERO_UNSET}", false, &env), "${OMERO_UNSET}");
    }

    #[test]
    fn test_disallowed_variable_not_expanded() {
        assert_eq!(
            expand_with("${SOME_PRIVATE_TOKEN:-x}", false, &env),
            "${SOME_PRIVATE_TOKEN:-x}"
        );
        assert_eq!(expand_with("${SOME_PRIVATE_TOKEN}", true, &env), "leaked");
    }

    #[test]
    fn test_dollar_escape() {
        assert_eq!(expand_with("$${OMERO_HOST}", false, &env), "${OMERO_HOST}");
        assert_eq!(expand_with("a$$b", false, &env), "a$b");
    }

    #[test]
    fn test_expanded_text_not_rescanned() {
        let lookup = |_: &str| Some("${OMERO_HOST}".to_string());
        assert_eq!(expand_with("${OMERO_X}", false, &lookup), "${OMERO_HOST}");
    }

    #[test]
    fn test_plain_value_untouched() {
        assert_eq!(expand_with("plain $ value", false, &env), "plain $ value");
    }
}
