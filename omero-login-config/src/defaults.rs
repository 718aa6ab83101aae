//! Default values for login credentials.
//!
//! Used both by [`LoginCredentials::new`](crate::LoginCredentials::new) and as
//! `#[serde(default = "crate::defaults::...")]` attributes on
//! [`LoginProfile`](crate::LoginProfile) fields.

/// Glacier2 router port used when a bare hostname is given without a port.
pub const DEFAULT_CONNECTION_PORT: u16 = 4064;

/// Group id meaning "use the user's default group".
pub const DEFAULT_GROUP_ID: i64 = -1;

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_true() -> bool {
    true
}

// ── Connection behaviour ───────────────────────────────────────────────────

pub fn compression() -> f32 {
    0.85
}

pub fn group_id() -> i64 {
    DEFAULT_GROUP_ID
}
