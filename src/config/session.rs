use std::env;

/// Session cookie and CSRF settings.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Server-wide secret mixed into CSRF token hashes.
    pub secret: String,
    /// Marks session and CSRF cookies `Secure` (HTTPS only).
    pub cookie_secure: bool,
    /// Toggles CSRF enforcement; disabled for end-to-end test runs.
    pub csrf_enabled: bool,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "stupid session secret".to_string()),
            cookie_secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            csrf_enabled: env::var("CSRF_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}
