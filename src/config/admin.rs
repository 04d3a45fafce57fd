use std::env;

/// Secret gating the admin-registration endpoint (`POST /auth/admin/{secret}`).
#[derive(Clone, Debug)]
pub struct AdminConfig {
    pub secret: String,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("ADM_SECRET")
                .unwrap_or_else(|_| "admin-secret-change-in-production".to_string()),
        }
    }
}
