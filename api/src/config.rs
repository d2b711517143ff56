//! Service configuration from the environment.

use serde::{Deserialize, Serialize};

/// Tunable settings for the resource services.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Minimum accepted password length for registration and password
    /// changes.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

fn default_min_password_len() -> usize {
    8
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_password_len: default_min_password_len(),
        }
    }
}

impl ServiceConfig {
    /// Read the configuration from environment variables, falling back to
    /// the defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let min_password_len = std::env::var("NOTES_MIN_PASSWORD_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_min_password_len);

        Self { min_password_len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test owns the variable end to end: env mutations are process-wide
    // and must not interleave with a parallel test runner.
    #[test]
    fn test_from_env_override_and_fallbacks() {
        std::env::remove_var("NOTES_MIN_PASSWORD_LEN");
        assert_eq!(ServiceConfig::from_env().min_password_len, 8);
        assert_eq!(ServiceConfig::from_env(), ServiceConfig::default());

        std::env::set_var("NOTES_MIN_PASSWORD_LEN", "12");
        assert_eq!(ServiceConfig::from_env().min_password_len, 12);

        // Unparseable values fall back to the default.
        std::env::set_var("NOTES_MIN_PASSWORD_LEN", "plenty");
        assert_eq!(ServiceConfig::from_env().min_password_len, 8);

        std::env::remove_var("NOTES_MIN_PASSWORD_LEN");
    }
}
