//! # Schema limits — the `[schema]` table of `signup.toml`
//!
//! ```toml
//! email_domain = "@neon.com.br"   # required email suffix
//! max_avatar_bytes = 2097152      # avatar must be strictly smaller
//! min_password_chars = 10
//! min_techs = 2
//! ```
//!
//! Every field is defaulted, so a missing or empty table is the default
//! schema. [`crate::Schema::new`] turns a [`SchemaConfig`] into rules.

use serde::{Deserialize, Serialize};

/// Tunable limits of the signup schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
    #[serde(default = "default_max_avatar_bytes")]
    pub max_avatar_bytes: u64,
    #[serde(default = "default_min_password_chars")]
    pub min_password_chars: usize,
    #[serde(default = "default_min_techs")]
    pub min_techs: usize,
}

fn default_email_domain() -> String {
    "@neon.com.br".to_string()
}

fn default_max_avatar_bytes() -> u64 {
    2 * 1024 * 1024
}

fn default_min_password_chars() -> usize {
    10
}

fn default_min_techs() -> usize {
    2
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
            max_avatar_bytes: default_max_avatar_bytes(),
            min_password_chars: default_min_password_chars(),
            min_techs: default_min_techs(),
        }
    }
}

impl SchemaConfig {
    /// Builder method to set the required email suffix.
    pub fn with_email_domain(mut self, domain: impl Into<String>) -> Self {
        self.email_domain = domain.into();
        self
    }

    /// Builder method to set the minimum number of techs.
    pub fn with_min_techs(mut self, min: usize) -> Self {
        self.min_techs = min;
        self
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
