use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the users_api module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersApiConfig {
    /// Whole years a user must have reached on the day a birth date is set.
    #[serde(default = "default_minimum_age")]
    pub minimum_age: u32,
}

impl Default for UsersApiConfig {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
        }
    }
}

fn default_minimum_age() -> u32 {
    18
}

impl From<&UsersApiConfig> for ServiceConfig {
    fn from(cfg: &UsersApiConfig) -> Self {
        Self {
            minimum_age: cfg.minimum_age,
        }
    }
}
