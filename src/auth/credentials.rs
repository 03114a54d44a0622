use tracing::debug;

use crate::config::{ConfigFile, keys, resolve_profile};
use crate::error::{AppError, AppResult};

use super::env::Env;

/// Value of `key` in `profile`, treating an empty or blank value as unset.
pub fn read_variable(file: &ConfigFile, key: &str, profile: &str) -> Option<String> {
    file.get(profile, key)
        .filter(|value| !value.trim().is_empty())
        .map(ToOwned::to_owned)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub profile: String,
    pub token: Option<String>,
    pub database_id: Option<String>,
    pub region: Option<String>,
    pub keyspace: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scb_folder: Option<String>,
}

impl Credentials {
    pub fn token(&self) -> AppResult<&str> {
        self.token.as_deref().ok_or_else(|| {
            AppError::Auth(format!(
                "no {} found for profile `{}`. run `astra setup` or set the environment variable",
                keys::ASTRA_DB_APPLICATION_TOKEN,
                self.profile
            ))
        })
    }

    /// An explicit token (e.g. from the command line) wins over every other source.
    pub fn with_token_override(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token.map(str::trim).filter(|token| !token.is_empty()) {
            self.token = Some(token.to_string());
        }
        self
    }
}

/// Resolves credentials from environment variables first, then the profile.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    env: Env,
}

impl CredentialResolver {
    pub fn new(env: Env) -> Self {
        Self { env }
    }

    pub fn from_system() -> Self {
        Self::new(Env::from_system())
    }

    pub fn resolve(&self, file: &ConfigFile, profile: Option<&str>) -> Credentials {
        let profile = resolve_profile(profile.unwrap_or_default());
        if !file.contains(&profile) {
            debug!(%profile, "profile not present in configuration file");
        }

        let lookup = |key: &str| self.lookup(file, key, &profile);
        Credentials {
            token: lookup(keys::ASTRA_DB_APPLICATION_TOKEN),
            database_id: lookup(keys::ASTRA_DB_ID),
            region: lookup(keys::ASTRA_DB_REGION),
            keyspace: lookup(keys::ASTRA_DB_KEYSPACE),
            client_id: lookup(keys::ASTRA_DB_CLIENT_ID),
            client_secret: lookup(keys::ASTRA_DB_CLIENT_SECRET),
            scb_folder: lookup(keys::ASTRA_DB_SCB_FOLDER),
            profile,
        }
    }

    fn lookup(&self, file: &ConfigFile, key: &str, profile: &str) -> Option<String> {
        if let Some(value) = self.env.get(key).filter(|value| !value.trim().is_empty()) {
            debug!(key, "using value from environment");
            return Some(value.to_string());
        }

        read_variable(file, key, profile)
    }
}
