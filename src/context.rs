use std::path::PathBuf;

use crate::api::DevopsClient;
use crate::auth::{CredentialResolver, Credentials};
use crate::config::{self, ConfigStore};
use crate::error::AppResult;
use crate::output::Output;

#[derive(Debug)]
pub struct AppContext {
    pub profile: String,
    pub token_override: Option<String>,
    pub store: ConfigStore,
    pub resolver: CredentialResolver,
    pub devops_client: DevopsClient,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(
        profile: String,
        config_file: Option<PathBuf>,
        token: Option<String>,
        json: bool,
    ) -> AppResult<Self> {
        let profile = config::resolve_profile(&profile);
        let store = match config_file {
            Some(path) => ConfigStore::at(path),
            None => ConfigStore::discover()?,
        };

        Ok(Self {
            profile,
            token_override: token,
            store,
            resolver: CredentialResolver::from_system(),
            devops_client: DevopsClient::new(),
            output: Output::new(json),
        })
    }

    pub fn credentials(&self) -> AppResult<Credentials> {
        let file = self.store.load()?;
        Ok(self
            .resolver
            .resolve(&file, Some(self.profile.as_str()))
            .with_token_override(self.token_override.as_deref()))
    }

    pub fn access_token(&self) -> AppResult<String> {
        let credentials = self.credentials()?;
        Ok(credentials.token()?.to_string())
    }
}
