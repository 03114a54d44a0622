use std::path::Path;

use tracing::info;

use crate::api::{DatabaseDirectory, DatabaseView};
use crate::error::AppResult;

use super::keys;
use super::profile::DEFAULT_PROFILE;
use super::rc_file::{ConfigFile, Section};
use super::store::{self, ConfigStore};

impl ConfigStore {
    /// Writes one profile per database visible to `token`, plus `default`.
    pub async fn create<D: DatabaseDirectory>(
        &self,
        token: &str,
        directory: &D,
    ) -> AppResult<ConfigFile> {
        self.create_to(token, directory, self.path()).await
    }

    pub async fn create_to<D: DatabaseDirectory>(
        &self,
        token: &str,
        directory: &D,
        destination: &Path,
    ) -> AppResult<ConfigFile> {
        let databases = directory.list_non_terminated(token).await?;
        info!(count = databases.len(), "found non-terminated databases");

        let updates = seed_profiles(token, &databases);
        store::save_to(&updates, destination)?;
        Ok(updates)
    }
}

pub fn seed_profiles(token: &str, databases: &[DatabaseView]) -> ConfigFile {
    let mut updates = ConfigFile::new();

    let mut default = Section::from_iter([(keys::ASTRA_DB_APPLICATION_TOKEN, token)]);
    if let Some(first) = databases.first() {
        default.overlay(&database_section(first, token));
    }
    updates.insert_section(DEFAULT_PROFILE, default);

    for database in databases {
        updates.insert_section(database.name.as_str(), database_section(database, token));
    }

    updates
}

fn database_section(database: &DatabaseView, token: &str) -> Section {
    Section::from_iter([
        (keys::ASTRA_DB_ID, database.id.as_str()),
        (keys::ASTRA_DB_REGION, database.region.as_str()),
        (keys::ASTRA_DB_KEYSPACE, database.keyspace.as_str()),
        (keys::ASTRA_DB_APPLICATION_TOKEN, token),
        (keys::ASTRA_DB_CLIENT_ID, ""),
        (keys::ASTRA_DB_CLIENT_SECRET, ""),
        (keys::ASTRA_DB_SCB_FOLDER, ""),
    ])
}
