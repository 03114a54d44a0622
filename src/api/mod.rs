pub mod client;
pub mod databases;
pub mod locator;
pub mod models;

pub use client::DevopsClient;
pub use models::{DatabaseView, OrganizationView};

use crate::error::AppResult;

/// Source of the databases a token can see. `ConfigStore::create` consumes it.
#[allow(async_fn_in_trait)]
pub trait DatabaseDirectory {
    async fn list_non_terminated(&self, token: &str) -> AppResult<Vec<DatabaseView>>;
}
