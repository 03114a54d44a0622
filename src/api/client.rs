use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult};

use super::DatabaseDirectory;
use super::databases;
use super::locator::DEVOPS_API_BASE_URL;
use super::models::{DatabaseView, OrganizationView};

#[derive(Debug, Clone)]
pub struct DevopsClient {
    http: Client,
    base_url: String,
}

impl DevopsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEVOPS_API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_databases(&self, token: &str) -> AppResult<Vec<DatabaseView>> {
        let query = databases::non_terminated_query();
        let resources: Vec<DatabaseResource> = self
            .get_json(databases::list_endpoint(), token, Some(&query))
            .await?;
        Ok(resources.into_iter().map(DatabaseResource::into_view).collect())
    }

    /// `Ok(None)` when no database has this id.
    pub async fn get_database(&self, token: &str, id: &str) -> AppResult<Option<DatabaseView>> {
        let endpoint = databases::database_endpoint(id);
        let url = self.endpoint_url(&endpoint)?;
        debug!(%url, "fetching database");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let resource: DatabaseResource = self.parse_json_response(response).await?;
        Ok(Some(resource.into_view()))
    }

    pub async fn find_databases_by_name(
        &self,
        token: &str,
        name: &str,
    ) -> AppResult<Vec<DatabaseView>> {
        let known = self.list_databases(token).await?;
        Ok(filter_by_name(known, name))
    }

    /// Looks the database up by id first, then by display name.
    pub async fn resolve_database(&self, token: &str, id_or_name: &str) -> AppResult<DatabaseView> {
        let needle = id_or_name.trim();
        if needle.is_empty() {
            return Err(AppError::InvalidInput(
                "database id or name must not be empty".to_string(),
            ));
        }

        if let Some(database) = self.get_database(token, needle).await? {
            return Ok(database);
        }

        let mut matches = self.find_databases_by_name(token, needle).await?;
        match matches.len() {
            0 => Err(AppError::InvalidInput(format!(
                "database `{needle}` not found"
            ))),
            1 => Ok(matches.remove(0)),
            count => Err(AppError::InvalidInput(format!(
                "there are {count} databases named `{needle}`, use the database id instead"
            ))),
        }
    }

    pub async fn current_organization(&self, token: &str) -> AppResult<OrganizationView> {
        let resource: OrganizationResource = self
            .get_json(databases::current_org_endpoint(), token, None)
            .await?;
        Ok(OrganizationView {
            id: resource.id,
            name: resource.name,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: &str,
        query: Option<&[(String, String)]>,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "GET");

        let mut request = self.http.get(url).bearer_auth(token);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        self.parse_json_response(response).await
    }

    fn endpoint_url(&self, endpoint: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(endpoint.trim_start_matches('/'));
        Ok(url)
    }

    async fn parse_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }
}

impl Default for DevopsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DatabaseDirectory for DevopsClient {
    async fn list_non_terminated(&self, token: &str) -> AppResult<Vec<DatabaseView>> {
        self.list_databases(token).await
    }
}

#[derive(Debug, Deserialize)]
struct DatabaseResource {
    id: String,
    info: DatabaseInfo,
    status: Option<String>,
}

impl DatabaseResource {
    fn into_view(self) -> DatabaseView {
        DatabaseView {
            id: self.id,
            name: self.info.name,
            region: self.info.region,
            keyspace: self.info.keyspace,
            status: self.status,
            cloud_provider: self.info.cloud_provider,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DatabaseInfo {
    #[serde(default)]
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    keyspace: String,
    #[serde(rename = "cloudProvider")]
    cloud_provider: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganizationResource {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct DevopsErrorEnvelope {
    errors: Vec<DevopsErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct DevopsErrorDetail {
    description: Option<String>,
    #[serde(rename = "ID")]
    id: Option<u64>,
}

fn filter_by_name(databases: Vec<DatabaseView>, name: &str) -> Vec<DatabaseView> {
    databases
        .into_iter()
        .filter(|database| database.name.eq_ignore_ascii_case(name))
        .collect()
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let message = parse_api_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            "no error details in response body".to_string()
        } else {
            body.to_string()
        }
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::Auth(format!(
            "devops api authorization failed ({status}): {message}. check ASTRA_DB_APPLICATION_TOKEN"
        ));
    }

    AppError::Api(format!("devops api request failed ({status}): {message}"))
}

fn parse_api_error_message(body: &str) -> Option<String> {
    let envelope = serde_json::from_str::<DevopsErrorEnvelope>(body).ok()?;
    let parts = envelope
        .errors
        .into_iter()
        .filter_map(|detail| match (detail.description, detail.id) {
            (Some(description), Some(id)) => Some(format!("{description} (id={id})")),
            (Some(description), None) => Some(description),
            (None, Some(id)) => Some(format!("id={id}")),
            (None, None) => None,
        })
        .collect::<Vec<_>>();

    if parts.is_empty() {
        return None;
    }

    Some(parts.join(", "))
}
