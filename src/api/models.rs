use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseView {
    pub id: String,
    pub name: String,
    pub region: String,
    pub keyspace: String,
    pub status: Option<String>,
    pub cloud_provider: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationView {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseEndpoints {
    pub rest: String,
    pub graphql: String,
    pub graphql_schema: String,
}
