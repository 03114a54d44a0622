//! Per-database endpoint URLs derived from a database id and region.

use crate::error::{AppError, AppResult};

use super::models::DatabaseEndpoints;

pub const DEVOPS_API_BASE_URL: &str = "https://api.astra.datastax.com";

const DATABASE_HOST_SUFFIX: &str = ".apps.astra.datastax.com";

pub fn rest_endpoint(db_id: &str, region: &str) -> AppResult<String> {
    Ok(format!("{}/api/rest", database_base_url(db_id, region)?))
}

pub fn graphql_endpoint(db_id: &str, region: &str) -> AppResult<String> {
    Ok(format!("{}/api/graphql", database_base_url(db_id, region)?))
}

pub fn graphql_schema_endpoint(db_id: &str, region: &str) -> AppResult<String> {
    Ok(format!("{}-schema", graphql_endpoint(db_id, region)?))
}

pub fn graphql_keyspace_endpoint(db_id: &str, region: &str, keyspace: &str) -> AppResult<String> {
    let keyspace = require("keyspace", keyspace)?;
    Ok(format!("{}/{keyspace}", graphql_endpoint(db_id, region)?))
}

pub fn endpoints(db_id: &str, region: &str) -> AppResult<DatabaseEndpoints> {
    Ok(DatabaseEndpoints {
        rest: rest_endpoint(db_id, region)?,
        graphql: graphql_endpoint(db_id, region)?,
        graphql_schema: graphql_schema_endpoint(db_id, region)?,
    })
}

fn database_base_url(db_id: &str, region: &str) -> AppResult<String> {
    let db_id = require("database id", db_id)?;
    let region = require("region", region)?;
    Ok(format!("https://{db_id}-{region}{DATABASE_HOST_SUFFIX}"))
}

fn require<'a>(name: &str, value: &'a str) -> AppResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::InvalidInput(format!("{name} must not be empty")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_rest_endpoint() {
        assert_eq!(
            rest_endpoint("d1", "eu-west-1").expect("endpoint"),
            "https://d1-eu-west-1.apps.astra.datastax.com/api/rest"
        );
    }

    #[test]
    fn builds_graphql_variants() {
        assert_eq!(
            graphql_schema_endpoint("d1", "us-east1").expect("endpoint"),
            "https://d1-us-east1.apps.astra.datastax.com/api/graphql-schema"
        );
        assert_eq!(
            graphql_keyspace_endpoint("d1", "us-east1", "ks").expect("endpoint"),
            "https://d1-us-east1.apps.astra.datastax.com/api/graphql/ks"
        );
    }

    #[test]
    fn rejects_blank_region() {
        let error = rest_endpoint("d1", " ").unwrap_err();
        assert!(matches!(error, AppError::InvalidInput(_)));
    }
}
