use serde::Serialize;

use crate::api::locator;
use crate::api::models::{DatabaseEndpoints, DatabaseView};
use crate::cli::{DbCommand, DbGetArgs};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::output::OutputMode;

#[derive(Debug, Serialize)]
pub struct DatabaseDetails {
    #[serde(flatten)]
    pub database: DatabaseView,
    pub endpoints: Option<DatabaseEndpoints>,
}

pub async fn run(ctx: &AppContext, command: DbCommand) -> AppResult<()> {
    match command {
        DbCommand::List => list(ctx).await,
        DbCommand::Get(args) => get(ctx, args).await,
    }
}

async fn list(ctx: &AppContext) -> AppResult<()> {
    let token = ctx.access_token()?;
    let databases = ctx.devops_client.list_databases(&token).await?;

    if ctx.output.mode() == OutputMode::Text && databases.is_empty() {
        println!("0 databases");
        return Ok(());
    }

    let lines = databases
        .iter()
        .enumerate()
        .map(|(index, database)| format_row(index, database))
        .collect::<Vec<_>>();
    ctx.output.emit_lines(&lines, &databases)
}

async fn get(ctx: &AppContext, args: DbGetArgs) -> AppResult<()> {
    let token = ctx.access_token()?;
    let database = ctx.devops_client.resolve_database(&token, &args.db).await?;
    let endpoints = locator::endpoints(&database.id, &database.region).ok();

    let mut lines = vec![
        format!("id: {}", database.id),
        format!("name: {}", database.name),
        format!("region: {}", database.region),
        format!("keyspace: {}", database.keyspace),
        format!("status: {}", database.status.as_deref().unwrap_or("(unknown)")),
    ];
    if let Some(endpoints) = endpoints.as_ref() {
        lines.push(format!("rest: {}", endpoints.rest));
        lines.push(format!("graphql: {}", endpoints.graphql));
    }

    let details = DatabaseDetails {
        database,
        endpoints,
    };
    ctx.output.emit_lines(&lines, &details)
}

fn format_row(index: usize, database: &DatabaseView) -> String {
    format!(
        "{}. {} ({}) region: {} status: {}",
        index + 1,
        database.name,
        database.id,
        database.region,
        database.status.as_deref().unwrap_or("(unknown)")
    )
}
