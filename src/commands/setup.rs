use std::io::{self, IsTerminal, Write};

use serde::Serialize;

use crate::cli::SetupArgs;
use crate::config::{ConfigFile, DEFAULT_PROFILE, keys};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

const TOKEN_PREFIX: &str = "AstraCS:";

#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub section: String,
    pub organization: String,
    pub default_updated: bool,
    pub path: String,
}

pub async fn run(ctx: &AppContext, args: SetupArgs) -> AppResult<()> {
    let token = match ctx.token_override.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => prompt_token()?,
    };
    validate_token_format(&token)?;

    let organization = ctx.devops_client.current_organization(&token).await?;
    let section = section_name(args.name.as_deref(), &organization.name);

    let existing = ctx.store.load()?;
    let updates = setup_updates(&existing, &section, &token, args.default);
    let default_updated = updates.contains(DEFAULT_PROFILE);
    ctx.store.save(&updates)?;

    let result = SetupResult {
        section,
        organization: organization.name,
        default_updated,
        path: ctx.store.path().display().to_string(),
    };
    let mut lines = vec![format!(
        "valid token, organization is `{}`; saved section [{}] to {}",
        result.organization, result.section, result.path
    )];
    if result.default_updated {
        lines.push(format!("[{DEFAULT_PROFILE}] now uses this token"));
    }
    ctx.output.emit_lines(&lines, &result)
}

/// The first section ever written also becomes `default`.
fn setup_updates(existing: &ConfigFile, section: &str, token: &str, make_default: bool) -> ConfigFile {
    let mut updates = ConfigFile::new();
    if existing.is_empty() || make_default {
        updates.set(DEFAULT_PROFILE, keys::ASTRA_DB_APPLICATION_TOKEN, token);
    }
    updates.set(section, keys::ASTRA_DB_APPLICATION_TOKEN, token);
    updates
}

fn section_name(requested: Option<&str>, organization: &str) -> String {
    requested
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(organization)
        .to_string()
}

fn validate_token_format(token: &str) -> AppResult<()> {
    if !token.starts_with(TOKEN_PREFIX) {
        return Err(AppError::InvalidInput(format!(
            "token should start with `{TOKEN_PREFIX}`"
        )));
    }
    Ok(())
}

fn prompt_token() -> AppResult<String> {
    if !io::stdin().is_terminal() {
        return Err(AppError::Config(
            "no token provided. pass --token or run `astra setup` in an interactive terminal"
                .to_string(),
        ));
    }

    println!("Create a token at https://awesome-astra.github.io/docs/pages/astra/create-token/");
    loop {
        let mut stdout = io::stdout();
        write!(stdout, "Enter a token (eg: AstraCS...): ")?;
        stdout.flush()?;

        let mut value = String::new();
        io::stdin().read_line(&mut value)?;
        let value = value.trim();
        if validate_token_format(value).is_ok() {
            return Ok(value.to_string());
        }
        eprintln!("token should start with `{TOKEN_PREFIX}`");
    }
}
