use serde::Serialize;

use crate::auth::read_variable;
use crate::cli::{ConfigCommand, ConfigDefaultArgs, ConfigGetArgs, ConfigSetArgs};
use crate::config::{ConfigFile, DEFAULT_PROFILE, keys};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub has_token: bool,
    pub database_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue {
    pub section: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct DefaultChange {
    pub profile: String,
    pub token_from: String,
}

pub async fn run(ctx: &AppContext, command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::List => list(ctx),
        ConfigCommand::Get(args) => get(ctx, args),
        ConfigCommand::Set(args) => set(ctx, args),
        ConfigCommand::Create => create(ctx).await,
        ConfigCommand::Default(args) => make_default(ctx, args),
    }
}

fn list(ctx: &AppContext) -> AppResult<()> {
    let file = ctx.store.load()?;
    let profiles = summarize(&file);

    if profiles.is_empty() {
        return ctx.output.emit(
            &format!("0 profiles in {}", ctx.store.path().display()),
            &profiles,
        );
    }

    let lines = profiles
        .iter()
        .map(|profile| {
            let marker = if profile.name == ctx.profile { " *" } else { "" };
            match profile.database_id.as_deref() {
                Some(id) => format!("[{}]{marker} db: {id}", profile.name),
                None => format!("[{}]{marker}", profile.name),
            }
        })
        .collect::<Vec<_>>();
    ctx.output.emit_lines(&lines, &profiles)
}

fn get(ctx: &AppContext, args: ConfigGetArgs) -> AppResult<()> {
    let file = ctx.store.load()?;
    let section = file.section(&args.section).ok_or_else(|| {
        AppError::InvalidInput(format!("section [{}] not found", args.section))
    })?;

    let Some(key) = args.key else {
        let values = section
            .iter()
            .map(|(key, value)| ConfigValue {
                section: args.section.clone(),
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect::<Vec<_>>();
        let lines = values
            .iter()
            .map(|entry| format!("{}={}", entry.key, entry.value))
            .collect::<Vec<_>>();
        return ctx.output.emit_lines(&lines, &values);
    };

    let value = section.get(&key).ok_or_else(|| {
        AppError::InvalidInput(format!("key `{key}` is not set in [{}]", args.section))
    })?;
    let entry = ConfigValue {
        section: args.section,
        key,
        value: value.to_string(),
    };
    ctx.output.emit(&entry.value, &entry)
}

fn set(ctx: &AppContext, args: ConfigSetArgs) -> AppResult<()> {
    ctx.store.save_value(&args.section, &args.key, &args.value)?;

    let text = format!("[{}] {} updated", args.section, args.key);
    let entry = ConfigValue {
        section: args.section,
        key: args.key,
        value: args.value,
    };
    ctx.output.emit(&text, &entry)
}

async fn create(ctx: &AppContext) -> AppResult<()> {
    let token = ctx.access_token()?;
    let updates = ctx.store.create(&token, &ctx.devops_client).await?;

    let profiles = summarize(&updates);
    let text = format!(
        "{} profiles written to {}",
        profiles.len(),
        ctx.store.path().display()
    );
    ctx.output.emit(&text, &profiles)
}

fn make_default(ctx: &AppContext, args: ConfigDefaultArgs) -> AppResult<()> {
    let file = ctx.store.load()?;
    let token = default_token_source(&file, &args.section)?;
    ctx.store
        .save_value(DEFAULT_PROFILE, keys::ASTRA_DB_APPLICATION_TOKEN, &token)?;

    let text = format!("[{DEFAULT_PROFILE}] now uses the token of [{}]", args.section);
    let change = DefaultChange {
        profile: DEFAULT_PROFILE.to_string(),
        token_from: args.section,
    };
    ctx.output.emit(&text, &change)
}

fn default_token_source(file: &ConfigFile, section: &str) -> AppResult<String> {
    if !file.contains(section) {
        return Err(AppError::InvalidInput(format!(
            "section [{section}] not found"
        )));
    }

    read_variable(file, keys::ASTRA_DB_APPLICATION_TOKEN, section).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "section [{section}] has no {}",
            keys::ASTRA_DB_APPLICATION_TOKEN
        ))
    })
}

fn summarize(file: &ConfigFile) -> Vec<ProfileSummary> {
    file.section_names()
        .map(|name| ProfileSummary {
            name: name.to_string(),
            has_token: read_variable(file, keys::ASTRA_DB_APPLICATION_TOKEN, name).is_some(),
            database_id: read_variable(file, keys::ASTRA_DB_ID, name),
        })
        .collect()
}
