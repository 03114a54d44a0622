use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "astra", version, about = "Manage ~/.astrarc profiles and query Astra databases")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Profile name to use"
    )]
    pub profile: String,
    #[arg(long, global = true, help = "Configuration file (defaults to ~/.astrarc)")]
    pub config_file: Option<PathBuf>,
    #[arg(long, global = true, help = "Application token, overrides profile and environment")]
    pub token: Option<String>,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Setup(SetupArgs),
    Config(ConfigArgs),
    Db(DbArgs),
}

#[derive(Debug, Args)]
pub struct SetupArgs {
    #[arg(long, help = "Section name (defaults to the organization name)")]
    pub name: Option<String>,
    #[arg(long, help = "Also make this token the default")]
    pub default: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    List,
    Get(ConfigGetArgs),
    Set(ConfigSetArgs),
    Create,
    Default(ConfigDefaultArgs),
}

#[derive(Debug, Args)]
pub struct ConfigGetArgs {
    #[arg(help = "Section name")]
    pub section: String,
    #[arg(help = "Key within the section")]
    pub key: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigSetArgs {
    #[arg(help = "Section name")]
    pub section: String,
    #[arg(help = "Key within the section")]
    pub key: String,
    #[arg(help = "Value to store")]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct ConfigDefaultArgs {
    #[arg(help = "Section whose token becomes the default")]
    pub section: String,
}

#[derive(Debug, Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    List,
    Get(DbGetArgs),
}

#[derive(Debug, Args)]
pub struct DbGetArgs {
    #[arg(help = "Database id or name")]
    pub db: String,
}
