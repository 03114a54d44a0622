use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        config_file,
        token,
        json,
        verbose: _,
        command,
    } = cli;

    let ctx = AppContext::bootstrap(profile, config_file, token, json)?;

    match command {
        Command::Setup(args) => commands::setup::run(&ctx, args).await,
        Command::Config(args) => commands::config::run(&ctx, args.command).await,
        Command::Db(args) => commands::db::run(&ctx, args.command).await,
    }
}
