use clap::Parser;
use astrarc::cli::{Cli, Command, ConfigCommand, DbCommand};

#[test]
fn parses_setup_with_global_token() {
    let cli = Cli::try_parse_from(["astra", "--token", "AstraCS:t", "setup", "--name", "dev"])
        .expect("cli parse should work");
    assert_eq!(cli.token.as_deref(), Some("AstraCS:t"));
    match cli.command {
        Command::Setup(setup) => {
            assert_eq!(setup.name.as_deref(), Some("dev"));
            assert!(!setup.default);
        }
        _ => panic!("expected setup command"),
    }
}

#[test]
fn parses_config_set() {
    let cli = Cli::try_parse_from(["astra", "config", "set", "prod", "ASTRA_DB_ID", "d1"])
        .expect("cli parse should work");
    match cli.command {
        Command::Config(config) => match config.command {
            ConfigCommand::Set(set) => {
                assert_eq!(set.section, "prod");
                assert_eq!(set.key, "ASTRA_DB_ID");
                assert_eq!(set.value, "d1");
            }
            _ => panic!("expected config set"),
        },
        _ => panic!("expected config command"),
    }
}

#[test]
fn parses_config_get_without_key() {
    let cli = Cli::try_parse_from(["astra", "config", "get", "prod"]).expect("cli parse should work");
    match cli.command {
        Command::Config(config) => match config.command {
            ConfigCommand::Get(get) => {
                assert_eq!(get.section, "prod");
                assert!(get.key.is_none());
            }
            _ => panic!("expected config get"),
        },
        _ => panic!("expected config command"),
    }
}

#[test]
fn parses_db_get_with_profile_and_config_file() {
    let cli = Cli::try_parse_from([
        "astra",
        "db",
        "get",
        "mydb",
        "--profile",
        "prod",
        "--config-file",
        "/tmp/rc",
        "--json",
    ])
    .expect("cli parse should work");
    assert_eq!(cli.profile, "prod");
    assert_eq!(cli.config_file.as_deref(), Some(std::path::Path::new("/tmp/rc")));
    assert!(cli.json);
    match cli.command {
        Command::Db(db) => match db.command {
            DbCommand::Get(get) => assert_eq!(get.db, "mydb"),
            _ => panic!("expected db get"),
        },
        _ => panic!("expected db command"),
    }
}

#[test]
fn profile_defaults_to_default() {
    let cli = Cli::try_parse_from(["astra", "-vv", "config", "list"]).expect("cli parse should work");
    assert_eq!(cli.profile, "default");
    assert_eq!(cli.verbose, 2);
}
