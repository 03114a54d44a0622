use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = astrarc::cli::Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = astrarc::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "astrarc=warn",
        1 => "astrarc=info",
        2 => "astrarc=debug",
        _ => "astrarc=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
