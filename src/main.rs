//! timecamp-mcp - TimeCamp time tracking as assistant tools and resources

use clap::Parser;
use log::LevelFilter;

mod cli;
mod output;

use cli::{Cli, Commands};
use timecamp_mcp::error::{Result, ToolFailure};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(&cli).await {
        log::debug!("Command failed: {:?}", err);
        let failure = ToolFailure::from(&err);
        if output::print_failure(&failure, cli.format).is_err() {
            eprintln!("Error: {}", err);
        }
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG`; `--debug` forces debug for this crate.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.target(env_logger::Target::Stderr);
    if debug {
        builder.filter_module("timecamp_mcp", LevelFilter::Debug);
    }
    builder.init();
}

async fn run(cli: &Cli) -> Result<()> {
    let config = cli.config.as_deref();

    match &cli.command {
        Commands::Read { uri } => cli::resource::read(uri, cli.format, config, cli.no_cache).await,
        Commands::Call { tool, args } => {
            cli::tool::call(tool, args, cli.format, config, cli.no_cache).await
        }
        Commands::Resources => cli::resource::list(cli.format),
        Commands::Tools => cli::tool::list(cli.format),
        Commands::Serve => cli::serve::run(config, cli.no_cache).await,
    }
}
