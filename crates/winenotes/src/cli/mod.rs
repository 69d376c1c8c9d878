//! Command-line entry point: parse flags, set up logging, resolve
//! configuration, then hand off to the server or an offline command.

mod logging;
mod render;
mod setup;

use anyhow::Context;
use clap::Parser;
use winenotesapp::config::WineConfig;
use winenotesapp::init::{initialize, WineContext};

use crate::server::WineServer;
use setup::{Cli, Commands};

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    });

    let default_level = match command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    logging::init(default_level, cli.verbose);

    let mut config = WineConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(initialize(config))
        }
        Commands::List => {
            let ctx = initialize(config);
            let wines = ctx.api.list_wines()?;
            println!("{}", serde_json::to_string_pretty(&wines)?);
            Ok(())
        }
        Commands::Doctor { fix } => {
            let ctx = initialize(config);
            let result = ctx.api.doctor(fix)?;
            render::print_messages(&result.messages);
            Ok(())
        }
    }
}

fn serve(ctx: WineContext) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(WineServer::new(ctx).serve())
}
