//! `sitecraftd`: the draft lifecycle, config generation, and commit
//! coordinator service, exposed as a REST API.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    sitecraft_observe::tracing_setup::init_tracing(cli.config.enable_otel)?;

    let result = match cli.command {
        Commands::Serve => cli::serve(cli.config).await,
    };

    sitecraft_observe::tracing_setup::shutdown_tracing();
    result
}
