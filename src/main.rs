mod cli;
mod config;
mod git;
mod render;
mod session;
mod tokens;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    // Statusline output goes to stdout; diagnostics stay on stderr and are
    // silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => cli::render::run(args),
        Command::Hook(args) => cli::hook::run(args),
    }
}
