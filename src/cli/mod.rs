pub mod hook;
pub mod render;

use clap::{Parser, Subcommand};

/// Statusline renderer for AI coding sessions
#[derive(Parser)]
#[command(name = "glint", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the statusline from a session payload on stdin
    Render(render::Args),

    /// Lifecycle hook entry points emitting a JSON envelope
    Hook(hook::Args),
}
