//! modelgate command-line interface
//!
//! Relays model answers as server-sent events on stdout; logs go to stderr.
//!
//! ```bash
//! modelgate query "What is a monad?"           # stream frames from the default provider
//! modelgate query --provider hunyuan "Hi"      # pick a configured provider
//! modelgate query '$CasibaseDryRun$ Hi'        # estimate tokens without calling out
//! modelgate embed "some text"                  # embedding vector summary
//! modelgate tools                              # merged MCP tool names
//! modelgate pricing                            # provider pricing note
//! ```

mod args;
mod commands;
mod logging;
mod router;

use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await
}
