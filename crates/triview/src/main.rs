//! Entry point for the triview triangle demo: parses the CLI, initialises
//! tracing, and hands the resulting renderer configuration to the draw loop.

mod cli;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();
    run::run(cli)
}
