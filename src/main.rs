#![deny(clippy::all, clippy::pedantic)]
//! nbclear — strip outputs and execution counts from Jupyter notebooks.

use clap::Parser;

use nbclear::cli::{Cli, OutputCtx, write_error};
use nbclear::commands;
use nbclear::types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);

    match commands::run(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_notebook_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
