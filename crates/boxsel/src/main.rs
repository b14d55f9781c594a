// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod commands;
mod config;
mod imaging;
mod logging;
mod paths;
mod script;

use clap::Parser;

use crate::cli::Args;
use crate::logging::init_logging;
use crate::paths::default_log_path;

fn main() {
    let args = Args::parse();

    // init logging first
    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| default_log_path("boxsel.log"));

    if let Err(e) = init_logging(&log_path, args.verbose) {
        // logging should never block normal usage
        eprintln!("boxsel: failed to init logging: {e}");
    }

    if let Err(e) = commands::run::run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
