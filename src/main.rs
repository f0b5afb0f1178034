use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug};

use xmind2drawio::cli::Args;

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(args:?; "Parsed arguments");

    if let Err(err) = xmind2drawio::run(&args) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
