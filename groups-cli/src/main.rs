use clap::Parser;

mod cli;
mod commands;
mod error;
mod models;
mod util;

use crate::cli::Cli;
use crate::error::AppError;

fn main() {
    env_logger::init();

    let args = Cli::parse();

    if let Err(err) = args.command.run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
