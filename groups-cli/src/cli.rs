use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "groups-cli")]
#[clap(about = "Organise social profiles into groups", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
