use clap::{Parser, Subcommand};
use conceal_core::media::codec_options::DEFAULT_BATCH_SIZE;

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Experimental: color channels written between two progress reports
    #[arg(long = "x-batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Inspect(inspect::InspectArgs),
}
