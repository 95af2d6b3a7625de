use std::path::PathBuf;

use clap::Args;
use conceal_core::CodecOptions;
use log::info;

use crate::CliResult;

/// Unveils a concealed recording from an image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains a concealed recording
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub image: PathBuf,

    /// The recording will be stored as WAV file
    #[arg(short = 'o', long = "out", value_name = "audio file", required = true)]
    pub audio_file: PathBuf,
}

impl UnveilArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let header = conceal_core::commands::reveal(&self.image, &self.audio_file, &options)?;
        info!(
            "{} frames unveiled into {:?}",
            header.frame_count(),
            self.audio_file
        );

        Ok(())
    }
}
