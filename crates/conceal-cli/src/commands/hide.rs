use std::path::PathBuf;

use clap::Args;
use conceal_core::CodecOptions;
use log::info;

use crate::CliResult;

/// Conceals a WAV recording in an image, the result is always a PNG image
#[derive(Args, Debug)]
pub struct HideArgs {
    /// Carrier image such as PNG or JPEG, used readonly.
    #[arg(short = 'i', long = "in", value_name = "image file", required = true)]
    pub image: PathBuf,

    /// WAV recording with integer samples of 8, 16, 24 or 32 bits
    #[arg(short = 'a', long = "audio", value_name = "audio file", required = true)]
    pub audio: PathBuf,

    /// Final image will be stored as file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// Reads the audio back from the final image and stores it as WAV file
    #[arg(long = "recovered", value_name = "recovered audio file")]
    pub recovered: Option<PathBuf>,
}

impl HideArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let recording = conceal_core::commands::conceal(
            &self.image,
            &self.audio,
            &self.write_to_file,
            self.recovered.as_deref(),
            &options,
        )?;
        info!("audio concealed in {:?}", recording.output_image_path);

        Ok(())
    }
}
