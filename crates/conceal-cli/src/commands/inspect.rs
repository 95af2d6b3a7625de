use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Prints the format of a concealed recording without unveiling it
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Source image that contains a concealed recording
    #[arg(
        short = 'i',
        long = "in",
        value_name = "image source file",
        required = true
    )]
    pub image: PathBuf,
}

impl InspectArgs {
    pub fn run(self) -> CliResult<()> {
        let header = conceal_core::commands::inspect(&self.image)?;
        let seconds = header.frame_count() as f64 / f64::from(header.sample_rate());

        println!("sample rate: {} Hz", header.sample_rate());
        println!("channels:    {}", header.channel_count());
        println!("bit depth:   {}", header.valid_bits());
        println!("frames:      {} ({seconds:.2}s)", header.frame_count());
        println!("payload:     {} bytes", header.payload_byte_length());

        Ok(())
    }
}
