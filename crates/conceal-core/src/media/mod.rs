pub mod audio;
pub mod codec_options;
pub mod image;
pub mod payload;
mod primitives;
mod types;

use std::path::Path;

pub use audio::{NormalizedSampleBuffer, PcmAudio, PcmSpec};
pub use codec_options::{CodecOptions, RESERVED_WIDTH};
pub use image::PixelChannelStream;
pub use payload::{HeaderCodec, WaveHeader};
pub use primitives::*;
pub use types::*;

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}
