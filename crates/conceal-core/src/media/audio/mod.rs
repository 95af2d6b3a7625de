pub mod normalizer;
mod pcm;
pub mod wav;

pub use normalizer::{denormalize, normalize, NormalizedSampleBuffer, SUPPORTED_BIT_DEPTHS};
pub use pcm::{PcmAudio, PcmSpec};
