pub mod header;
pub mod packer;

pub use header::{HeaderCodec, WaveHeader, HEADER_CHANNELS};
pub use packer::{chunk_count, PayloadPacker};
