pub mod allocator;
mod channel_stream;
mod iterators;

pub use allocator::clear_reserved_bits;
pub use channel_stream::{PixelChannelStream, CHANNELS_PER_PIXEL};
