use super::codec_options::RESERVED_WIDTH;

/// bit mask covering the reserved low-order bits of a color channel
pub const RESERVED_MASK: u8 = (1 << RESERVED_WIDTH) - 1;

/// wrap a color channel value that carries stegano data
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct ColorChannel(pub u8);

impl From<u8> for ColorChannel {
    fn from(value: u8) -> Self {
        ColorChannel(value)
    }
}

/// mutable color channel for storing stegano data
#[derive(Debug, Eq, PartialEq)]
pub struct ColorChannelMut<'a>(pub &'a mut u8);

pub trait ClearReserved {
    /// zeroes the reserved bits, the high-order bits stay untouched
    fn clear_reserved(self);
}

pub trait HideChunk {
    /// stores one chunk of `RESERVED_WIDTH` bits in the reserved bits
    fn hide_chunk(self, chunk: u8);
}

pub trait UnveilChunk {
    fn unveil_chunk(self) -> u8;
}

impl ClearReserved for ColorChannelMut<'_> {
    fn clear_reserved(self) {
        *self.0 &= !RESERVED_MASK;
    }
}

impl HideChunk for ColorChannelMut<'_> {
    fn hide_chunk(self, chunk: u8) {
        *self.0 = (*self.0 & !RESERVED_MASK) | (chunk & RESERVED_MASK);
    }
}

impl UnveilChunk for ColorChannel {
    fn unveil_chunk(self) -> u8 {
        self.0 & RESERVED_MASK
    }
}
