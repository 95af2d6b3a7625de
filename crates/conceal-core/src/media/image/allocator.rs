//! Makes room for stegano data by zeroing the reserved low-order bits
//! of every color channel.

use super::PixelChannelStream;
use crate::media::ClearReserved;

/// clears the reserved bits of all channels of the carrier, high-order bits are kept as they are
pub fn clear_reserved_bits(carrier: &mut PixelChannelStream) {
    carrier.iter_mut().for_each(ClearReserved::clear_reserved);
}
