//! Checks whether a payload fits into a carrier before anything is written.

use crate::error::ConcealError;
use crate::media::image::CHANNELS_PER_PIXEL;
use crate::media::payload::{chunk_count, HEADER_CHANNELS};
use crate::media::PixelChannelStream;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    available: usize,
}

impl Capacity {
    pub fn of(carrier: &PixelChannelStream) -> Self {
        Self {
            available: carrier.len(),
        }
    }

    pub fn of_dimensions(width: u32, height: u32) -> Self {
        Self {
            available: (width as usize)
                .saturating_mul(height as usize)
                .saturating_mul(CHANNELS_PER_PIXEL),
        }
    }

    /// color channels the carrier offers
    pub fn available_channels(&self) -> usize {
        self.available
    }

    /// payload bytes that fit next to the header
    pub fn max_payload_bytes(&self) -> u64 {
        let payload_bits = self.available.saturating_sub(HEADER_CHANNELS) as u64
            * crate::media::RESERVED_WIDTH as u64;
        payload_bits / 8
    }

    /// channels needed for the header plus `payload_bytes` of payload
    pub fn required_channels(payload_bytes: u64) -> usize {
        let payload = usize::try_from(chunk_count(payload_bytes)).unwrap_or(usize::MAX);
        HEADER_CHANNELS.saturating_add(payload)
    }

    /// Returns the required channels, or the index at which the carrier runs out of room
    pub fn validate(&self, payload_bytes: u64) -> Result<usize> {
        let required = Self::required_channels(payload_bytes);
        if required > self.available {
            return Err(ConcealError::CapacityOverflow {
                index: self.available,
                required,
            });
        }

        Ok(required)
    }
}
