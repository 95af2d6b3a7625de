use image::{ImageBuffer, RgbImage};

use super::iterators::{ChannelIter, ChannelIterMut};
use crate::error::ConcealError;
use crate::Result;

/// number of color channels per pixel, alpha is never used
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Flattened view of an RGB image: one entry per color channel,
/// pixels in row-major order, R before G before B.
///
/// The length is always `width * height * 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelChannelStream {
    width: u32,
    height: u32,
    channels: Vec<u8>,
}

impl PixelChannelStream {
    pub fn from_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            channels: image.into_raw(),
        }
    }

    pub fn from_raw(width: u32, height: u32, channels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS_PER_PIXEL));
        if expected != Some(channels.len()) {
            log::error!(
                "channel stream of {} bytes does not match {width}x{height} pixels",
                channels.len()
            );
            return Err(ConcealError::InvalidImageMedia);
        }

        Ok(Self {
            width,
            height,
            channels,
        })
    }

    pub fn into_image(self) -> Result<RgbImage> {
        ImageBuffer::from_raw(self.width, self.height, self.channels)
            .ok_or(ConcealError::InvalidImageMedia)
    }

    pub fn to_image(&self) -> Result<RgbImage> {
        self.clone().into_image()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.channels
    }

    /// maps a channel index back to `(x, y, color)`
    pub fn position_of(&self, index: usize) -> Option<(u32, u32, usize)> {
        if index >= self.len() || self.width == 0 {
            return None;
        }
        let pixel = index / CHANNELS_PER_PIXEL;
        let x = (pixel % self.width as usize) as u32;
        let y = (pixel / self.width as usize) as u32;

        Some((x, y, index % CHANNELS_PER_PIXEL))
    }

    pub(crate) fn iter(&self) -> ChannelIter<'_> {
        ChannelIter::new(&self.channels)
    }

    pub(crate) fn iter_mut(&mut self) -> ChannelIterMut<'_> {
        ChannelIterMut::new(&mut self.channels)
    }

    /// readonly channels `[from, from + len)`, `None` if the stream is shorter
    pub(crate) fn window(&self, from: usize, len: usize) -> Option<ChannelIter<'_>> {
        let end = from.checked_add(len)?;
        self.channels.get(from..end).map(ChannelIter::new)
    }

    /// mutable channels `[from, from + len)`, `None` if the stream is shorter
    pub(crate) fn window_mut(&mut self, from: usize, len: usize) -> Option<ChannelIterMut<'_>> {
        let end = from.checked_add(len)?;
        self.channels.get_mut(from..end).map(ChannelIterMut::new)
    }
}

impl From<RgbImage> for PixelChannelStream {
    fn from(image: RgbImage) -> Self {
        Self::from_image(image)
    }
}
