use std::slice::{Iter, IterMut};

use crate::media::{ColorChannel, ColorChannelMut};

/// Readonly access to the color channels of a channel stream,
/// row-major pixel order and R before G before B within a pixel
pub(crate) struct ChannelIter<'a> {
    colors: Iter<'a, u8>,
}

impl<'a> ChannelIter<'a> {
    pub fn new(colors: &'a [u8]) -> Self {
        Self {
            colors: colors.iter(),
        }
    }
}

impl Iterator for ChannelIter<'_> {
    type Item = ColorChannel;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.colors.next().map(|c| ColorChannel(*c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.colors.size_hint()
    }
}

impl ExactSizeIterator for ChannelIter<'_> {}

/// Mutable access to the color channels, same order as [`ChannelIter`]
pub(crate) struct ChannelIterMut<'a> {
    colors: IterMut<'a, u8>,
}

impl<'a> ChannelIterMut<'a> {
    pub fn new(colors: &'a mut [u8]) -> Self {
        Self {
            colors: colors.iter_mut(),
        }
    }
}

impl<'a> Iterator for ChannelIterMut<'a> {
    type Item = ColorChannelMut<'a>;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.colors.next().map(ColorChannelMut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.colors.size_hint()
    }
}

impl ExactSizeIterator for ChannelIterMut<'_> {}
