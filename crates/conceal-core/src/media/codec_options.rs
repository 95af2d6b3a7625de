/// Number of low-order bits of every color channel that carry header or payload data.
pub const RESERVED_WIDTH: u8 = 3;

/// Default number of channels written between two suspension points.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Codec configuration for concealing audio in images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    /// Number of color channels written (or read) in one go before the engine
    /// checks for cancellation and reports progress.
    ///
    /// Smaller values give a smoother progress and a faster reaction to
    /// cancellation, bigger values are faster overall.
    pub batch_size: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl CodecOptions {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// The batch size, never 0
    pub fn get_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}
