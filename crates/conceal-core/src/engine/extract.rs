use log::debug;

use super::progress::CancellationToken;
use crate::error::ConcealError;
use crate::media::payload::{HeaderCodec, PayloadPacker, WaveHeader};
use crate::media::{CodecOptions, PcmAudio, PcmSpec, PixelChannelStream, UnveilChunk};
use crate::Result;

/// Recovers concealed audio from a carrier image, the inverse of
/// [`EmbeddingEngine`](super::EmbeddingEngine)
#[derive(Debug, Default)]
pub struct ExtractionEngine {
    options: CodecOptions,
}

impl ExtractionEngine {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// reads only the header
    pub fn inspect(carrier: &PixelChannelStream) -> Result<WaveHeader> {
        HeaderCodec::decode(carrier).map(|(header, _)| header)
    }

    pub fn extract(&self, carrier: &PixelChannelStream) -> Result<(WaveHeader, PcmAudio)> {
        self.extract_with(carrier, &CancellationToken::new())
    }

    /// same as [`Self::extract`], checks the token between two read batches
    pub fn extract_with(
        &self,
        carrier: &PixelChannelStream,
        token: &CancellationToken,
    ) -> Result<(WaveHeader, PcmAudio)> {
        let (header, offset) = HeaderCodec::decode(carrier)?;
        let byte_len = usize::try_from(header.payload_byte_length()).map_err(|_| {
            ConcealError::MalformedHeader("payload length exceeds the address space".into())
        })?;
        let expected = usize::try_from(header.payload_channels()).unwrap_or(usize::MAX);
        let available = carrier.len().saturating_sub(offset);
        if expected > available {
            return Err(ConcealError::TruncatedPayload {
                expected,
                available,
            });
        }
        debug!("unveil {byte_len} payload bytes from {expected} channels");

        let mut chunks = Vec::with_capacity(expected);
        let batch_size = self.options.get_batch_size();
        let mut position = offset;
        while chunks.len() < expected {
            token.check()?;
            let len = batch_size.min(expected - chunks.len());
            let window = carrier
                .window(position, len)
                .ok_or(ConcealError::ChannelIndexOutOfBounds {
                    index: position,
                    len: carrier.len(),
                })?;
            chunks.extend(window.map(UnveilChunk::unveil_chunk));
            position += len;
        }

        let bytes = crate::media::payload::packer::unpack_chunks(chunks, byte_len)?;
        let samples = PayloadPacker::samples_from_bytes(&bytes, header.valid_bits())?;
        let audio = PcmAudio::new(
            PcmSpec {
                sample_rate: header.sample_rate(),
                channels: header.channel_count(),
                valid_bits: header.valid_bits(),
            },
            samples,
        )?;

        Ok((header, audio))
    }
}
