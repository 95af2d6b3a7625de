//! Fixed layout header that describes the concealed audio.
//!
//! The header is serialized big-endian and stored with the same 3-bit chunk
//! discipline as the payload, starting at channel 0:
//!
//! ```text
//! | magic "CW" (2) | version (1) | sample rate u32 (4) | channels u16 (2) |
//! | frames u64 (8) | valid bits u16 (2) | payload length u64 (8) |
//! ```
//!
//! 27 bytes are exactly 72 chunks, so the payload starts at channel 72.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use super::packer::{bytes_per_sample, chunk_count, pack_bytes, unpack_chunks};
use crate::error::ConcealError;
use crate::media::audio::{PcmAudio, SUPPORTED_BIT_DEPTHS};
use crate::media::{PixelChannelStream, UnveilChunk};
use crate::Result;

pub const HEADER_MAGIC: [u8; 2] = *b"CW";
pub const HEADER_VERSION: u8 = 1;
pub const HEADER_BYTE_LENGTH: usize = 27;
/// number of channels the header occupies, also the payload start offset
pub const HEADER_CHANNELS: usize = 72;

pub const MAX_SAMPLE_RATE: u32 = 768_000;
pub const MAX_CHANNEL_COUNT: u16 = 64;

/// Format metadata of the concealed audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    sample_rate: u32,
    channel_count: u16,
    frame_count: u64,
    valid_bits: u16,
    payload_byte_length: u64,
}

impl WaveHeader {
    /// validates the fields and derives the payload length from them
    pub fn new(sample_rate: u32, channel_count: u16, frame_count: u64, valid_bits: u16) -> Result<Self> {
        if !SUPPORTED_BIT_DEPTHS.contains(&valid_bits) {
            return Err(ConcealError::UnsupportedBitDepth(valid_bits));
        }
        check_ranges(sample_rate, channel_count)?;
        let payload_byte_length = payload_length(channel_count, frame_count, valid_bits)
            .ok_or_else(|| malformed("payload length does not fit into 64 bits"))?;

        Ok(Self {
            sample_rate,
            channel_count,
            frame_count,
            valid_bits,
            payload_byte_length,
        })
    }

    pub fn for_audio(audio: &PcmAudio) -> Result<Self> {
        let spec = audio.spec();
        Self::new(
            spec.sample_rate,
            spec.channels,
            audio.frame_count(),
            spec.valid_bits,
        )
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn valid_bits(&self) -> u16 {
        self.valid_bits
    }

    pub fn payload_byte_length(&self) -> u64 {
        self.payload_byte_length
    }

    /// channels the payload occupies after the header
    pub fn payload_channels(&self) -> u64 {
        chunk_count(self.payload_byte_length)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_BYTE_LENGTH);
        buf.extend_from_slice(&HEADER_MAGIC);
        buf.write_u8(HEADER_VERSION)?;
        buf.write_u32::<BigEndian>(self.sample_rate)?;
        buf.write_u16::<BigEndian>(self.channel_count)?;
        buf.write_u64::<BigEndian>(self.frame_count)?;
        buf.write_u16::<BigEndian>(self.valid_bits)?;
        buf.write_u64::<BigEndian>(self.payload_byte_length)?;

        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_BYTE_LENGTH {
            return Err(malformed("header is too short"));
        }
        if bytes[..2] != HEADER_MAGIC {
            return Err(malformed("no audio header found"));
        }
        let mut rdr = &bytes[2..];
        let version = rdr.read_u8()?;
        if version != HEADER_VERSION {
            return Err(ConcealError::MalformedHeader(format!(
                "unsupported header version {version}"
            )));
        }
        let sample_rate = rdr.read_u32::<BigEndian>()?;
        let channel_count = rdr.read_u16::<BigEndian>()?;
        let frame_count = rdr.read_u64::<BigEndian>()?;
        let valid_bits = rdr.read_u16::<BigEndian>()?;
        let payload_byte_length = rdr.read_u64::<BigEndian>()?;

        check_ranges(sample_rate, channel_count)?;
        if !SUPPORTED_BIT_DEPTHS.contains(&valid_bits) {
            return Err(ConcealError::MalformedHeader(format!(
                "unsupported bit depth {valid_bits}"
            )));
        }
        if payload_length(channel_count, frame_count, valid_bits) != Some(payload_byte_length) {
            return Err(ConcealError::MalformedHeader(format!(
                "payload length {payload_byte_length} does not match {frame_count} frames of {channel_count} channels at {valid_bits} bits"
            )));
        }

        Ok(Self {
            sample_rate,
            channel_count,
            frame_count,
            valid_bits,
            payload_byte_length,
        })
    }
}

fn malformed(reason: &str) -> ConcealError {
    ConcealError::MalformedHeader(reason.to_string())
}

fn check_ranges(sample_rate: u32, channel_count: u16) -> Result<()> {
    if sample_rate == 0 || sample_rate > MAX_SAMPLE_RATE {
        return Err(ConcealError::MalformedHeader(format!(
            "sample rate {sample_rate} is out of range"
        )));
    }
    if channel_count == 0 || channel_count > MAX_CHANNEL_COUNT {
        return Err(ConcealError::MalformedHeader(format!(
            "channel count {channel_count} is out of range"
        )));
    }

    Ok(())
}

fn payload_length(channel_count: u16, frame_count: u64, valid_bits: u16) -> Option<u64> {
    frame_count
        .checked_mul(channel_count as u64)?
        .checked_mul(bytes_per_sample(valid_bits) as u64)
}

/// Reads and writes the [`WaveHeader`] at the start of a channel stream
pub struct HeaderCodec;

impl HeaderCodec {
    /// the header as chunks, ready to be written at channel 0
    pub fn encode(header: &WaveHeader) -> Result<Vec<u8>> {
        let chunks = pack_bytes(&header.to_bytes()?)?;
        debug_assert_eq!(chunks.len(), HEADER_CHANNELS);

        Ok(chunks)
    }

    /// reads the header from the first channels, returns it along with the payload start offset
    pub fn decode(carrier: &PixelChannelStream) -> Result<(WaveHeader, usize)> {
        let window = carrier
            .window(0, HEADER_CHANNELS)
            .ok_or_else(|| malformed("carrier is too small to contain a header"))?;
        let bytes = unpack_chunks(window.map(UnveilChunk::unveil_chunk), HEADER_BYTE_LENGTH)?;

        Ok((WaveHeader::from_bytes(&bytes)?, HEADER_CHANNELS))
    }
}
