//! Turns bytes into chunks of [`RESERVED_WIDTH`] bits and back.
//!
//! Bytes are read as one MSB-first bit stream. The last chunk of a segment
//! is padded with zero bits on the right.

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::media::audio::NormalizedSampleBuffer;
use crate::media::{RESERVED_MASK, RESERVED_WIDTH};
use crate::Result;

/// number of chunks needed to carry `byte_len` bytes
pub fn chunk_count(byte_len: u64) -> u64 {
    let bits = byte_len.saturating_mul(8);
    bits / RESERVED_WIDTH as u64 + u64::from(bits % RESERVED_WIDTH as u64 != 0)
}

/// bytes one sample occupies in the payload
pub fn bytes_per_sample(valid_bits: u16) -> usize {
    (valid_bits as usize + 7) / 8
}

pub fn pack_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let width = RESERVED_WIDTH as u32;
    let mut remaining = bytes.len() as u64 * 8;
    let mut chunks = Vec::with_capacity(chunk_count(bytes.len() as u64) as usize);
    let mut reader = BitReader::endian(bytes, BigEndian);

    while remaining > 0 {
        let take = remaining.min(width as u64) as u32;
        let bits: u8 = reader.read(take)?;
        chunks.push(bits << (width - take));
        remaining -= take as u64;
    }

    Ok(chunks)
}

/// inverse of [`pack_bytes`], consumes exactly as many chunks as `byte_len` needs
pub fn unpack_chunks<I>(chunks: I, byte_len: usize) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = u8>,
{
    let width = RESERVED_WIDTH as u32;
    let mut remaining = byte_len as u64 * 8;
    let mut bytes = Vec::with_capacity(byte_len);
    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);
        let mut chunks = chunks.into_iter();
        while remaining > 0 {
            let Some(chunk) = chunks.next() else {
                break;
            };
            let take = remaining.min(width as u64) as u32;
            writer.write(take, (chunk & RESERVED_MASK) >> (width - take))?;
            remaining -= take as u64;
        }
        writer.byte_align()?;
    }

    Ok(bytes)
}

/// Serializes the normalized samples and cuts them into channel sized chunks
pub struct PayloadPacker;

impl PayloadPacker {
    /// every sample is re-quantized at its resolution and stored
    /// as `ceil(bits / 8)` bytes little-endian two's complement
    pub fn sample_bytes(buffer: &NormalizedSampleBuffer) -> Result<Vec<u8>> {
        let width = bytes_per_sample(buffer.valid_bits());
        let mut bytes = Vec::with_capacity(buffer.len() * width);
        for sample in buffer.to_pcm_samples()? {
            bytes.write_int::<LittleEndian>(sample as i64, width)?;
        }

        Ok(bytes)
    }

    pub fn pack(buffer: &NormalizedSampleBuffer) -> Result<Vec<u8>> {
        pack_bytes(&Self::sample_bytes(buffer)?)
    }

    /// rebuilds signed samples from payload bytes
    pub fn samples_from_bytes(bytes: &[u8], valid_bits: u16) -> Result<Vec<i32>> {
        let width = bytes_per_sample(valid_bits);
        let mut reader = bytes;
        let mut samples = Vec::with_capacity(bytes.len() / width.max(1));
        while !reader.is_empty() {
            samples.push(reader.read_int::<LittleEndian>(width)? as i32);
        }

        Ok(samples)
    }
}
