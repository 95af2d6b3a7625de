//! Maps raw PCM samples of any supported resolution onto `[-1.0, 1.0)` and back.
//!
//! A sample `x` of `n` bits maps to `x / 2^(n-1)`. Every supported depth fits
//! into the 53 bit mantissa of an `f64`, which makes the mapping exactly invertible.

use super::PcmAudio;
use crate::error::ConcealError;
use crate::Result;

pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// `2^(bits-1)`, the full scale of a signed sample with the given resolution
fn full_scale(valid_bits: u16) -> Result<f64> {
    if !SUPPORTED_BIT_DEPTHS.contains(&valid_bits) {
        return Err(ConcealError::UnsupportedBitDepth(valid_bits));
    }

    Ok((1u64 << (valid_bits - 1)) as f64)
}

/// smallest and biggest representable sample for the given resolution
pub fn sample_range(valid_bits: u16) -> Result<(i64, i64)> {
    let scale = full_scale(valid_bits)? as i64;
    Ok((-scale, scale - 1))
}

pub fn normalize(sample: i32, valid_bits: u16) -> Result<f64> {
    let scale = full_scale(valid_bits)?;
    let (min, max) = sample_range(valid_bits)?;
    let wide = sample as i64;
    if wide < min || wide > max {
        return Err(ConcealError::SampleOutOfRange {
            sample: wide,
            valid_bits,
        });
    }

    Ok(sample as f64 / scale)
}

/// inverse of [`normalize`], values outside the canonical range saturate
pub fn denormalize(value: f64, valid_bits: u16) -> Result<i32> {
    let scale = full_scale(valid_bits)?;
    let (min, max) = sample_range(valid_bits)?;
    let quantized = (value * scale).round() as i64;

    Ok(quantized.clamp(min, max) as i32)
}

/// PCM samples in the canonical `[-1.0, 1.0)` range, one value per sample
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSampleBuffer {
    valid_bits: u16,
    samples: Vec<f64>,
}

impl NormalizedSampleBuffer {
    pub fn from_pcm(audio: &PcmAudio) -> Result<Self> {
        let valid_bits = audio.spec().valid_bits;
        let samples = audio
            .samples()
            .iter()
            .map(|s| normalize(*s, valid_bits))
            .collect::<Result<Vec<f64>>>()?;

        Ok(Self {
            valid_bits,
            samples,
        })
    }

    pub fn valid_bits(&self) -> u16 {
        self.valid_bits
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// re-quantizes every value at the original resolution
    pub fn to_pcm_samples(&self) -> Result<Vec<i32>> {
        self.samples
            .iter()
            .map(|v| denormalize(*v, self.valid_bits))
            .collect()
    }
}
