use crate::error::ConcealError;
use crate::Result;

/// format description of a PCM stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    pub sample_rate: u32,
    pub channels: u16,
    /// resolution of one sample, one of 8, 16, 24 or 32
    pub valid_bits: u16,
}

/// Interleaved signed PCM samples plus their format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudio {
    spec: PcmSpec,
    samples: Vec<i32>,
}

impl PcmAudio {
    pub fn new(spec: PcmSpec, samples: Vec<i32>) -> Result<Self> {
        if spec.channels == 0 || samples.len() % spec.channels as usize != 0 {
            log::error!(
                "{} samples cannot be split into frames of {} channels",
                samples.len(),
                spec.channels
            );
            return Err(ConcealError::InvalidAudioMedia);
        }

        Ok(Self { spec, samples })
    }

    pub fn spec(&self) -> PcmSpec {
        self.spec
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i32> {
        self.samples
    }

    pub fn frame_count(&self) -> u64 {
        (self.samples.len() / self.spec.channels as usize) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_16() -> PcmSpec {
        PcmSpec {
            sample_rate: 44_100,
            channels: 2,
            valid_bits: 16,
        }
    }

    #[test]
    fn should_count_frames() {
        let audio = PcmAudio::new(stereo_16(), vec![1, -1, 2, -2, 3, -3]).unwrap();
        assert_eq!(audio.frame_count(), 3);
    }

    #[test]
    fn should_reject_incomplete_frames() {
        let result = PcmAudio::new(stereo_16(), vec![1, -1, 2]);
        assert!(matches!(result, Err(ConcealError::InvalidAudioMedia)));
    }
}
