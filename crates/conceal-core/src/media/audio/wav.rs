use std::io::{Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::error;

use super::{PcmAudio, PcmSpec};
use crate::error::ConcealError;
use crate::Result;

/// reads an integer PCM WAV file, float WAV files are not supported
pub fn read_wav_file(path: &Path) -> Result<PcmAudio> {
    let reader = WavReader::open(path).map_err(|e| {
        error!("Error opening wav file {path:?}: {e}");
        ConcealError::InvalidAudioMedia
    })?;

    read_wav_samples(reader)
}

pub fn read_wav<R: Read>(reader: R) -> Result<PcmAudio> {
    let reader = WavReader::new(reader).map_err(|e| {
        error!("Error reading wav data: {e}");
        ConcealError::InvalidAudioMedia
    })?;

    read_wav_samples(reader)
}

fn read_wav_samples<R: Read>(mut reader: WavReader<R>) -> Result<PcmAudio> {
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int {
        return Err(ConcealError::UnsupportedMedia);
    }

    let samples = reader
        .samples::<i32>()
        .collect::<std::result::Result<Vec<i32>, _>>()
        .map_err(|e| {
            error!("Error decoding wav samples: {e}");
            ConcealError::InvalidAudioMedia
        })?;

    PcmAudio::new(
        PcmSpec {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            valid_bits: spec.bits_per_sample,
        },
        samples,
    )
}

pub fn write_wav<W: Write + Seek>(audio: &PcmAudio, writer: W) -> Result<()> {
    let spec = audio.spec();
    let mut wav_writer = WavWriter::new(
        writer,
        WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.valid_bits,
            sample_format: SampleFormat::Int,
        },
    )
    .map_err(|e| {
        error!("Error creating wav writer: {e}");
        ConcealError::AudioEncodingError
    })?;

    for s in audio.samples() {
        wav_writer
            .write_sample(*s)
            .map_err(|_| ConcealError::AudioEncodingError)?;
    }
    wav_writer
        .finalize()
        .map_err(|_| ConcealError::AudioEncodingError)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn should_write_and_read_every_supported_depth() {
        for (bits, samples) in [
            (8u16, vec![-128, -1, 0, 1, 127, 5]),
            (16, vec![i16::MIN as i32, -300, 0, 300, i16::MAX as i32, 7]),
            (24, vec![-8_388_608, -70_000, 0, 70_000, 8_388_607, 9]),
            (32, vec![i32::MIN, -1, 0, 1, i32::MAX, 11]),
        ] {
            let audio = PcmAudio::new(
                PcmSpec {
                    sample_rate: 22_050,
                    channels: 2,
                    valid_bits: bits,
                },
                samples,
            )
            .unwrap();

            let mut buf = Cursor::new(Vec::new());
            write_wav(&audio, &mut buf).expect("Cannot write wav");
            buf.set_position(0);
            let given = read_wav(buf).expect("Cannot read wav");

            assert_eq!(given, audio, "{bits} bit audio did not survive");
        }
    }

    #[test]
    fn should_reject_float_wav() {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(
                &mut buf,
                WavSpec {
                    channels: 1,
                    sample_rate: 8_000,
                    bits_per_sample: 32,
                    sample_format: SampleFormat::Float,
                },
            )
            .unwrap();
            writer.write_sample(0.5f32).unwrap();
            writer.finalize().unwrap();
        }
        buf.set_position(0);

        assert!(matches!(read_wav(buf), Err(ConcealError::UnsupportedMedia)));
    }

    #[test]
    fn should_reject_garbage() {
        let result = read_wav(Cursor::new(b"definitely not a riff".to_vec()));
        assert!(matches!(result, Err(ConcealError::InvalidAudioMedia)));
    }
}
