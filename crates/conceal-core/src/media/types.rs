use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use log::error;

use super::audio::wav;
use super::{PcmAudio, Persist, PixelChannelStream};
use crate::error::ConcealError;
use crate::Result;

/// a media file that takes part in concealing, either the carrier or the audio
#[derive(Debug)]
pub enum Media {
    Image(PixelChannelStream),
    Audio(PcmAudio),
}

impl Media {
    pub fn from_file(f: &Path) -> Result<Self> {
        let ext = f
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or(ConcealError::UnsupportedMedia)?;

        match ext.as_str() {
            "png" | "jpg" | "jpeg" => {
                let image = image::open(f).map_err(|e| {
                    error!("Error opening image {f:?}: {e}");
                    ConcealError::InvalidImageMedia
                })?;
                Ok(Self::Image(PixelChannelStream::from_image(image.to_rgb8())))
            }
            "wav" => Ok(Self::Audio(wav::read_wav_file(f)?)),
            _ => Err(ConcealError::UnsupportedMedia),
        }
    }

    pub fn save_to_writer<W: Write + Seek>(&self, writer: W) -> Result<()> {
        match self {
            Media::Image(stream) => write_png(stream, writer),
            Media::Audio(audio) => wav::write_wav(audio, writer),
        }
    }
}

/// encodes the carrier losslessly, a lossy format would destroy the concealed data
pub fn write_png<W: Write + Seek>(stream: &PixelChannelStream, mut writer: W) -> Result<()> {
    stream
        .to_image()?
        .write_to(&mut writer, image::ImageFormat::Png)
        .map_err(|e| {
            error!("Error saving image: {e}");
            ConcealError::ImageEncodingError
        })
}

/// loads a carrier image, alpha channels are dropped
pub fn open_carrier(f: &Path) -> Result<PixelChannelStream> {
    match Media::from_file(f)? {
        Media::Image(stream) => Ok(stream),
        Media::Audio(_) => Err(ConcealError::InvalidImageMedia),
    }
}

pub fn open_audio(f: &Path) -> Result<PcmAudio> {
    match Media::from_file(f)? {
        Media::Audio(audio) => Ok(audio),
        Media::Image(_) => Err(ConcealError::InvalidAudioMedia),
    }
}

impl Persist for Media {
    /// images are always written as PNG
    fn save_as(&self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            ConcealError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        self.save_to_writer(&mut writer)?;
        writer
            .flush()
            .map_err(|source| ConcealError::WriteError { source })
    }
}
