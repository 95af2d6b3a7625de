use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::finalize::{move_into_place, temp_sibling};
use crate::media::audio::wav;
use crate::media::{open_carrier, WaveHeader};
use crate::{CodecOptions, ConcealError, ExtractionEngine};

pub fn prepare() -> RevealApi {
    RevealApi::default()
}

#[derive(Default, Debug)]
pub struct RevealApi {
    secret_image: Option<PathBuf>,
    audio_file: Option<PathBuf>,
    options: CodecOptions,
}

impl RevealApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the image that contains the concealed audio
    pub fn from_secret_image(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// This is the WAV file the audio will be saved to
    pub fn into_audio_file(mut self, audio_file: impl AsRef<Path>) -> Self {
        self.audio_file = Some(audio_file.as_ref().to_path_buf());
        self
    }

    /// Execute the reveal process and blocks until it is finished
    pub fn execute(self) -> Result<WaveHeader, ConcealError> {
        let Some(secret_image) = self.secret_image else {
            return Err(ConcealError::MissingCarrier);
        };
        let Some(audio_file) = self.audio_file else {
            return Err(ConcealError::TargetNotSet);
        };

        let carrier = open_carrier(&secret_image)?;
        let (header, audio) = ExtractionEngine::new(self.options).extract(&carrier)?;

        let target = temp_sibling(&audio_file, ".wav")?;
        wav::write_wav(&audio, BufWriter::new(target.as_file()))?;
        move_into_place(target, &audio_file)?;

        Ok(header)
    }
}
