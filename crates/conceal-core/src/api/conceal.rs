use std::path::{Path, PathBuf};

use log::info;

use crate::engine::{CancellationToken, ConcealJob, EmbeddingEngine};
use crate::finalize::{self, PersistTargets};
use crate::media::{open_audio, open_carrier};
use crate::recording::{InMemoryRecordingStore, Recording, RecordingStore};
use crate::{CodecOptions, ConcealError};

pub fn prepare() -> ConcealApi {
    ConcealApi::default()
}

#[derive(Default)]
pub struct ConcealApi {
    image: Option<PathBuf>,
    audio: Option<PathBuf>,
    output: Option<PathBuf>,
    recovered_audio: Option<PathBuf>,
    options: CodecOptions,
    store: Option<Box<dyn RecordingStore>>,
}

impl ConcealApi {
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// The carrier image, PNG or JPEG
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// The WAV file to conceal
    pub fn with_audio<A: AsRef<Path>>(mut self, audio: A) -> Self {
        self.audio = Some(audio.as_ref().to_path_buf());
        self
    }

    /// Always written as PNG, regardless of the extension
    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Read the audio back from the written image and store it here
    pub fn with_recovered_audio<A: AsRef<Path>>(mut self, recovered: A) -> Self {
        self.recovered_audio = Some(recovered.as_ref().to_path_buf());
        self
    }

    pub fn use_recovered_audio<A: AsRef<Path>>(mut self, recovered: Option<A>) -> Self {
        self.recovered_audio = recovered.map(|r| r.as_ref().to_path_buf());
        self
    }

    /// Where the finished run is recorded, an in memory store is used otherwise
    pub fn with_store<S: RecordingStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Execute the conceal process and blocks until it is finished
    pub fn execute(self) -> Result<Recording, ConcealError> {
        let Some(image) = self.image else {
            return Err(ConcealError::MissingCarrier);
        };
        let Some(audio) = self.audio else {
            return Err(ConcealError::MissingAudio);
        };
        let Some(output) = self.output else {
            return Err(ConcealError::TargetNotSet);
        };

        let carrier = open_carrier(&image)?;
        let pcm = open_audio(&audio)?;

        let job = ConcealJob::spawn(EmbeddingEngine::new(self.options.clone()), carrier, pcm);
        let mut reported = 0;
        for progress in job.progress() {
            let percent = progress.percent as u32;
            if percent >= reported + 10 || (progress.done && percent > reported) {
                info!("concealing {percent}%");
                reported = percent;
            }
        }
        let concealed = job.wait()?;

        let targets = PersistTargets {
            input_image: image,
            input_audio: Some(audio),
            output_image: output,
            recovered_audio: self.recovered_audio,
        };
        let store = self
            .store
            .unwrap_or_else(|| Box::new(InMemoryRecordingStore::new()));
        let (_, recording) = finalize::persist(
            &concealed,
            &targets,
            &self.options,
            store.as_ref(),
            &CancellationToken::new(),
        )?;

        Ok(recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{Media, Persist};
    use crate::test_utils::{noise_carrier, sine_wave};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let image = temp_dir.path().join("carrier.png");
        let audio = temp_dir.path().join("voice.wav");
        Media::Image(noise_carrier(64, 64)).save_as(&image).unwrap();
        Media::Audio(sine_wave(16, 1, 400)).save_as(&audio).unwrap();

        let recording = crate::api::conceal::prepare()
            .with_image(&image)
            .with_audio(&audio)
            .with_output(temp_dir.path().join("image-with-audio.png"))
            .with_recovered_audio(temp_dir.path().join("recovered.wav"))
            .execute()
            .expect("Failed to conceal audio in image");

        assert_eq!(recording.input_audio_path, Some(audio.clone()));
        assert_eq!(
            open_audio(&temp_dir.path().join("recovered.wav")).unwrap(),
            open_audio(&audio).unwrap()
        );
    }

    #[test]
    fn should_record_the_run_in_the_given_store() {
        let temp_dir = tempdir().unwrap();
        let image = temp_dir.path().join("carrier.png");
        let audio = temp_dir.path().join("voice.wav");
        let output = temp_dir.path().join("secret.png");
        Media::Image(noise_carrier(32, 32)).save_as(&image).unwrap();
        Media::Audio(sine_wave(8, 1, 50)).save_as(&audio).unwrap();
        let store = Arc::new(InMemoryRecordingStore::new());

        let recording = prepare()
            .with_image(&image)
            .with_audio(&audio)
            .with_output(&output)
            .with_store(store.clone())
            .execute()
            .unwrap();

        let stored = store.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].1, recording);
        assert_eq!(stored[0].1.input_image_path, image);
        assert_eq!(stored[0].1.output_image_path, output);
        assert!(stored[0].1.recovered_audio_path.is_none());
    }

    #[test]
    fn should_require_all_paths() {
        assert!(matches!(
            prepare().with_audio("a.wav").with_output("o.png").execute(),
            Err(ConcealError::MissingCarrier)
        ));
        assert!(matches!(
            prepare().with_image("a.png").with_output("o.png").execute(),
            Err(ConcealError::MissingAudio)
        ));
        assert!(matches!(
            prepare().with_image("a.png").with_audio("a.wav").execute(),
            Err(ConcealError::TargetNotSet)
        ));
    }

    #[test]
    fn should_not_write_anything_when_the_audio_does_not_fit() {
        let temp_dir = tempdir().unwrap();
        let image = temp_dir.path().join("small.png");
        let audio = temp_dir.path().join("voice.wav");
        let output = temp_dir.path().join("out.png");
        Media::Image(noise_carrier(10, 10)).save_as(&image).unwrap();
        Media::Audio(sine_wave(16, 1, 100)).save_as(&audio).unwrap();

        let result = prepare()
            .with_image(&image)
            .with_audio(&audio)
            .with_output(&output)
            .execute();

        assert!(matches!(
            result,
            Err(ConcealError::CapacityOverflow { index: 300, required: 606 })
        ));
        assert!(!output.exists());
    }
}
