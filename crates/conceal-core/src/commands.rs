use std::path::Path;

use crate::media::{open_carrier, WaveHeader};
use crate::recording::Recording;
use crate::{CodecOptions, ExtractionEngine, Result};

/// conceals `audio` in `image` and writes the result to `output` as PNG
pub fn conceal(
    image: &Path,
    audio: &Path,
    output: &Path,
    recovered_audio: Option<&Path>,
    opts: &CodecOptions,
) -> Result<Recording> {
    crate::api::conceal::prepare()
        .with_image(image)
        .with_audio(audio)
        .with_output(output)
        .use_recovered_audio(recovered_audio)
        .with_options(opts.clone())
        .execute()
}

/// recovers concealed audio from `secret_image` into the WAV file `destination`
pub fn reveal(secret_image: &Path, destination: &Path, opts: &CodecOptions) -> Result<WaveHeader> {
    crate::api::reveal::prepare()
        .from_secret_image(secret_image)
        .into_audio_file(destination)
        .with_options(opts.clone())
        .execute()
}

/// reads the header only, nothing is written
pub fn inspect(secret_image: &Path) -> Result<WaveHeader> {
    ExtractionEngine::inspect(&open_carrier(secret_image)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{open_audio, Media, Persist};
    use crate::test_utils::{noise_carrier, sine_wave};
    use tempfile::TempDir;

    #[test]
    fn should_conceal_inspect_and_reveal_files() {
        let out_dir = TempDir::new().unwrap();
        let image = out_dir.path().join("carrier.png");
        let audio = out_dir.path().join("voice.wav");
        let secret = out_dir.path().join("secret.png");
        let revealed = out_dir.path().join("revealed.wav");
        let pcm = sine_wave(8, 2, 100);
        Media::Image(noise_carrier(40, 30)).save_as(&image).unwrap();
        Media::Audio(pcm.clone()).save_as(&audio).unwrap();

        conceal(&image, &audio, &secret, None, &CodecOptions::default()).unwrap();

        let header = inspect(&secret).unwrap();
        assert_eq!(header, WaveHeader::for_audio(&pcm).unwrap());
        assert!(!revealed.exists());

        reveal(&secret, &revealed, &CodecOptions::default()).unwrap();
        assert_eq!(open_audio(&revealed).unwrap(), pcm);
    }
}
