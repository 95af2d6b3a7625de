use std::sync::Arc;

use log::{debug, error, info};

use super::progress::{CancellationToken, ConcealObserver, ConcealProgress, JobState};
use crate::capacity::Capacity;
use crate::error::ConcealError;
use crate::media::image::clear_reserved_bits;
use crate::media::payload::{HeaderCodec, PayloadPacker, WaveHeader};
use crate::media::{CodecOptions, HideChunk, NormalizedSampleBuffer, PcmAudio, PixelChannelStream};
use crate::Result;

/// Writes `chunks` into the channels starting at `offset`.
///
/// Nothing is written if the chunks do not fit, the returned error is an
/// internal fault since capacity has been validated before.
/// Returns the index right after the last written channel.
pub fn write_chunks(carrier: &mut PixelChannelStream, offset: usize, chunks: &[u8]) -> Result<usize> {
    let len = carrier.len();
    if offset.checked_add(chunks.len()).map_or(true, |end| end > len) {
        match carrier.position_of(offset) {
            Some((x, y, color)) => error!(
                "{} chunks starting at pixel ({x}, {y}) color {color} pass the end of {len} channels",
                chunks.len()
            ),
            None => error!("write offset {offset} is beyond the end of {len} channels"),
        }
        return Err(ConcealError::ChannelIndexOutOfBounds {
            index: offset.max(len),
            len,
        });
    }
    let window = carrier
        .window_mut(offset, chunks.len())
        .ok_or(ConcealError::ChannelIndexOutOfBounds {
            index: offset.max(len),
            len,
        })?;
    window
        .zip(chunks.iter())
        .for_each(|(channel, chunk)| channel.hide_chunk(*chunk));

    Ok(offset + chunks.len())
}

/// Conceals PCM audio in the reserved bits of a carrier image
#[derive(Debug, Default)]
pub struct EmbeddingEngine {
    options: CodecOptions,
}

impl EmbeddingEngine {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Runs one conceal operation to its end.
    ///
    /// The carrier is validated before the first write. Between two batches the
    /// token is checked and a progress snapshot is emitted. On any failure,
    /// cancellation included, the last snapshot is [`ConcealProgress::initial`]
    /// and the partially written carrier is dropped.
    pub fn run<O>(
        &self,
        carrier: PixelChannelStream,
        audio: &PcmAudio,
        token: &CancellationToken,
        observer: &mut O,
    ) -> Result<Arc<PixelChannelStream>>
    where
        O: ConcealObserver + ?Sized,
    {
        observer.on_state(JobState::Validating);
        let result = match self.validate(&carrier, audio) {
            Ok(plan) => self.write(carrier, plan, token, observer),
            Err(e) => Err(e),
        };

        match result {
            Ok(output) => {
                info!("audio concealed");
                observer.on_state(JobState::Done);
                observer.on_progress(ConcealProgress::done(output.clone()));
                Ok(output)
            }
            Err(e) => {
                let state = match e {
                    ConcealError::Cancelled => JobState::Cancelled,
                    _ => JobState::Failed,
                };
                info!("conceal run ended as {state:?}: {e}");
                observer.on_state(state);
                observer.on_progress(ConcealProgress::initial());
                Err(e)
            }
        }
    }

    fn validate(&self, carrier: &PixelChannelStream, audio: &PcmAudio) -> Result<Plan> {
        let header = WaveHeader::for_audio(audio)?;
        let required = Capacity::of(carrier).validate(header.payload_byte_length())?;
        let normalized = NormalizedSampleBuffer::from_pcm(audio)?;
        let payload = PayloadPacker::pack(&normalized)?;
        debug!(
            "conceal {} payload bytes in {required} of {} channels",
            header.payload_byte_length(),
            carrier.len()
        );

        Ok(Plan {
            header,
            payload,
            required,
        })
    }

    fn write<O>(
        &self,
        mut carrier: PixelChannelStream,
        plan: Plan,
        token: &CancellationToken,
        observer: &mut O,
    ) -> Result<Arc<PixelChannelStream>>
    where
        O: ConcealObserver + ?Sized,
    {
        token.check()?;
        observer.on_state(JobState::Writing);

        clear_reserved_bits(&mut carrier);
        let mut position = write_chunks(&mut carrier, 0, &HeaderCodec::encode(&plan.header)?)?;
        observer.on_progress(ConcealProgress::writing(position, plan.required));

        for batch in plan.payload.chunks(self.options.get_batch_size()) {
            token.check()?;
            position = write_chunks(&mut carrier, position, batch)?;
            debug!("{position} of {} channels written", plan.required);
            observer.on_progress(ConcealProgress::writing(position, plan.required));
        }

        Ok(Arc::new(carrier))
    }
}

struct Plan {
    header: WaveHeader,
    payload: Vec<u8>,
    required: usize,
}
