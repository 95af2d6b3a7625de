use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConcealError {
    /// Represents an unsupported media file. For example, a Movie file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents an invalid audio input. For example, a broken WAV file
    #[error("Audio media is invalid")]
    InvalidAudioMedia,

    /// The audio does not fit into the carrier image.
    /// `index` is the channel position where the carrier ran out of room.
    #[error(
        "Capacity Error: the carrier ran out of color channels at index {index}, {required} channels are required"
    )]
    CapacityOverflow { index: usize, required: usize },

    /// The header found in a carrier image is not a valid audio header
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// The carrier image ends before the announced payload could be read completely
    #[error("Truncated payload: {expected} channels are required but only {available} are left")]
    TruncatedPayload { expected: usize, available: usize },

    #[error("Unsupported bit depth: {0} (supported are 8, 16, 24 and 32)")]
    UnsupportedBitDepth(u16),

    #[error("Sample {sample} does not fit into {valid_bits} bits")]
    SampleOutOfRange { sample: i64, valid_bits: u16 },

    /// A packer/validator mismatch, the engine tried to write past the validated capacity.
    /// This is a bug, not an input error.
    #[error("Internal error: channel index {index} is out of bounds for a stream of {len} channels")]
    ChannelIndexOutOfBounds { index: usize, len: usize },

    #[error("The operation was cancelled")]
    Cancelled,

    #[error("Another conceal operation is still running, cancel it first")]
    OperationInProgress,

    #[error("No carrier image set")]
    MissingCarrier,

    #[error("No audio set")]
    MissingAudio,

    #[error("No target file set")]
    TargetNotSet,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure when encoding an audio file.
    #[error("Audio encoding error")]
    AudioEncodingError,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("The conceal worker thread panicked")]
    WorkerPanicked,
}

impl ConcealError {
    /// Errors that the caller can map to a message and return to idle.
    /// Everything else indicates a bug or an environment failure.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ConcealError::ChannelIndexOutOfBounds { .. } | ConcealError::WorkerPanicked
        )
    }
}
