use crate::codec::StepError;
use std::io;

/// Errors reported by a [`ChunkDecoder`](crate::ChunkDecoder).
///
/// Apart from [`Start`](DecodeError::Start) and [`NotReady`](DecodeError::NotReady), every
/// variant is returned after the decoder has already been reinitialized: it is ready for a new,
/// unrelated stream, but the stream that failed cannot be resumed.
///
/// ```text
///   DecodeError
///   ├── Start       ← the primitive refused to start a session
///   ├── NotReady    ← no live session, nothing was consumed
///   ├── Decode      ← corrupt input, carries the primitive's error code
///   ├── Alloc       ← the sink refused to provide an output buffer
///   ├── Sink        ← the sink failed to accept an output chunk
///   ├── Input       ← reading the next input chunk failed
///   └── Truncated   ← input ended before the end of the stream
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Starting a decompression session failed.
    #[error("failed to start decompression: {0}")]
    Start(#[source] io::Error),

    /// The decoder has no live session.
    #[error("decompressor not ready")]
    NotReady,

    /// The primitive reported an unrecoverable error.
    #[error("failed to decompress data (error code {code})")]
    Decode {
        /// The primitive's error code.
        code: i32,
        /// What the primitive reported.
        #[source]
        source: io::Error,
    },

    /// The sink could not provide an output buffer.
    #[error("failed to allocate output buffer: {0}")]
    Alloc(#[source] io::Error),

    /// The sink rejected an output chunk.
    #[error("failed to push output chunk: {0}")]
    Sink(#[source] io::Error),

    /// Reading input failed.
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    /// The input ended in the middle of a compressed stream.
    #[error("compressed stream truncated after {offset} decoded bytes")]
    Truncated {
        /// Number of bytes decoded before the input ended.
        offset: u64,
    },
}

impl DecodeError {
    /// The primitive's error code, for [`Decode`](DecodeError::Decode) errors.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Decode { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<StepError> for DecodeError {
    fn from(err: StepError) -> Self {
        Self::Decode {
            code: err.code(),
            source: err.into_source(),
        }
    }
}

impl From<DecodeError> for io::Error {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Input(err) | DecodeError::Sink(err) | DecodeError::Alloc(err) => err,
            DecodeError::Decode { .. } => io::Error::new(io::ErrorKind::InvalidData, err),
            DecodeError::Truncated { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            DecodeError::Start(_) | DecodeError::NotReady => io::Error::other(err),
        }
    }
}
