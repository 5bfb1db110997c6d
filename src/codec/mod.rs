//! The seam between the chunk loop and an underlying streaming decompression primitive.

use crate::util::PartialBuffer;
use std::io;

#[cfg(feature = "bzip2")]
mod bzip2;
#[cfg(feature = "flate2")]
mod flate;

#[cfg(feature = "bzip2")]
pub use self::bzip2::{BzCodec, BzSession};
#[cfg(feature = "flate2")]
pub use self::flate::{FlateCodec, FlateSession};

/// Outcome of a single successful decompression step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The step went fine; more input or more output space may be needed to make further
    /// progress.
    Progress,
    /// The end of the compressed stream has been met, no more input can be consumed by this
    /// session.
    StreamEnd,
}

/// An unrecoverable failure reported by a decompression step.
#[derive(Debug, thiserror::Error)]
#[error("{source} (error code {code})")]
pub struct StepError {
    code: i32,
    #[source]
    source: io::Error,
}

impl StepError {
    /// Creates an error carrying the primitive's numeric error `code`.
    pub fn new(code: i32, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            code,
            source: io::Error::new(io::ErrorKind::InvalidData, source),
        }
    }

    /// The primitive's error code.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub(crate) fn into_source(self) -> io::Error {
        self.source
    }
}

/// A factory for decompression sessions, carrying whatever configuration the primitive needs.
pub trait Codec {
    /// The live session type, owning the primitive's state for one compressed stream.
    type Session: Session;

    /// A short name for the algorithm, used in log output.
    fn name(&self) -> &'static str;

    /// Starts a fresh decompression session.
    fn start(&self) -> io::Result<Self::Session>;
}

/// A live decompression session.
///
/// Dropping a session releases every resource it holds.
pub trait Session {
    /// Runs the primitive once, consuming from `input` and filling `output`, advancing both
    /// cursors by the amounts consumed and produced.
    fn step(
        &mut self,
        input: &mut PartialBuffer<impl AsRef<[u8]>>,
        output: &mut PartialBuffer<impl AsRef<[u8]> + AsMut<[u8]>>,
    ) -> Result<Status, StepError>;

    /// Total number of bytes produced by this session so far.
    fn total_out(&self) -> u64;

    /// Ends the session, releasing the primitive's state.
    fn end(self)
    where
        Self: Sized,
    {
        drop(self)
    }
}
