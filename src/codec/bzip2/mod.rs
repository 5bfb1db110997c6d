use crate::codec::Codec;
use std::io;

mod decoder;

pub use self::decoder::BzSession;

// Return codes of libbzip2, reported alongside decode failures.
pub(crate) const BZ_SEQUENCE_ERROR: i32 = -1;
pub(crate) const BZ_PARAM_ERROR: i32 = -2;
pub(crate) const BZ_MEM_ERROR: i32 = -3;
pub(crate) const BZ_DATA_ERROR: i32 = -4;
pub(crate) const BZ_DATA_ERROR_MAGIC: i32 = -5;

/// Starts bzip2 decompression sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct BzCodec {
    small: bool,
}

impl BzCodec {
    /// Creates a codec using the default (fast) decompression mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the alternative decompression mode which uses less memory but runs at roughly
    /// half the speed.
    pub fn small(mut self, small: bool) -> Self {
        self.small = small;
        self
    }
}

impl Codec for BzCodec {
    type Session = BzSession;

    fn name(&self) -> &'static str {
        "bzip2"
    }

    fn start(&self) -> io::Result<BzSession> {
        Ok(BzSession::new(self.small))
    }
}
