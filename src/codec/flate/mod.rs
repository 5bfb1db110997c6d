use crate::codec::Codec;
use std::io;

mod decoder;

pub use self::decoder::FlateSession;

// zlib's Z_DATA_ERROR; flate2 does not expose the underlying return code.
pub(crate) const Z_DATA_ERROR: i32 = -3;

/// Starts raw deflate or zlib decompression sessions.
#[derive(Clone, Copy, Debug)]
pub struct FlateCodec {
    zlib_header: bool,
}

impl FlateCodec {
    /// A codec for raw deflate streams.
    #[cfg(feature = "deflate")]
    pub fn deflate() -> Self {
        Self { zlib_header: false }
    }

    /// A codec for zlib-wrapped deflate streams.
    #[cfg(feature = "zlib")]
    pub fn zlib() -> Self {
        Self { zlib_header: true }
    }
}

impl Codec for FlateCodec {
    type Session = FlateSession;

    fn name(&self) -> &'static str {
        if self.zlib_header {
            "zlib"
        } else {
            "deflate"
        }
    }

    fn start(&self) -> io::Result<FlateSession> {
        Ok(FlateSession::new(self.zlib_header))
    }
}
