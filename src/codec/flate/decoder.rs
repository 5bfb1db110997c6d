use super::Z_DATA_ERROR;
use crate::{
    codec::{Session, Status, StepError},
    util::PartialBuffer,
};
use flate2::{Decompress, FlushDecompress};

/// A live deflate/zlib decompression session.
#[derive(Debug)]
pub struct FlateSession {
    decompress: Decompress,
}

impl FlateSession {
    pub(crate) fn new(zlib_header: bool) -> Self {
        Self {
            decompress: Decompress::new(zlib_header),
        }
    }
}

impl Session for FlateSession {
    fn step(
        &mut self,
        input: &mut PartialBuffer<impl AsRef<[u8]>>,
        output: &mut PartialBuffer<impl AsRef<[u8]> + AsMut<[u8]>>,
    ) -> Result<Status, StepError> {
        let prior_in = self.decompress.total_in();
        let prior_out = self.decompress.total_out();

        let status = self
            .decompress
            .decompress(
                input.unwritten(),
                output.unwritten_mut(),
                FlushDecompress::None,
            )
            .map_err(|err| StepError::new(Z_DATA_ERROR, err))?;

        input.advance((self.decompress.total_in() - prior_in) as usize);
        output.advance((self.decompress.total_out() - prior_out) as usize);

        match status {
            // BufError only means no progress was possible with the buffers given, the chunk
            // loop sees zero bytes produced and waits for more input.
            flate2::Status::Ok | flate2::Status::BufError => Ok(Status::Progress),
            flate2::Status::StreamEnd => Ok(Status::StreamEnd),
        }
    }

    fn total_out(&self) -> u64 {
        self.decompress.total_out()
    }
}
