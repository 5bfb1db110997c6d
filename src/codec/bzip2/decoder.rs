use super::{BZ_DATA_ERROR, BZ_DATA_ERROR_MAGIC, BZ_MEM_ERROR, BZ_PARAM_ERROR, BZ_SEQUENCE_ERROR};
use crate::{
    codec::{Session, Status, StepError},
    util::PartialBuffer,
};
use bzip2::{Decompress, Error};
use std::fmt;

/// A live bzip2 decompression session.
pub struct BzSession {
    decompress: Decompress,
}

impl fmt::Debug for BzSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BzSession {{total_in: {}, total_out: {}}}",
            self.decompress.total_in(),
            self.decompress.total_out()
        )
    }
}

impl BzSession {
    pub(crate) fn new(small: bool) -> Self {
        Self {
            decompress: Decompress::new(small),
        }
    }
}

fn error_code(err: &Error) -> i32 {
    #[allow(unreachable_patterns)]
    match err {
        Error::Sequence => BZ_SEQUENCE_ERROR,
        Error::Data => BZ_DATA_ERROR,
        Error::DataMagic => BZ_DATA_ERROR_MAGIC,
        Error::Param => BZ_PARAM_ERROR,
        _ => BZ_DATA_ERROR,
    }
}

impl Session for BzSession {
    fn step(
        &mut self,
        input: &mut PartialBuffer<impl AsRef<[u8]>>,
        output: &mut PartialBuffer<impl AsRef<[u8]> + AsMut<[u8]>>,
    ) -> Result<Status, StepError> {
        let prior_in = self.decompress.total_in();
        let prior_out = self.decompress.total_out();

        let status = self
            .decompress
            .decompress(input.unwritten(), output.unwritten_mut())
            .map_err(|err| StepError::new(error_code(&err), err))?;

        input.advance((self.decompress.total_in() - prior_in) as usize);
        output.advance((self.decompress.total_out() - prior_out) as usize);

        match status {
            // Decompression went fine, nothing much to report.
            bzip2::Status::Ok => Ok(Status::Progress),

            // The stream's end has been met, meaning that no more data can be input.
            bzip2::Status::StreamEnd => Ok(Status::StreamEnd),

            // The compression-side statuses should never come out of a decompressor.
            bzip2::Status::FlushOk | bzip2::Status::RunOk | bzip2::Status::FinishOk => Err(
                StepError::new(BZ_SEQUENCE_ERROR, "unexpected compression status"),
            ),

            bzip2::Status::MemNeeded => Err(StepError::new(BZ_MEM_ERROR, "out of memory")),
        }
    }

    fn total_out(&self) -> u64 {
        self.decompress.total_out()
    }
}
