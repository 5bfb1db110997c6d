use crate::{
    codec::{Codec, Session},
    error::DecodeError,
};

/// Owns the primitive's session for one logical stream, plus the offset bookkeeping around it.
pub(crate) struct DecoderState<C: Codec> {
    codec: C,
    session: Option<C::Session>,
    output_offset: u64,
    /// Offset at which the current member started, non-zero only after a member restart.
    member_base: u64,
    /// Whether the session consumed input since it was last started.
    consumed: bool,
    /// Whether the session reached its end of stream.
    finished: bool,
}

impl<C: Codec> DecoderState<C> {
    pub(crate) fn new(codec: C) -> Self {
        Self {
            codec,
            session: None,
            output_offset: 0,
            member_base: 0,
            consumed: false,
            finished: false,
        }
    }

    pub(crate) fn codec(&self) -> &C {
        &self.codec
    }

    /// Tears down any existing session and starts a fresh one, resetting the offset to zero.
    pub(crate) fn initialize(&mut self) -> Result<(), DecodeError> {
        self.teardown();
        self.output_offset = 0;
        self.member_base = 0;
        self.start()
    }

    /// Replaces the session with a fresh one for the next member of a multi-member stream,
    /// keeping the output offset.
    pub(crate) fn restart_member(&mut self) -> Result<(), DecodeError> {
        self.teardown();
        self.member_base = self.output_offset;
        self.start()
    }

    fn start(&mut self) -> Result<(), DecodeError> {
        self.consumed = false;
        self.finished = false;
        let session = self.codec.start().map_err(DecodeError::Start)?;
        self.session = Some(session);
        Ok(())
    }

    pub(crate) fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            session.end();
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn session_mut(&mut self) -> Result<&mut C::Session, DecodeError> {
        self.session.as_mut().ok_or(DecodeError::NotReady)
    }

    pub(crate) fn output_offset(&self) -> u64 {
        self.output_offset
    }

    /// Offset of the first byte of a chunk of `produced` bytes that the session just output.
    pub(crate) fn chunk_offset(&self, produced: usize) -> u64 {
        let total_out = self.session.as_ref().map_or(0, Session::total_out);
        self.member_base + total_out - produced as u64
    }

    pub(crate) fn advance(&mut self, produced: usize) {
        self.output_offset += produced as u64;
        debug_assert_eq!(
            Some(self.output_offset),
            self.session
                .as_ref()
                .map(|session| self.member_base + session.total_out())
        );
    }

    pub(crate) fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the session is part-way through a stream.
    pub(crate) fn is_pending(&self) -> bool {
        self.consumed && !self.finished
    }
}

impl<C: Codec> Drop for DecoderState<C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
