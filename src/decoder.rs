use crate::{
    chunk::{ChunkSink, OutputChunk},
    codec::{Codec, Session, Status},
    error::DecodeError,
    state::DecoderState,
    util::PartialBuffer,
};
use bytes::BytesMut;
use std::{fmt, io, io::BufRead, num::NonZeroUsize};

/// Default maximum size of a single output chunk.
pub const DEFAULT_BUFFER_SIZE: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(size) => size,
    None => unreachable!(),
};

/// Result of a single iteration of the chunk loop.
#[derive(Debug, PartialEq, Eq)]
pub enum Progress {
    /// A chunk was produced, more output may be available from the same input.
    Chunk(OutputChunk),
    /// The compressed stream ended, possibly producing a last chunk on the way.
    End(Option<OutputChunk>),
    /// No output can be produced until more input is supplied.
    NeedInput,
}

/// An incremental decompressor turning arbitrarily-sized chunks of compressed input into output
/// chunks of at most [`buffer_size`](ChunkDecoder::buffer_size) bytes.
///
/// Input chunks are fed one at a time with [`push_chunk`](ChunkDecoder::push_chunk); each is fully
/// decoded before the call returns, handing every output chunk to a [`ChunkSink`] before the next
/// one is allocated. Memory use is bounded by the buffer size regardless of how large an input
/// chunk is or how well it compresses.
///
/// Any failure reinitializes the decoder, so the same value can be reused for a new stream, but
/// the stream that failed must be treated as corrupt.
pub struct ChunkDecoder<C: Codec> {
    state: DecoderState<C>,
    buffer_size: NonZeroUsize,
    multiple_members: bool,
    span: tracing::Span,
}

impl<C: Codec> fmt::Debug for ChunkDecoder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkDecoder")
            .field("codec", &self.state.codec().name())
            .field("ready", &self.state.is_ready())
            .field("output_offset", &self.state.output_offset())
            .field("buffer_size", &self.buffer_size)
            .field("multiple_members", &self.multiple_members)
            .finish()
    }
}

impl<C: Codec> ChunkDecoder<C> {
    /// Creates a decoder and starts its first session.
    pub fn new(codec: C) -> Result<Self, DecodeError> {
        let mut decoder = Self::new_uninit(codec);
        decoder.initialize()?;
        Ok(decoder)
    }

    /// Creates a decoder without starting a session, [`initialize`](Self::initialize) must be
    /// called before it will accept input.
    pub fn new_uninit(codec: C) -> Self {
        let span = tracing::debug_span!("chunk_decoder", codec = codec.name());
        Self {
            state: DecoderState::new(codec),
            buffer_size: DEFAULT_BUFFER_SIZE,
            multiple_members: false,
            span,
        }
    }

    /// Sets the maximum size of output chunks, see [`set_buffer_size`](Self::set_buffer_size).
    pub fn with_buffer_size(mut self, size: NonZeroUsize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the maximum size of output chunks. Takes effect from the next allocated chunk.
    pub fn set_buffer_size(&mut self, size: NonZeroUsize) {
        self.buffer_size = size;
    }

    /// Maximum size of a single output chunk.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size.get()
    }

    /// Configure whether concatenated streams are decoded as one.
    ///
    /// When enabled, input following the end of a stream is decoded as a new member, with
    /// offsets continuing from the previous one.
    pub fn multiple_members(&mut self, enabled: bool) {
        self.multiple_members = enabled;
    }

    /// Whether concatenated streams are decoded as one.
    pub fn is_multiple_members(&self) -> bool {
        self.multiple_members
    }

    /// Whether a live session exists.
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// Number of decompressed bytes emitted since the last (re)initialization.
    pub fn output_offset(&self) -> u64 {
        self.state.output_offset()
    }

    /// Whether the current stream has reached its end.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Tears down any existing session and starts a fresh one, resetting the output offset.
    pub fn initialize(&mut self) -> Result<(), DecodeError> {
        let span = self.span.clone();
        let _enter = span.enter();

        match self.state.initialize() {
            Ok(()) => {
                tracing::debug!("decompression session started");
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to start decompression");
                Err(err)
            }
        }
    }

    /// Releases the session. The decoder is not ready afterwards.
    pub fn teardown(&mut self) {
        if self.state.is_ready() {
            let span = self.span.clone();
            let _enter = span.enter();
            tracing::debug!(
                output_offset = self.state.output_offset(),
                "decompression session ended"
            );
        }
        self.state.teardown();
    }

    /// Decodes one input chunk completely, handing every produced chunk to `sink`.
    ///
    /// Returns `Ok(true)` iff the end of the compressed stream was reached. Any error leaves the
    /// decoder reinitialized, except [`DecodeError::NotReady`] which consumes nothing. If that
    /// restart itself fails it is logged but not returned, so check
    /// [`is_ready`](Self::is_ready) after an error before feeding a new stream.
    pub fn push_chunk(
        &mut self,
        input: &[u8],
        sink: &mut impl ChunkSink,
    ) -> Result<bool, DecodeError> {
        let mut input = PartialBuffer::new(input);
        self.push_partial(&mut input, sink)
    }

    fn push_partial(
        &mut self,
        input: &mut PartialBuffer<&[u8]>,
        sink: &mut impl ChunkSink,
    ) -> Result<bool, DecodeError> {
        loop {
            let chunk = match self.step(input, |offset, size| sink.alloc(offset, size))? {
                Progress::Chunk(chunk) => chunk,
                Progress::End(Some(chunk)) => {
                    self.deliver(sink, chunk)?;
                    return Ok(true);
                }
                Progress::End(None) => return Ok(true),
                Progress::NeedInput => return Ok(false),
            };
            self.deliver(sink, chunk)?;
        }
    }

    fn deliver(
        &mut self,
        sink: &mut impl ChunkSink,
        chunk: OutputChunk,
    ) -> Result<(), DecodeError> {
        let offset = chunk.offset();
        if let Err(err) = sink.push(chunk) {
            let span = self.span.clone();
            let _enter = span.enter();
            tracing::error!(offset, error = %err, "downstream rejected output chunk");
            self.reinitialize();
            return Err(DecodeError::Sink(err));
        }
        Ok(())
    }

    /// Runs a single iteration of the chunk loop, producing at most one chunk into a freshly
    /// allocated buffer. Intended for pull-based drivers, which call it repeatedly with the same
    /// input until [`Progress::NeedInput`] is returned.
    pub fn next_chunk(
        &mut self,
        input: &mut PartialBuffer<impl AsRef<[u8]>>,
    ) -> Result<Progress, DecodeError> {
        self.step(input, |_, size| Ok(BytesMut::zeroed(size)))
    }

    fn step(
        &mut self,
        input: &mut PartialBuffer<impl AsRef<[u8]>>,
        mut alloc: impl FnMut(u64, usize) -> io::Result<BytesMut>,
    ) -> Result<Progress, DecodeError> {
        let span = self.span.clone();
        let _enter = span.enter();

        if !self.state.is_ready() {
            tracing::error!("decompressor not ready");
            return Err(DecodeError::NotReady);
        }

        loop {
            if self.state.is_finished() {
                if input.unwritten().is_empty() {
                    return Ok(Progress::End(None));
                }
                if self.multiple_members {
                    tracing::debug!(
                        output_offset = self.state.output_offset(),
                        "starting next member"
                    );
                    if let Err(err) = self.state.restart_member() {
                        tracing::error!(error = %err, "failed to start decompression");
                        return Err(err);
                    }
                }
            }

            let size = self.buffer_size.get();
            let buffer = match alloc(self.state.output_offset(), size) {
                Ok(buffer) if buffer.len() == size => buffer,
                Ok(buffer) => {
                    return Err(self.fail(DecodeError::Alloc(io::Error::other(format!(
                        "expected a {} byte buffer, got {} bytes",
                        size,
                        buffer.len()
                    )))));
                }
                Err(err) => return Err(self.fail(DecodeError::Alloc(err))),
            };
            let mut output = PartialBuffer::new(buffer);

            let consumed_before = input.written().len();
            let result = self.state.session_mut()?.step(input, &mut output);
            if input.written().len() > consumed_before {
                self.state.mark_consumed();
            }

            let status = match result {
                Ok(status) => status,
                Err(err) => return Err(self.fail(err.into())),
            };

            let produced = output.written().len();
            let ended = status == Status::StreamEnd;
            if ended {
                self.state.mark_finished();
            }

            if produced == 0 {
                if ended && self.multiple_members && !input.unwritten().is_empty() {
                    continue;
                }
                return Ok(if ended {
                    Progress::End(None)
                } else {
                    Progress::NeedInput
                });
            }

            let mut buffer = output.into_inner();
            buffer.truncate(produced);
            let chunk = OutputChunk::new(self.state.chunk_offset(produced), buffer.freeze());
            self.state.advance(produced);
            tracing::trace!(offset = chunk.offset(), len = produced, "produced chunk");

            return Ok(
                if ended && !(self.multiple_members && !input.unwritten().is_empty()) {
                    tracing::debug!(
                        output_offset = self.state.output_offset(),
                        "end of stream"
                    );
                    Progress::End(Some(chunk))
                } else {
                    Progress::Chunk(chunk)
                },
            );
        }
    }

    /// Checks that the input ended on a stream boundary.
    ///
    /// Returns [`DecodeError::Truncated`], and reinitializes the decoder, if input was consumed
    /// but the end of the stream was never reached.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        if !self.state.is_pending() {
            return Ok(());
        }
        let offset = self.state.output_offset();
        Err(self.fail(DecodeError::Truncated { offset }))
    }

    /// Decodes everything `reader` yields, handing every produced chunk to `sink`.
    ///
    /// Each buffer returned by the reader is an input chunk; only the bytes the primitive
    /// consumed are released back to it. Stops after the end of the stream unless
    /// [`multiple_members`](Self::multiple_members) is enabled, and fails with
    /// [`DecodeError::Truncated`] if the reader runs dry mid-stream.
    pub fn decode_reader(
        &mut self,
        mut reader: impl BufRead,
        sink: &mut impl ChunkSink,
    ) -> Result<(), DecodeError> {
        loop {
            let buf = match reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(self.fail(DecodeError::Input(err))),
            };
            if buf.is_empty() {
                return self.finish();
            }

            let mut input = PartialBuffer::new(buf);
            let ended = self.push_partial(&mut input, sink)?;
            let consumed = input.written().len();
            reader.consume(consumed);

            if ended && !self.multiple_members {
                return Ok(());
            }
        }
    }

    fn fail(&mut self, err: DecodeError) -> DecodeError {
        let span = self.span.clone();
        let _enter = span.enter();
        tracing::error!(error = %err, "decompression failed");
        self.reinitialize();
        err
    }

    fn reinitialize(&mut self) {
        // A failing restart is already logged, and leaves the decoder not ready.
        let _ = self.initialize();
    }
}

#[cfg(feature = "bzip2")]
const _: () = {
    use crate::{
        codec::BzCodec,
        util::{_assert_send, _assert_sync},
    };

    _assert_send::<ChunkDecoder<BzCodec>>();
    _assert_sync::<ChunkDecoder<BzCodec>>();
};
