//! Adaptor over [`Stream`](futures_core::stream::Stream)`<Item = `[`io::Result`](std::io::Result)`<`[`Bytes`](bytes::Bytes)`>>`
//! streams of compressed input.
//!
//! Each item of the wrapped stream is an input chunk. Output chunks are produced one per poll, so
//! at most one output buffer is alive at a time no matter how large an input chunk is.

use crate::{
    chunk::OutputChunk,
    codec::Codec,
    decoder::{ChunkDecoder, Progress},
    util::PartialBuffer,
};
use bytes::Bytes;
use futures_core::{ready, stream::Stream};
use pin_project_lite::pin_project;
use std::{
    io::Result,
    pin::Pin,
    task::{Context, Poll},
};

#[derive(Debug)]
enum State {
    Reading,
    Decoding,
    Done,
}

pin_project! {
    /// A stream of [`OutputChunk`]s decoded from a stream of compressed input chunks.
    ///
    /// Ends after the end of the compressed stream, or, with
    /// [`multiple_members`](ChunkDecoder::multiple_members) enabled, once the input ends on a
    /// stream boundary. Input ending mid-stream yields an
    /// [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof) error. After any error the stream
    /// ends and no further input is pulled.
    #[derive(Debug)]
    pub struct ChunkStream<S, C: Codec> {
        #[pin]
        stream: S,
        decoder: ChunkDecoder<C>,
        input: PartialBuffer<Bytes>,
        state: State,
    }
}

impl<S: Stream<Item = Result<Bytes>>, C: Codec> ChunkStream<S, C> {
    /// Creates a stream decoding the input chunks of `stream` with `decoder`.
    pub fn new(stream: S, decoder: ChunkDecoder<C>) -> Self {
        Self {
            stream,
            decoder,
            input: PartialBuffer::new(Bytes::new()),
            state: State::Reading,
        }
    }
}

impl<S, C: Codec> ChunkStream<S, C> {
    /// Acquires a reference to the decoder.
    pub fn decoder(&self) -> &ChunkDecoder<C> {
        &self.decoder
    }

    /// Acquires a mutable reference to the decoder.
    pub fn decoder_mut(&mut self) -> &mut ChunkDecoder<C> {
        &mut self.decoder
    }

    /// Acquires a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Acquires a mutable reference to the underlying stream.
    ///
    /// Note that care must be taken to avoid tampering with the state of the stream which may
    /// otherwise confuse this decoder.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Acquires a pinned mutable reference to the underlying stream.
    pub fn get_pin_mut(self: Pin<&mut Self>) -> Pin<&mut S> {
        self.project().stream
    }

    /// Consumes this adaptor returning the underlying stream and decoder.
    pub fn into_inner(self) -> (S, ChunkDecoder<C>) {
        (self.stream, self.decoder)
    }
}

impl<S: Stream<Item = Result<Bytes>>, C: Codec> Stream for ChunkStream<S, C> {
    type Item = Result<OutputChunk>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<OutputChunk>>> {
        let mut this = self.project();

        loop {
            match *this.state {
                State::Reading => match ready!(this.stream.as_mut().poll_next(cx)) {
                    Some(Ok(chunk)) => {
                        *this.input = PartialBuffer::new(chunk);
                        *this.state = State::Decoding;
                    }
                    Some(Err(err)) => {
                        *this.state = State::Done;
                        return Poll::Ready(Some(Err(err)));
                    }
                    None => {
                        *this.state = State::Done;
                        if let Err(err) = this.decoder.finish() {
                            return Poll::Ready(Some(Err(err.into())));
                        }
                    }
                },

                State::Decoding => match this.decoder.next_chunk(&mut *this.input) {
                    Ok(Progress::Chunk(chunk)) => return Poll::Ready(Some(Ok(chunk))),
                    Ok(Progress::End(chunk)) => {
                        *this.state = if this.decoder.is_multiple_members() {
                            State::Reading
                        } else {
                            State::Done
                        };
                        if let Some(chunk) = chunk {
                            return Poll::Ready(Some(Ok(chunk)));
                        }
                    }
                    Ok(Progress::NeedInput) => *this.state = State::Reading,
                    Err(err) => {
                        *this.state = State::Done;
                        return Poll::Ready(Some(Err(err.into())));
                    }
                },

                State::Done => return Poll::Ready(None),
            }
        }
    }
}

#[cfg(feature = "bzip2")]
const _: () = {
    use crate::{
        codec::BzCodec,
        util::{_assert_send, _assert_sync},
    };

    _assert_send::<ChunkStream<Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>, BzCodec>>();
    _assert_sync::<ChunkStream<Pin<Box<dyn Stream<Item = Result<Bytes>> + Sync>>, BzCodec>>();
};
