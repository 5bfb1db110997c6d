use bytes::{Bytes, BytesMut};
use std::io::{self, Write};

/// A span of decompressed bytes, tagged with the offset of its first byte in the decompressed
/// stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputChunk {
    offset: u64,
    data: Bytes,
}

impl OutputChunk {
    pub(crate) fn new(offset: u64, data: Bytes) -> Self {
        Self { offset, data }
    }

    /// Offset of the first byte of this chunk within the decompressed stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of bytes in this chunk.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this chunk holds no bytes. Never true for chunks produced by a decoder.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The decompressed bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consumes the chunk, returning its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Offset one past the last byte of this chunk, i.e. where the next chunk must start.
    pub fn end_offset(&self) -> u64 {
        self.offset + self.data.len() as u64
    }
}

impl AsRef<[u8]> for OutputChunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// The downstream side of a [`ChunkDecoder`](crate::ChunkDecoder): provides output buffers and
/// accepts the chunks produced into them, one at a time and in increasing offset order.
pub trait ChunkSink {
    /// Provides a buffer of exactly `size` bytes for the chunk which will start at `offset`.
    ///
    /// Returning an error makes the decoder abandon the current input chunk.
    fn alloc(&mut self, offset: u64, size: usize) -> io::Result<BytesMut> {
        let _ = offset;
        Ok(BytesMut::zeroed(size))
    }

    /// Accepts a produced chunk.
    ///
    /// Returning an error makes the decoder abandon the current input chunk.
    fn push(&mut self, chunk: OutputChunk) -> io::Result<()>;
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn alloc(&mut self, offset: u64, size: usize) -> io::Result<BytesMut> {
        (**self).alloc(offset, size)
    }

    fn push(&mut self, chunk: OutputChunk) -> io::Result<()> {
        (**self).push(chunk)
    }
}

impl ChunkSink for Vec<OutputChunk> {
    fn push(&mut self, chunk: OutputChunk) -> io::Result<()> {
        Vec::push(self, chunk);
        Ok(())
    }
}

/// A [`ChunkSink`] writing the bytes of every chunk, in order, to an [`io::Write`].
///
/// Chunks must arrive contiguously: a chunk whose offset does not follow on from the previous one
/// is rejected with [`io::ErrorKind::InvalidData`]. Use one sink per logical stream.
#[derive(Debug)]
pub struct WriteSink<W> {
    writer: W,
    next_offset: u64,
}

impl<W: Write> WriteSink<W> {
    /// Creates a sink expecting the stream to start at offset zero.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            next_offset: 0,
        }
    }

    /// Acquires a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Acquires a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> u64 {
        self.next_offset
    }

    /// Consumes this sink returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChunkSink for WriteSink<W> {
    fn push(&mut self, chunk: OutputChunk) -> io::Result<()> {
        if chunk.offset() != self.next_offset {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "chunk at offset {} does not follow offset {}",
                    chunk.offset(),
                    self.next_offset
                ),
            ));
        }
        self.writer.write_all(chunk.data())?;
        self.next_offset = chunk.end_offset();
        Ok(())
    }
}
