#![allow(unused)] // Different tests use a different subset of functions

mod input_stream;

pub use self::input_stream::InputStream;

use chunked_decompress::{codec::Codec, ChunkDecoder, OutputChunk};
use std::{
    io::{Read, Write},
    num::NonZeroUsize,
};

pub fn size(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size).unwrap()
}

/// Routes the decoders' tracing output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .without_time()
        .with_ansi(false)
        .with_test_writer()
        .try_init();
}

/// Bytes following a simple counting pattern, so misplaced chunks are visible.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

pub fn random(len: usize) -> Vec<u8> {
    (0..len).map(|_| rand::random()).collect()
}

#[cfg(feature = "bzip2")]
pub fn bzip2_compress(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::fast());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

#[cfg(feature = "bzip2")]
pub fn bzip2_decompress(bytes: &[u8]) -> Vec<u8> {
    let mut output = vec![];
    bzip2::read::BzDecoder::new(bytes)
        .read_to_end(&mut output)
        .unwrap();
    output
}

/// Feeds every chunk of `input` to `decoder`, returning the produced chunks and whether the end
/// of the stream was reported by the last chunk fed.
pub fn decode_chunks<C: Codec>(
    decoder: &mut ChunkDecoder<C>,
    input: &InputStream,
) -> (Vec<OutputChunk>, bool) {
    let mut chunks = Vec::new();
    let mut ended = false;
    for chunk in input.as_ref() {
        ended = decoder.push_chunk(chunk, &mut chunks).unwrap();
    }
    (chunks, ended)
}

pub fn concat(chunks: &[OutputChunk]) -> Vec<u8> {
    chunks
        .iter()
        .flat_map(|chunk| chunk.data().iter().copied())
        .collect()
}

/// Checks chunks are non-empty, no larger than `buffer_size`, and have contiguous offsets
/// starting from zero.
pub fn assert_contiguous(chunks: &[OutputChunk], buffer_size: usize) {
    let mut expected_offset = 0;
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(!chunk.is_empty(), "chunk {} is empty", i);
        assert!(chunk.len() <= buffer_size, "chunk {} too large", i);
        assert_eq!(chunk.offset(), expected_offset, "chunk {} misplaced", i);
        expected_offset = chunk.end_offset();
    }
}

/// As [`assert_contiguous`], and additionally only the last chunk may be shorter than
/// `buffer_size`.
pub fn assert_well_formed(chunks: &[OutputChunk], buffer_size: usize) {
    assert_contiguous(chunks, buffer_size);
    if let Some((_, init)) = chunks.split_last() {
        for (i, chunk) in init.iter().enumerate() {
            assert_eq!(chunk.len(), buffer_size, "chunk {} short", i);
        }
    }
}
