mod utils;

use bytes::Bytes;
use chunked_decompress::{codec::BzCodec, stream::ChunkStream, ChunkDecoder, OutputChunk};
use futures::{
    executor::block_on_stream,
    stream::{self, Stream},
};
use std::io;
use utils::{assert_well_formed, bzip2_compress, concat, init_tracing, pattern, size, InputStream};

fn decode(
    input: impl Stream<Item = io::Result<Bytes>>,
    buffer_size: usize,
) -> Vec<io::Result<OutputChunk>> {
    let decoder = ChunkDecoder::new(BzCodec::new())
        .unwrap()
        .with_buffer_size(size(buffer_size));
    block_on_stream(ChunkStream::new(Box::pin(input), decoder)).collect()
}

#[test]
#[ntest::timeout(1000)]
fn yields_bounded_chunks() {
    init_tracing();
    let input = pattern(40);
    let compressed = bzip2_compress(&input);
    let stream = InputStream::split(&compressed, 5);

    let chunks: Vec<_> = decode(stream.stream(), 16)
        .into_iter()
        .collect::<io::Result<_>>()
        .unwrap();

    let shape: Vec<_> = chunks.iter().map(|c| (c.offset(), c.len())).collect();
    assert_eq!(shape, [(0, 16), (16, 16), (32, 8)]);
    assert_eq!(concat(&chunks), input);
}

#[test]
#[ntest::timeout(1000)]
fn empty_input() {
    assert!(decode(stream::empty(), 16).is_empty());
}

#[test]
#[ntest::timeout(1000)]
fn empty_compressed_stream() {
    let compressed = bzip2_compress(&[]);
    let stream = InputStream::split(&compressed, 3);

    assert!(decode(stream.stream(), 16).is_empty());
}

#[test]
#[ntest::timeout(1000)]
fn truncated_input() {
    let compressed = bzip2_compress(&pattern(40));
    let stream = InputStream::split(&compressed[..compressed.len() - 3], 8);

    let mut results = decode(stream.stream(), 16);

    let err = results.pop().unwrap().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    let chunks: Vec<_> = results.into_iter().collect::<io::Result<_>>().unwrap();
    assert_eq!(concat(&chunks), pattern(40));
}

#[test]
#[ntest::timeout(1000)]
fn corrupt_input_ends_stream() {
    let mut compressed = bzip2_compress(&pattern(40));
    compressed[0] = b'X';
    let stream = InputStream::split(&compressed, 8);

    let results = decode(stream.stream(), 16);

    assert_eq!(results.len(), 1);
    let err = results.into_iter().next().unwrap().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
#[ntest::timeout(1000)]
fn input_error_is_forwarded() {
    let compressed = bzip2_compress(&pattern(40));
    let input = stream::iter(vec![
        Ok(Bytes::copy_from_slice(&compressed[..10])),
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away")),
        Ok(Bytes::copy_from_slice(&compressed[10..])),
    ]);

    let results = decode(input, 16);

    assert_eq!(results.len(), 1);
    let err = results.into_iter().next().unwrap().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
}

#[test]
#[ntest::timeout(1000)]
fn multiple_members() {
    let mut compressed = bzip2_compress(&pattern(40));
    compressed.extend_from_slice(&bzip2_compress(&pattern(24)));
    let stream = InputStream::split(&compressed, 11);
    let mut decoder = ChunkDecoder::new(BzCodec::new())
        .unwrap()
        .with_buffer_size(size(16));
    decoder.multiple_members(true);

    let chunks: Vec<_> = block_on_stream(ChunkStream::new(Box::pin(stream.stream()), decoder))
        .collect::<io::Result<_>>()
        .unwrap();

    assert_eq!(concat(&chunks), [pattern(40), pattern(24)].concat());
    let last = chunks.last().unwrap();
    assert_eq!(last.end_offset(), 64);
}

#[test]
#[ntest::timeout(1000)]
fn stops_after_stream_end() {
    let input = pattern(100);
    let mut compressed = bzip2_compress(&input);
    compressed.extend_from_slice(b"trailing garbage");
    let stream = InputStream::split(&compressed, 4);

    let chunks: Vec<_> = decode(stream.stream(), 32)
        .into_iter()
        .collect::<io::Result<_>>()
        .unwrap();

    assert_eq!(concat(&chunks), input);
    assert_well_formed(&chunks, 32);
}
