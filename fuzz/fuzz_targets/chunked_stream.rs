#![no_main]
use libfuzzer_sys::fuzz_target;

use std::io::Write;

use bytes::Bytes;
use chunked_decompress::{codec::BzCodec, stream::ChunkStream, ChunkDecoder};
use futures::stream::StreamExt as _;
use futures_test::stream::StreamTestExt as _;

fuzz_target!(|data: (Vec<Vec<u8>>, u16)| {
    let (input, buffer_size) = data;
    let expected: Vec<u8> = input.iter().flatten().copied().collect();

    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::fast());
    encoder.write_all(&expected).unwrap();
    let compressed = encoder.finish().unwrap();

    // Re-split the compressed bytes along the same boundaries as the fuzzed input.
    let mut pieces = Vec::new();
    let mut rest = compressed.as_slice();
    for piece in &input {
        let (head, tail) = rest.split_at(piece.len().min(rest.len()));
        pieces.push(Bytes::copy_from_slice(head));
        rest = tail;
    }
    pieces.push(Bytes::copy_from_slice(rest));

    let buffer_size = usize::from(buffer_size).max(1);
    let decoder = ChunkDecoder::new(BzCodec::new())
        .unwrap()
        .with_buffer_size(buffer_size.try_into().unwrap());
    let stream = futures::stream::iter(pieces.into_iter().map(Ok)).interleave_pending();

    futures::executor::block_on(async move {
        let mut decoded = Vec::new();
        let mut chunks = ChunkStream::new(Box::pin(stream), decoder);
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.unwrap();
            assert_eq!(chunk.offset(), decoded.len() as u64);
            assert!(chunk.len() <= buffer_size);
            decoded.extend_from_slice(chunk.data());
        }
        assert_eq!(expected, decoded);
    });
});
