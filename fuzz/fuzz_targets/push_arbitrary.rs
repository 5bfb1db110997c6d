#![no_main]
use libfuzzer_sys::fuzz_target;

use chunked_decompress::{codec::BzCodec, ChunkDecoder};

fuzz_target!(|input: Vec<Vec<u8>>| {
    let mut decoder = ChunkDecoder::new(BzCodec::new()).unwrap();
    let mut chunks = Vec::new();
    for piece in &input {
        if decoder.push_chunk(piece, &mut chunks).is_err() {
            assert!(decoder.is_ready());
            assert_eq!(decoder.output_offset(), 0);
        }
    }
    let _ = decoder.finish();
});
