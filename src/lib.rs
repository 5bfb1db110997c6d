//! Incremental decompression of arbitrarily-chunked compressed byte streams into output chunks of
//! bounded size.
//!
//! A [`ChunkDecoder`] wraps a streaming decompression primitive (see [`codec`]) and is fed one
//! input chunk at a time. For every input chunk it drives the primitive across as many fixed-size
//! output buffers as needed, handing each filled chunk, tagged with its offset in the
//! decompressed stream, to a [`ChunkSink`] before allocating the next. No output buffer ever
//! exceeds the configured [`buffer_size`](ChunkDecoder::buffer_size), so memory use does not
//! depend on how large an input chunk is or how well it compresses.
//!
//! Decoding failures reinitialize the decoder: the failing stream is lost, but the same decoder
//! can be used for the next one.
//!
//! ```
//! # #[cfg(feature = "bzip2")] {
//! use chunked_decompress::{codec::BzCodec, ChunkDecoder, OutputChunk};
//! use std::{io::Write, num::NonZeroUsize};
//!
//! let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::fast());
//! encoder.write_all(&[7; 40]).unwrap();
//! let compressed = encoder.finish().unwrap();
//!
//! let mut decoder = ChunkDecoder::new(BzCodec::new())
//!     .unwrap()
//!     .with_buffer_size(NonZeroUsize::new(16).unwrap());
//! let mut chunks: Vec<OutputChunk> = Vec::new();
//! let (head, tail) = compressed.split_at(compressed.len() / 2);
//! assert!(!decoder.push_chunk(head, &mut chunks).unwrap());
//! assert!(decoder.push_chunk(tail, &mut chunks).unwrap());
//!
//! let lengths: Vec<_> = chunks.iter().map(OutputChunk::len).collect();
//! assert_eq!(lengths, [16, 16, 8]);
//! # }
//! ```
//!
//! # Feature Organization
//!
//! All algorithms except `bzip2` are disabled by default, enable just the ones you need. The
//! `all` feature pulls in everything.
//!
//! ## Compression algorithm
//!
//!  Feature | Types
//! ---------|------
#![cfg_attr(
    feature = "bzip2",
    doc = "`bzip2` | [`BzCodec`](crate::codec::BzCodec)"
)]
#![cfg_attr(not(feature = "bzip2"), doc = "`bzip2` (*inactive*) | `BzCodec`")]
#![cfg_attr(
    feature = "deflate",
    doc = "`deflate` | [`FlateCodec::deflate`](crate::codec::FlateCodec::deflate)"
)]
#![cfg_attr(
    not(feature = "deflate"),
    doc = "`deflate` (*inactive*) | `FlateCodec::deflate`"
)]
#![cfg_attr(
    feature = "zlib",
    doc = "`zlib` | [`FlateCodec::zlib`](crate::codec::FlateCodec::zlib)"
)]
#![cfg_attr(not(feature = "zlib"), doc = "`zlib` (*inactive*) | `FlateCodec::zlib`")]
//!
//! ## Drivers
//!
//!  Feature | Type
//! ---------|------
//!  (always) | [`ChunkDecoder::push_chunk`], [`ChunkDecoder::decode_reader`] over [`std::io::BufRead`]
#![cfg_attr(
    feature = "stream",
    doc = "`stream` | [`ChunkStream`](crate::stream::ChunkStream) over [`futures_core::stream::Stream`]"
)]
#![cfg_attr(
    not(feature = "stream"),
    doc = "`stream` (*inactive*) | `ChunkStream` over `futures::stream::Stream`"
)]
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_copy_implementations,
    missing_debug_implementations
)]

mod chunk;
pub mod codec;
mod decoder;
mod error;
mod state;
#[cfg(feature = "stream")]
#[cfg_attr(docsrs, doc(cfg(feature = "stream")))]
pub mod stream;
mod util;

pub use crate::{
    chunk::{ChunkSink, OutputChunk, WriteSink},
    decoder::{ChunkDecoder, Progress, DEFAULT_BUFFER_SIZE},
    error::DecodeError,
    util::PartialBuffer,
};

#[cfg(feature = "bzip2")]
pub use bzip2;
#[cfg(feature = "flate2")]
pub use flate2;
