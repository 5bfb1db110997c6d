use bytes::Bytes;
use futures::stream::{Stream, StreamExt as _};
use futures_test::stream::StreamTestExt as _;
use proptest_derive::Arbitrary;
use std::io;

/// Compressed input split into chunks, as a caller would deliver it.
#[derive(Arbitrary, Debug, Clone)]
pub struct InputStream(Vec<Vec<u8>>);

impl InputStream {
    /// Splits `bytes` into chunks of `chunk_size` bytes, the last one possibly shorter.
    pub fn split(bytes: &[u8], chunk_size: usize) -> Self {
        InputStream(bytes.chunks(chunk_size).map(Vec::from).collect())
    }

    /// Splits `bytes` at each of the given positions.
    pub fn split_at(bytes: &[u8], positions: &[usize]) -> Self {
        let mut chunks = Vec::new();
        let mut start = 0;
        for &position in positions {
            let position = position.min(bytes.len()).max(start);
            chunks.push(bytes[start..position].to_vec());
            start = position;
        }
        chunks.push(bytes[start..].to_vec());
        InputStream(chunks)
    }

    pub fn as_ref(&self) -> &[Vec<u8>] {
        &self.0
    }

    pub fn stream(&self) -> impl Stream<Item = io::Result<Bytes>> {
        // The resulting stream here will interleave empty chunks before and after each chunk, and
        // then interleave a `Poll::Pending` between each yielded chunk, that way we test the
        // handling of these two conditions in every point of the tested stream.
        futures::stream::iter(
            self.0
                .clone()
                .into_iter()
                .flat_map(|bytes| vec![vec![], bytes])
                .chain(Some(vec![])),
        )
        .map(Bytes::from)
        .map(io::Result::Ok)
        .interleave_pending()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.0.iter().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }
}

impl From<Vec<Vec<u8>>> for InputStream {
    fn from(input: Vec<Vec<u8>>) -> InputStream {
        InputStream(input)
    }
}
