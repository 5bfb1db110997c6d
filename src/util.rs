pub const fn _assert_send<T: Send>() {}
pub const fn _assert_sync<T: Sync>() {}

/// A cursor over a byte buffer, tracking how much of it has been consumed (for input) or filled
/// (for output) by a decompression step.
#[derive(Debug, Default)]
pub struct PartialBuffer<B> {
    buffer: B,
    index: usize,
}

impl<B: AsRef<[u8]>> PartialBuffer<B> {
    /// Wraps `buffer` with the cursor at its start.
    pub fn new(buffer: B) -> Self {
        Self { buffer, index: 0 }
    }

    /// The part of the buffer before the cursor.
    pub fn written(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.index]
    }

    /// The part of the buffer after the cursor.
    pub fn unwritten(&self) -> &[u8] {
        &self.buffer.as_ref()[self.index..]
    }

    /// Moves the cursor forward by `amount` bytes.
    pub fn advance(&mut self, amount: usize) {
        self.index += amount;
    }

    /// Returns the underlying buffer, discarding the cursor.
    pub fn into_inner(self) -> B {
        self.buffer
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PartialBuffer<B> {
    /// Mutable access to the part of the buffer after the cursor.
    pub fn unwritten_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.as_mut()[self.index..]
    }
}

impl<B: AsRef<[u8]>> From<B> for PartialBuffer<B> {
    fn from(buffer: B) -> Self {
        Self::new(buffer)
    }
}
