// SPDX-License-Identifier: Apache-2.0

/// Error type for SliceInputBuffer operations.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Reached the end of input data.
    ReachedEnd,
}

/// The decoder's cursor: the input slice and how far into it we are.
///
/// The position only moves forward. Nothing here reads past the end.
#[derive(Debug)]
pub struct SliceInputBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceInputBuffer<'a> {
    /// Creates a new SliceInputBuffer with the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Gets the length of the underlying data.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Takes the next byte, or fails without moving when none are left.
    pub fn consume_byte(&mut self) -> Result<u8, Error> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn peek_byte(&self) -> Result<u8, Error> {
        self.data.get(self.pos).copied().ok_or(Error::ReachedEnd)
    }

    /// Takes the next `len` bytes as one slice, or fails without moving
    /// when fewer than `len` are left.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if len > self.remaining() {
            return Err(Error::ReachedEnd);
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.data[start..self.pos])
    }

    /// Gets a slice of the data from start to end positions, with bounds checking.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a [u8]> {
        self.data.get(start..end)
    }
}
