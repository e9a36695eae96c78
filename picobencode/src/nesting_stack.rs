// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;
use core::ops::Range;

use log::{debug, trace};

/// Capacity of the first allocation; every later growth doubles it.
const INITIAL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    List,
    Dict,
}

/// Offsets of a dictionary key's payload in the input buffer.
///
/// Frames keep offsets rather than slices so the stack has no lifetime and
/// can be carried over to a decoder on a different buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpan {
    start: usize,
    end: usize,
}

impl KeySpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Bookkeeping for one open list or dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub kind: ContainerKind,
    /// No child element has been emitted yet.
    pub first: bool,
    /// Most recently accepted key. Dictionaries only.
    pub last_key: Option<KeySpan>,
    /// A key was accepted and its value has not started. Dictionaries only.
    pub expecting_value: bool,
}

impl Frame {
    pub fn list() -> Self {
        Self {
            kind: ContainerKind::List,
            first: true,
            last_key: None,
            expecting_value: false,
        }
    }

    pub fn dict() -> Self {
        Self {
            kind: ContainerKind::Dict,
            first: true,
            last_key: None,
            expecting_value: false,
        }
    }
}

/// The stack could not take another frame.
#[derive(Debug, PartialEq)]
pub enum StackError {
    /// Allocation failed, or doubling the capacity would overflow.
    Exhausted,
    /// The caller's configured depth limit was reached.
    DepthLimit,
}

/// Growable stack of open containers, index 0 being the outermost.
///
/// Capacity starts at zero, becomes [`INITIAL_CAPACITY`] on the first push
/// and doubles from there. Clearing keeps the allocation for the next input.
#[derive(Debug, Default)]
pub struct NestingStack {
    frames: Vec<Frame>,
    max_depth: Option<usize>,
}

impl NestingStack {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn capacity(&self) -> usize {
        self.frames.capacity()
    }

    /// Pushes a frame and returns its index.
    pub fn push(&mut self, frame: Frame) -> Result<usize, StackError> {
        if self.max_depth.is_some_and(|max| self.frames.len() >= max) {
            return Err(StackError::DepthLimit);
        }
        if self.frames.len() == self.frames.capacity() {
            self.grow()?;
        }
        let index = self.frames.len();
        trace!("push {:?} frame at depth {}", frame.kind, index);
        self.frames.push(frame);
        Ok(index)
    }

    fn grow(&mut self) -> Result<(), StackError> {
        let new_capacity = match self.frames.capacity() {
            0 => INITIAL_CAPACITY,
            capacity => capacity.checked_mul(2).ok_or(StackError::Exhausted)?,
        };
        self.frames
            .try_reserve_exact(new_capacity - self.frames.len())
            .map_err(|_| StackError::Exhausted)?;
        debug!("nesting stack grown to {} frames", self.frames.capacity());
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Frame> {
        let frame = self.frames.pop();
        trace!("pop {:?} frame, depth now {}", frame.map(|f| f.kind), self.frames.len());
        frame
    }

    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    /// Drops all frames, keeping the allocation.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Drops all frames and frees the allocation.
    pub fn release(&mut self) {
        self.frames = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_first_push_allocates_initial_capacity() {
        let mut stack = NestingStack::new(None);
        assert_eq!(stack.capacity(), 0);
        assert_eq!(stack.push(Frame::list()), Ok(0));
        assert!(stack.capacity() >= INITIAL_CAPACITY);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_growth_doubles() {
        let mut stack = NestingStack::new(None);
        for i in 0..INITIAL_CAPACITY {
            assert_eq!(stack.push(Frame::dict()), Ok(i));
        }
        let before = stack.capacity();
        assert_eq!(stack.push(Frame::list()), Ok(INITIAL_CAPACITY));
        assert!(stack.capacity() >= before * 2);
        assert_eq!(stack.depth(), INITIAL_CAPACITY + 1);
    }

    #[test]
    fn test_pop_returns_frames_in_reverse() {
        let mut stack = NestingStack::new(None);
        stack.push(Frame::list()).unwrap();
        stack.push(Frame::dict()).unwrap();
        assert_eq!(stack.top().map(|f| f.kind), Some(ContainerKind::Dict));
        assert_eq!(stack.pop().map(|f| f.kind), Some(ContainerKind::Dict));
        assert_eq!(stack.pop().map(|f| f.kind), Some(ContainerKind::List));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.top(), None);
    }

    #[test]
    fn test_top_mut_updates_frame() {
        let mut stack = NestingStack::new(None);
        stack.push(Frame::dict()).unwrap();
        if let Some(frame) = stack.top_mut() {
            frame.first = false;
            frame.expecting_value = true;
            frame.last_key = Some(KeySpan::new(3, 8));
        }
        let frame = stack.top().unwrap();
        assert!(!frame.first);
        assert!(frame.expecting_value);
        assert_eq!(frame.last_key.map(|k| k.range()), Some(3..8));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut stack = NestingStack::new(None);
        for _ in 0..100 {
            stack.push(Frame::list()).unwrap();
        }
        let capacity = stack.capacity();
        stack.clear();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.capacity(), capacity);
    }

    #[test]
    fn test_release_frees_storage() {
        let mut stack = NestingStack::new(None);
        stack.push(Frame::list()).unwrap();
        stack.release();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.capacity(), 0);
        // Usable again, starting over from the initial capacity
        assert_eq!(stack.push(Frame::list()), Ok(0));
    }

    #[test]
    fn test_depth_limit() {
        let mut stack = NestingStack::new(Some(2));
        assert_eq!(stack.push(Frame::list()), Ok(0));
        assert_eq!(stack.push(Frame::list()), Ok(1));
        assert_eq!(stack.push(Frame::list()), Err(StackError::DepthLimit));
        assert_eq!(stack.depth(), 2);
        stack.pop();
        assert_eq!(stack.push(Frame::dict()), Ok(1));
    }
}
