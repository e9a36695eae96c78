// SPDX-License-Identifier: Apache-2.0

use core::cmp::Ordering;

use crate::nesting_stack::{ContainerKind, Frame, KeySpan, NestingStack};
use crate::shared::{Event, PullParser};
use crate::slice_input_buffer::SliceInputBuffer;
use crate::token_scanner::{scan_integer, scan_string};
use crate::{ErrKind, Integer, ParseError};

use log::{debug, trace};

/// Runtime options for a [`SliceDecoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Deepest nesting accepted before reporting [`ErrKind::OutOfMemory`].
    /// `None` leaves depth bounded only by available memory.
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing emitted yet.
    Start,
    Streaming,
    Done,
    Failed(ParseError),
}

/// A pull decoder over a bencode message held in one slice.
///
/// Every call to [`next_event`](PullParser::next_event) consumes exactly one
/// grammar element. Dictionaries are validated as they stream: keys must be
/// strings, each key needs a value, and keys must be strictly ascending.
///
/// Once the decoder reports [`Event::EndDocument`] it keeps reporting it, and
/// once it fails it keeps returning the same error. Use [`reset`](Self::reset)
/// or [`rebind`](Self::rebind) to decode another buffer; both keep the nesting
/// stack's allocation.
///
/// A decoder is a single mutable cursor. It is not meant to be shared between
/// threads without external locking, but independent decoders are independent.
// Lifetime 'a is the input buffer lifetime
pub struct SliceDecoder<'a> {
    buffer: SliceInputBuffer<'a>,
    stack: NestingStack,
    /// Last integer or string payload scanned
    token: Option<&'a [u8]>,
    state: State,
}

impl<'a> SliceDecoder<'a> {
    /// Creates a new decoder for the given input.
    ///
    /// This never fails and does not allocate; the nesting stack is
    /// allocated on the first list or dictionary.
    ///
    /// # Example
    /// ```
    /// use picobencode::SliceDecoder;
    /// let decoder = SliceDecoder::new(b"li1ei2ee");
    /// ```
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, DecoderConfig::default())
    }

    /// Creates a new decoder from a string slice.
    pub fn new_from_str(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }

    /// Creates a new decoder with custom runtime options.
    ///
    /// # Example
    /// ```
    /// use picobencode::{DecoderConfig, SliceDecoder};
    /// let config = DecoderConfig { max_depth: Some(16) };
    /// let decoder = SliceDecoder::with_config(b"le", config);
    /// ```
    pub fn with_config(input: &'a [u8], config: DecoderConfig) -> Self {
        SliceDecoder {
            buffer: SliceInputBuffer::new(input),
            stack: NestingStack::new(config.max_depth),
            token: None,
            state: State::Start,
        }
    }

    /// Starts over on a new buffer of the same lifetime, keeping the stack
    /// allocation.
    pub fn reset(&mut self, input: &'a [u8]) {
        self.buffer = SliceInputBuffer::new(input);
        self.stack.clear();
        self.token = None;
        self.state = State::Start;
    }

    /// Moves this decoder onto a buffer with a different lifetime, keeping
    /// the stack allocation.
    pub fn rebind<'b>(self, input: &'b [u8]) -> SliceDecoder<'b> {
        let mut stack = self.stack;
        stack.clear();
        SliceDecoder {
            buffer: SliceInputBuffer::new(input),
            stack,
            token: None,
            state: State::Start,
        }
    }

    /// Frees the nesting stack.
    ///
    /// The decoder is left on an empty input and reports truncation until it
    /// is [`reset`](Self::reset) onto something new.
    pub fn release(&mut self) {
        self.stack.release();
        self.reset(&[]);
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Byte offset of the cursor in the input.
    pub fn position(&self) -> usize {
        self.buffer.current_pos()
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }

    /// Number of frames the nesting stack can hold without growing.
    pub fn stack_capacity(&self) -> usize {
        self.stack.capacity()
    }

    /// The last integer or string payload scanned.
    ///
    /// After an [`ErrKind::BadKey`] error this is the offending key.
    pub fn token(&self) -> Option<&'a [u8]> {
        self.token
    }

    /// True if the next element will be the first one at the current
    /// nesting level. At top level that means nothing was emitted yet.
    pub fn is_first(&self) -> bool {
        match self.stack.top() {
            Some(frame) => frame.first,
            None => self.state == State::Start,
        }
    }

    /// True if the next element is a dictionary value rather than a key.
    pub fn is_dict_value(&self) -> bool {
        self.stack
            .top()
            .is_some_and(|frame| frame.kind == ContainerKind::Dict && frame.expecting_value)
    }

    fn push(&mut self, frame: Frame, pos: usize) -> Result<(), ParseError> {
        match self.stack.push(frame) {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!("cannot open container at {}: {:?}", pos, e);
                Err(ParseError::new(ErrKind::OutOfMemory, pos))
            }
        }
    }

    /// Checks a just-scanned key against the previous key of the open
    /// dictionary and records it.
    fn accept_key(&mut self, pos: usize, key: &'a [u8]) -> Result<(), ParseError> {
        let end = self.buffer.current_pos();
        // Keys are only scanned with a dictionary frame on top
        if let Some(frame) = self.stack.top_mut() {
            let prev = frame.last_key.and_then(|span| {
                let range = span.range();
                self.buffer.slice(range.start, range.end)
            });
            if let Some(prev) = prev {
                if !key_follows(prev, key) {
                    debug!(
                        "key {:?} at {} does not follow {:?}",
                        key.escape_ascii(),
                        pos,
                        prev.escape_ascii()
                    );
                    return Err(ParseError::new(ErrKind::BadKey, pos));
                }
            }
            frame.last_key = Some(KeySpan::new(end - key.len(), end));
        }
        Ok(())
    }

    fn next_event_impl(&mut self) -> Result<Event<'a>, ParseError> {
        let mut is_key = false;

        match self.stack.top_mut() {
            Some(frame) => {
                frame.first = false;
                if frame.kind == ContainerKind::Dict {
                    let pos = self.buffer.current_pos();
                    let next = self.buffer.peek_byte().ok();
                    if frame.expecting_value {
                        if next == Some(b'e') {
                            debug!("dictionary ends at {} with a key but no value", pos);
                            return Err(ParseError::invalid(pos));
                        }
                        frame.expecting_value = false;
                    } else {
                        match next {
                            Some(b'e' | b'0'..=b'9') => {}
                            Some(_) => {
                                debug!("dictionary key at {} is not a string", pos);
                                return Err(ParseError::invalid(pos));
                            }
                            // Input ended before a key or 'e': truncation, not a bad byte
                            None => return Err(ParseError::truncated(self.buffer.data_len())),
                        }
                        frame.expecting_value = true;
                        is_key = true;
                    }
                }
            }
            None => {
                if self.state == State::Start {
                    if self.buffer.is_empty() {
                        debug!("no input to decode");
                        return Err(ParseError::truncated(self.buffer.data_len()));
                    }
                } else if self.buffer.is_empty() {
                    return Ok(Event::EndDocument);
                } else {
                    debug!("trailing data at {}", self.buffer.current_pos());
                    return Err(ParseError::invalid(self.buffer.current_pos()));
                }
            }
        }

        let pos = self.buffer.current_pos();
        let byte = self
            .buffer
            .consume_byte()
            .map_err(|_| ParseError::truncated(self.buffer.data_len()))?;
        trace!(
            "dispatch {:?} at {}, depth {}",
            byte as char,
            pos,
            self.stack.depth()
        );

        match byte {
            b'd' => {
                self.push(Frame::dict(), pos)?;
                Ok(Event::StartDict)
            }
            b'l' => {
                self.push(Frame::list(), pos)?;
                Ok(Event::StartList)
            }
            b'e' => match self.stack.pop() {
                Some(Frame {
                    kind: ContainerKind::Dict,
                    ..
                }) => Ok(Event::EndDict),
                Some(Frame {
                    kind: ContainerKind::List,
                    ..
                }) => Ok(Event::EndList),
                None => {
                    debug!("unmatched end at {}", pos);
                    Err(ParseError::invalid(pos))
                }
            },
            b'i' => {
                let digits = scan_integer(&mut self.buffer)?;
                self.token = Some(digits);
                // The scanner admits only '-' and ASCII digits, so this cannot fail
                let raw = core::str::from_utf8(digits).unwrap_or_default();
                Ok(Event::Integer(Integer::new(raw)))
            }
            b'0'..=b'9' => {
                let payload = scan_string(&mut self.buffer, byte)?;
                self.token = Some(payload);
                if is_key {
                    self.accept_key(pos, payload)?;
                }
                Ok(Event::String(payload))
            }
            _ => {
                debug!("unexpected byte {:?} at {}", byte as char, pos);
                Err(ParseError::invalid(pos))
            }
        }
    }
}

impl<'a> PullParser<'a> for SliceDecoder<'a> {
    fn next_event(&mut self) -> Result<Event<'a>, ParseError> {
        match self.state {
            State::Done => return Ok(Event::EndDocument),
            State::Failed(err) => return Err(err),
            State::Start | State::Streaming => {}
        }
        let result = self.next_event_impl();
        self.state = match &result {
            Ok(Event::EndDocument) => {
                debug!("--finished-- {}", self.buffer.current_pos());
                State::Done
            }
            Ok(_) => State::Streaming,
            Err(err) => {
                debug!("decoding failed: {:?}", err);
                State::Failed(*err)
            }
        };
        result
    }
}

/// Strictly-ascending key law.
///
/// The common prefix is compared bytewise; if it ties, the longer key is the
/// greater one. Equal keys are duplicates and do not follow each other.
fn key_follows(prev: &[u8], key: &[u8]) -> bool {
    let common = prev.len().min(key.len());
    match key[..common].cmp(&prev[..common]) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => key.len() > prev.len(),
    }
}
