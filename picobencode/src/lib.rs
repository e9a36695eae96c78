// SPDX-License-Identifier: Apache-2.0

//! A validating, zero-copy pull decoder for bencode.
//!
//! The whole message must already sit in one contiguous buffer. Each call to
//! [`SliceDecoder::next_event`] advances by exactly one grammar element and
//! returns either an [`Event`] borrowing from that buffer or a terminal
//! [`ParseError`]. Nothing is copied; the only allocation is the nesting stack.
//!
//! ```
//! use picobencode::{Event, PullParser, SliceDecoder};
//!
//! let mut decoder = SliceDecoder::new(b"d3:cow3:moo4:spami7ee");
//! assert_eq!(decoder.next_event(), Ok(Event::StartDict));
//! assert_eq!(decoder.next_event(), Ok(Event::String(b"cow")));
//! assert_eq!(decoder.next_event(), Ok(Event::String(b"moo")));
//! assert_eq!(decoder.next_event(), Ok(Event::String(b"spam")));
//! match decoder.next_event() {
//!     Ok(Event::Integer(n)) => assert_eq!(n.as_int(), Some(7)),
//!     other => panic!("unexpected {:?}", other),
//! }
//! assert_eq!(decoder.next_event(), Ok(Event::EndDict));
//! assert_eq!(decoder.next_event(), Ok(Event::EndDocument));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// Compile-time configuration validation
mod config_check;

mod integer;
pub use integer::Integer;

mod nesting_stack;

mod parse_error;
pub use parse_error::{ErrKind, ParseError};

mod shared;
pub use shared::{Event, PullParser};

mod slice_decoder;
pub use slice_decoder::{DecoderConfig, SliceDecoder};

mod slice_input_buffer;

mod token_scanner;
