// SPDX-License-Identifier: Apache-2.0

use crate::{Integer, ParseError};

/// Events produced by the decoder, one per grammar element.
///
/// Payloads borrow from the input buffer, never from the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// An integer (e.g., `i42e` yields `42`).
    Integer(Integer<'a>),
    /// A byte string (e.g., `5:hello` yields `hello`). Dictionary keys are
    /// reported as strings too; keys and values alternate.
    String(&'a [u8]),
    /// The start of a list (`l`).
    StartList,
    /// The end of a list (`e`).
    EndList,
    /// The start of a dictionary (`d`).
    StartDict,
    /// The end of a dictionary (`e`).
    EndDict,
    /// The whole input was one complete value with nothing after it.
    EndDocument,
}

impl Event<'_> {
    /// Short name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Integer(_) => "Integer",
            Event::String(_) => "String",
            Event::StartList => "StartList",
            Event::EndList => "EndList",
            Event::StartDict => "StartDict",
            Event::EndDict => "EndDict",
            Event::EndDocument => "EndDocument",
        }
    }
}

/// Trait for decoders that can be used in a pull-based manner.
pub trait PullParser<'a> {
    /// Iterator-like method that returns None when decoding is complete.
    /// Returns `Some(Ok(event))` for every event before `EndDocument` and
    /// `Some(Err(error))` when decoding fails.
    fn next(&mut self) -> Option<Result<Event<'a>, ParseError>> {
        match self.next_event() {
            Ok(Event::EndDocument) => None,
            other => Some(other),
        }
    }
    /// Returns the next event or an error if decoding fails.
    /// Decoding continues until `EndDocument` is returned or an error occurs.
    fn next_event(&mut self) -> Result<Event<'a>, ParseError>;
}
