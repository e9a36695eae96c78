// SPDX-License-Identifier: Apache-2.0

//! Recognizers for the two payload-carrying tokens.
//!
//! Both return a view into the input and report [`ErrKind::Truncated`]
//! separately from [`ErrKind::Invalid`], so a caller can tell cut-off input
//! from malformed input.
//!
//! [`ErrKind::Truncated`]: crate::ErrKind::Truncated
//! [`ErrKind::Invalid`]: crate::ErrKind::Invalid

use crate::slice_input_buffer::SliceInputBuffer;
use crate::ParseError;

use log::debug;

fn next_byte(buffer: &mut SliceInputBuffer<'_>) -> Result<u8, ParseError> {
    buffer
        .consume_byte()
        .map_err(|_| ParseError::truncated(buffer.data_len()))
}

/// Position of the byte just consumed.
fn last_pos(buffer: &SliceInputBuffer<'_>) -> usize {
    buffer.current_pos().saturating_sub(1)
}

/// Scans `-?(0|[1-9][0-9]*)e`, the body of an integer after its `i`.
///
/// Returns the digits and sign, without the `e`.
pub fn scan_integer<'a>(buffer: &mut SliceInputBuffer<'a>) -> Result<&'a [u8], ParseError> {
    let start = buffer.current_pos();

    let mut c = next_byte(buffer)?;
    match c {
        b'-' => {
            c = next_byte(buffer)?;
            if !matches!(c, b'1'..=b'9') {
                debug!("integer: '-' not followed by 1-9 at {}", last_pos(buffer));
                return Err(ParseError::invalid(last_pos(buffer)));
            }
        }
        b'0' => {
            // Zero stands alone
            if next_byte(buffer)? != b'e' {
                debug!("integer: leading zero at {}", start);
                return Err(ParseError::invalid(last_pos(buffer)));
            }
            return slice_or_invalid(buffer, start, start + 1);
        }
        b'1'..=b'9' => {}
        _ => {
            debug!("integer: expected digit at {}", start);
            return Err(ParseError::invalid(start));
        }
    }

    loop {
        match next_byte(buffer)? {
            b'0'..=b'9' => {}
            b'e' => break,
            _ => {
                debug!("integer: unterminated at {}", last_pos(buffer));
                return Err(ParseError::invalid(last_pos(buffer)));
            }
        }
    }
    slice_or_invalid(buffer, start, last_pos(buffer))
}

fn slice_or_invalid<'a>(
    buffer: &SliceInputBuffer<'a>,
    start: usize,
    end: usize,
) -> Result<&'a [u8], ParseError> {
    buffer.slice(start, end).ok_or(ParseError::invalid(start))
}

/// Scans `[0-9]*:` followed by that many raw bytes, the rest of a string
/// whose first length digit, `first`, was already consumed.
///
/// A length that overflows `usize` can never be satisfied by the input, so
/// it is reported as truncation once the `:` has been seen.
pub fn scan_string<'a>(
    buffer: &mut SliceInputBuffer<'a>,
    first: u8,
) -> Result<&'a [u8], ParseError> {
    if first == b'0' {
        if next_byte(buffer)? != b':' {
            debug!("string: leading zero in length at {}", last_pos(buffer));
            return Err(ParseError::invalid(last_pos(buffer)));
        }
        let pos = buffer.current_pos();
        return slice_or_invalid(buffer, pos, pos);
    }

    let mut length = Some(usize::from(first - b'0'));

    loop {
        match next_byte(buffer)? {
            c @ b'0'..=b'9' => {
                length = length
                    .and_then(|len| len.checked_mul(10))
                    .and_then(|len| len.checked_add(usize::from(c - b'0')));
            }
            b':' => break,
            _ => {
                debug!("string: expected ':' at {}", last_pos(buffer));
                return Err(ParseError::invalid(last_pos(buffer)));
            }
        }
    }

    let Some(length) = length else {
        debug!("string: declared length overflows");
        return Err(ParseError::truncated(buffer.data_len()));
    };
    buffer.take(length).map_err(|_| {
        debug!(
            "string: declared {} bytes, {} remain",
            length,
            buffer.remaining()
        );
        ParseError::truncated(buffer.data_len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrKind;
    use test_log::test;

    fn integer(input: &[u8]) -> Result<&[u8], ParseError> {
        // Skip the leading 'i' the dispatcher would have consumed
        let mut buffer = SliceInputBuffer::new(input);
        assert_eq!(buffer.consume_byte(), Ok(b'i'));
        scan_integer(&mut buffer)
    }

    fn string(input: &[u8]) -> Result<&[u8], ParseError> {
        let mut buffer = SliceInputBuffer::new(input);
        let first = buffer.consume_byte().unwrap();
        scan_string(&mut buffer, first)
    }

    #[test]
    fn test_integer_canonical_forms() {
        assert_eq!(integer(b"i0e"), Ok(&b"0"[..]));
        assert_eq!(integer(b"i-1e"), Ok(&b"-1"[..]));
        assert_eq!(integer(b"i1234567e"), Ok(&b"1234567"[..]));
        assert_eq!(integer(b"i-1234567e"), Ok(&b"-1234567"[..]));
        assert_eq!(integer(b"i10e"), Ok(&b"10"[..]));
    }

    #[test]
    fn test_integer_rejections() {
        assert_eq!(integer(b"i01e"), Err(ParseError::invalid(2)));
        assert_eq!(integer(b"i-0e"), Err(ParseError::invalid(2)));
        assert_eq!(integer(b"i-01e"), Err(ParseError::invalid(2)));
        assert_eq!(integer(b"i-e"), Err(ParseError::invalid(2)));
        assert_eq!(integer(b"iae"), Err(ParseError::invalid(1)));
        assert_eq!(integer(b"i1ae"), Err(ParseError::invalid(2)));
        assert_eq!(integer(b"ie"), Err(ParseError::invalid(1)));
        assert_eq!(integer(b"i--1e"), Err(ParseError::invalid(2)));
    }

    #[test]
    fn test_integer_truncation() {
        assert_eq!(integer(b"i"), Err(ParseError::truncated(1)));
        assert_eq!(integer(b"i0"), Err(ParseError::truncated(2)));
        assert_eq!(integer(b"i-"), Err(ParseError::truncated(2)));
        assert_eq!(integer(b"i123"), Err(ParseError::truncated(4)));
    }

    #[test]
    fn test_string_payloads() {
        assert_eq!(string(b"5:hello"), Ok(&b"hello"[..]));
        assert_eq!(string(b"0:"), Ok(&b""[..]));
        assert_eq!(string(b"3:\x00\xff:"), Ok(&b"\x00\xff:"[..]));
        assert_eq!(string(b"10:0123456789"), Ok(&b"0123456789"[..]));
    }

    #[test]
    fn test_string_leaves_trailing_bytes() {
        let mut buffer = SliceInputBuffer::new(b"2:abcd");
        let first = buffer.consume_byte().unwrap();
        assert_eq!(scan_string(&mut buffer, first), Ok(&b"ab"[..]));
        assert_eq!(buffer.current_pos(), 4);
    }

    #[test]
    fn test_string_rejections() {
        assert_eq!(string(b"01:x"), Err(ParseError::invalid(1)));
        assert_eq!(string(b"5hello"), Err(ParseError::invalid(1)));
        assert_eq!(string(b"1x:a"), Err(ParseError::invalid(1)));
    }

    #[test]
    fn test_string_truncation() {
        assert_eq!(string(b"2:x"), Err(ParseError::truncated(3)));
        assert_eq!(string(b"5"), Err(ParseError::truncated(1)));
        assert_eq!(string(b"0"), Err(ParseError::truncated(1)));
        assert_eq!(string(b"12"), Err(ParseError::truncated(2)));
    }

    #[test]
    fn test_string_length_overflow() {
        let input = b"1000000000000000000000000000000000000000:x";
        let err = string(input).unwrap_err();
        assert_eq!(err.kind(), ErrKind::Truncated);
        assert_eq!(err.position(), input.len());

        // Without a colon the overlong prefix is still a grammar error
        let err = string(b"1000000000000000000000000000000000000000x").unwrap_err();
        assert_eq!(err.kind(), ErrKind::Invalid);
        assert_eq!(err.position(), 40);
    }
}
