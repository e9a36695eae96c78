// SPDX-License-Identifier: Apache-2.0

/// The kind of terminal error a decoder reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrKind {
    /// Input ended before a grammar element could complete: a missing
    /// terminator, a string shorter than its declared length, or a declared
    /// length too large to be satisfied at all.
    Truncated,
    /// A byte that cannot match the grammar at this position: bad leading
    /// zero, missing digit, unmatched `e`, non-string dictionary key, key
    /// without a value, or garbage before or after the top-level value.
    Invalid,
    /// A well-formed dictionary key that is not strictly greater than the
    /// key before it (out of order or duplicate).
    BadKey,
    /// The nesting stack could not grow to hold another container.
    OutOfMemory,
}

/// A terminal decoding error and the input offset it was detected at.
///
/// Which offset is reported depends on the kind:
/// - [`ErrKind::Invalid`]: the offending byte.
/// - [`ErrKind::Truncated`]: the input length, where more bytes were needed.
/// - [`ErrKind::BadKey`]: the length prefix of the offending key.
/// - [`ErrKind::OutOfMemory`]: the container-begin byte that was refused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseError {
    kind: ErrKind,
    position: usize,
}

impl ParseError {
    pub fn new(kind: ErrKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub(crate) fn truncated(position: usize) -> Self {
        Self::new(ErrKind::Truncated, position)
    }

    pub(crate) fn invalid(position: usize) -> Self {
        Self::new(ErrKind::Invalid, position)
    }

    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl core::fmt::Debug for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?} at {}", self.kind, self.position)
    }
}

impl core::fmt::Display for ErrKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ErrKind::Truncated => "truncated input",
            ErrKind::Invalid => "invalid byte",
            ErrKind::BadKey => "dictionary key out of order or duplicated",
            ErrKind::OutOfMemory => "nesting stack exhausted",
        };
        f.write_str(msg)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at {}", self.kind, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let error = ParseError::truncated(7);
        assert_eq!(error.kind(), ErrKind::Truncated);
        assert_eq!(error.position(), 7);

        let error = ParseError::invalid(2);
        assert_eq!(error, ParseError::new(ErrKind::Invalid, 2));
    }

    #[test]
    fn test_error_formatting() {
        let error = ParseError::new(ErrKind::BadKey, 9);
        assert_eq!(format!("{:?}", error), "BadKey at 9");
        assert_eq!(
            format!("{}", error),
            "dictionary key out of order or duplicated at 9"
        );
    }
}
