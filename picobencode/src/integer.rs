// SPDX-License-Identifier: Apache-2.0

use core::ops::Deref;
use core::str::FromStr;

// Type alias for the configured integer type
#[cfg(feature = "int32")]
type ConfiguredInt = i32;
#[cfg(feature = "int64")]
type ConfiguredInt = i64;

/// A bencode integer, as the exact canonical text between `i` and `e`.
///
/// Bencode integers are unbounded, so the decoder never converts them.
/// The raw text is always available; [`as_int`](Self::as_int) gives the
/// value in the integer width selected by the `int32`/`int64` features,
/// and [`parse`](Self::parse) hands the text to any other numeric type.
///
/// The text is guaranteed canonical: an optional `-` followed by either a
/// lone `0` or digits without a leading zero, never `-0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer<'a> {
    raw: &'a str,
}

impl<'a> Integer<'a> {
    /// Wraps text that the token scanner already validated.
    pub(crate) fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The exact text from the input buffer, including any leading `-`.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// The exact bytes from the input buffer.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.raw.as_bytes()
    }

    /// True for values below zero.
    pub fn is_negative(&self) -> bool {
        self.raw.starts_with('-')
    }

    /// The value as the configured integer type, or `None` if it does not fit.
    pub fn as_int(&self) -> Option<ConfiguredInt> {
        self.raw.parse().ok()
    }

    /// Parse the text as a custom type, e.g. `u64` or a bignum.
    pub fn parse<T: FromStr>(&self) -> Result<T, T::Err> {
        T::from_str(self.raw)
    }
}

impl Deref for Integer<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.raw
    }
}

impl AsRef<str> for Integer<'_> {
    fn as_ref(&self) -> &str {
        self.raw
    }
}

impl core::fmt::Display for Integer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.raw)
    }
}
