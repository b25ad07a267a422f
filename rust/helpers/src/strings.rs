//! Conversion between ASCII and the UTF-16 strings hosts exchange.

use itertools::{EitherOrBoth, Itertools};

/// Copy the ASCII characters of a UTF-16 string.
///
/// Each non-ASCII code unit is replaced with `replacement`, or dropped if
/// `replacement` is `None`. A `replacement` that is NUL or not ASCII itself
/// also drops the unit, so the result is always ASCII.
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::strings::copy_utf16_to_ascii;
/// let name: Vec<u16> = "Gäin".encode_utf16().collect();
/// assert_eq!(copy_utf16_to_ascii(&name, None), "Gin");
/// assert_eq!(copy_utf16_to_ascii(&name, Some(b'?')), "G?in");
/// ```
#[must_use]
pub fn copy_utf16_to_ascii(utf16: &[u16], replacement: Option<u8>) -> String {
    let replacement = replacement.filter(|byte| (1..=127).contains(byte));
    utf16
        .iter()
        .filter_map(|unit| match u8::try_from(*unit) {
            Ok(byte) if byte.is_ascii() => Some(byte),
            _ => replacement,
        })
        .map(char::from)
        .collect()
}

/// Widen an ASCII string to UTF-16.
#[must_use]
pub fn utf16_from_ascii(ascii: &str) -> Vec<u16> {
    ascii.bytes().map(u16::from).collect()
}

/// Copy an ASCII string into a fixed-size, NUL-terminated UTF-16 buffer.
///
/// The string is truncated if needed so that the last element written is
/// always 0. Elements after the string are zeroed. Does nothing if
/// `destination` is empty.
///
/// # Examples
///
/// ```
/// # use vstutil_helpers::strings::copy_ascii_to_utf16;
/// let mut title = [0xffffu16; 4];
/// copy_ascii_to_utf16("Volume", &mut title);
/// assert_eq!(title, [u16::from(b'V'), u16::from(b'o'), u16::from(b'l'), 0]);
/// ```
pub fn copy_ascii_to_utf16(ascii: &str, destination: &mut [u16]) {
    for pair in destination.iter_mut().zip_longest(ascii.bytes()) {
        match pair {
            EitherOrBoth::Both(unit, byte) => *unit = u16::from(byte),
            EitherOrBoth::Left(unit) => *unit = 0,
            EitherOrBoth::Right(_) => break,
        }
    }
    if let Some(last) = destination.last_mut() {
        *last = 0;
    }
}
