//! Single-pass scanner for `[v]MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` strings.
//!
//! The scanner walks the input bytes once, staging each numeric field and each
//! identifier in a fixed-size stack buffer before materializing it. No field or
//! identifier may be longer than [`PARSE_BUFFER_SIZE`] bytes.

use crate::math::pow_u8;
use crate::version::Version;
use thiserror::Error;

/// Capacity of the scratch buffer shared by every numeric field and identifier.
pub const PARSE_BUFFER_SIZE: usize = 64;

const CORE_SEGMENTS: usize = 3;

pub(crate) const SEG_DIVIDER: u8 = b'.';
pub(crate) const PRE_DIVIDER: u8 = b'-';
pub(crate) const BUILD_DIVIDER: u8 = b'+';
pub(crate) const LEADER: u8 = b'v';

/// What went wrong while scanning a version string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumCount, strum::AsRefStr,
)]
pub enum ParseErrorKind {
    /// A fourth numeric segment started before `-`, `+` or end of input.
    TooManySegments,
    /// A byte in the core was not a digit, `.`, `-` or `+`.
    InvalidCharacter,
    /// A numeric field does not fit in a `u8`.
    NumberOverflow,
    /// A numeric field has no digits.
    EmptySegment,
    /// A prerelease or build identifier is empty.
    EmptyIdentifier,
    /// A numeric field or identifier is longer than [`PARSE_BUFFER_SIZE`].
    SegmentTooLong,
}

impl ParseErrorKind {
    /// Stable numeric code reported in error messages.
    pub fn code(self) -> u8 {
        match self {
            ParseErrorKind::TooManySegments => 1,
            ParseErrorKind::InvalidCharacter => 2,
            ParseErrorKind::NumberOverflow => 3,
            ParseErrorKind::EmptySegment => 4,
            ParseErrorKind::EmptyIdentifier => 5,
            ParseErrorKind::SegmentTooLong => 6,
        }
    }
}

/// A failed parse. No partial [`Version`] is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid format for a semantic version string code {} at byte {offset}", .kind.code())]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the input where scanning stopped.
    pub offset: usize,
}

impl ParseError {
    fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn code(&self) -> u8 {
        self.kind.code()
    }
}

/// Parses a semantic version string, with or without a leading `v`.
///
/// Fewer than three numeric fields are accepted and the missing trailing
/// fields are left at zero, so `"v1.2"` parses as `1.2.0`. Prerelease
/// identifiers end at `.` or `+`; build identifiers end only at `.`, so a
/// `+` inside build metadata is kept verbatim.
///
/// ```
/// let v = gversion::parse("v0.0.0-alpha.v1+2020-09-18.b21").unwrap();
/// assert_eq!(v.prerelease, ["alpha", "v1"]);
/// assert_eq!(v.build, ["2020-09-18", "b21"]);
/// ```
pub fn parse(input: &str) -> Result<Version, ParseError> {
    let mut scanner = Scanner::new(input);
    scanner.skip_leader();

    let [major, minor, patch] = scanner.scan_core()?;
    let mut version = Version::new(major, minor, patch);

    if scanner.eat(PRE_DIVIDER) {
        version.prerelease = scanner.scan_identifiers(Some(BUILD_DIVIDER))?;
    }
    if scanner.eat(BUILD_DIVIDER) {
        version.build = scanner.scan_identifiers(None)?;
    }

    Ok(version)
}

/// Fixed-capacity staging area for the bytes of one field or identifier.
struct ScanBuffer {
    bytes: [u8; PARSE_BUFFER_SIZE],
    len: usize,
}

impl ScanBuffer {
    fn new() -> Self {
        Self {
            bytes: [0; PARSE_BUFFER_SIZE],
            len: 0,
        }
    }

    fn push(&mut self, byte: u8, offset: usize) -> Result<(), ParseError> {
        let slot = self
            .bytes
            .get_mut(self.len)
            .ok_or(ParseError::new(ParseErrorKind::SegmentTooLong, offset))?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn clear(&mut self) {
        self.len = 0;
    }
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    buf: ScanBuffer,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            buf: ScanBuffer::new(),
        }
    }

    fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.current() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_leader(&mut self) {
        self.eat(LEADER);
    }

    /// Scans up to three dot-separated numbers, stopping in front of `-`, `+`
    /// or at end of input. The last field is finalized by the stop, not by a dot.
    fn scan_core(&mut self) -> Result<[u8; CORE_SEGMENTS], ParseError> {
        let mut parts = [0u8; CORE_SEGMENTS];
        let mut slot = 0;
        let mut start = self.pos;

        while let Some(byte) = self.current() {
            match byte {
                b'0'..=b'9' => self.buf.push(byte - b'0', self.pos)?,
                SEG_DIVIDER => {
                    if slot + 1 >= CORE_SEGMENTS {
                        return Err(ParseError::new(ParseErrorKind::TooManySegments, self.pos));
                    }
                    parts[slot] = self.take_number(start)?;
                    slot += 1;
                    start = self.pos + 1;
                }
                PRE_DIVIDER | BUILD_DIVIDER => break,
                _ => return Err(ParseError::new(ParseErrorKind::InvalidCharacter, self.pos)),
            }
            self.pos += 1;
        }

        parts[slot] = self.take_number(start)?;
        Ok(parts)
    }

    fn take_number(&mut self, start: usize) -> Result<u8, ParseError> {
        if self.buf.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptySegment, self.pos));
        }
        let value = digits_to_u8(self.buf.as_slice())
            .ok_or(ParseError::new(ParseErrorKind::NumberOverflow, start))?;
        self.buf.clear();
        Ok(value)
    }

    /// Scans dot-separated identifiers up to `terminator` (left unconsumed) or
    /// end of input.
    fn scan_identifiers(&mut self, terminator: Option<u8>) -> Result<Vec<String>, ParseError> {
        let rest = &self.input[self.pos..];
        let end = terminator
            .and_then(|t| rest.iter().position(|&b| b == t))
            .unwrap_or(rest.len());
        let count = 1 + rest[..end].iter().filter(|&&b| b == SEG_DIVIDER).count();

        let mut identifiers = Vec::with_capacity(count);
        while let Some(byte) = self.current() {
            if Some(byte) == terminator {
                break;
            }
            if byte == SEG_DIVIDER {
                identifiers.push(self.take_identifier()?);
            } else {
                self.buf.push(byte, self.pos)?;
            }
            self.pos += 1;
        }
        identifiers.push(self.take_identifier()?);

        Ok(identifiers)
    }

    fn take_identifier(&mut self) -> Result<String, ParseError> {
        if self.buf.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyIdentifier, self.pos));
        }
        // Identifiers are split on ASCII bytes, so the staged bytes are whole
        // UTF-8 sequences taken from a `&str`.
        let identifier = std::str::from_utf8(self.buf.as_slice())
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidCharacter, self.pos))?
            .to_string();
        self.buf.clear();
        Ok(identifier)
    }
}

/// Converts most-significant-first decimal digit values into a `u8`.
///
/// Leading zeros are free: a zero digit contributes nothing, whatever its place.
fn digits_to_u8(digits: &[u8]) -> Option<u8> {
    let mut value: u8 = 0;
    for (place, &digit) in digits.iter().rev().enumerate() {
        if digit == 0 {
            continue;
        }
        let scale = pow_u8(10, u8::try_from(place).ok()?)?;
        value = value.checked_add(digit.checked_mul(scale)?)?;
    }
    Some(value)
}
