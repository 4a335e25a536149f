//! Cursor-based byte stream with typed little-endian readers.
//!
//! A [`Stream`] borrows an immutable byte buffer and owns the mutable cursor
//! over it: a byte `position` plus advisory 1-based `line`/`column`
//! diagnostics. The readers come in four families:
//!
//! - `peek_*` reads a value at the cursor without moving it,
//! - `read_*` reads and advances by the value's byte width,
//! - `expect_*` compares the next value against an expected one,
//! - `accept_*` compares and advances only when the comparison succeeds.
//!
//! All fixed-width numeric reads are little-endian. Any read that would run
//! past the end of the buffer fails with [`OutOfBounds`] instead of
//! truncating.

use std::mem::size_of;

use miette::Diagnostic;
use thiserror::Error;

/// Error returned when a typed read needs more bytes than remain in the
/// buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic)]
#[error("read of {requested} byte(s) at offset {offset} runs past the end of the buffer (size {size})")]
#[diagnostic(code(sexp_stream::stream::out_of_bounds))]
pub struct OutOfBounds {
    /// Byte offset the read started at.
    pub offset: usize,
    /// Number of bytes the read needed.
    pub requested: usize,
    /// Total size of the buffer.
    pub size: usize,
}

/// Byte width of `c` when encoded as UTF-8, classified by the standard
/// range boundaries. Total over the full scalar-value range.
pub fn char_width(c: char) -> usize {
    match u32::from(c) {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

/// A read cursor over an immutable byte buffer.
///
/// `line` and `column` are advisory diagnostic metadata; nothing in the
/// stream's own control flow depends on them. The column rule is:
/// character-level reads (`read_char`, `accept_char`) count one column per
/// decoded character, while raw byte advances ([`Stream::advance`],
/// `read_bytes`) count one column per byte. `line` only moves through an
/// explicit [`Stream::advance_line`] call, so callers consuming a newline
/// pair the byte consumption with a line advance themselves.
#[derive(Debug, Clone)]
pub struct Stream<'buf> {
    buffer: &'buf [u8],
    position: usize,
    line: u32,
    column: u32,
}

impl<'buf> Stream<'buf> {
    /// Creates a stream over `buffer` with the cursor at offset 0, line 1,
    /// column 1. The bytes are not validated as UTF-8; malformed sequences
    /// surface as U+FFFD at decode time.
    pub fn from_bytes(buffer: &'buf [u8]) -> Self {
        Stream {
            buffer,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Creates a stream over the UTF-8 bytes of `text`.
    pub fn from_text(text: &'buf str) -> Self {
        Stream::from_bytes(text.as_bytes())
    }

    /// True when the cursor has consumed the whole buffer.
    pub fn at_end(&self) -> bool {
        self.position == self.buffer.len()
    }

    /// Current byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based line of the cursor.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column of the cursor within the current line.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Byte length of the underlying buffer.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// The whole underlying buffer, independent of the cursor.
    pub fn bytes(&self) -> &'buf [u8] {
        self.buffer
    }

    /// Moves the cursor forward by `byte_count` bytes, clamped to the end of
    /// the buffer. Counts the skipped bytes as columns and never touches
    /// `line`.
    pub fn advance(&mut self, byte_count: usize) {
        self.position = self
            .position
            .saturating_add(byte_count)
            .min(self.buffer.len());
        self.column = self.column.saturating_add(byte_count as u32);
    }

    /// Starts a new line: `line += 1`, `column = 1`. Does not move
    /// `position`; callers pair this with the byte advance that consumed the
    /// newline.
    pub fn advance_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    fn out_of_bounds(&self, requested: usize) -> OutOfBounds {
        OutOfBounds {
            offset: self.position,
            requested,
            size: self.buffer.len(),
        }
    }

    fn remaining(&self, n: usize) -> Result<&'buf [u8], OutOfBounds> {
        let end = self
            .position
            .checked_add(n)
            .ok_or_else(|| self.out_of_bounds(n))?;
        self.buffer
            .get(self.position..end)
            .ok_or_else(|| self.out_of_bounds(n))
    }

    /// Reads `n` raw bytes at the cursor without advancing.
    pub fn peek_bytes(&self, n: usize) -> Result<&'buf [u8], OutOfBounds> {
        self.remaining(n)
    }

    /// Reads `n` raw bytes and advances past them.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'buf [u8], OutOfBounds> {
        let bytes = self.remaining(n)?;
        self.advance(n);
        Ok(bytes)
    }

    /// Decodes one UTF-8 code point at the cursor, returning the character
    /// and the byte width to advance by. Malformed bytes decode as U+FFFD
    /// with the width of the invalid prefix.
    fn decode_char(&self) -> Result<(char, usize), OutOfBounds> {
        let rest = &self.buffer[self.position..];
        if rest.is_empty() {
            return Err(self.out_of_bounds(1));
        }
        let window = &rest[..rest.len().min(4)];
        match std::str::from_utf8(window) {
            Ok(text) => {
                let c = text.chars().next().unwrap(); // window is non-empty
                Ok((c, char_width(c)))
            }
            Err(err) if err.valid_up_to() > 0 => {
                let valid = &window[..err.valid_up_to()];
                let c = std::str::from_utf8(valid)
                    .unwrap() // valid_up_to guarantees this prefix decodes
                    .chars()
                    .next()
                    .unwrap();
                Ok((c, char_width(c)))
            }
            Err(err) => {
                // Malformed at the cursor: substitute and step over the bad
                // prefix so repeated reads always make progress.
                let skip = err.error_len().unwrap_or(window.len());
                Ok(('\u{FFFD}', skip.max(1)))
            }
        }
    }

    /// Decodes one UTF-8 code point at the cursor without advancing.
    pub fn peek_char(&self) -> Result<char, OutOfBounds> {
        self.decode_char().map(|(c, _)| c)
    }

    /// Decodes one UTF-8 code point and advances past it, counting one
    /// column.
    pub fn read_char(&mut self) -> Result<char, OutOfBounds> {
        let (c, width) = self.decode_char()?;
        self.position += width;
        self.column = self.column.saturating_add(1);
        Ok(c)
    }

    /// True when the next character equals `expected`. Does not advance.
    pub fn expect_char(&self, expected: char) -> Result<bool, OutOfBounds> {
        Ok(self.peek_char()? == expected)
    }

    /// Consumes the next character only if it equals `expected`, returning
    /// whether it matched.
    pub fn accept_char(&mut self, expected: char) -> Result<bool, OutOfBounds> {
        let (c, width) = self.decode_char()?;
        if c != expected {
            return Ok(false);
        }
        self.position += width;
        self.column = self.column.saturating_add(1);
        Ok(true)
    }
}

macro_rules! le_readers {
    ($($ty:ident => $peek:ident, $read:ident, $expect:ident, $accept:ident;)+) => {
        impl<'buf> Stream<'buf> {
            $(
                #[doc = concat!("Reads a little-endian `", stringify!($ty), "` at the cursor without advancing.")]
                pub fn $peek(&self) -> Result<$ty, OutOfBounds> {
                    let bytes = self.remaining(size_of::<$ty>())?;
                    let mut raw = [0u8; size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    Ok(<$ty>::from_le_bytes(raw))
                }

                #[doc = concat!("Reads a little-endian `", stringify!($ty), "` and advances past it.")]
                pub fn $read(&mut self) -> Result<$ty, OutOfBounds> {
                    let value = self.$peek()?;
                    self.advance(size_of::<$ty>());
                    Ok(value)
                }

                #[doc = concat!("True when the next `", stringify!($ty), "` equals `expected`. Does not advance.")]
                pub fn $expect(&self, expected: $ty) -> Result<bool, OutOfBounds> {
                    Ok(self.$peek()? == expected)
                }

                #[doc = concat!("Consumes the next `", stringify!($ty), "` only if it equals `expected`, returning whether it matched.")]
                pub fn $accept(&mut self, expected: $ty) -> Result<bool, OutOfBounds> {
                    let matched = self.$expect(expected)?;
                    if matched {
                        self.advance(size_of::<$ty>());
                    }
                    Ok(matched)
                }
            )+
        }
    };
}

le_readers! {
    u8  => peek_u8,  read_u8,  expect_u8,  accept_u8;
    i8  => peek_i8,  read_i8,  expect_i8,  accept_i8;
    u16 => peek_u16, read_u16, expect_u16, accept_u16;
    i16 => peek_i16, read_i16, expect_i16, accept_i16;
    u32 => peek_u32, read_u32, expect_u32, accept_u32;
    i32 => peek_i32, read_i32, expect_i32, accept_i32;
    u64 => peek_u64, read_u64, expect_u64, accept_u64;
    i64 => peek_i64, read_i64, expect_i64, accept_i64;
    f32 => peek_f32, read_f32, expect_f32, accept_f32;
    f64 => peek_f64, read_f64, expect_f64, accept_f64;
}
