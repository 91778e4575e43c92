//! Byte-position cursor over the source buffer.
//!
//! The language's source format is 7-bit ASCII (spec §6), so the cursor
//! walks bytes directly rather than decoding UTF-8 grapheme-by-grapheme —
//! this mirrors the teacher lexer's `Cursor`, simplified because this
//! language never needs to step over multi-byte characters.

pub struct Cursor<'a> {
    source: &'a [u8],
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    #[inline]
    pub fn current(&self) -> u8 {
        self.peek(0)
    }

    #[inline]
    pub fn peek(&self, offset: usize) -> u8 {
        *self.source.get(self.position + offset).unwrap_or(&0)
    }

    /// Advance one byte, updating line/column bookkeeping.
    pub fn advance(&mut self) -> u8 {
        let byte = self.current();
        self.position += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        byte
    }

    pub fn matches(&self, byte: u8) -> bool {
        self.current() == byte
    }

    /// Advance if the current byte equals `byte`; returns whether it did.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.matches(byte) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Copy the bytes from `start` (a previously recorded `position()`) to
    /// the current position as a `String`. The buffer is 7-bit ASCII, so
    /// this is always valid UTF-8.
    pub fn slice_from(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.source[start..self.position]).into_owned()
    }
}
