use std::io::{self, BufReader, Bytes, Read};
use std::str::Chars;

use crate::{Error, Result};

/// Character-at-a-time input for the parser.
pub trait Source {
    /// Next character, or `None` at end of input.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl Source for StrSource<'_> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Decodes UTF-8 from any reader, one character at a time.
pub struct ReadSource<R: Read> {
    bytes: Bytes<BufReader<R>>,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        self.bytes.next().transpose()
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.next_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(first).ok_or_else(|| invalid_utf8(first))?;
        if width == 1 {
            return Ok(Some(first as char));
        }

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self.next_byte()?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "truncated utf-8 sequence")
            })?;
        }
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| invalid_utf8(first))
    }
}

fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(first: u8) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid utf-8 sequence starting with byte 0x{first:02x}"),
    )
}

/// One character of lookahead over a [`Source`], plus the count of
/// characters consumed so far.
pub struct Cursor<S> {
    source: S,
    peeked: Option<Option<char>>,
    offset: usize,
}

impl<S: Source> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            peeked: None,
            offset: 0,
        }
    }

    /// Characters consumed so far; also the index of the peeked character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn peek(&mut self) -> Result<Option<char>> {
        if let Some(peeked) = self.peeked {
            return Ok(peeked);
        }
        let next = self
            .source
            .next_char()
            .map_err(|err| Error::read(err, self.offset))?;
        self.peeked = Some(next);
        Ok(next)
    }

    pub fn advance(&mut self) -> Result<Option<char>> {
        let next = self.peek()?;
        self.peeked = None;
        if next.is_some() {
            self.offset += 1;
        }
        Ok(next)
    }
}
