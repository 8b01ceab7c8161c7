use crate::error::N3Error;
use n3_api::model::BlankNode;
use n3_api::parser::LineBytePosition;
use std::io::BufRead;

/// Reads the file line by line in a streaming way
pub trait LookAheadByteRead {
    /// Returns the current byte or `None` if the file is finished
    fn current(&self) -> Option<u8>;

    /// Returns the next byte if available
    fn next(&self) -> Option<u8> {
        self.ahead(1)
    }

    /// Returns a future byte if available. Does not work cross line boundaries
    fn ahead(&self, count: usize) -> Option<u8>;

    /// Consumes the current byte and moves to the next one
    fn consume(&mut self) -> Result<(), N3Error>;

    /// Consumes `count` bytes
    fn consume_many(&mut self, count: usize) -> Result<(), N3Error> {
        for _ in 0..count {
            self.consume()?;
        }
        Ok(())
    }

    /// Returns if the current buffer starts with a given byte string. Does not work cross line boundaries
    fn starts_with(&self, prefix: &[u8]) -> bool;

    /// Returns if the current buffer starts with a given byte string in a ASCII case insensitive manner.
    /// Does not work cross line boundaries
    fn starts_with_ignore_ascii_case(&self, prefix: &[u8]) -> bool;

    /// Position of the current byte
    fn position(&self) -> LineBytePosition;
}

pub struct LookAheadByteReader<R: BufRead> {
    inner: R,
    line: Vec<u8>,
    current: Option<u8>,
    line_number: u64,
    byte_number: usize,
}

impl<R: BufRead> LookAheadByteReader<R> {
    pub fn new(inner: R) -> Result<Self, N3Error> {
        let mut this = Self {
            inner,
            line: Vec::default(),
            current: None,
            line_number: 0,
            byte_number: 0,
        };
        this.inner.read_until(b'\n', &mut this.line)?;
        this.current = this.line.first().cloned();
        Ok(this)
    }

    fn line_slice(&self, len: usize) -> Option<&[u8]> {
        self.line.get(self.byte_number..self.byte_number + len)
    }
}

impl<R: BufRead> LookAheadByteRead for LookAheadByteReader<R> {
    fn current(&self) -> Option<u8> {
        self.current
    }

    fn ahead(&self, count: usize) -> Option<u8> {
        self.line.get(self.byte_number + count).cloned()
    }

    fn consume(&mut self) -> Result<(), N3Error> {
        self.byte_number += 1;
        if self.byte_number >= self.line.len() {
            if !self.line.is_empty() {
                self.line_number += 1;
            }
            self.line.clear();
            self.byte_number = 0;
            self.inner.read_until(b'\n', &mut self.line)?;
        }
        self.current = self.line.get(self.byte_number).cloned();
        Ok(())
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.line_slice(prefix.len()) == Some(prefix)
    }

    fn starts_with_ignore_ascii_case(&self, prefix: &[u8]) -> bool {
        self.line_slice(prefix.len())
            .map_or(false, |s| s.eq_ignore_ascii_case(prefix))
    }

    fn position(&self) -> LineBytePosition {
        LineBytePosition::new(self.line_number, self.byte_number as u64)
    }
}

pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

pub trait PushChar {
    fn push_char(&mut self, c: char);
}

impl PushChar for Vec<u8> {
    fn push_char(&mut self, c: char) {
        match c.len_utf8() {
            1 => self.push(c as u8),
            _ => self.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }
}

/// Allocates the blank nodes of one parse session.
///
/// Ids are never reused within a session. Two sessions allocate the same sequence.
#[derive(Default)]
pub struct BlankNodeIdGenerator {
    counter: u64,
}

impl BlankNodeIdGenerator {
    pub fn generate(&mut self) -> BlankNode {
        self.counter += 1;
        BlankNode::Anonymous { id: self.counter }
    }
}
