//! Interfaces for N3 parsers.

use crate::model::Triple;
use crate::sink::GraphSink;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

/// A parser returning [`Triple`](../model/struct.Triple.html).
pub trait TriplesParser: Sized {
    type Error: Error;

    /// Parses the complete file and calls `on_triple` each time a new triple is read.
    ///
    /// May fail on errors caused by the parser itself or by the callback function ``on_triple``.
    fn parse_all<E: From<Self::Error>>(
        &mut self,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<(), E> {
        while !self.is_end() {
            self.parse_step(on_triple)?
        }
        Ok(())
    }

    /// Parses a small chunk of the file and calls `on_triple` each time a new triple is read.
    /// (A "small chunk" is one top-level statement.)
    ///
    /// This method should be called as long as [`is_end`](#tymethod.is_end) returns false.
    ///
    /// May fail on errors caused by the parser itself or by the callback function ``on_triple``.
    fn parse_step<E: From<Self::Error>>(
        &mut self,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<(), E>;

    /// Returns `true` if the file has been completely consumed by the parser.
    fn is_end(&self) -> bool;

    /// Parses the complete file and adds every triple to `sink`.
    fn parse_into<S: GraphSink>(&mut self, sink: &mut S) -> Result<(), Self::Error>
    where
        Self::Error: From<S::Error>,
    {
        self.parse_all(&mut |t| sink.insert(t).map_err(Self::Error::from))
    }

    /// Converts the parser into a `Result<T, E>` iterator.
    ///
    /// `convert_triple` is a function converting [`Triple`](../model/struct.Triple.html) to `T`.
    fn into_iter<T, E: From<Self::Error>, F: FnMut(Triple) -> Result<T, E>>(
        self,
        convert_triple: F,
    ) -> TriplesParserIterator<T, E, F, Self> {
        TriplesParserIterator {
            parser: self,
            buffer: VecDeque::default(),
            convert_triple,
        }
    }
}

/// Created with the method [`into_iter`](trait.TriplesParser.html#method.into_iter).
pub struct TriplesParserIterator<
    T,
    E: From<P::Error>,
    F: FnMut(Triple) -> Result<T, E>,
    P: TriplesParser,
> {
    parser: P,
    buffer: VecDeque<Result<T, E>>,
    convert_triple: F,
}

impl<T, E: From<P::Error>, F: FnMut(Triple) -> Result<T, E>, P: TriplesParser> Iterator
    for TriplesParserIterator<T, E, F, P>
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Result<T, E>> {
        loop {
            if let Some(r) = self.buffer.pop_front() {
                return Some(r);
            }
            if self.parser.is_end() {
                return None;
            }

            let buffer = &mut self.buffer;
            let convert_triple = &mut self.convert_triple;
            if let Err(e) = self.parser.parse_step(&mut |t| -> Result<(), E> {
                buffer.push_back(convert_triple(t));
                Ok(())
            }) {
                return Some(Err(e));
            }
        }
    }
}

/// An error raised while parsing.
pub trait ParseError: Error {
    /// Returns the position where the error happened in the parsed text, if any.
    fn textual_position(&self) -> Option<LineBytePosition>;
}

/// A position in a text, counted in lines and bytes.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct LineBytePosition {
    line_number: u64,
    byte_number: u64,
}

impl LineBytePosition {
    pub fn new(line_number: u64, byte_number: u64) -> Self {
        Self {
            line_number,
            byte_number,
        }
    }

    /// The line number, starting at 0
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// The byte number within the line, starting at 0
    pub fn byte_number(&self) -> u64 {
        self.byte_number
    }
}

impl fmt::Display for LineBytePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} at byte {}",
            self.line_number + 1,
            self.byte_number + 1
        )
    }
}
