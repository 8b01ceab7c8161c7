use n3_api::model::Term;
use n3_api::parser::{LineBytePosition, ParseError};
use oxilangtag::LanguageTagParseError;
use oxiri::IriParseError;
use std::char;
use std::convert::Infallible;
use std::error::Error;
use std::fmt;
use std::io;

/// Error that might be returned during parsing.
///
/// Syntax problems never abort a parse: they are reported as [`N3Warning`](struct.N3Warning.html)s.
/// Only the failure of the underlying stream and an invalid starting base IRI are errors.
#[derive(Debug)]
pub struct N3Error {
    pub(crate) kind: N3ErrorKind,
    pub(crate) position: Option<LineBytePosition>,
}

#[derive(Debug)]
pub enum N3ErrorKind {
    Io(io::Error),
    InvalidBaseIri { iri: String, error: IriParseError },
}

impl N3Error {
    pub fn kind(&self) -> &N3ErrorKind {
        &self.kind
    }
}

impl fmt::Display for N3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            N3ErrorKind::Io(error) => return error.fmt(f),
            N3ErrorKind::InvalidBaseIri { iri, error } => {
                write!(f, "invalid base IRI '{}': {}", iri, error)
            }
        }?;
        if let Some(position) = self.position {
            write!(f, " on {}", position)?;
        }
        Ok(())
    }
}

impl Error for N3Error {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            N3ErrorKind::Io(error) => Some(error),
            N3ErrorKind::InvalidBaseIri { error, .. } => Some(error),
        }
    }
}

impl ParseError for N3Error {
    fn textual_position(&self) -> Option<LineBytePosition> {
        self.position
    }
}

impl From<io::Error> for N3Error {
    fn from(error: io::Error) -> Self {
        Self {
            kind: N3ErrorKind::Io(error),
            position: None,
        }
    }
}

impl From<Infallible> for N3Error {
    fn from(error: Infallible) -> Self {
        match error {}
    }
}

impl From<N3Error> for io::Error {
    fn from(error: N3Error) -> Self {
        match error.kind {
            N3ErrorKind::Io(error) => error,
            _ => io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }
}

/// The construct a premature end of file or a too deep nesting was found in.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Scope {
    Statement,
    List,
    BlankNode,
    Formula,
    Iri,
    String,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scope::Statement => "statement",
            Scope::List => "list",
            Scope::BlankNode => "blank node",
            Scope::Formula => "formula",
            Scope::Iri => "IRI",
            Scope::String => "string",
        })
    }
}

/// A problem found in the document that did not stop the parsing.
///
/// The statement, or the part of it, that caused the warning produced no triple.
#[derive(Debug)]
pub struct N3Warning {
    pub(crate) kind: WarningKind,
    pub(crate) position: LineBytePosition,
}

#[derive(Debug)]
pub enum WarningKind {
    /// The file ended inside a construct. What was read of it is kept.
    PrematureEof(Scope),
    /// A construct nested deeper than the parser descends. It is skipped.
    NestingTooDeep(Scope),
    UnexpectedByte(u8),
    InvalidEscape(char),
    InvalidUnicodeCodePoint(u32),
    InvalidUtf8,
    InvalidIri {
        iri: String,
        error: IriParseError,
    },
    InvalidLanguageTag {
        tag: String,
        error: LanguageTagParseError,
    },
    UnknownPrefix(String),
    InvalidDirective(String),
    /// A predicate slot was filled by something other than an IRI.
    InvalidPredicate(Term),
    /// A slot expecting a term was filled by a grammar operator.
    IllTypedEndpoint(String),
}

impl N3Warning {
    pub fn kind(&self) -> &WarningKind {
        &self.kind
    }

    pub fn position(&self) -> LineBytePosition {
        self.position
    }
}

impl fmt::Display for N3Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::PrematureEof(scope) => write!(f, "premature end of file in {}", scope),
            WarningKind::NestingTooDeep(scope) => write!(f, "{} nested too deeply", scope),
            WarningKind::UnexpectedByte(c) => match char::from_u32(u32::from(*c)) {
                Some(c) => write!(f, "unexpected character '{}'", c.escape_debug()),
                None => write!(f, "unexpected byte {}", c),
            },
            WarningKind::InvalidEscape(c) => write!(f, "invalid escape sequence '\\{}'", c),
            WarningKind::InvalidUnicodeCodePoint(point) => {
                write!(f, "invalid unicode code point '{}'", point)
            }
            WarningKind::InvalidUtf8 => write!(f, "invalid UTF-8"),
            WarningKind::InvalidIri { iri, error } => {
                write!(f, "error while parsing IRI '{}': {}", iri, error)
            }
            WarningKind::InvalidLanguageTag { tag, error } => {
                write!(f, "error while parsing language tag '{}': {}", tag, error)
            }
            WarningKind::UnknownPrefix(prefix) => write!(f, "unknown prefix '{}'", prefix),
            WarningKind::InvalidDirective(directive) => {
                write!(f, "invalid directive '{}'", directive)
            }
            WarningKind::InvalidPredicate(term) => {
                write!(f, "{} is not an IRI and cannot be a predicate", term)
            }
            WarningKind::IllTypedEndpoint(token) => {
                write!(f, "'{}' is neither a reference, a literal nor a formula", token)
            }
        }?;
        write!(f, " on {}", self.position)
    }
}

/// Collects the warnings of one parse session.
#[derive(Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<N3Warning>,
}

impl Diagnostics {
    pub fn warn(&mut self, kind: WarningKind, position: LineBytePosition) {
        let warning = N3Warning { kind, position };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[N3Warning] {
        &self.warnings
    }

    pub fn take(&mut self) -> Vec<N3Warning> {
        std::mem::take(&mut self.warnings)
    }
}
