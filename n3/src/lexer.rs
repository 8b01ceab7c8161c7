//! Lexical units and the scanners producing them.

use crate::context::Context;
use crate::error::{Diagnostics, N3Error, Scope, WarningKind};
use crate::utils::*;
use n3_api::model::{BlankNode, Formula, Literal, NamedNode};
use oxilangtag::LanguageTag;
use std::char;

/// A token of a statement, before the shorthand engine gives it a role.
#[derive(Debug, Clone)]
pub(crate) enum LexicalUnit {
    /// An IRI already resolved against the base IRI.
    Reference(String),
    Literal(Literal),
    /// `_:label`, or `[ ... ]` with its predicate-object list as body.
    BlankNode {
        node: BlankNode,
        body: Vec<LexicalUnit>,
    },
    OrderedList(Vec<LexicalUnit>),
    Formula(Formula),
    /// A bare token: shorthand operator, prefixed name, number, boolean or plain word.
    Keyword(String),
}

impl LexicalUnit {
    pub fn keyword(text: &str) -> Self {
        LexicalUnit::Keyword(text.to_owned())
    }

    pub fn shorthand(&self, dialect: &Dialect) -> Option<Shorthand> {
        match self {
            LexicalUnit::Keyword(keyword) => dialect.shorthand(keyword),
            _ => None,
        }
    }
}

/// The grammar words and operators that abbreviate triple patterns.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub(crate) enum Shorthand {
    /// `a`
    Type,
    /// `is`, swaps subject and object
    Is,
    /// `of`, closes `is`
    Of,
    /// `has`
    Has,
    /// `=`
    SameAs,
    /// `=>`
    Implies,
    /// `<=`
    ImpliedBy,
    /// `!`
    ForwardPath,
    /// `^`
    BackwardPath,
    /// `;`
    PredicateSeparator,
    /// `,`
    ObjectSeparator,
}

/// The bytes and shorthands a dialect of the notation is built on.
pub(crate) struct Dialect {
    delimiters: &'static [u8],
    shorthands: &'static [(&'static str, Shorthand)],
}

pub(crate) const N3: Dialect = Dialect {
    delimiters: b"^!=<\"{}[]().;,@",
    shorthands: &[
        ("a", Shorthand::Type),
        ("is", Shorthand::Is),
        ("of", Shorthand::Of),
        ("has", Shorthand::Has),
        ("=", Shorthand::SameAs),
        ("=>", Shorthand::Implies),
        ("<=", Shorthand::ImpliedBy),
        ("!", Shorthand::ForwardPath),
        ("^", Shorthand::BackwardPath),
        (";", Shorthand::PredicateSeparator),
        (",", Shorthand::ObjectSeparator),
    ],
};

impl Dialect {
    pub fn is_delimiter(&self, c: u8) -> bool {
        is_whitespace(c) || self.delimiters.contains(&c)
    }

    /// Shorthand words are matched ignoring ASCII case.
    pub fn shorthand(&self, keyword: &str) -> Option<Shorthand> {
        self.shorthands
            .iter()
            .find(|(text, _)| text.eq_ignore_ascii_case(keyword))
            .map(|(_, shorthand)| *shorthand)
    }
}

pub(crate) fn skip_whitespace(read: &mut impl LookAheadByteRead) -> Result<(), N3Error> {
    loop {
        match read.current() {
            Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => read.consume()?,
            Some(b'#') => {
                while read.current() != Some(b'\r')
                    && read.current() != Some(b'\n')
                    && read.current() != None
                {
                    read.consume()?;
                }
            }
            _ => return Ok(()),
        }
    }
}

/// Scans a bare token up to the next delimiter.
///
/// A `.` stays in the token when the byte after it continues the token, as in `ex:a.b` or `1.5`.
pub(crate) fn scan_bare_token(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    dialect: &Dialect,
) -> Result<String, N3Error> {
    let mut buffer = Vec::default();
    while let Some(c) = read.current() {
        if c == b'.' {
            match read.next() {
                Some(n) if !dialect.is_delimiter(n) => buffer.push(c),
                _ => break,
            }
        } else if dialect.is_delimiter(c) {
            break;
        } else {
            buffer.push(c);
        }
        read.consume()?;
    }
    Ok(decode_utf8(read, diagnostics, buffer))
}

pub(crate) fn scan_iri_ref(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    context: &Context,
) -> Result<LexicalUnit, N3Error> {
    // IRIREF ::= '<' ([^#x00-#x20<>"{}|^`\] | UCHAR)* '>'
    let position = read.position();
    let mut buffer = Vec::default();
    read.consume()?;
    loop {
        match read.current() {
            None => {
                diagnostics.warn(WarningKind::PrematureEof(Scope::Iri), read.position());
                break;
            }
            Some(b'>') => {
                read.consume()?;
                break;
            }
            Some(b'\\') => {
                read.consume()?;
                match read.current() {
                    Some(b'u') => push_hexa_char(read, diagnostics, &mut buffer, 4)?,
                    Some(b'U') => push_hexa_char(read, diagnostics, &mut buffer, 8)?,
                    _ => diagnostics.warn(WarningKind::InvalidEscape('\\'), read.position()),
                }
            }
            Some(c) => {
                if matches!(c, b'\0'..=b' ' | b'<' | b'"' | b'{' | b'}' | b'|' | b'^' | b'`') {
                    diagnostics.warn(WarningKind::UnexpectedByte(c), read.position());
                }
                buffer.push(c);
                read.consume()?;
            }
        }
    }
    let iri = decode_utf8(read, diagnostics, buffer);
    Ok(LexicalUnit::Reference(
        match context.resolve_iri(&iri) {
            Ok(resolved) => resolved,
            Err(error) => {
                diagnostics.warn(
                    WarningKind::InvalidIri {
                        iri: iri.clone(),
                        error,
                    },
                    position,
                );
                iri
            }
        },
    ))
}

pub(crate) fn scan_blank_node_label(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    bnode_id_generator: &mut BlankNodeIdGenerator,
) -> Result<LexicalUnit, N3Error> {
    // BLANK_NODE_LABEL ::= '_:' (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?
    read.consume_many(2)?;
    let label = scan_bare_token(read, diagnostics, &N3)?;
    let node = if label.is_empty() {
        diagnostics.warn(WarningKind::UnexpectedByte(b':'), read.position());
        bnode_id_generator.generate()
    } else {
        BlankNode::Named { id: label }
    };
    Ok(LexicalUnit::BlankNode {
        node,
        body: Vec::default(),
    })
}

/// Scans `@name`. The at-sign spellings of the shorthand words give the plain words back.
pub(crate) fn scan_at_keyword(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
) -> Result<Option<LexicalUnit>, N3Error> {
    let position = read.position();
    read.consume()?;
    let name = scan_bare_token(read, diagnostics, &N3)?;
    if name.is_empty() {
        diagnostics.warn(WarningKind::UnexpectedByte(b'@'), position);
        return Ok(None);
    }
    Ok(Some(match N3.shorthand(&name) {
        Some(Shorthand::Type) | Some(Shorthand::Is) | Some(Shorthand::Of) | Some(Shorthand::Has) => {
            LexicalUnit::Keyword(name)
        }
        _ => LexicalUnit::Keyword(format!("@{}", name)),
    }))
}

/// Scans a quoted string with its language tag or datatype, if any.
pub(crate) fn scan_quoted_literal(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    context: &Context,
) -> Result<LexicalUnit, N3Error> {
    let value = if read.starts_with(b"\"\"\"") {
        scan_long_string(read, diagnostics)?
    } else {
        scan_short_string(read, diagnostics)?
    };

    let literal = match read.current() {
        Some(b'@') => {
            let position = read.position();
            read.consume()?;
            let tag = scan_language_tag(read)?;
            match LanguageTag::parse(tag.to_ascii_lowercase()) {
                Ok(language) => Literal::LanguageTaggedString {
                    value,
                    language: language.into_inner(),
                },
                Err(error) => {
                    diagnostics.warn(WarningKind::InvalidLanguageTag { tag, error }, position);
                    Literal::Simple { value }
                }
            }
        }
        Some(b'^') if read.next() == Some(b'^') => {
            read.consume_many(2)?;
            match scan_datatype(read, diagnostics, context)? {
                Some(datatype) => Literal::Typed { value, datatype },
                None => Literal::Simple { value },
            }
        }
        _ => Literal::Simple { value },
    };
    Ok(LexicalUnit::Literal(literal))
}

fn scan_short_string(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
) -> Result<String, N3Error> {
    // STRING_LITERAL_QUOTE ::= '"' ([^#x22#x5C#xA#xD] | ECHAR | UCHAR)* '"'
    let mut buffer = Vec::default();
    read.consume()?;
    loop {
        match read.current() {
            None => {
                diagnostics.warn(WarningKind::PrematureEof(Scope::String), read.position());
                break;
            }
            Some(b'"') => {
                read.consume()?;
                break;
            }
            Some(b'\\') => scan_echar_or_uchar(read, diagnostics, &mut buffer)?,
            Some(c) => {
                if c == b'\n' || c == b'\r' {
                    diagnostics.warn(WarningKind::UnexpectedByte(c), read.position());
                }
                buffer.push(c);
                read.consume()?;
            }
        }
    }
    Ok(decode_utf8(read, diagnostics, buffer))
}

fn scan_long_string(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
) -> Result<String, N3Error> {
    // STRING_LITERAL_LONG_QUOTE ::= '"""' (('"' | '""')? ([^"\] | ECHAR | UCHAR))* '"""'
    let mut buffer = Vec::default();
    read.consume_many(3)?;
    loop {
        match read.current() {
            None => {
                diagnostics.warn(WarningKind::PrematureEof(Scope::String), read.position());
                break;
            }
            Some(b'"') if read.starts_with(b"\"\"\"") => {
                read.consume_many(3)?;
                break;
            }
            Some(b'\\') => scan_echar_or_uchar(read, diagnostics, &mut buffer)?,
            Some(c) => {
                buffer.push(c);
                read.consume()?;
            }
        }
    }
    Ok(decode_utf8(read, diagnostics, buffer))
}

fn scan_echar_or_uchar(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    buffer: &mut Vec<u8>,
) -> Result<(), N3Error> {
    read.consume()?;
    let c = match read.current() {
        Some(c) => c,
        None => return Ok(()),
    };
    match c {
        b't' => buffer.push(b'\t'),
        b'b' => buffer.push(0x8),
        b'n' => buffer.push(b'\n'),
        b'r' => buffer.push(b'\r'),
        b'f' => buffer.push(0xC),
        b'"' => buffer.push(b'"'),
        b'\'' => buffer.push(b'\''),
        b'\\' => buffer.push(b'\\'),
        b'u' => return push_hexa_char(read, diagnostics, buffer, 4),
        b'U' => return push_hexa_char(read, diagnostics, buffer, 8),
        _ => {
            diagnostics.warn(WarningKind::InvalidEscape(char::from(c)), read.position());
            buffer.push(c);
        }
    }
    read.consume()
}

/// Reads the `len` hexadecimal digits following the current `u` or `U` and leaves the cursor after them.
fn push_hexa_char(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    buffer: &mut Vec<u8>,
    len: usize,
) -> Result<(), N3Error> {
    let position = read.position();
    let mut value = 0;
    for _ in 0..len {
        read.consume()?;
        match read.current().and_then(convert_hexa_byte) {
            Some(d) => value = value * 16 + u32::from(d),
            None => {
                diagnostics.warn(WarningKind::InvalidEscape('u'), position);
                return Ok(());
            }
        }
    }
    read.consume()?;
    match char::from_u32(value) {
        Some(c) => buffer.push_char(c),
        None => diagnostics.warn(WarningKind::InvalidUnicodeCodePoint(value), position),
    }
    Ok(())
}

fn convert_hexa_byte(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn scan_language_tag(read: &mut impl LookAheadByteRead) -> Result<String, N3Error> {
    // LANGTAG ::= '@' [a-zA-Z]+ ('-' [a-zA-Z0-9]+)*
    let mut tag = String::default();
    while let Some(c) = read.current() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' => tag.push(char::from(c)),
            b'-' => match read.next() {
                Some(b'a'..=b'z') | Some(b'A'..=b'Z') | Some(b'0'..=b'9') => tag.push('-'),
                _ => break,
            },
            _ => break,
        }
        read.consume()?;
    }
    Ok(tag)
}

fn scan_datatype(
    read: &mut impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    context: &Context,
) -> Result<Option<NamedNode>, N3Error> {
    if read.current() == Some(b'<') {
        return Ok(match scan_iri_ref(read, diagnostics, context)? {
            LexicalUnit::Reference(iri) => Some(NamedNode { iri }),
            _ => None,
        });
    }
    let position = read.position();
    let name = scan_bare_token(read, diagnostics, &N3)?;
    let expanded = match name.find(':') {
        Some(colon) => context.expand(&name[..colon], &name[colon + 1..]),
        None => None,
    };
    if expanded.is_none() {
        diagnostics.warn(WarningKind::UnknownPrefix(name), position);
    }
    Ok(expanded.map(|iri| NamedNode { iri }))
}

fn decode_utf8(
    read: &impl LookAheadByteRead,
    diagnostics: &mut Diagnostics,
    buffer: Vec<u8>,
) -> String {
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(error) => {
            diagnostics.warn(WarningKind::InvalidUtf8, read.position());
            String::from_utf8_lossy(error.as_bytes()).into_owned()
        }
    }
}
