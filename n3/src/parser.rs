//! The statement parser and its public entry point.

use crate::context::Context;
use crate::error::*;
use crate::lexer::*;
use crate::links::LinkGenerator;
use crate::utils::*;
use n3_api::model::*;
use n3_api::parser::{LineBytePosition, TriplesParser};
use oxiri::Iri;
use std::io::BufRead;

/// How many lists, blank node bodies and formulas may enclose each other.
const MAX_NESTING_DEPTH: usize = 64;

/// A streaming [Notation3](https://www.w3.org/TeamSubmission/n3/) parser.
///
/// It implements the `TriplesParser` trait. Each call to `parse_step` reads one top-level
/// statement and emits the triples it denotes. Quoted graphs are emitted as
/// [`Formula`](../n3_api/model/struct.Formula.html) terms, not flattened.
///
/// Syntax problems do not stop the parsing. They are collected as warnings:
/// ```
/// use n3_parser::{N3Error, N3Parser};
/// use n3_api::parser::TriplesParser;
/// use n3_api::model::{NamedNode, Term};
///
/// let file = b"@prefix schema: <http://schema.org/> .
/// <http://example.com/foo> a schema:Person ; schema:name \"Foo\" .
/// <http://example.com/bar> is schema:knows of <http://example.com/foo> .
/// <http://example.com/baz> a nope:Person .";
///
/// let rdf_type = NamedNode::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
/// let mut count = 0;
/// let mut parser = N3Parser::with_base(file.as_ref(), "")?;
/// parser.parse_all(&mut |t| {
///     if t.predicate == rdf_type {
///         assert_eq!(Term::from(NamedNode::new("http://schema.org/Person")), t.object);
///     }
///     count += 1;
///     Ok(()) as Result<(), N3Error>
/// })?;
/// assert_eq!(3, count);
/// assert_eq!(1, parser.warnings().len());
/// # Result::<_, N3Error>::Ok(())
/// ```
pub struct N3Parser<R: BufRead> {
    read: LookAheadByteReader<R>,
    context: Context,
    bnode_id_generator: BlankNodeIdGenerator,
    diagnostics: Diagnostics,
}

impl<R: BufRead> N3Parser<R> {
    /// Builds the parser from a `BufRead` implementation and the context the document starts in.
    pub fn new(reader: R, context: Context) -> Result<Self, N3Error> {
        Ok(Self {
            read: LookAheadByteReader::new(reader)?,
            context,
            bnode_id_generator: BlankNodeIdGenerator::default(),
            diagnostics: Diagnostics::default(),
        })
    }

    /// Builds the parser from a `BufRead` implementation and a base IRI for relative IRI resolution.
    ///
    /// The base IRI might be empty to state there is no base IRI.
    pub fn with_base(reader: R, base_iri: &str) -> Result<Self, N3Error> {
        let context = if base_iri.is_empty() {
            Context::new()
        } else {
            Context::with_base(base_iri).map_err(|error| N3Error {
                kind: N3ErrorKind::InvalidBaseIri {
                    iri: base_iri.to_owned(),
                    error,
                },
                position: None,
            })?
        };
        Self::new(reader, context)
    }

    /// The warnings collected since the parser was built or since the last [`take_warnings`](#method.take_warnings).
    pub fn warnings(&self) -> &[N3Warning] {
        self.diagnostics.warnings()
    }

    pub fn take_warnings(&mut self) -> Vec<N3Warning> {
        self.diagnostics.take()
    }

    /// The top-level context, with the directives read so far applied.
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl<R: BufRead> TriplesParser for N3Parser<R> {
    type Error = N3Error;

    fn parse_step<E: From<N3Error>>(
        &mut self,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<(), E> {
        StatementParser {
            read: &mut self.read,
            bnode_id_generator: &mut self.bnode_id_generator,
            diagnostics: &mut self.diagnostics,
            depth: 0,
        }
        .parse_statement(&mut self.context, false, on_triple)
    }

    fn is_end(&self) -> bool {
        self.read.current().is_none()
    }
}

/// The session state a statement is parsed with, borrowed apart from the context it updates.
struct StatementParser<'a, R: LookAheadByteRead> {
    read: &'a mut R,
    bnode_id_generator: &'a mut BlankNodeIdGenerator,
    diagnostics: &'a mut Diagnostics,
    depth: usize,
}

impl<'a, R: LookAheadByteRead> StatementParser<'a, R> {
    fn parse_statement<E: From<N3Error>>(
        &mut self,
        context: &mut Context,
        in_formula: bool,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<(), E> {
        skip_whitespace(self.read)?;
        let start = self.read.position();
        if self.read.current().is_none() {
            return Ok(());
        }
        if self.starts_with_sparql_keyword(b"PREFIX") {
            // sparqlPrefix ::= "PREFIX" PNAME_NS IRIREF
            self.read.consume_many("PREFIX".len())?;
            skip_whitespace(self.read)?;
            let mut units = vec![LexicalUnit::keyword("@prefix")];
            units.push(LexicalUnit::Keyword(scan_bare_token(
                self.read,
                self.diagnostics,
                &N3,
            )?));
            skip_whitespace(self.read)?;
            if self.read.current() == Some(b'<') {
                units.push(scan_iri_ref(self.read, self.diagnostics, context)?);
            }
            self.apply_directive(context, units, start);
            return Ok(());
        }
        if self.starts_with_sparql_keyword(b"BASE") {
            // sparqlBase ::= "BASE" IRIREF
            self.read.consume_many("BASE".len())?;
            skip_whitespace(self.read)?;
            let mut units = vec![LexicalUnit::keyword("@base")];
            if self.read.current() == Some(b'<') {
                units.push(scan_iri_ref(self.read, self.diagnostics, context)?);
            }
            self.apply_directive(context, units, start);
            return Ok(());
        }

        let units = self.parse_statement_units(context, in_formula)?;
        if let Some(LexicalUnit::Keyword(keyword)) = units.first() {
            if keyword.starts_with('@') {
                self.apply_directive(context, units, start);
                return Ok(());
            }
        }
        LinkGenerator::new(context, self.bnode_id_generator, self.diagnostics, start)
            .generate(units, on_triple)
    }

    fn starts_with_sparql_keyword(&self, keyword: &[u8]) -> bool {
        self.read.starts_with_ignore_ascii_case(keyword)
            && self.read.ahead(keyword.len()).map_or(false, is_whitespace)
    }

    /// Reads the units of a statement up to its `.`, or up to the `}` closing the enclosing formula.
    ///
    /// The `.` is consumed, the `}` is left to the formula.
    fn parse_statement_units(
        &mut self,
        context: &Context,
        in_formula: bool,
    ) -> Result<Vec<LexicalUnit>, N3Error> {
        let mut units = Vec::default();
        loop {
            skip_whitespace(self.read)?;
            match self.read.current() {
                None => {
                    if !in_formula && !units.is_empty() {
                        self.diagnostics.warn(
                            WarningKind::PrematureEof(Scope::Statement),
                            self.read.position(),
                        );
                    }
                    return Ok(units);
                }
                Some(b'.') if !self.starts_decimal() => {
                    self.read.consume()?;
                    return Ok(units);
                }
                Some(b'}') if in_formula => return Ok(units),
                Some(c @ b'}') | Some(c @ b')') | Some(c @ b']') => self.skip_stray(c)?,
                Some(_) => {
                    if let Some(unit) = self.parse_unit(context)? {
                        units.push(unit);
                    }
                }
            }
        }
    }

    /// Reads the units between an opening delimiter and `closing`.
    fn parse_nested_units(
        &mut self,
        context: &Context,
        closing: u8,
        scope: Scope,
    ) -> Result<Vec<LexicalUnit>, N3Error> {
        self.read.consume()?;
        let mut units = Vec::default();
        loop {
            skip_whitespace(self.read)?;
            match self.read.current() {
                None => {
                    self.diagnostics
                        .warn(WarningKind::PrematureEof(scope), self.read.position());
                    return Ok(units);
                }
                Some(c) if c == closing => {
                    self.read.consume()?;
                    return Ok(units);
                }
                Some(c @ b'.') if !self.starts_decimal() => self.skip_stray(c)?,
                Some(c @ b'}') | Some(c @ b')') | Some(c @ b']') => self.skip_stray(c)?,
                Some(_) => {
                    if let Some(unit) = self.parse_unit(context)? {
                        units.push(unit);
                    }
                }
            }
        }
    }

    /// Reads one lexical unit. Always consumes at least one byte.
    fn parse_unit(&mut self, context: &Context) -> Result<Option<LexicalUnit>, N3Error> {
        let c = match self.read.current() {
            Some(c) => c,
            None => return Ok(None),
        };
        if matches!(c, b'(' | b'[' | b'{') {
            if self.depth >= MAX_NESTING_DEPTH {
                self.skip_too_deep(context, c)?;
                return Ok(None);
            }
            self.depth += 1;
            let unit = self.parse_nested(context, c);
            self.depth -= 1;
            return unit.map(Some);
        }
        Ok(Some(match c {
            b'<' if self.read.next() == Some(b'=') => {
                self.read.consume_many(2)?;
                LexicalUnit::keyword("<=")
            }
            b'<' => scan_iri_ref(self.read, self.diagnostics, context)?,
            b'"' => scan_quoted_literal(self.read, self.diagnostics, context)?,
            b'_' if self.read.next() == Some(b':') => {
                scan_blank_node_label(self.read, self.diagnostics, self.bnode_id_generator)?
            }
            b'=' if self.read.next() == Some(b'>') => {
                self.read.consume_many(2)?;
                LexicalUnit::keyword("=>")
            }
            b'=' | b'!' | b'^' | b';' | b',' => {
                self.read.consume()?;
                LexicalUnit::Keyword(char::from(c).to_string())
            }
            b'@' => return scan_at_keyword(self.read, self.diagnostics),
            _ => {
                let token = scan_bare_token(self.read, self.diagnostics, &N3)?;
                if token.is_empty() {
                    self.skip_stray(c)?;
                    return Ok(None);
                }
                LexicalUnit::Keyword(token)
            }
        }))
    }

    fn parse_nested(&mut self, context: &Context, opening: u8) -> Result<LexicalUnit, N3Error> {
        Ok(match opening {
            b'(' => LexicalUnit::OrderedList(self.parse_nested_units(context, b')', Scope::List)?),
            b'[' => {
                let node = self.bnode_id_generator.generate();
                let body = self.parse_nested_units(context, b']', Scope::BlankNode)?;
                LexicalUnit::BlankNode { node, body }
            }
            _ => LexicalUnit::Formula(self.parse_formula(context)?),
        })
    }

    /// Skips a construct too deeply nested to descend into by counting its brackets.
    ///
    /// Strings and IRIs are scanned so that the brackets they contain are not counted.
    fn skip_too_deep(&mut self, context: &Context, opening: u8) -> Result<(), N3Error> {
        let scope = match opening {
            b'(' => Scope::List,
            b'[' => Scope::BlankNode,
            _ => Scope::Formula,
        };
        self.diagnostics
            .warn(WarningKind::NestingTooDeep(scope), self.read.position());
        let mut depth = 0_usize;
        loop {
            skip_whitespace(self.read)?;
            match self.read.current() {
                None => return Ok(()),
                Some(b'(') | Some(b'[') | Some(b'{') => {
                    depth += 1;
                    self.read.consume()?;
                }
                Some(b')') | Some(b']') | Some(b'}') => {
                    depth -= 1;
                    self.read.consume()?;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Some(b'"') => {
                    scan_quoted_literal(self.read, self.diagnostics, context)?;
                }
                Some(b'<') if self.read.next() != Some(b'=') => {
                    scan_iri_ref(self.read, self.diagnostics, context)?;
                }
                Some(_) => self.read.consume()?,
            }
        }
    }

    /// Reads the statements of a `{ ... }` quoted graph.
    ///
    /// The formula works on a copy of `context`: its directives do not outlive it.
    fn parse_formula(&mut self, context: &Context) -> Result<Formula, N3Error> {
        self.read.consume()?;
        let mut context = context.clone();
        let mut formula = Formula::new();
        loop {
            skip_whitespace(self.read)?;
            match self.read.current() {
                None => {
                    self.diagnostics.warn(
                        WarningKind::PrematureEof(Scope::Formula),
                        self.read.position(),
                    );
                    return Ok(formula);
                }
                Some(b'}') => {
                    self.read.consume()?;
                    return Ok(formula);
                }
                Some(_) => self.parse_statement(&mut context, true, &mut |t| -> Result<(), N3Error> {
                    formula.push(t);
                    Ok(())
                })?,
            }
        }
    }

    fn apply_directive(
        &mut self,
        context: &mut Context,
        units: Vec<LexicalUnit>,
        position: LineBytePosition,
    ) {
        let mut units = units.into_iter();
        let name = match units.next() {
            Some(LexicalUnit::Keyword(name)) => name,
            _ => return,
        };
        match name.as_str() {
            "@prefix" => match (units.next(), units.next()) {
                (Some(LexicalUnit::Keyword(prefix)), Some(LexicalUnit::Reference(namespace)))
                    if prefix.ends_with(':') =>
                {
                    context.add_prefix(&prefix[..prefix.len() - 1], namespace)
                }
                _ => self
                    .diagnostics
                    .warn(WarningKind::InvalidDirective(name), position),
            },
            "@base" => match units.next() {
                Some(LexicalUnit::Reference(iri)) => match Iri::parse(iri.clone()) {
                    Ok(base_iri) => context.set_base_iri(base_iri),
                    Err(error) => self
                        .diagnostics
                        .warn(WarningKind::InvalidIri { iri, error }, position),
                },
                _ => self
                    .diagnostics
                    .warn(WarningKind::InvalidDirective(name), position),
            },
            "@keywords" | "@forAll" | "@forSome" => {
                log::debug!("ignoring the {} directive on {}", name, position)
            }
            _ => self
                .diagnostics
                .warn(WarningKind::InvalidDirective(name), position),
        }
    }

    fn starts_decimal(&self) -> bool {
        matches!(self.read.next(), Some(b'0'..=b'9'))
    }

    fn skip_stray(&mut self, c: u8) -> Result<(), N3Error> {
        self.diagnostics
            .warn(WarningKind::UnexpectedByte(c), self.read.position());
        self.read.consume()
    }
}
