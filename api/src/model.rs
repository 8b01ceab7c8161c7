//! Data structures for N3 terms: IRIs, blank nodes, literals, formulas and triples.
//!
//! All the types own their data: a [`Formula`] nests whole triples, which rules out the
//! borrowed `&'a str` representation a flat RDF model can use.

use std::fmt;
use std::fmt::Write;
use std::iter::FromIterator;
use std::slice;
use std::vec;

/// An RDF [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri).
///
/// It might be relative if the document had no base IRI to resolve it against.
///
/// The default string formatter is returning an N-Triples, Turtle and N3 compatible representation.
///
/// ```
/// use n3_api::model::NamedNode;
///
/// assert_eq!(
///     "<http://example.com/foo>",
///     NamedNode::new("http://example.com/foo").to_string()
/// )
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct NamedNode {
    /// The [IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-iri) itself.
    pub iri: String,
}

impl NamedNode {
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.iri
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.iri)
    }
}

/// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node).
///
/// Labels written in the document (`_:foo`) and nodes allocated by the parser live in
/// two separate variants, so an allocated node is never equal to a labelled one.
///
/// Allocated nodes are written `_:g<n>`. Labels starting with `g` get one more `g` so the
/// two never share a string form:
/// ```
/// use n3_api::model::BlankNode;
///
/// assert_eq!("_:a1", BlankNode::Named { id: "a1".to_owned() }.to_string());
/// assert_eq!("_:gg1", BlankNode::Named { id: "g1".to_owned() }.to_string());
/// assert_eq!("_:g1", BlankNode::Anonymous { id: 1 }.to_string());
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum BlankNode {
    /// A blank node with a label given in the document.
    Named { id: String },
    /// A blank node allocated by the parser.
    Anonymous { id: u64 },
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlankNode::Named { id } if id.starts_with('g') => write!(f, "_:g{}", id),
            BlankNode::Named { id } => write!(f, "_:{}", id),
            BlankNode::Anonymous { id } => write!(f, "_:g{}", id),
        }
    }
}

/// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#dfn-literal).
///
/// The default string formatter is returning an N-Triples, Turtle and N3 compatible representation.
///
/// ```
/// use n3_api::model::{Literal, NamedNode};
///
/// assert_eq!(
///     "\"foo\\nbar\"",
///     Literal::Simple { value: "foo\nbar".to_owned() }.to_string()
/// );
///
/// assert_eq!(
///     "\"1999-01-01\"^^<http://www.w3.org/2001/XMLSchema#date>",
///     Literal::Typed {
///         value: "1999-01-01".to_owned(),
///         datatype: NamedNode::new("http://www.w3.org/2001/XMLSchema#date")
///     }.to_string()
/// );
///
/// assert_eq!(
///     "\"foo\"@en",
///     Literal::LanguageTaggedString { value: "foo".to_owned(), language: "en".to_owned() }.to_string()
/// );
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub enum Literal {
    /// A [simple literal](https://www.w3.org/TR/rdf11-concepts/#dfn-simple-literal) without datatype or language form.
    Simple {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: String,
    },
    /// A [language-tagged string](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tagged-string)
    LanguageTaggedString {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: String,
        /// The [language tag](https://www.w3.org/TR/rdf11-concepts/#dfn-language-tag), lowercased.
        language: String,
    },
    /// A literal with an explicit datatype
    Typed {
        /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form).
        value: String,
        /// The [datatype IRI](https://www.w3.org/TR/rdf11-concepts/#dfn-datatype-iri).
        datatype: NamedNode,
    },
}

impl Literal {
    /// The [lexical form](https://www.w3.org/TR/rdf11-concepts/#dfn-lexical-form) of the literal.
    pub fn value(&self) -> &str {
        match self {
            Literal::Simple { value }
            | Literal::LanguageTaggedString { value, .. }
            | Literal::Typed { value, .. } => value,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        escape(self.value()).try_for_each(|c| f.write_char(c))?;
        f.write_char('"')?;
        match self {
            Literal::Simple { .. } => Ok(()),
            Literal::LanguageTaggedString { language, .. } => write!(f, "@{}", language),
            Literal::Typed { datatype, .. } => write!(f, "^^{}", datatype),
        }
    }
}

/// A quoted graph: a set of triples usable itself as a subject or an object.
///
/// The triples keep the order in which the parser produced them.
///
/// ```
/// use n3_api::model::{Formula, NamedNode, Triple};
///
/// let formula: Formula = vec![Triple {
///     subject: NamedNode::new("urn:a").into(),
///     predicate: NamedNode::new("urn:b"),
///     object: NamedNode::new("urn:c").into(),
/// }]
/// .into_iter()
/// .collect();
/// assert_eq!("{ <urn:a> <urn:b> <urn:c> . }", formula.to_string());
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash, Default)]
pub struct Formula {
    triples: Vec<Triple>,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, triple: Triple) {
        self.triples.push(triple)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.triples.is_empty() {
            return f.write_str("{}");
        }
        f.write_char('{')?;
        for triple in &self.triples {
            write!(f, " {}", triple)?;
        }
        f.write_str(" }")
    }
}

impl From<Vec<Triple>> for Formula {
    fn from(triples: Vec<Triple>) -> Self {
        Self { triples }
    }
}

impl FromIterator<Triple> for Formula {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Formula {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter)
    }
}

impl IntoIterator for Formula {
    type Item = Triple;
    type IntoIter = vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a Triple;
    type IntoIter = slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

/// A triple endpoint.
///
/// It is the union of [IRIs](https://www.w3.org/TR/rdf11-concepts/#dfn-iri), [blank nodes](https://www.w3.org/TR/rdf11-concepts/#dfn-blank-node),
/// [literals](https://www.w3.org/TR/rdf11-concepts/#dfn-literal) and [formulas](struct.Formula.html).
///
/// The default string formatter is returning an N3 compatible representation.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Term {
    NamedNode(NamedNode),
    BlankNode(BlankNode),
    Literal(Literal),
    Formula(Formula),
}

impl Term {
    pub fn as_named_node(&self) -> Option<&NamedNode> {
        match self {
            Term::NamedNode(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            Term::Formula(formula) => Some(formula),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NamedNode(node) => node.fmt(f),
            Term::BlankNode(node) => node.fmt(f),
            Term::Literal(literal) => literal.fmt(f),
            Term::Formula(formula) => formula.fmt(f),
        }
    }
}

impl From<NamedNode> for Term {
    fn from(node: NamedNode) -> Self {
        Term::NamedNode(node)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::BlankNode(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl From<Formula> for Term {
    fn from(formula: Formula) -> Self {
        Term::Formula(formula)
    }
}

/// A triple whose subject and object might be any [`Term`](enum.Term.html), including formulas.
///
/// The default string formatter is returning an N3 compatible representation.
///
/// ```
/// use n3_api::model::{NamedNode, Triple};
///
/// assert_eq!(
///     "<http://example.com/foo> <http://schema.org/sameAs> <http://example.com/foo> .",
///     Triple {
///         subject: NamedNode::new("http://example.com/foo").into(),
///         predicate: NamedNode::new("http://schema.org/sameAs"),
///         object: NamedNode::new("http://example.com/foo").into(),
///     }.to_string()
/// )
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: NamedNode,
    pub object: Term,
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

fn escape(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(EscapeRDF::new)
}

/// A customized version of EscapeDefault of the Rust standard library
struct EscapeRDF {
    state: EscapeRdfState,
}

enum EscapeRdfState {
    Done,
    Char(char),
    Backslash(char),
}

impl EscapeRDF {
    fn new(c: char) -> Self {
        Self {
            state: match c {
                '\n' => EscapeRdfState::Backslash('n'),
                '\r' => EscapeRdfState::Backslash('r'),
                '"' => EscapeRdfState::Backslash('"'),
                '\\' => EscapeRdfState::Backslash('\\'),
                c => EscapeRdfState::Char(c),
            },
        }
    }
}

impl Iterator for EscapeRDF {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self.state {
            EscapeRdfState::Backslash(c) => {
                self.state = EscapeRdfState::Char(c);
                Some('\\')
            }
            EscapeRdfState::Char(c) => {
                self.state = EscapeRdfState::Done;
                Some(c)
            }
            EscapeRdfState::Done => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for EscapeRDF {
    fn len(&self) -> usize {
        match self.state {
            EscapeRdfState::Done => 0,
            EscapeRdfState::Char(_) => 1,
            EscapeRdfState::Backslash(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_node_strings_do_not_collide() {
        let labelled = ["g1", "gg1", "g", "a1"]
            .iter()
            .map(|id| {
                BlankNode::Named {
                    id: (*id).to_owned(),
                }
                .to_string()
            })
            .collect::<Vec<_>>();
        let allocated = (0..3)
            .map(|id| BlankNode::Anonymous { id }.to_string())
            .collect::<Vec<_>>();
        assert_eq!(vec!["_:gg1", "_:ggg1", "_:gg", "_:a1"], labelled);
        for name in &allocated {
            assert!(!labelled.contains(name));
        }
    }
}
