//! Turns the lexical units of one statement into triples.
//!
//! The units are read left to right while a [`Role`] tracks which slot of the current triple
//! the next unit fills. Grammar words (`is`, `of`, `has`) occupy a unit without filling a slot,
//! and the path operators `!` and `^` emit a triple on their own before chaining through a
//! fresh blank node.

use crate::context::Context;
use crate::error::{Diagnostics, WarningKind};
use crate::lexer::{LexicalUnit, Shorthand, N3};
use crate::utils::BlankNodeIdGenerator;
use n3_api::model::*;
use n3_api::parser::LineBytePosition;

pub(crate) const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub(crate) const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
pub(crate) const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
pub(crate) const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
pub(crate) const OWL_SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
pub(crate) const LOG_IMPLIES: &str = "http://www.w3.org/2000/10/swap/log#implies";
pub(crate) const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub(crate) const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub(crate) const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub(crate) const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// The slot of the current triple the next lexical unit fills.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Role {
    Subject,
    Predicate,
    Object,
}

pub(crate) struct LinkGenerator<'a> {
    context: &'a Context,
    bnode_id_generator: &'a mut BlankNodeIdGenerator,
    diagnostics: &'a mut Diagnostics,
    position: LineBytePosition,
}

impl<'a> LinkGenerator<'a> {
    /// `position` is where the statement starts. Warnings raised while resolving it point there.
    pub fn new(
        context: &'a Context,
        bnode_id_generator: &'a mut BlankNodeIdGenerator,
        diagnostics: &'a mut Diagnostics,
        position: LineBytePosition,
    ) -> Self {
        Self {
            context,
            bnode_id_generator,
            diagnostics,
            position,
        }
    }

    /// Emits the triples of a statement.
    pub fn generate<E>(
        &mut self,
        units: Vec<LexicalUnit>,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<(), E> {
        self.generate_from(None, units, on_triple)
    }

    fn generate_from<E>(
        &mut self,
        subject: Option<Term>,
        units: Vec<LexicalUnit>,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut role = if subject.is_some() {
            Role::Predicate
        } else {
            Role::Subject
        };
        let mut subject = subject;
        let mut predicate: Option<NamedNode> = None;
        let mut swap = false;

        let mut units = units.into_iter();
        while let Some(unit) = units.next() {
            let shorthand = unit.shorthand(&N3);
            match role {
                Role::Subject => match shorthand {
                    Some(Shorthand::ObjectSeparator) => role = Role::Object,
                    Some(Shorthand::PredicateSeparator) => role = Role::Predicate,
                    _ => {
                        subject = self.resolve(unit, on_triple)?;
                        predicate = None;
                        role = Role::Predicate;
                    }
                },
                Role::Predicate => match shorthand {
                    Some(Shorthand::Is) => swap = true,
                    Some(Shorthand::Has) | Some(Shorthand::PredicateSeparator) => (),
                    Some(Shorthand::SameAs) => {
                        predicate = Some(NamedNode::new(OWL_SAME_AS));
                        role = Role::Object;
                    }
                    Some(Shorthand::Implies) => {
                        predicate = Some(NamedNode::new(LOG_IMPLIES));
                        role = Role::Object;
                    }
                    Some(Shorthand::ImpliedBy) => {
                        predicate = Some(NamedNode::new(LOG_IMPLIES));
                        swap = true;
                        role = Role::Object;
                    }
                    Some(Shorthand::Type) => {
                        predicate = Some(NamedNode::new(RDF_TYPE));
                        role = Role::Object;
                    }
                    Some(Shorthand::ForwardPath) => {
                        let node = Term::from(self.bnode_id_generator.generate());
                        let path_predicate = self.resolve_predicate(units.next(), on_triple)?;
                        if let (Some(s), Some(p)) = (subject.take(), path_predicate) {
                            self.emit(s, p, node.clone(), on_triple)?;
                        } else {
                            log::debug!("incomplete forward path on {}", self.position);
                        }
                        subject = Some(node);
                        predicate = None;
                    }
                    Some(Shorthand::BackwardPath) => {
                        let node = Term::from(self.bnode_id_generator.generate());
                        let path_predicate = self.resolve_predicate(units.next(), on_triple)?;
                        if let (Some(o), Some(p)) = (subject.take(), path_predicate) {
                            self.emit(node.clone(), p, o, on_triple)?;
                        } else {
                            log::debug!("incomplete backward path on {}", self.position);
                        }
                        subject = Some(node);
                        predicate = None;
                    }
                    _ => {
                        predicate = self.resolve_predicate(Some(unit), on_triple)?;
                        role = Role::Object;
                    }
                },
                Role::Object => {
                    if shorthand == Some(Shorthand::Of) {
                        continue;
                    }
                    let object = self.resolve(unit, on_triple)?;
                    match (subject.take(), predicate.clone(), object) {
                        (Some(s), Some(p), Some(o)) => {
                            // a swapped object takes the subject slot for what follows
                            let (s, o) = if swap { (o, s) } else { (s, o) };
                            subject = Some(s.clone());
                            self.emit(s, p, o, on_triple)?;
                        }
                        (s, _, _) => {
                            subject = s;
                            log::debug!("dropping an incomplete triple on {}", self.position)
                        }
                    }
                    swap = false;
                    role = Role::Subject;
                }
            }
        }
        Ok(())
    }

    fn emit<E>(
        &mut self,
        subject: Term,
        predicate: NamedNode,
        object: Term,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<(), E> {
        let triple = Triple {
            subject,
            predicate,
            object,
        };
        log::trace!("{}", triple);
        on_triple(triple)
    }

    /// Resolves a unit to the term it denotes.
    ///
    /// A `[ ... ]` body is emitted here, with the blank node as subject. Shorthand words and
    /// operators denote nothing.
    fn resolve<E>(
        &mut self,
        unit: LexicalUnit,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<Option<Term>, E> {
        Ok(match unit {
            LexicalUnit::Reference(iri) => Some(NamedNode { iri }.into()),
            LexicalUnit::Literal(literal) => Some(literal.into()),
            LexicalUnit::BlankNode { node, body } => {
                if !body.is_empty() {
                    self.generate_from(Some(node.clone().into()), body, on_triple)?;
                }
                Some(node.into())
            }
            LexicalUnit::OrderedList(items) => Some(self.resolve_list(items, on_triple)?.into()),
            LexicalUnit::Formula(formula) => Some(formula.into()),
            LexicalUnit::Keyword(keyword) => self.resolve_keyword(keyword),
        })
    }

    fn resolve_predicate<E>(
        &mut self,
        unit: Option<LexicalUnit>,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<Option<NamedNode>, E> {
        let unit = match unit {
            Some(unit) => unit,
            None => {
                log::debug!("path operator without predicate on {}", self.position);
                return Ok(None);
            }
        };
        Ok(match self.resolve(unit, on_triple)? {
            Some(Term::NamedNode(node)) => Some(node),
            Some(term) => {
                self.diagnostics
                    .warn(WarningKind::InvalidPredicate(term), self.position);
                None
            }
            None => None,
        })
    }

    /// A list becomes the formula of its `rdf:first`/`rdf:rest` chain.
    fn resolve_list<E>(
        &mut self,
        items: Vec<LexicalUnit>,
        on_triple: &mut impl FnMut(Triple) -> Result<(), E>,
    ) -> Result<Formula, E> {
        let mut formula = Formula::new();
        let mut previous: Option<BlankNode> = None;
        for item in items {
            if let LexicalUnit::Keyword(keyword) = &item {
                if N3.shorthand(keyword).is_some() {
                    self.diagnostics.warn(
                        WarningKind::IllTypedEndpoint(keyword.clone()),
                        self.position,
                    );
                    continue;
                }
            }
            let value = match self.resolve(item, on_triple)? {
                Some(value) => value,
                None => continue,
            };
            let node = self.bnode_id_generator.generate();
            if let Some(previous) = previous {
                formula.push(Triple {
                    subject: previous.into(),
                    predicate: NamedNode::new(RDF_REST),
                    object: node.clone().into(),
                });
            }
            formula.push(Triple {
                subject: node.clone().into(),
                predicate: NamedNode::new(RDF_FIRST),
                object: value,
            });
            previous = Some(node);
        }
        if let Some(last) = previous {
            formula.push(Triple {
                subject: last.into(),
                predicate: NamedNode::new(RDF_REST),
                object: NamedNode::new(RDF_NIL).into(),
            });
        }
        Ok(formula)
    }

    fn resolve_keyword(&mut self, keyword: String) -> Option<Term> {
        if N3.shorthand(&keyword).is_some() {
            log::debug!("'{}' out of place on {}", keyword, self.position);
            return None;
        }
        if keyword == "true" || keyword == "false" {
            return Some(typed_literal(keyword, XSD_BOOLEAN));
        }
        if let Some(datatype) = numeric_datatype(&keyword) {
            return Some(typed_literal(keyword, datatype));
        }
        if let Some(colon) = keyword.find(':') {
            let (prefix, local) = (&keyword[..colon], &keyword[colon + 1..]);
            return match self.context.expand(prefix, local) {
                Some(iri) => Some(NamedNode { iri }.into()),
                None => {
                    self.diagnostics.warn(
                        WarningKind::UnknownPrefix(prefix.to_owned()),
                        self.position,
                    );
                    None
                }
            };
        }
        if let Some(iri) = self.context.expand("", &keyword) {
            return Some(NamedNode { iri }.into());
        }
        match self.context.resolve_iri(&keyword) {
            Ok(iri) => Some(NamedNode { iri }.into()),
            Err(error) => {
                self.diagnostics.warn(
                    WarningKind::InvalidIri {
                        iri: keyword,
                        error,
                    },
                    self.position,
                );
                None
            }
        }
    }
}

fn typed_literal(value: String, datatype: &str) -> Term {
    Literal::Typed {
        value,
        datatype: NamedNode::new(datatype),
    }
    .into()
}

/// The XSD datatype of a numeric token, if it is one.
fn numeric_datatype(token: &str) -> Option<&'static str> {
    // INTEGER ::= [+-]? [0-9]+
    // DECIMAL ::= [+-]? [0-9]* '.' [0-9]+
    // DOUBLE  ::= [+-]? ([0-9]+ '.' [0-9]* EXPONENT | '.' [0-9]+ EXPONENT | [0-9]+ EXPONENT)
    let bytes = token.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let count_digits = |from: usize| bytes[from..].iter().take_while(|c| c.is_ascii_digit()).count();

    let count_before = count_digits(i);
    i += count_before;
    let count_after = if bytes.get(i) == Some(&b'.') {
        let count = count_digits(i + 1);
        i += 1 + count;
        Some(count)
    } else {
        None
    };

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let count_exponent = count_digits(i);
        i += count_exponent;
        return if i == bytes.len()
            && count_exponent > 0
            && (count_before > 0 || count_after.unwrap_or(0) > 0)
        {
            Some(XSD_DOUBLE)
        } else {
            None
        };
    }

    if i != bytes.len() {
        None
    } else if count_after.is_none() && count_before > 0 {
        Some(XSD_INTEGER)
    } else if count_after.unwrap_or(0) > 0 {
        Some(XSD_DECIMAL)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tokens() {
        assert_eq!(Some(XSD_INTEGER), numeric_datatype("42"));
        assert_eq!(Some(XSD_INTEGER), numeric_datatype("-7"));
        assert_eq!(Some(XSD_DECIMAL), numeric_datatype("+1.5"));
        assert_eq!(Some(XSD_DECIMAL), numeric_datatype(".5"));
        assert_eq!(Some(XSD_DOUBLE), numeric_datatype("1e10"));
        assert_eq!(Some(XSD_DOUBLE), numeric_datatype("1.5E-3"));
        assert_eq!(None, numeric_datatype("1."));
        assert_eq!(None, numeric_datatype("1e"));
        assert_eq!(None, numeric_datatype("ex:1"));
        assert_eq!(None, numeric_datatype("+"));
        assert_eq!(None, numeric_datatype(""));
    }

    #[test]
    fn shorthand_words_ignore_case() {
        assert_eq!(Some(Shorthand::Type), N3.shorthand("A"));
        assert_eq!(Some(Shorthand::Is), N3.shorthand("IS"));
        assert_eq!(None, N3.shorthand("isa"));
    }
}
