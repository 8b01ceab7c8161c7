//! Interfaces for the graphs receiving parsed triples.

use crate::model::{Formula, Triple};
use std::convert::Infallible;

/// A destination for [`Triple`](../model/struct.Triple.html).
///
/// Formula-valued endpoints are handed over as nested [`Formula`](../model/struct.Formula.html)
/// values, never flattened into the receiving graph.
///
/// ```
/// use n3_api::model::{Formula, NamedNode, Triple};
/// use n3_api::sink::GraphSink;
///
/// let mut graph = Formula::new();
/// graph.insert(Triple {
///     subject: NamedNode::new("urn:a").into(),
///     predicate: NamedNode::new("urn:b"),
///     object: NamedNode::new("urn:c").into(),
/// }).unwrap();
/// assert_eq!(1, graph.len());
/// ```
pub trait GraphSink {
    type Error;

    /// Adds a triple
    fn insert(&mut self, triple: Triple) -> Result<(), Self::Error>;
}

impl GraphSink for Formula {
    type Error = Infallible;

    fn insert(&mut self, triple: Triple) -> Result<(), Infallible> {
        self.push(triple);
        Ok(())
    }
}

impl GraphSink for Vec<Triple> {
    type Error = Infallible;

    fn insert(&mut self, triple: Triple) -> Result<(), Infallible> {
        self.push(triple);
        Ok(())
    }
}
