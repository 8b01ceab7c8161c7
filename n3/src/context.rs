//! Namespace and base IRI resolution.

use oxiri::{Iri, IriParseError};
use std::collections::HashMap;

/// The prefixes and base IRI in effect at some point of a document.
///
/// A parser starts from the context it is given. `@prefix` and `@base` directives update the
/// context of the scope they appear in; a formula works on a copy of the enclosing context, so
/// directives written inside it do not leak out.
///
/// ```
/// use n3_parser::Context;
///
/// let context = Context::with_base("http://example.com/dir/")?
///     .with_prefix("schema", "http://schema.org/");
/// assert_eq!(Some("http://schema.org/name".to_owned()), context.expand("schema", "name"));
/// assert_eq!("http://example.com/dir/foo", context.resolve_iri("foo")?);
/// # Result::<_, oxiri::IriParseError>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    base_iri: Option<Iri<String>>,
    prefixes: HashMap<String, String>,
}

impl Context {
    /// A context without base IRI nor prefixes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with the given base IRI.
    pub fn with_base(base_iri: &str) -> Result<Self, IriParseError> {
        Ok(Self {
            base_iri: Some(Iri::parse(base_iri.to_owned())?),
            prefixes: HashMap::default(),
        })
    }

    /// Adds the prefix declaration `prefix:` -> `namespace`.
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.add_prefix(prefix, namespace);
        self
    }

    pub fn base_iri(&self) -> Option<&str> {
        self.base_iri.as_ref().map(|iri| iri.as_str())
    }

    pub fn set_base_iri(&mut self, base_iri: Iri<String>) {
        self.base_iri = Some(base_iri);
    }

    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// The namespace bound to `prefix`, the empty string being the default namespace.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Expands the prefixed name `prefix:local`.
    pub fn expand(&self, prefix: &str, local: &str) -> Option<String> {
        self.namespace(prefix).map(|namespace| {
            let mut iri = String::with_capacity(namespace.len() + local.len());
            iri.push_str(namespace);
            iri.push_str(local);
            iri
        })
    }

    /// Resolves `iri` against the base IRI.
    ///
    /// Without a base IRI the reference is returned as written, relative or not.
    pub fn resolve_iri(&self, iri: &str) -> Result<String, IriParseError> {
        match &self.base_iri {
            Some(base_iri) => Ok(base_iri.resolve(iri)?.into_inner()),
            None => Ok(iri.to_owned()),
        }
    }
}
