//! Scoped term resolution
//!
//! A [`Context`] is one scope of term bindings. Scopes nest: a node object's
//! `@context` creates a child of the scope that was active around it, and
//! lookups walk from the innermost scope outward. Once built and shared
//! behind an `Rc`, a scope is never mutated, so sibling node objects cannot
//! observe each other's bindings.

use std::collections::HashMap;
use std::rc::Rc;

use url::Url;

use crate::error::{JsonLdError, Result};
use crate::term::{Iri, Subject};

#[derive(Debug, Default)]
pub struct Context {
    terms: HashMap<String, Subject>,
    parent: Option<Rc<Context>>,
    base: Option<Url>,
}

/// Parse a base IRI supplied by the caller
pub fn parse_base(base: &str) -> Result<Url> {
    Url::parse(base).map_err(|e| JsonLdError::InvalidBase {
        base: base.to_string(),
        reason: e.to_string(),
    })
}

impl Context {
    /// Create the outermost scope
    pub fn root(base: Option<Url>) -> Self {
        Self {
            terms: HashMap::new(),
            parent: None,
            base,
        }
    }

    /// Create an empty scope layered on top of `parent`
    pub fn child(parent: &Rc<Context>) -> Self {
        Self {
            terms: HashMap::new(),
            parent: Some(Rc::clone(parent)),
            base: None,
        }
    }

    /// Bind a term in this scope only, shadowing any outer binding
    pub fn register(&mut self, term: impl Into<String>, value: Subject) {
        self.terms.insert(term.into(), value);
    }

    /// Number of terms bound in this scope, not counting outer scopes
    pub(crate) fn len(&self) -> usize {
        self.terms.len()
    }

    /// Nearest base IRI, walking outward
    pub fn base(&self) -> Option<&Url> {
        self.scopes().find_map(|scope| scope.base.as_ref())
    }

    /// Resolve a property key or `@type` value
    ///
    /// Exact term bindings win over CURIE expansion. Anything that resolves
    /// neither way is taken literally as an IRI.
    pub fn resolve_term_or_type(&self, term: &str) -> Subject {
        if let Some(bound) = self.lookup(term) {
            return bound.clone();
        }
        if term.contains(':') {
            return self.resolve_curie(term);
        }
        Subject::Iri(Iri::new(term))
    }

    /// Resolve an `@id` value
    ///
    /// Strings with a colon are CURIEs (or absolute IRIs, which resolve to
    /// themselves when the scheme is not a bound prefix). Everything else is a
    /// relative reference against the nearest base.
    pub fn resolve_relative_or_curie(&self, identifier: &str) -> Result<Subject> {
        if identifier.contains(':') {
            return Ok(self.resolve_curie(identifier));
        }
        match self.base() {
            Some(base) => {
                let resolved =
                    base.join(identifier)
                        .map_err(|e| JsonLdError::InvalidReference {
                            reference: identifier.to_string(),
                            base: base.to_string(),
                            reason: e.to_string(),
                        })?;
                Ok(Subject::Iri(Iri::new(resolved.as_str())))
            }
            None => Ok(Subject::Iri(Iri::new(identifier))),
        }
    }

    fn resolve_curie(&self, curie: &str) -> Subject {
        if let Some((prefix, suffix)) = curie.split_once(':') {
            if let Some(Subject::Iri(namespace)) = self.lookup(prefix) {
                return Subject::Iri(Iri::new(format!("{}{}", namespace.as_str(), suffix)));
            }
        }
        Subject::Iri(Iri::new(curie))
    }

    fn lookup(&self, term: &str) -> Option<&Subject> {
        self.scopes().find_map(|scope| scope.terms.get(term))
    }

    fn scopes(&self) -> impl Iterator<Item = &Context> {
        std::iter::successors(Some(self), |scope| scope.parent.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::BlankNode;

    fn iri(s: &str) -> Subject {
        Subject::Iri(Iri::new(s))
    }

    fn with_terms(parent: Option<&Rc<Context>>, terms: &[(&str, &str)]) -> Rc<Context> {
        let mut ctx = match parent {
            Some(parent) => Context::child(parent),
            None => Context::root(None),
        };
        for (term, value) in terms {
            ctx.register(*term, iri(value));
        }
        Rc::new(ctx)
    }

    #[test]
    fn test_curie_expansion() {
        let ctx = with_terms(None, &[("ex", "http://example.org/")]);
        assert_eq!(ctx.resolve_term_or_type("ex:p"), iri("http://example.org/p"));
    }

    #[test]
    fn test_exact_match_beats_curie() {
        let ctx = with_terms(
            None,
            &[("ex", "http://example.org/"), ("ex:p", "http://other.org/q")],
        );
        assert_eq!(ctx.resolve_term_or_type("ex:p"), iri("http://other.org/q"));
    }

    #[test]
    fn test_unresolved_term_is_literal() {
        let ctx = Context::root(None);
        assert_eq!(ctx.resolve_term_or_type("name"), iri("name"));
        assert_eq!(
            ctx.resolve_term_or_type("http://example.org/p"),
            iri("http://example.org/p")
        );
    }

    #[test]
    fn test_child_shadows_parent() {
        let outer = with_terms(None, &[("name", "http://a/name"), ("age", "http://a/age")]);
        let inner = with_terms(Some(&outer), &[("name", "http://b/name")]);

        assert_eq!(inner.resolve_term_or_type("name"), iri("http://b/name"));
        assert_eq!(inner.resolve_term_or_type("age"), iri("http://a/age"));
        assert_eq!(outer.resolve_term_or_type("name"), iri("http://a/name"));
    }

    #[test]
    fn test_curie_prefix_from_outer_scope() {
        let outer = with_terms(None, &[("ex", "http://example.org/")]);
        let inner = with_terms(Some(&outer), &[("other", "http://other.org/")]);
        assert_eq!(inner.resolve_term_or_type("ex:p"), iri("http://example.org/p"));
    }

    #[test]
    fn test_blank_prefix_is_not_expanded() {
        let mut ctx = Context::root(None);
        ctx.register("b", Subject::Blank(BlankNode::fresh()));
        assert_eq!(ctx.resolve_term_or_type("b:x"), iri("b:x"));
    }

    #[test]
    fn test_relative_id_against_base() {
        let base = parse_base("http://example.org/doc").unwrap();
        let root = Rc::new(Context::root(Some(base)));
        let child = with_terms(Some(&root), &[]);

        assert_eq!(
            child.resolve_relative_or_curie("x").unwrap(),
            iri("http://example.org/x")
        );
        assert_eq!(
            child.resolve_relative_or_curie("#frag").unwrap(),
            iri("http://example.org/doc#frag")
        );
    }

    #[test]
    fn test_relative_id_without_base() {
        let ctx = Context::root(None);
        assert_eq!(ctx.resolve_relative_or_curie("x").unwrap(), iri("x"));
    }

    #[test]
    fn test_id_with_colon_is_curie() {
        let base = parse_base("http://example.org/doc").unwrap();
        let mut ctx = Context::root(Some(base));
        ctx.register("ex", iri("http://vocab.org/"));
        assert_eq!(
            ctx.resolve_relative_or_curie("ex:thing").unwrap(),
            iri("http://vocab.org/thing")
        );
        assert_eq!(
            ctx.resolve_relative_or_curie("urn:isbn:123").unwrap(),
            iri("urn:isbn:123")
        );
    }

    #[test]
    fn test_id_ignores_exact_term_binding() {
        let mut ctx = Context::root(None);
        ctx.register("me", iri("http://example.org/me"));
        assert_eq!(ctx.resolve_relative_or_curie("me").unwrap(), iri("me"));
    }

    #[test]
    fn test_invalid_base() {
        let err = parse_base("not a base").unwrap_err();
        assert!(matches!(err, JsonLdError::InvalidBase { .. }));
    }
}
