//! RDF term types: IRI, blank node, literal
//!
//! Terms are the values that triples are made of. Subjects are restricted to
//! IRIs and blank nodes, predicates to IRIs, and objects may be any term.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// An absolute (or at least fully expanded) identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(iri: impl AsRef<str>) -> Self {
        Self(Arc::from(iri.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

static NEXT_BLANK_NODE: AtomicU64 = AtomicU64::new(0);

/// An anonymous resource
///
/// Blank nodes carry no label. Two blank nodes are equal only if they were
/// produced by the same call to [`BlankNode::fresh`] (or are copies of it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode(u64);

impl BlankNode {
    /// Allocate a blank node distinct from every other one in this process
    pub fn fresh() -> Self {
        Self(NEXT_BLANK_NODE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:b{}", self.0)
    }
}

/// A literal value
///
/// A literal is either plain (optionally language tagged) or typed, never both.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Plain {
        text: String,
        language: Option<String>,
    },
    Typed {
        text: String,
        datatype: Iri,
    },
}

impl Literal {
    /// Plain literal without a language tag
    pub fn plain(text: impl Into<String>) -> Self {
        Literal::Plain {
            text: text.into(),
            language: None,
        }
    }

    pub fn with_language(text: impl Into<String>, language: impl Into<String>) -> Self {
        Literal::Plain {
            text: text.into(),
            language: Some(language.into()),
        }
    }

    pub fn typed(text: impl Into<String>, datatype: Iri) -> Self {
        Literal::Typed {
            text: text.into(),
            datatype,
        }
    }

    /// The lexical form
    pub fn text(&self) -> &str {
        match self {
            Literal::Plain { text, .. } | Literal::Typed { text, .. } => text,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Literal::Plain { language, .. } => language.as_deref(),
            Literal::Typed { .. } => None,
        }
    }

    pub fn datatype(&self) -> Option<&Iri> {
        match self {
            Literal::Plain { .. } => None,
            Literal::Typed { datatype, .. } => Some(datatype),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_quoted(f, self.text())?;
        match self {
            Literal::Plain {
                language: Some(language),
                ..
            } => write!(f, "@{}", language),
            Literal::Plain { language: None, .. } => Ok(()),
            Literal::Typed { datatype, .. } => write!(f, "^^{}", datatype),
        }
    }
}

/// Write a string as an N-Triples quoted string
fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in text.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

/// A term usable in subject position: an IRI or a blank node
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    Iri(Iri),
    Blank(BlankNode),
}

impl Subject {
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Subject::Iri(iri) => Some(iri),
            Subject::Blank(_) => None,
        }
    }
}

impl From<Iri> for Subject {
    fn from(iri: Iri) -> Self {
        Subject::Iri(iri)
    }
}

impl From<BlankNode> for Subject {
    fn from(node: BlankNode) -> Self {
        Subject::Blank(node)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Iri(iri) => iri.fmt(f),
            Subject::Blank(node) => node.fmt(f),
        }
    }
}

/// Any RDF term
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(Iri),
    Blank(BlankNode),
    Literal(Literal),
}

impl Term {
    pub fn as_blank(&self) -> Option<BlankNode> {
        match self {
            Term::Blank(node) => Some(*node),
            _ => None,
        }
    }
}

impl From<Subject> for Term {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Iri(iri) => Term::Iri(iri),
            Subject::Blank(node) => Term::Blank(node),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri(iri)
    }
}

impl From<BlankNode> for Term {
    fn from(node: BlankNode) -> Self {
        Term::Blank(node)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => iri.fmt(f),
            Term::Blank(node) => node.fmt(f),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

/// A subject-predicate-object statement
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Subject,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Subject>, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}
