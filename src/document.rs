//! Document driver and parse entry points
//!
//! A document must be a single JSON object. It is parsed as the root node
//! object, the only place where `@graph` is accepted. Triples flow to the
//! sink while parsing; on failure the ones already emitted stay emitted.

use std::io::{Read, Write};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::blank::BlankNodeTable;
use crate::context::{parse_base, Context};
use crate::error::{JsonLdError, Result};
use crate::event::{EventSource, JsonEvent, ReaderEvents};
use crate::sink::{NTriplesWriter, TripleSink};
use crate::term::{Iri, Subject, Term, Triple};
use crate::vocab::is_blank_label;

/// Options for parsing
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Base IRI for resolving relative `@id` values
    pub base: Option<String>,
    /// Maximum nesting of node objects
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            base: None,
            max_depth: 256,
        }
    }
}

impl ParseOptions {
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }
}

/// Statistics from a completed parse
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseStats {
    /// Number of triples handed to the sink
    pub triples: usize,
    /// Number of distinct blank node labels in the document
    pub blank_labels: usize,
}

/// Parse a stream of lexical events, sending triples to `sink`
pub fn parse_events<E, S>(events: E, sink: &mut S, options: &ParseOptions) -> Result<ParseStats>
where
    E: EventSource,
    S: TripleSink + ?Sized,
{
    let base = options.base.as_deref().map(parse_base).transpose()?;
    let root = Rc::new(Context::root(base));
    debug!(base = ?options.base, "parsing JSON-LD document");

    let mut parser = Parser::new(events, sink, options.max_depth);
    match parser.next_event("document")? {
        JsonEvent::StartObject => {}
        other => return Err(JsonLdError::DocumentNotObject(other.to_string())),
    }
    parser.parse_node_object(&root, true, None)?;
    if let Some(trailing) = parser.events.next_event()? {
        return Err(unexpected("end of document", trailing));
    }

    let stats = ParseStats {
        triples: parser.emitted,
        blank_labels: parser.blank_nodes.len(),
    };
    debug!(triples = stats.triples, "parsed JSON-LD document");
    Ok(stats)
}

/// Parse JSON-LD text from a reader, sending triples to `sink`
pub fn parse_to_sink<R, S>(reader: R, sink: &mut S, options: &ParseOptions) -> Result<ParseStats>
where
    R: Read,
    S: TripleSink + ?Sized,
{
    parse_events(ReaderEvents::new(reader), sink, options)
}

/// Parse JSON-LD text from a reader into an in-memory collection
pub fn parse_to_graph<R: Read>(reader: R, options: &ParseOptions) -> Result<Vec<Triple>> {
    let mut triples = Vec::new();
    parse_to_sink(reader, &mut triples, options)?;
    Ok(triples)
}

/// Parse JSON-LD text from a reader and write N-Triples to `writer`
pub fn parse_to_writer<R, W>(reader: R, writer: W, options: &ParseOptions) -> Result<ParseStats>
where
    R: Read,
    W: Write,
{
    let mut sink = NTriplesWriter::new(writer);
    let result = parse_to_sink(reader, &mut sink, options);
    // Flush whatever was written, even when the parse failed
    sink.into_inner()?;
    result
}

/// Parser state shared by the node object, value and list parsers
///
/// The active [`Context`] is not part of this state: it is passed down the
/// recursive calls so each node object sees exactly its enclosing scopes.
pub(crate) struct Parser<'s, E, S: ?Sized> {
    events: E,
    sink: &'s mut S,
    pub(crate) blank_nodes: BlankNodeTable,
    pub(crate) emitted: usize,
    depth: usize,
    max_depth: usize,
}

impl<'s, E, S> Parser<'s, E, S>
where
    E: EventSource,
    S: TripleSink + ?Sized,
{
    pub(crate) fn new(events: E, sink: &'s mut S, max_depth: usize) -> Self {
        Self {
            events,
            sink,
            blank_nodes: BlankNodeTable::new(),
            emitted: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Pull the next event; running out of input is an error
    pub(crate) fn next_event(&mut self, reading: &'static str) -> Result<JsonEvent> {
        self.events
            .next_event()?
            .ok_or(JsonLdError::UnexpectedEof(reading))
    }

    /// Read a string payload of a keyword
    pub(crate) fn expect_string(&mut self, keyword: &'static str) -> Result<String> {
        match self.next_event(keyword)? {
            JsonEvent::String(s) => Ok(s),
            other => Err(JsonLdError::Unsupported(format!(
                "{} must be a string, got {}",
                keyword, other
            ))),
        }
    }

    pub(crate) fn emit(
        &mut self,
        subject: impl Into<Subject>,
        predicate: Iri,
        object: impl Into<Term>,
    ) -> Result<()> {
        let triple = Triple::new(subject, predicate, object);
        trace!(%triple, "emit");
        self.emitted += 1;
        self.sink.add(triple)
    }

    /// Resolve a property key or `@type` value
    pub(crate) fn resolve_term(&mut self, ctx: &Context, term: &str) -> Subject {
        if is_blank_label(term) {
            Subject::Blank(self.blank_nodes.get_or_create(term))
        } else {
            ctx.resolve_term_or_type(term)
        }
    }

    /// Resolve an `@id` value
    pub(crate) fn resolve_id(&mut self, ctx: &Context, identifier: &str) -> Result<Subject> {
        if is_blank_label(identifier) {
            Ok(Subject::Blank(self.blank_nodes.get_or_create(identifier)))
        } else {
            ctx.resolve_relative_or_curie(identifier)
        }
    }

    pub(crate) fn descend(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(JsonLdError::NestingTooDeep(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth -= 1;
    }
}

/// Error for an event that does not fit the construct being read
pub(crate) fn unexpected(expected: &'static str, found: JsonEvent) -> JsonLdError {
    JsonLdError::UnexpectedEvent {
        expected,
        found: found.to_string(),
    }
}
