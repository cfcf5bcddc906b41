//! Streaming JSON-LD to RDF
//!
//! This library turns a JSON-LD document into RDF triples in a single pass
//! over its lexical JSON events. Input is tokenized as it is read and triples
//! are handed to a sink as soon as each one is fully determined; neither the
//! document nor the graph is held in memory.
//!
//! # Overview
//!
//! The document is read as nested node objects:
//!
//! 1. `@id` names the node (relative references resolve against the base IRI,
//!    `_:` labels become blank nodes shared across the whole document)
//! 2. `@context` layers term and prefix definitions for the object and
//!    everything inside it
//! 3. `@type`, `@value` and `@language` describe types and literals
//! 4. `@list` builds an `rdf:first`/`rdf:rest` chain ending in `rdf:nil`
//! 5. `@graph` (root only) lists further node objects whose triples join the
//!    same stream
//!
//! Everything else is a property whose value is a node object, a string or an
//! array of those.
//!
//! # Scope
//!
//! This is a deliberately small subset of JSON-LD: no remote contexts, no
//! expanded term definitions, no `@vocab`, no named graphs. Numbers,
//! booleans and null are not accepted as values.
//!
//! # Usage
//!
//! ```ignore
//! use jsonld_stream::{parse_to_graph, ParseOptions};
//!
//! let doc = br#"{"@id": "x", "http://xmlns.com/foaf/0.1/name": "Alice"}"#;
//! let options = ParseOptions::default().with_base("http://example.org/");
//! let triples = parse_to_graph(&doc[..], &options)?;
//! assert_eq!(triples[0].subject.to_string(), "<http://example.org/x>");
//! ```
//!
//! Write N-Triples instead:
//!
//! ```ignore
//! use jsonld_stream::{parse_to_writer, ParseOptions};
//!
//! let file = std::fs::File::open("doc.jsonld")?;
//! parse_to_writer(file, std::io::stdout(), &ParseOptions::default())?;
//! ```

pub mod blank;
pub mod context;
pub mod document;
pub mod error;
pub mod event;
mod list;
mod node;
pub mod sink;
pub mod term;
mod value;
pub mod vocab;

// Re-export main types for convenience
pub use crate::blank::BlankNodeTable;
pub use crate::context::Context;
pub use crate::document::{
    parse_events, parse_to_graph, parse_to_sink, parse_to_writer, ParseOptions, ParseStats,
};
pub use crate::error::{ErrorKind, JsonLdError, Result};
pub use crate::event::{EventSource, JsonEvent, ReaderEvents, ValueEvents};
pub use crate::sink::{NTriplesWriter, TripleSink};
pub use crate::term::{BlankNode, Iri, Literal, Subject, Term, Triple};
