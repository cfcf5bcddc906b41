//! Object-position values
//!
//! Interprets the JSON value of a property: a nested node object, a string
//! (plain literal), or an array of those.

use std::rc::Rc;

use crate::context::Context;
use crate::document::{unexpected, Parser};
use crate::error::Result;
use crate::event::{EventSource, JsonEvent};
use crate::sink::TripleSink;
use crate::term::{BlankNode, Iri, Literal, Subject, Term};

/// The subject and predicate a value is attached to
#[derive(Debug, Clone)]
pub(crate) struct Link {
    pub subject: Subject,
    pub predicate: Iri,
}

impl Link {
    pub fn new(subject: impl Into<Subject>, predicate: Iri) -> Self {
        Self {
            subject: subject.into(),
            predicate,
        }
    }
}

impl<E, S> Parser<'_, E, S>
where
    E: EventSource,
    S: TripleSink + ?Sized,
{
    /// Parse the value starting with `event` and emit its triples
    pub(crate) fn parse_value(
        &mut self,
        ctx: &Rc<Context>,
        link: &Link,
        event: JsonEvent,
    ) -> Result<()> {
        match event {
            JsonEvent::StartObject => self.parse_object_value(ctx, link),
            JsonEvent::StartArray => loop {
                match self.next_event("array")? {
                    JsonEvent::StartObject => self.parse_object_value(ctx, link)?,
                    JsonEvent::String(text) => self.emit_plain(link, text)?,
                    JsonEvent::EndArray => return Ok(()),
                    other => return Err(unexpected("an object or string in array", other)),
                }
            },
            JsonEvent::String(text) => self.emit_plain(link, text),
            other => Err(unexpected("an object, array or string value", other)),
        }
    }

    fn parse_object_value(&mut self, ctx: &Rc<Context>, link: &Link) -> Result<()> {
        let parsed = self.parse_node_object(ctx, false, Some(link))?;
        if parsed.linked {
            return Ok(());
        }
        // `{}` and context-only objects still denote a resource
        let object = parsed
            .term
            .unwrap_or_else(|| Term::Blank(BlankNode::fresh()));
        self.emit(link.subject.clone(), link.predicate.clone(), object)
    }

    fn emit_plain(&mut self, link: &Link, text: String) -> Result<()> {
        self.emit(
            link.subject.clone(),
            link.predicate.clone(),
            Literal::plain(text),
        )
    }
}
