//! Node object parsing
//!
//! A node object is read in two phases. Leading `@id` and `@context` keys come
//! first, in any order; the first other key starts the general phase, where
//! keywords and properties are dispatched one by one and triples are emitted
//! as soon as they are known.
//!
//! A single `@type` is ambiguous until the object ends: together with
//! `@value` it is the literal's datatype, otherwise it becomes an `rdf:type`
//! statement. Multiple types are always `rdf:type` statements and are
//! emitted immediately.

use std::rc::Rc;

use tracing::debug;

use crate::context::Context;
use crate::document::{unexpected, Parser};
use crate::error::{JsonLdError, Result};
use crate::event::{EventSource, JsonEvent};
use crate::sink::TripleSink;
use crate::term::{BlankNode, Iri, Literal, Subject, Term};
use crate::value::Link;
use crate::vocab::{
    KEYWORD_CONTEXT, KEYWORD_GRAPH, KEYWORD_ID, KEYWORD_LANGUAGE, KEYWORD_LIST, KEYWORD_TYPE,
    KEYWORD_VALUE, RDF_TYPE,
};

/// Result of parsing one node object
#[derive(Debug)]
pub(crate) struct ParsedNode {
    /// The resource or literal the object denotes, if it has one
    pub term: Option<Term>,
    /// Whether the triple pointing at this node was already emitted
    pub linked: bool,
}

/// State accumulated while a node object is open
#[derive(Debug, Default)]
struct PendingNode {
    node: Option<Subject>,
    ambiguous_type: Option<Subject>,
    value: Option<String>,
    language: Option<String>,
    linked: bool,
}

impl PendingNode {
    /// The node as a subject, allocating a blank node on first use
    fn subject(&mut self) -> Subject {
        self.node
            .get_or_insert_with(|| Subject::Blank(BlankNode::fresh()))
            .clone()
    }
}

impl<E, S> Parser<'_, E, S>
where
    E: EventSource,
    S: TripleSink + ?Sized,
{
    /// Parse a node object whose start event was just consumed
    pub(crate) fn parse_node_object(
        &mut self,
        outer: &Rc<Context>,
        is_root: bool,
        link: Option<&Link>,
    ) -> Result<ParsedNode> {
        self.descend()?;
        let parsed = self.parse_node_entries(outer, is_root, link)?;
        self.ascend();
        Ok(parsed)
    }

    fn parse_node_entries(
        &mut self,
        outer: &Rc<Context>,
        is_root: bool,
        link: Option<&Link>,
    ) -> Result<ParsedNode> {
        let mut ctx = Rc::clone(outer);
        let mut state = PendingNode::default();

        let mut key = match self.next_event("node object")? {
            JsonEvent::Key(key) => key,
            JsonEvent::EndObject => return Ok(empty_node(state)),
            other => return Err(unexpected("a key", other)),
        };

        while key == KEYWORD_ID || key == KEYWORD_CONTEXT {
            if key == KEYWORD_ID {
                let identifier = self.expect_string(KEYWORD_ID)?;
                state.node = Some(self.resolve_id(&ctx, &identifier)?);
            } else {
                ctx = self.parse_context(&ctx)?;
            }
            key = match self.next_event("node object")? {
                JsonEvent::Key(key) => key,
                JsonEvent::EndObject => return Ok(empty_node(state)),
                other => return Err(unexpected("a key or end of object", other)),
            };
        }

        loop {
            self.handle_key(&ctx, &mut state, &key, is_root, link)?;
            key = match self.next_event("node object")? {
                JsonEvent::Key(key) => key,
                JsonEvent::EndObject => return self.finish_node(state),
                other => return Err(unexpected("a key or end of object", other)),
            };
        }
    }

    fn handle_key(
        &mut self,
        ctx: &Rc<Context>,
        state: &mut PendingNode,
        key: &str,
        is_root: bool,
        link: Option<&Link>,
    ) -> Result<()> {
        match key {
            KEYWORD_ID => Err(JsonLdError::MisplacedKeyword(KEYWORD_ID)),
            KEYWORD_CONTEXT => Err(JsonLdError::MisplacedKeyword(KEYWORD_CONTEXT)),
            KEYWORD_TYPE => self.parse_types(ctx, state),
            KEYWORD_LANGUAGE => {
                state.language = Some(self.expect_string(KEYWORD_LANGUAGE)?);
                Ok(())
            }
            KEYWORD_VALUE => {
                state.value = Some(self.expect_string(KEYWORD_VALUE)?);
                Ok(())
            }
            KEYWORD_GRAPH => {
                if !is_root {
                    return Err(JsonLdError::GraphOutsideRoot);
                }
                self.parse_graph(ctx)
            }
            KEYWORD_LIST => {
                if state.node.is_some() {
                    return Err(JsonLdError::ListWithIdentity);
                }
                state.node = Some(self.parse_list(ctx, link)?);
                state.linked = link.is_some();
                Ok(())
            }
            _ => {
                let predicate = match self.resolve_term(ctx, key) {
                    Subject::Iri(iri) => iri,
                    Subject::Blank(_) => {
                        return Err(JsonLdError::BlankNodePredicate(key.to_string()))
                    }
                };
                let link = Link::new(state.subject(), predicate);
                let event = self.next_event("property value")?;
                self.parse_value(ctx, &link, event)
            }
        }
    }

    /// Read `@type`: a string or an array of strings
    fn parse_types(&mut self, ctx: &Context, state: &mut PendingNode) -> Result<()> {
        let mut types = Vec::new();
        match self.next_event(KEYWORD_TYPE)? {
            JsonEvent::String(value) => types.push(self.resolve_term(ctx, &value)),
            JsonEvent::StartArray => loop {
                match self.next_event(KEYWORD_TYPE)? {
                    JsonEvent::String(value) => types.push(self.resolve_term(ctx, &value)),
                    JsonEvent::EndArray => break,
                    other => {
                        return Err(JsonLdError::Unsupported(format!(
                            "@type array element {}",
                            other
                        )))
                    }
                }
            },
            other => {
                return Err(JsonLdError::Unsupported(format!("@type value {}", other)));
            }
        }

        if types.len() == 1 {
            state.ambiguous_type = types.pop();
        } else {
            for ty in types {
                let subject = state.subject();
                self.emit(subject, Iri::new(RDF_TYPE), ty)?;
            }
        }
        Ok(())
    }

    /// Read an inline `@context` and layer it on `outer`
    ///
    /// Term values resolve against `outer`, so terms of the same definition
    /// cannot refer to each other.
    fn parse_context(&mut self, outer: &Rc<Context>) -> Result<Rc<Context>> {
        match self.next_event(KEYWORD_CONTEXT)? {
            JsonEvent::StartObject => {}
            other => {
                return Err(JsonLdError::Unsupported(format!(
                    "only inline context definitions are supported, got {}",
                    other
                )))
            }
        }

        let mut scope = Context::child(outer);
        loop {
            match self.next_event(KEYWORD_CONTEXT)? {
                JsonEvent::Key(term) => match self.next_event("term definition")? {
                    JsonEvent::String(value) => {
                        let resolved = self.resolve_term(outer, &value);
                        scope.register(term, resolved);
                    }
                    JsonEvent::StartObject => {
                        return Err(JsonLdError::Unsupported(format!(
                            "expanded term definition for '{}'",
                            term
                        )))
                    }
                    other => {
                        return Err(JsonLdError::Unsupported(format!(
                            "term definition for '{}': {}",
                            term, other
                        )))
                    }
                },
                JsonEvent::EndObject => break,
                other => return Err(unexpected("a term or end of @context", other)),
            }
        }

        debug!(terms = scope.len(), "entering @context scope");
        Ok(Rc::new(scope))
    }

    /// Read the root's `@graph`: an array of node objects
    fn parse_graph(&mut self, ctx: &Rc<Context>) -> Result<()> {
        match self.next_event(KEYWORD_GRAPH)? {
            JsonEvent::StartArray => {}
            JsonEvent::StartObject => {
                return Err(JsonLdError::Unsupported(
                    "node object as value of @graph".to_string(),
                ))
            }
            other => return Err(unexpected("an array as value of @graph", other)),
        }
        loop {
            match self.next_event(KEYWORD_GRAPH)? {
                JsonEvent::StartObject => {
                    self.parse_node_object(ctx, false, None)?;
                }
                JsonEvent::EndArray => return Ok(()),
                other => return Err(unexpected("a node object in @graph", other)),
            }
        }
    }

    /// Resolve the pending state once the object has ended
    fn finish_node(&mut self, mut state: PendingNode) -> Result<ParsedNode> {
        if let Some(text) = state.value.take() {
            if state.node.is_some() {
                return Err(JsonLdError::ValueWithIdentity);
            }
            let literal = match (state.language.take(), state.ambiguous_type.take()) {
                (Some(language), _) => Literal::with_language(text, language),
                (None, Some(Subject::Iri(datatype))) => Literal::typed(text, datatype),
                (None, Some(Subject::Blank(node))) => {
                    return Err(JsonLdError::BlankNodeDatatype(node.to_string()))
                }
                (None, None) => Literal::plain(text),
            };
            return Ok(ParsedNode {
                term: Some(Term::Literal(literal)),
                linked: false,
            });
        }

        if let Some(ty) = state.ambiguous_type.take() {
            let subject = state.subject();
            self.emit(subject, Iri::new(RDF_TYPE), ty)?;
        }
        Ok(ParsedNode {
            term: state.node.map(Term::from),
            linked: state.linked,
        })
    }
}

/// An object holding at most `@id` and `@context`
fn empty_node(state: PendingNode) -> ParsedNode {
    ParsedNode {
        term: state.node.map(Term::from),
        linked: false,
    }
}
