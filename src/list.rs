//! RDF list construction for `@list`

use std::rc::Rc;

use crate::context::Context;
use crate::document::{unexpected, Parser};
use crate::error::{JsonLdError, Result};
use crate::event::{EventSource, JsonEvent};
use crate::sink::TripleSink;
use crate::term::{BlankNode, Iri, Subject};
use crate::value::Link;
use crate::vocab::{RDF_FIRST, RDF_NIL, RDF_REST};

impl<E, S> Parser<'_, E, S>
where
    E: EventSource,
    S: TripleSink + ?Sized,
{
    /// Read the array after `@list` and emit its cells in list order
    ///
    /// Returns the head cell, or `rdf:nil` for an empty list. When `link` is
    /// given, the triple pointing at the head is emitted before the cells.
    pub(crate) fn parse_list(&mut self, ctx: &Rc<Context>, link: Option<&Link>) -> Result<Subject> {
        match self.next_event("@list")? {
            JsonEvent::StartArray => {}
            other => return Err(unexpected("an array as value of @list", other)),
        }

        let first = Iri::new(RDF_FIRST);
        let rest = Iri::new(RDF_REST);
        let nil = Iri::new(RDF_NIL);
        let mut head: Option<BlankNode> = None;
        let mut tail: Option<BlankNode> = None;

        loop {
            let event = self.next_event("@list")?;
            match event {
                JsonEvent::EndArray => break,
                JsonEvent::StartArray => return Err(JsonLdError::NestedList),
                _ => {}
            }

            let cell = BlankNode::fresh();
            match tail {
                Some(previous) => self.emit(previous, rest.clone(), cell)?,
                None => {
                    head = Some(cell);
                    if let Some(link) = link {
                        self.emit(link.subject.clone(), link.predicate.clone(), cell)?;
                    }
                }
            }
            tail = Some(cell);
            self.parse_value(ctx, &Link::new(cell, first.clone()), event)?;
        }

        match tail {
            Some(last) => self.emit(last, rest, nil.clone())?,
            None => {
                if let Some(link) = link {
                    self.emit(link.subject.clone(), link.predicate.clone(), nil.clone())?;
                }
            }
        }

        Ok(match head {
            Some(cell) => Subject::Blank(cell),
            None => Subject::Iri(nil),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{parse_events, ParseOptions};
    use crate::error::JsonLdError;
    use crate::event::ValueEvents;
    use crate::term::{Iri, Literal, Term, Triple};
    use crate::vocab::{RDF_FIRST, RDF_NIL, RDF_REST};
    use serde_json::json;

    fn parse(doc: serde_json::Value) -> crate::error::Result<Vec<Triple>> {
        let mut triples = Vec::new();
        parse_events(ValueEvents::new(doc), &mut triples, &ParseOptions::default())?;
        Ok(triples)
    }

    #[test]
    fn test_list_triples_in_order() {
        let triples = parse(json!({"@id": "http://s/", "http://p/": {"@list": ["a", "b"]}})).unwrap();
        assert_eq!(triples.len(), 5);

        let l1 = triples[0].object.as_blank().unwrap();
        let l2 = triples[2].object.as_blank().unwrap();
        assert_ne!(l1, l2);

        let expected = vec![
            Triple::new(Iri::new("http://s/"), Iri::new("http://p/"), l1),
            Triple::new(l1, Iri::new(RDF_FIRST), Literal::plain("a")),
            Triple::new(l1, Iri::new(RDF_REST), l2),
            Triple::new(l2, Iri::new(RDF_FIRST), Literal::plain("b")),
            Triple::new(l2, Iri::new(RDF_REST), Iri::new(RDF_NIL)),
        ];
        assert_eq!(triples, expected);
    }

    #[test]
    fn test_empty_list_is_nil() {
        let triples = parse(json!({"@id": "http://s/", "http://p/": {"@list": []}})).unwrap();
        assert_eq!(
            triples,
            vec![Triple::new(
                Iri::new("http://s/"),
                Iri::new("http://p/"),
                Iri::new(RDF_NIL)
            )]
        );
    }

    #[test]
    fn test_list_of_node_objects() {
        let triples = parse(json!({
            "@id": "http://s/",
            "http://p/": {"@list": [{"@id": "http://a/"}]}
        }))
        .unwrap();
        let cell = triples[0].object.as_blank().unwrap();
        assert_eq!(
            triples[1],
            Triple::new(cell, Iri::new(RDF_FIRST), Iri::new("http://a/"))
        );
        assert_eq!(triples[2].object, Term::Iri(Iri::new(RDF_NIL)));
    }

    #[test]
    fn test_list_with_identity_fails() {
        let err = parse(json!({
            "@id": "http://s/",
            "http://p/": {"@id": "http://l/", "@list": ["a"]}
        }))
        .unwrap_err();
        assert!(matches!(err, JsonLdError::ListWithIdentity));
    }

    #[test]
    fn test_list_of_lists_fails() {
        let err = parse(json!({"@id": "http://s/", "http://p/": {"@list": [["a"]]}})).unwrap_err();
        assert!(matches!(err, JsonLdError::NestedList));
    }

    #[test]
    fn test_list_value_must_be_array() {
        let err = parse(json!({"@id": "http://s/", "http://p/": {"@list": "a"}})).unwrap_err();
        assert!(matches!(err, JsonLdError::UnexpectedEvent { .. }));
    }
}
