//! Triple sinks
//!
//! The parser hands every triple to a [`TripleSink`] as soon as it is fully
//! known. Sinks are called synchronously, in emission order.

use std::collections::HashMap;
use std::io::Write;

use crate::error::Result;
use crate::term::{BlankNode, Subject, Term, Triple};

/// Receiver of parsed triples
pub trait TripleSink {
    fn add(&mut self, triple: Triple) -> Result<()>;
}

/// In-memory collection
impl TripleSink for Vec<Triple> {
    fn add(&mut self, triple: Triple) -> Result<()> {
        self.push(triple);
        Ok(())
    }
}

impl<S: TripleSink + ?Sized> TripleSink for &mut S {
    fn add(&mut self, triple: Triple) -> Result<()> {
        (**self).add(triple)
    }
}

/// Writes triples as N-Triples lines
///
/// Blank nodes get labels `_:1`, `_:2`, ... in the order this writer first
/// sees them, independent of any label used in the input document.
pub struct NTriplesWriter<W: Write> {
    writer: W,
    labels: HashMap<BlankNode, u64>,
    next_label: u64,
}

impl<W: Write> NTriplesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            labels: HashMap::new(),
            next_label: 1,
        }
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn label(&mut self, node: BlankNode) -> u64 {
        let next_label = &mut self.next_label;
        *self.labels.entry(node).or_insert_with(|| {
            let label = *next_label;
            *next_label += 1;
            label
        })
    }

    fn subject_text(&mut self, subject: &Subject) -> String {
        match subject {
            Subject::Iri(iri) => iri.to_string(),
            Subject::Blank(node) => format!("_:{}", self.label(*node)),
        }
    }

    fn object_text(&mut self, object: &Term) -> String {
        match object {
            Term::Iri(iri) => iri.to_string(),
            Term::Blank(node) => format!("_:{}", self.label(*node)),
            Term::Literal(literal) => literal.to_string(),
        }
    }
}

impl<W: Write> TripleSink for NTriplesWriter<W> {
    fn add(&mut self, triple: Triple) -> Result<()> {
        let subject = self.subject_text(&triple.subject);
        let object = self.object_text(&triple.object);
        writeln!(self.writer, "{} {} {} .", subject, triple.predicate, object)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Iri, Literal};

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut triples: Vec<Triple> = Vec::new();
        let p = Iri::new("http://p/");
        triples
            .add(Triple::new(Iri::new("http://a/"), p.clone(), Literal::plain("1")))
            .unwrap();
        triples
            .add(Triple::new(Iri::new("http://b/"), p, Literal::plain("2")))
            .unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].object, Term::Literal(Literal::plain("2")));
    }

    #[test]
    fn test_writer_labels_blank_nodes_by_first_use() {
        let p = Iri::new("http://p/");
        let x = BlankNode::fresh();
        let y = BlankNode::fresh();

        let mut writer = NTriplesWriter::new(Vec::new());
        writer.add(Triple::new(y, p.clone(), x)).unwrap();
        writer
            .add(Triple::new(x, p, Literal::with_language("hi", "en")))
            .unwrap();

        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "_:1 <http://p/> _:2 .\n_:2 <http://p/> \"hi\"@en .\n");
    }
}
