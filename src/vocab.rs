//! Vocabulary definitions
//!
//! Fixed RDF IRIs used when building triples and the JSON-LD keywords the
//! node object parser dispatches on.

/// RDF namespace
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// `rdf:type`, the predicate of type statements
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `rdf:first`, the head of a list cell
pub const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

/// `rdf:rest`, the tail of a list cell
pub const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

/// `rdf:nil`, the empty list
pub const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

/// Prefix marking a blank node label
pub const BLANK_NODE_PREFIX: &str = "_:";

pub const KEYWORD_ID: &str = "@id";
pub const KEYWORD_CONTEXT: &str = "@context";
pub const KEYWORD_TYPE: &str = "@type";
pub const KEYWORD_VALUE: &str = "@value";
pub const KEYWORD_LANGUAGE: &str = "@language";
pub const KEYWORD_GRAPH: &str = "@graph";
pub const KEYWORD_LIST: &str = "@list";

/// Check if a string is a blank node label
pub fn is_blank_label(s: &str) -> bool {
    s.starts_with(BLANK_NODE_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_terms_share_namespace() {
        for iri in [RDF_TYPE, RDF_FIRST, RDF_REST, RDF_NIL] {
            assert!(iri.starts_with(RDF_NS));
        }
    }

    #[test]
    fn test_is_blank_label() {
        assert!(is_blank_label("_:b0"));
        assert!(!is_blank_label("ex:b0"));
        assert!(!is_blank_label("_b0"));
    }
}
