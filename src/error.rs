//! Error types for JSON-LD parsing

use thiserror::Error;

/// Broad class of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The lexical event did not match the expected JSON-LD construct
    Structural,
    /// Well-formed JSON violating a JSON-LD constraint this parser understands
    Semantic,
    /// Bad parse options, such as a malformed base IRI
    Configuration,
    /// Reading the input or writing the output failed
    Io,
}

#[derive(Error, Debug)]
pub enum JsonLdError {
    #[error("Expected {expected}, got {found}")]
    UnexpectedEvent {
        expected: &'static str,
        found: String,
    },

    #[error("Unexpected end of JSON data while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("Document should start with an object, got {0}")]
    DocumentNotObject(String),

    #[error("'{0}' must precede all other keys of a node object")]
    MisplacedKeyword(&'static str),

    #[error("Blank node '{0}' cannot be used in predicate position")]
    BlankNodePredicate(String),

    #[error("Blank node '{0}' cannot be used as a literal datatype")]
    BlankNodeDatatype(String),

    #[error("@value combined with incompatible key")]
    ValueWithIdentity,

    #[error("@list is not allowed on a node object that already has an identity")]
    ListWithIdentity,

    #[error("Lists of lists are not supported")]
    NestedList,

    #[error("Currently @graph is only supported in the root object")]
    GraphOutsideRoot,

    #[error("Not supported: {0}")]
    Unsupported(String),

    #[error("Nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("Invalid base IRI '{base}': {reason}")]
    InvalidBase { base: String, reason: String },

    #[error("Cannot resolve '{reference}' against base '{base}': {reason}")]
    InvalidReference {
        reference: String,
        base: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON syntax error: {0}")]
    Syntax(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JsonLdError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            JsonLdError::UnexpectedEvent { .. }
            | JsonLdError::UnexpectedEof(_)
            | JsonLdError::DocumentNotObject(_)
            | JsonLdError::MisplacedKeyword(_)
            | JsonLdError::NestingTooDeep(_)
            | JsonLdError::Syntax(_)
            | JsonLdError::Json(_) => ErrorKind::Structural,
            JsonLdError::BlankNodePredicate(_)
            | JsonLdError::BlankNodeDatatype(_)
            | JsonLdError::ValueWithIdentity
            | JsonLdError::ListWithIdentity
            | JsonLdError::NestedList
            | JsonLdError::GraphOutsideRoot
            | JsonLdError::Unsupported(_)
            | JsonLdError::InvalidReference { .. } => ErrorKind::Semantic,
            JsonLdError::InvalidBase { .. } => ErrorKind::Configuration,
            JsonLdError::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, JsonLdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(JsonLdError::GraphOutsideRoot.kind(), ErrorKind::Semantic);
        assert_eq!(
            JsonLdError::UnexpectedEof("array").kind(),
            ErrorKind::Structural
        );
        assert_eq!(
            JsonLdError::InvalidBase {
                base: "nope".to_string(),
                reason: "relative URL without a base".to_string(),
            }
            .kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_display() {
        let err = JsonLdError::UnexpectedEvent {
            expected: "a string",
            found: "number 5".to_string(),
        };
        assert_eq!(err.to_string(), "Expected a string, got number 5");
    }
}
