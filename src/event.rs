//! Lexical JSON events
//!
//! The parser consumes JSON as a forward-only sequence of [`JsonEvent`]s
//! pulled one at a time from an [`EventSource`]. Any tokenizer can feed it by
//! implementing that trait. [`ReaderEvents`] tokenizes bytes incrementally and
//! backs the reader-based entry points; [`ValueEvents`] walks a `serde_json`
//! value that is already in memory.

use std::fmt;
use std::io::Read;

use json_event_parser::{FromReadJsonReader, JsonEvent as LexEvent, JsonParseError};
use serde_json::Value;

use crate::error::{JsonLdError, Result};

/// One lexical JSON event
#[derive(Debug, Clone, PartialEq)]
pub enum JsonEvent {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key(String),
    String(String),
    /// Lexical form of a number
    Number(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for JsonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonEvent::StartObject => f.write_str("start of object"),
            JsonEvent::EndObject => f.write_str("end of object"),
            JsonEvent::StartArray => f.write_str("start of array"),
            JsonEvent::EndArray => f.write_str("end of array"),
            JsonEvent::Key(key) => write!(f, "key {:?}", key),
            JsonEvent::String(s) => write!(f, "string {:?}", s),
            JsonEvent::Number(n) => write!(f, "number {}", n),
            JsonEvent::Boolean(b) => write!(f, "boolean {}", b),
            JsonEvent::Null => f.write_str("null"),
        }
    }
}

/// A pull source of lexical events
pub trait EventSource {
    /// Next event, or `None` once the input is exhausted
    fn next_event(&mut self) -> Result<Option<JsonEvent>>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Result<Option<JsonEvent>> {
        (**self).next_event()
    }
}

/// Hand-built event streams
impl EventSource for std::vec::IntoIter<JsonEvent> {
    fn next_event(&mut self) -> Result<Option<JsonEvent>> {
        Ok(self.next())
    }
}

/// Events tokenized on demand from a byte reader
///
/// Only the stack of open containers is kept, so memory does not grow with
/// the document. Keys are reported as they appear, duplicates included, and a
/// syntax error surfaces only when the tokenizer reaches it.
pub struct ReaderEvents<R: Read> {
    reader: FromReadJsonReader<R>,
}

impl<R: Read> ReaderEvents<R> {
    pub fn new(read: R) -> Self {
        Self {
            reader: FromReadJsonReader::new(read),
        }
    }
}

impl<R: Read> EventSource for ReaderEvents<R> {
    fn next_event(&mut self) -> Result<Option<JsonEvent>> {
        let event = match self.reader.read_next_event() {
            Ok(event) => event,
            Err(JsonParseError::Io(e)) => return Err(JsonLdError::Io(e)),
            Err(JsonParseError::Syntax(e)) => return Err(JsonLdError::Syntax(e.to_string())),
        };
        Ok(Some(match event {
            LexEvent::StartObject => JsonEvent::StartObject,
            LexEvent::EndObject => JsonEvent::EndObject,
            LexEvent::StartArray => JsonEvent::StartArray,
            LexEvent::EndArray => JsonEvent::EndArray,
            LexEvent::ObjectKey(key) => JsonEvent::Key(key.into_owned()),
            LexEvent::String(s) => JsonEvent::String(s.into_owned()),
            LexEvent::Number(n) => JsonEvent::Number(n.into_owned()),
            LexEvent::Boolean(b) => JsonEvent::Boolean(b),
            LexEvent::Null => JsonEvent::Null,
            LexEvent::Eof => return Ok(None),
        }))
    }
}

enum Frame {
    Object(serde_json::map::IntoIter),
    Array(std::vec::IntoIter<Value>),
}

enum Step {
    Open(Value),
    Emit(JsonEvent),
    Close(JsonEvent),
    Done,
}

/// Events produced by walking a JSON value already held in memory
///
/// Object keys come out in map order, so a `serde_json::Map` built from text
/// has already merged duplicate keys.
pub struct ValueEvents {
    pending: Option<Value>,
    stack: Vec<Frame>,
}

impl ValueEvents {
    pub fn new(value: Value) -> Self {
        Self {
            pending: Some(value),
            stack: Vec::new(),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Ok(Self::new(value))
    }

    fn open(&mut self, value: Value) -> JsonEvent {
        match value {
            Value::Object(map) => {
                self.stack.push(Frame::Object(map.into_iter()));
                JsonEvent::StartObject
            }
            Value::Array(items) => {
                self.stack.push(Frame::Array(items.into_iter()));
                JsonEvent::StartArray
            }
            Value::String(s) => JsonEvent::String(s),
            Value::Number(n) => JsonEvent::Number(n.to_string()),
            Value::Bool(b) => JsonEvent::Boolean(b),
            Value::Null => JsonEvent::Null,
        }
    }
}

impl EventSource for ValueEvents {
    fn next_event(&mut self) -> Result<Option<JsonEvent>> {
        if let Some(value) = self.pending.take() {
            return Ok(Some(self.open(value)));
        }
        let step = match self.stack.last_mut() {
            None => Step::Done,
            Some(Frame::Object(entries)) => match entries.next() {
                Some((key, value)) => {
                    self.pending = Some(value);
                    Step::Emit(JsonEvent::Key(key))
                }
                None => Step::Close(JsonEvent::EndObject),
            },
            Some(Frame::Array(items)) => match items.next() {
                Some(value) => Step::Open(value),
                None => Step::Close(JsonEvent::EndArray),
            },
        };
        Ok(match step {
            Step::Open(value) => Some(self.open(value)),
            Step::Emit(event) => Some(event),
            Step::Close(event) => {
                self.stack.pop();
                Some(event)
            }
            Step::Done => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect(mut events: ValueEvents) -> Vec<JsonEvent> {
        let mut out = Vec::new();
        while let Some(event) = events.next_event().unwrap() {
            out.push(event);
        }
        out
    }

    #[test]
    fn test_object_keys_in_document_order() {
        let events = ValueEvents::from_slice(br#"{"@type": "T", "@id": "x", "a": [1, true, null]}"#)
            .unwrap();
        assert_eq!(
            collect(events),
            vec![
                JsonEvent::StartObject,
                JsonEvent::Key("@type".to_string()),
                JsonEvent::String("T".to_string()),
                JsonEvent::Key("@id".to_string()),
                JsonEvent::String("x".to_string()),
                JsonEvent::Key("a".to_string()),
                JsonEvent::StartArray,
                JsonEvent::Number("1".to_string()),
                JsonEvent::Boolean(true),
                JsonEvent::Null,
                JsonEvent::EndArray,
                JsonEvent::EndObject,
            ]
        );
    }

    #[test]
    fn test_nested_empty_containers() {
        let events = ValueEvents::new(json!([{}, []]));
        assert_eq!(
            collect(events),
            vec![
                JsonEvent::StartArray,
                JsonEvent::StartObject,
                JsonEvent::EndObject,
                JsonEvent::StartArray,
                JsonEvent::EndArray,
                JsonEvent::EndArray,
            ]
        );
    }

    #[test]
    fn test_scalar_document() {
        let events = ValueEvents::new(json!("x"));
        assert_eq!(collect(events), vec![JsonEvent::String("x".to_string())]);
    }

    #[test]
    fn test_malformed_json() {
        assert!(ValueEvents::from_slice(b"{\"a\": ").is_err());
    }

    fn read_all(bytes: &[u8]) -> (Vec<JsonEvent>, Result<()>) {
        let mut events = ReaderEvents::new(bytes);
        let mut out = Vec::new();
        loop {
            match events.next_event() {
                Ok(Some(event)) => out.push(event),
                Ok(None) => return (out, Ok(())),
                Err(e) => return (out, Err(e)),
            }
        }
    }

    #[test]
    fn test_reader_keeps_duplicate_keys() {
        let (events, result) = read_all(br#"{"a": "1", "a": 2.50}"#);
        result.unwrap();
        assert_eq!(
            events,
            vec![
                JsonEvent::StartObject,
                JsonEvent::Key("a".to_string()),
                JsonEvent::String("1".to_string()),
                JsonEvent::Key("a".to_string()),
                JsonEvent::Number("2.50".to_string()),
                JsonEvent::EndObject,
            ]
        );
    }

    #[test]
    fn test_reader_yields_events_before_syntax_error() {
        let (events, result) = read_all(br#"{"a": ["x", tru"#);
        assert_eq!(
            events,
            vec![
                JsonEvent::StartObject,
                JsonEvent::Key("a".to_string()),
                JsonEvent::StartArray,
                JsonEvent::String("x".to_string()),
            ]
        );
        assert!(matches!(result, Err(JsonLdError::Syntax(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(JsonEvent::Key("a".to_string()).to_string(), "key \"a\"");
        assert_eq!(JsonEvent::StartArray.to_string(), "start of array");
    }
}
