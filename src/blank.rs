//! Blank node label table
//!
//! Maps document-local labels (`_:x`) to blank node identities for the
//! lifetime of a single parse.

use std::collections::HashMap;

use crate::term::BlankNode;

#[derive(Debug, Default)]
pub struct BlankNodeTable {
    nodes: HashMap<String, BlankNode>,
}

impl BlankNodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the blank node for a label, allocating it on first use
    pub fn get_or_create(&mut self, label: &str) -> BlankNode {
        if let Some(node) = self.nodes.get(label) {
            return *node;
        }
        let node = BlankNode::fresh();
        self.nodes.insert(label.to_string(), node);
        node
    }

    /// Number of distinct labels seen so far
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
