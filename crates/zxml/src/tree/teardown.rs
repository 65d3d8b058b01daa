//! Whole-tree destruction

use tracing::debug;

use crate::tree::model::{Document, NodeData, NodeId};

/// What a teardown released
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Teardown {
    pub nodes: usize,
    pub attributes: usize,
    /// Tags, texts, attribute keys and attribute values
    pub strings: usize,
}

impl Teardown {
    fn release(&mut self, node: NodeData) {
        let NodeData {
            tag,
            text,
            attributes,
            children,
            parent: _,
        } = node;

        if let Some(text) = text {
            drop(text);
            self.strings += 1;
        }
        for attr in attributes.into_vec() {
            drop(attr.key);
            drop(attr.value);
            self.strings += 2;
            self.attributes += 1;
        }
        // every child was released before its parent came off the stack
        drop(children);
        drop(tag);
        self.strings += 1;
        self.nodes += 1;
    }
}

impl Document {
    /// Destroy the tree bottom-up, children before the list that held them.
    ///
    /// Walks child links only; parent links are never followed.
    pub fn destroy(self) -> Teardown {
        let mut slots: Vec<Option<NodeData>> = self.nodes.into_iter().map(Some).collect();
        let mut stats = Teardown::default();
        let mut stack = vec![(NodeId::ROOT, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                if let Some(node) = slots.get_mut(id.index()).and_then(Option::take) {
                    stats.release(node);
                }
                continue;
            }
            let Some(Some(node)) = slots.get(id.index()) else {
                continue;
            };
            stack.push((id, true));
            stack.extend(node.children.iter().rev().map(|&child| (child, false)));
        }

        debug!(
            nodes = stats.nodes,
            attributes = stats.attributes,
            strings = stats.strings,
            "document destroyed"
        );
        stats
    }
}

/// Destroy `doc` if there is one; `None` is a no-op
pub fn destroy(doc: Option<Document>) -> Teardown {
    doc.map(Document::destroy).unwrap_or_default()
}
