//! Read-only lookups over a parsed tree
//!
//! Every lookup returns at most one node. A miss is `None`, never an error.

use crate::tree::model::{Document, Node, NodeId};

/// Tag match rule shared by [`Node::find_tag`] and [`Node::find_by_path`]
fn tag_matches(tag: &str, name: &str, exact: bool) -> bool {
    if exact {
        tag == name
    } else {
        tag.contains(name)
    }
}

impl<'a> Node<'a> {
    /// The `index`-th direct child, or `None` when `index >= child_count()`
    pub fn child_at(&self, index: usize) -> Option<Node<'a>> {
        self.child_ids()
            .get(index)
            .and_then(|&id| self.document().get(id))
    }

    /// First node in pre-order, starting with `self`, whose tag matches `name`.
    ///
    /// With `exact` the tag must equal `name`; otherwise it only has to
    /// contain it.
    pub fn find_tag(&self, name: &str, exact: bool) -> Option<Node<'a>> {
        self.descendants()
            .find(|node| tag_matches(node.tag(), name, exact))
    }

    /// Walk `path` one `/`-separated segment at a time, taking the first
    /// direct child that matches each segment. No backtracking: if the first
    /// match at some level leads nowhere, the lookup fails.
    pub fn find_by_path(&self, path: &str, exact: bool) -> Option<Node<'a>> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(*self, |current, segment| {
                current
                    .children()
                    .find(|child| tag_matches(child.tag(), segment, exact))
            })
    }

    /// Value of the first attribute whose key equals `key`
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|attr| attr.key() == key)
            .map(|attr| attr.value())
    }

    /// Pre-order traversal of this node and everything below it
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            doc: self.document(),
            stack: vec![self.id()],
        }
    }
}

impl Document {
    /// [`Node::child_at`] on the synthetic root
    pub fn child_at(&self, index: usize) -> Option<Node<'_>> {
        self.root().child_at(index)
    }

    /// [`Node::find_tag`] from the synthetic root
    pub fn find_tag(&self, name: &str, exact: bool) -> Option<Node<'_>> {
        self.root().find_tag(name, exact)
    }

    /// [`Node::find_by_path`] from the synthetic root
    pub fn find_by_path(&self, path: &str, exact: bool) -> Option<Node<'_>> {
        self.root().find_by_path(path, exact)
    }
}

/// Pre-order iterator over a subtree, driven by an explicit stack
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.doc.get(self.stack.pop()?)?;
        self.stack.extend(node.child_ids().iter().rev());
        Some(node)
    }
}
