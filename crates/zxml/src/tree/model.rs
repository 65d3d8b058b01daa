//! Node and attribute data model
//!
//! Nodes live in an arena owned by [`Document`]. Children and parent links are
//! [`NodeId`] indices into that arena, so the parent link never owns anything
//! and the tree stays a strict ownership hierarchy rooted at the document.

use std::fmt;

use crate::list::GrowList;

/// Tag of the synthetic node that roots every parsed document
pub const ROOT_TAG: &str = "ROOT";

/// Index of a node inside its [`Document`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The synthetic document root is always the first node allocated
    pub const ROOT: Self = Self(0);

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A `key="value"` pair in document order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub(crate) key: String,
    pub(crate) value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub(crate) tag: String,
    pub(crate) text: Option<String>,
    pub(crate) attributes: GrowList<Attribute>,
    pub(crate) children: GrowList<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl NodeData {
    fn new(tag: String, parent: Option<NodeId>) -> Self {
        Self {
            tag,
            text: None,
            attributes: GrowList::new(),
            children: GrowList::new(),
            parent,
        }
    }
}

/// A parsed document: the synthetic root and every element below it.
///
/// The document owns all nodes. Borrow [`Node`] handles from it with
/// [`Document::root`] to navigate and query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
}

impl Document {
    /// A document holding only the synthetic root
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(ROOT_TAG.to_string(), None)],
        }
    }

    #[allow(clippy::indexing_slicing)]
    pub fn root(&self) -> Node<'_> {
        Node {
            doc: self,
            id: NodeId::ROOT,
            // `new` allocates the root, so the arena is never empty
            data: &self.nodes[NodeId::ROOT.index()],
        }
    }

    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        self.nodes.get(id.index()).map(|data| Node {
            doc: self,
            id,
            data,
        })
    }

    /// Number of nodes, including the synthetic root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate an element as the last child of `parent`.
    ///
    /// An element with children carries no text, so the parent's text is
    /// dropped when it gains its first child.
    pub(crate) fn append_child(&mut self, parent: NodeId, tag: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(tag, Some(parent)));
        if let Some(data) = self.nodes.get_mut(parent.index()) {
            data.text = None;
            data.children.push(id);
        }
        id
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.index())
    }

    pub(crate) fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }
}

/// Borrowed handle to one node of a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
    data: &'a NodeData,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn tag(&self) -> &'a str {
        &self.data.tag
    }

    /// Trimmed inner text, if the element had a direct text run and no children
    pub fn text(&self) -> Option<&'a str> {
        self.data.text.as_deref()
    }

    pub fn attributes(&self) -> &'a GrowList<Attribute> {
        &self.data.attributes
    }

    pub fn child_count(&self) -> usize {
        self.data.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.data.children.is_empty()
    }

    /// Direct children in document order
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let doc = self.doc;
        let ids = &self.data.children;
        ids.iter().filter_map(move |&id| doc.get(id))
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.data.parent.and_then(|id| self.doc.get(id))
    }

    pub fn is_root(&self) -> bool {
        self.data.parent.is_none()
    }

    pub(crate) fn child_ids(&self) -> &'a GrowList<NodeId> {
        &self.data.children
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("tag", &self.data.tag)
            .field("text", &self.data.text)
            .field("attributes", &self.data.attributes.len())
            .field("children", &self.data.children.len())
            .finish()
    }
}

/// Deepest nesting, counted from the node being serialized, that
/// [`Node`]'s `Serialize` impl will write before failing.
///
/// Serializers recurse once per level, so this caps stack use for trees
/// parsed with a raised or unlimited depth.
#[cfg(feature = "serde")]
pub const MAX_SERIALIZE_DEPTH: usize = 256;

#[cfg(feature = "serde")]
impl serde::Serialize for Node<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Subtree {
            node: *self,
            depth: 0,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
struct Subtree<'a> {
    node: Node<'a>,
    depth: usize,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Subtree<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error as _, SerializeStruct};

        struct Attrs<'a>(&'a GrowList<Attribute>);

        impl serde::Serialize for Attrs<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_seq(self.0.iter().map(|a| (a.key(), a.value())))
            }
        }

        struct Children<'a>(&'a Subtree<'a>);

        impl serde::Serialize for Children<'_> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let depth = self.0.depth + 1;
                serializer.collect_seq(
                    self.0
                        .node
                        .children()
                        .map(|node| Subtree { node, depth }),
                )
            }
        }

        if self.depth > MAX_SERIALIZE_DEPTH {
            return Err(S::Error::custom(format_args!(
                "max depth exceeded: {MAX_SERIALIZE_DEPTH}"
            )));
        }

        let node = self.node;
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("tag", node.tag())?;
        if let Some(text) = node.text() {
            state.serialize_field("text", text)?;
        } else {
            state.skip_field("text")?;
        }
        state.serialize_field("attributes", &Attrs(node.attributes()))?;
        state.serialize_field("children", &Children(self))?;
        state.end()
    }
}
