//! Parsed node tree: data model, queries and teardown

pub mod model;
pub mod query;
pub mod teardown;

pub use model::{Attribute, Document, Node, NodeId, ROOT_TAG};
#[cfg(feature = "serde")]
pub use model::MAX_SERIALIZE_DEPTH;
pub use query::Descendants;
pub use teardown::Teardown;
