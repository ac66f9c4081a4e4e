//! Document tree for the `rill` builder.
//!
//! The tree lives in an arena: a [`Document`] owns a flat vector of node
//! entries addressed by [`NodeId`]. Ids are never reused within a document's
//! lifetime, so side tables held by upper layers (rebuild procedures, event
//! listeners) can tolerate stale entries — a detached node simply stops being
//! reachable from the root and drops out of every live query.
//!
//! Elements carry their watched cell identities directly, mirroring the
//! marker-on-node registry the reactive renderer scans. "Who watches cell X"
//! is computed on demand over attached elements; there is no reverse index
//! and therefore no cleanup pass when ordinary tree mutation removes nodes.

mod document;
mod serialize;

pub use document::{Document, ElementData, NodeData, NodeId};
pub use serialize::{escape_attr, escape_text, is_void_element};
