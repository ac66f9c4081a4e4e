//! Events delivered to listeners bound via [`crate::Props::on`].

use rill_core::NodeId;

/// An event delivered to a listener.
///
/// The target element is passed explicitly; handlers needing the element
/// inspect `target` rather than relying on any implicit receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The element the listener was bound to.
    pub target: NodeId,
    /// The event name the listener was bound under.
    pub name: String,
}
