//! The reactive renderer: mount, watch-registry scan, rebuild-in-place.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use rill_core::{Document, NodeId};
use rill_reactive::{CellId, Notify};
use tracing::{trace, warn};

use crate::builder::{BuildFn, Builder};
use crate::error::Error;
use crate::event::Event;
use crate::props::Handler;

/// Shared render state: the document plus the side tables keyed by node id.
///
/// Node ids are never reused, so stale entries for detached nodes are
/// harmless; every lookup is gated on the node still being attached.
pub(crate) struct Runtime {
    this: Weak<Runtime>,
    document: RefCell<Document>,
    rebuilds: RefCell<HashMap<NodeId, BuildFn>>,
    listeners: RefCell<HashMap<(NodeId, String), Handler>>,
}

impl Runtime {
    pub(crate) fn new(document: Document) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            document: RefCell::new(document),
            rebuilds: RefCell::new(HashMap::new()),
            listeners: RefCell::new(HashMap::new()),
        })
    }

    /// Borrows the document. Released before any user closure runs.
    pub(crate) fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    pub(crate) fn document_mut(&self) -> RefMut<'_, Document> {
        self.document.borrow_mut()
    }

    pub(crate) fn store_rebuild(&self, node: NodeId, build: BuildFn) {
        self.rebuilds.borrow_mut().insert(node, build);
    }

    pub(crate) fn store_listener(&self, node: NodeId, event: String, handler: Handler) {
        self.listeners.borrow_mut().insert((node, event), handler);
    }

    fn listener(&self, node: NodeId, event: &str) -> Option<Handler> {
        self.listeners
            .borrow()
            .get(&(node, event.to_string()))
            .cloned()
    }

    /// Tears down the element's children and re-invokes its stored procedure
    /// against a fresh cursor rooted at the element. The element itself and
    /// its watch markers survive; nested watch declarations re-register as
    /// the procedure re-enters the builder pipeline. The torn-down subtrees
    /// become tombstones and their side-table entries are dropped, so a
    /// rebuild never grows the retained set.
    ///
    /// Not panic-safe: if the procedure panics mid-way the element is left
    /// already cleared but only partially repopulated. No rollback is
    /// attempted.
    fn rebuild(&self, node: NodeId) {
        let Some(build) = self.rebuilds.borrow().get(&node).cloned() else {
            return;
        };
        let Some(runtime) = self.this.upgrade() else {
            return;
        };
        let removed = self.document_mut().remove_children(node);
        self.prune(&removed);
        let mut builder = Builder::new(runtime, node);
        build(&mut builder);
    }

    /// Drops side-table entries for reclaimed nodes. Rebuild closures pin
    /// their captured state handles, so leaving them behind would keep every
    /// replaced subtree's captures alive.
    fn prune(&self, removed: &[NodeId]) {
        if removed.is_empty() {
            return;
        }
        let mut rebuilds = self.rebuilds.borrow_mut();
        for id in removed {
            rebuilds.remove(id);
        }
        drop(rebuilds);
        self.listeners
            .borrow_mut()
            .retain(|(node, _), _| !removed.contains(node));
    }
}

impl Notify for Runtime {
    /// The notification fan-out: scan the attached elements watching `cell`,
    /// then rebuild each in place, fully and synchronously.
    ///
    /// The watcher list is snapshotted up front, so elements registered by a
    /// rebuild inside this pass are not visited again; the cell's value is
    /// stable until the next `set`, so they render current anyway. Elements
    /// detached by an earlier rebuild in the same pass are skipped.
    fn cell_changed(&self, cell: CellId) {
        let watchers = self.document().live_watchers(cell);
        trace!(?cell, watchers = watchers.len(), "state cell changed");
        for node in watchers {
            if self.document().is_attached(node) {
                self.rebuild(node);
            }
        }
    }
}

/// Configuration for an [`App`].
#[derive(Debug, Default)]
#[must_use]
pub struct AppBuilder {
    document: Option<Document>,
    root_tag: Option<String>,
}

impl AppBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a pre-populated document to render into.
    pub fn document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Tag for the root element of a fresh document. Defaults to `body`.
    /// Ignored when a document is supplied.
    pub fn root_tag(mut self, tag: impl Into<String>) -> Self {
        self.root_tag = Some(tag.into());
        self
    }

    /// Finalizes the builder.
    #[must_use]
    pub fn build(self) -> App {
        let document = self.document.unwrap_or_else(|| {
            self.root_tag
                .map_or_else(Document::new, Document::with_root)
        });
        App {
            runtime: Runtime::new(document),
        }
    }
}

/// Entry point: owns the document and drives builders against it.
///
/// Single-threaded and synchronous throughout; a [`rill_reactive::State::set`]
/// runs its full notification fan-out, nested rebuilds included, before
/// returning to its caller.
pub struct App {
    runtime: Rc<Runtime>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an app over a fresh document.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns an [`AppBuilder`].
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Resolves the anchor selector, tears down the anchor's previous
    /// children, and runs the builder once with the cursor seeded at the
    /// anchor.
    ///
    /// Not panic-safe: a panic inside `build` leaves the anchor already
    /// cleared but only partially repopulated. The document is not rolled
    /// back.
    ///
    /// # Errors
    ///
    /// [`Error::AnchorNotFound`] when the selector matches nothing;
    /// [`Error::InvalidSelector`] for an empty selector. Either way nothing
    /// has been mounted.
    pub fn mount(&self, anchor: &str, build: impl FnOnce(&mut Builder)) -> Result<NodeId, Error> {
        if anchor.is_empty() {
            return Err(Error::InvalidSelector(anchor.to_string()));
        }
        let target = self
            .runtime
            .document()
            .select(anchor)
            .ok_or_else(|| Error::AnchorNotFound(anchor.to_string()))?;
        let removed = self.runtime.document_mut().remove_children(target);
        self.runtime.prune(&removed);
        let mut builder = Builder::new(self.runtime.clone(), target);
        build(&mut builder);
        Ok(target)
    }

    /// Fires the listener bound on `target` for `event`, if the node is
    /// attached and a listener exists. Returns whether a listener ran.
    ///
    /// Handlers may mutate state cells; each resulting fan-out completes
    /// fully, by ordinary call-stack nesting, before `dispatch` returns.
    pub fn dispatch(&self, target: NodeId, event: &str) -> bool {
        if !self.runtime.document().is_attached(target) {
            warn!(?target, event, "dispatch on a detached node");
            return false;
        }
        if let Some(handler) = self.runtime.listener(target, event) {
            handler(&Event {
                target,
                name: event.to_string(),
            });
            true
        } else {
            trace!(?target, event, "no listener bound");
            false
        }
    }

    /// Borrows the document for inspection.
    #[must_use]
    pub fn document(&self) -> Ref<'_, Document> {
        self.runtime.document()
    }

    /// Borrows the document mutably, e.g. to seed anchor elements before
    /// mounting.
    #[must_use]
    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.runtime.document_mut()
    }

    /// Serializes the whole document.
    #[must_use]
    pub fn html(&self) -> String {
        self.runtime.document().html()
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("nodes", &self.runtime.document().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::Props;
    use rill_reactive::State;

    fn app_with_anchor() -> App {
        let app = App::new();
        {
            let mut doc = app.document_mut();
            let anchor = doc.create_element("div");
            doc.set_attribute(anchor, "id", "app");
            let root = doc.root();
            doc.append(root, anchor);
        }
        app
    }

    #[test]
    fn rebuilds_drop_side_table_entries_for_replaced_nodes() {
        let cell = State::new(0);
        let app = app_with_anchor();

        // Each rebuild re-registers a nested watched span and a listener;
        // the entries for the torn-down predecessors must go away.
        let c = cell.clone();
        app.mount("#app", move |b| {
            let c = c.clone();
            b.div((Props::new().watch(&c), move |b: &mut Builder| {
                let c = c.clone();
                b.span((Props::new().watch(&c), move |b: &mut Builder| {
                    b.text(c.get());
                }));
                b.button(Props::new().on("click", |_event| {}));
            }));
        })
        .unwrap();

        let rebuilds_before = app.runtime.rebuilds.borrow().len();
        let listeners_before = app.runtime.listeners.borrow().len();
        for n in 1..=50 {
            cell.set(n);
        }
        assert_eq!(app.runtime.rebuilds.borrow().len(), rebuilds_before);
        assert_eq!(app.runtime.listeners.borrow().len(), listeners_before);
    }

    #[test]
    fn remount_drops_entries_for_the_previous_tree() {
        let app = app_with_anchor();
        app.mount("#app", |b| {
            b.button(Props::new().on("click", |_event| {}));
        })
        .unwrap();
        app.mount("#app", |b| {
            b.p("replaced");
        })
        .unwrap();

        assert!(app.runtime.listeners.borrow().is_empty());
    }
}
