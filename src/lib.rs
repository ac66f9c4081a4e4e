//! `rill` — a minimal reactive tree-construction library.
//!
//! A caller describes a tree of elements with a nested-closure builder
//! syntax, attaches [`State`] cells to subtrees via watch declarations, and
//! exactly the subtrees depending on a changed cell rebuild in place. There
//! is no virtual tree and no diff: the document itself is the only state
//! store, and "who watches this cell" is read back out of the attached nodes
//! on every notification.
//!
//! ```
//! use rill::{App, Props, State};
//!
//! let count = State::new(0);
//! let app = App::new();
//!
//! // Seed an anchor, the way a host page would.
//! {
//!     let mut doc = app.document_mut();
//!     let anchor = doc.create_element("div");
//!     doc.set_attribute(anchor, "id", "app");
//!     let root = doc.root();
//!     doc.append(root, anchor);
//! }
//!
//! let c = count.clone();
//! app.mount("#app", move |b| {
//!     let c = c.clone();
//!     b.div((Props::new().watch(&c), move |b: &mut rill::Builder| {
//!         b.text(format!("Count: {}", c.get()));
//!     }));
//! })
//! .unwrap();
//!
//! count.update(|n| n + 1);
//! assert_eq!(app.document().select("div").map(|d| app.document().text_content(d)), Some("Count: 1".into()));
//! ```
//!
//! The companion [`render_static`] runs the same builder closures outside any
//! app and produces an escaped HTML string, ignoring watches and listeners.

mod app;
mod builder;
mod error;
mod event;
mod props;
mod static_render;
mod tags;

pub use app::{App, AppBuilder};
pub use builder::{BuildFn, Builder, Content, ElementArgs, IntoContent, marker};
pub use error::Error;
pub use event::Event;
pub use props::{AttrValue, Props, Style, kebab_case};
pub use rill_core::{Document, ElementData, NodeData, NodeId};
pub use rill_reactive::{CellId, Notify, State, Watch};
pub use static_render::render_static;
pub use tags::is_boolean_attribute;
