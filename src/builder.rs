//! The builder handle: insertion cursor, element construction, attribute
//! application.

use std::fmt;
use std::rc::Rc;

use rill_core::NodeId;
use rill_reactive::Notify;

use crate::app::Runtime;
use crate::props::{AttrValue, PropEntry, Props, kebab_case};
use crate::tags::is_boolean_attribute;

/// A stored child-producing procedure, shared between initial construction
/// and every later rebuild of the declaring element.
pub type BuildFn = Rc<dyn Fn(&mut Builder)>;

/// What goes inside a freshly built element.
pub enum Content {
    /// No children.
    Empty,
    /// A literal, appended as a text node (or raw markup under the `html`
    /// flag).
    Text(String),
    /// A child-producing closure, re-invoked verbatim on every rebuild of a
    /// watching element.
    Children(BuildFn),
}

impl Content {
    /// The procedure stored for rebuilds. Literal content rebuilds by
    /// re-emitting the same literal; empty content stores nothing.
    pub(crate) fn rebuild_fn(&self, raw: bool) -> Option<BuildFn> {
        match self {
            Self::Children(build) => Some(build.clone()),
            Self::Text(text) => {
                let text = text.clone();
                Some(if raw {
                    Rc::new(move |b: &mut Builder| {
                        b.raw(text.clone());
                    })
                } else {
                    Rc::new(move |b: &mut Builder| {
                        b.text(&text);
                    })
                })
            }
            Self::Empty => None,
        }
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Children(_) => f.write_str("Children(..)"),
        }
    }
}

/// Marker types disambiguating the builder's argument-shape polymorphism.
pub mod marker {
    use core::marker::PhantomData;

    /// Literal content (anything `Display`).
    #[derive(Debug)]
    pub enum TextContent {}

    /// A child-producing closure.
    #[derive(Debug)]
    pub enum NestedContent {}

    /// No content.
    #[derive(Debug)]
    pub enum EmptyContent {}

    /// Content without a property map.
    #[derive(Debug)]
    pub struct ContentOnly<M>(PhantomData<M>);

    /// A `(Props, content)` pair.
    #[derive(Debug)]
    pub struct WithProps<M>(PhantomData<M>);

    /// A bare property map, no content.
    #[derive(Debug)]
    pub enum PropsOnly {}
}

/// Conversion into [`Content`]; the marker parameter lets literals and
/// closures share one calling position.
pub trait IntoContent<M> {
    /// Performs the conversion.
    fn into_content(self) -> Content;
}

impl<T: fmt::Display> IntoContent<marker::TextContent> for T {
    fn into_content(self) -> Content {
        Content::Text(self.to_string())
    }
}

impl<F: Fn(&mut Builder) + 'static> IntoContent<marker::NestedContent> for F {
    fn into_content(self) -> Content {
        Content::Children(Rc::new(self))
    }
}

impl IntoContent<marker::EmptyContent> for () {
    fn into_content(self) -> Content {
        Content::Empty
    }
}

/// The argument-shape polymorphism of every element constructor: plain
/// content, a `(Props, content)` pair, or a bare property map.
pub trait ElementArgs<M> {
    /// Splits the arguments into a property map and content.
    fn split(self) -> (Props, Content);
}

impl<M, C: IntoContent<M>> ElementArgs<marker::ContentOnly<M>> for C {
    fn split(self) -> (Props, Content) {
        (Props::new(), self.into_content())
    }
}

impl<M, C: IntoContent<M>> ElementArgs<marker::WithProps<M>> for (Props, C) {
    fn split(self) -> (Props, Content) {
        (self.0, self.1.into_content())
    }
}

impl ElementArgs<marker::PropsOnly> for Props {
    fn split(self) -> (Props, Content) {
        (self, Content::Empty)
    }
}

/// The handle threaded through builder closures.
///
/// Carries the insertion cursor: new nodes append to `current`, and entering
/// a child-producing closure pushes the previous parent onto an explicit
/// save stack, restored when the closure returns. The restore holds at any
/// nesting depth and across helper functions that take the handle as an
/// argument.
pub struct Builder {
    runtime: Rc<Runtime>,
    current: NodeId,
    saved: Vec<NodeId>,
}

impl Builder {
    pub(crate) fn new(runtime: Rc<Runtime>, root: NodeId) -> Self {
        Self {
            runtime,
            current: root,
            saved: Vec::new(),
        }
    }

    /// The element new nodes currently attach to.
    #[must_use]
    pub const fn current(&self) -> NodeId {
        self.current
    }

    /// Builds an element with an arbitrary tag name.
    ///
    /// Accepts the same argument shapes as the tag shorthands: content only,
    /// `(Props, content)`, or a bare `Props`. Returns the element so callers
    /// can capture it for composition.
    pub fn elem<M>(&mut self, tag: &str, args: impl ElementArgs<M>) -> NodeId {
        let (props, content) = args.split();
        let (entries, watch, raw_html) = props.into_parts();

        let element = self.runtime.document_mut().create_element(tag);

        // Watch registration comes first: the stored procedure is the content
        // itself, re-invoked verbatim on every rebuild.
        if !watch.is_empty() {
            let sink: Rc<dyn Notify> = self.runtime.clone();
            let cells = watch.bind_all(&sink);
            self.runtime.document_mut().set_watched(element, cells);
            if let Some(rebuild) = content.rebuild_fn(raw_html) {
                self.runtime.store_rebuild(element, rebuild);
            }
        }

        self.apply(element, entries);
        self.runtime.document_mut().append(self.current, element);

        match content {
            Content::Children(build) => {
                self.saved.push(self.current);
                self.current = element;
                build(self);
                self.current = self.saved.pop().unwrap_or(element);
            }
            Content::Text(text) => {
                let node = if raw_html {
                    self.runtime.document_mut().create_raw(text)
                } else {
                    self.runtime.document_mut().create_text(text)
                };
                self.runtime.document_mut().append(element, node);
            }
            Content::Empty => {}
        }

        element
    }

    /// Appends a text node to the current insertion parent.
    pub fn text(&mut self, content: impl fmt::Display) -> NodeId {
        let node = self.runtime.document_mut().create_text(content.to_string());
        self.runtime.document_mut().append(self.current, node);
        node
    }

    /// Appends raw markup to the current insertion parent.
    pub fn raw(&mut self, markup: impl Into<String>) -> NodeId {
        let node = self.runtime.document_mut().create_raw(markup);
        self.runtime.document_mut().append(self.current, node);
        node
    }

    /// Applies property entries to a built element: class/style/attribute
    /// writes and listener registration. Boolean values on whitelisted names
    /// toggle bare-attribute presence; on any other name they string-coerce.
    fn apply(&mut self, element: NodeId, entries: Vec<PropEntry>) {
        for entry in entries {
            match entry {
                PropEntry::Attr(key, value) => {
                    let name = kebab_case(&key);
                    match value {
                        AttrValue::Bool(flag) if is_boolean_attribute(&name) => {
                            if flag {
                                self.runtime.document_mut().set_attribute(element, name, "");
                            }
                        }
                        other => {
                            self.runtime
                                .document_mut()
                                .set_attribute(element, name, other.to_string());
                        }
                    }
                }
                PropEntry::Style(style) => {
                    self.runtime
                        .document_mut()
                        .set_attribute(element, "style", style.to_css());
                }
                PropEntry::Listener(event, handler) => {
                    self.runtime.store_listener(element, event, handler);
                }
            }
        }
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("current", &self.current)
            .field("depth", &self.saved.len())
            .finish_non_exhaustive()
    }
}
