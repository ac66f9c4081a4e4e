//! The arena-backed node tree.

use rill_reactive::CellId;

/// Identifier for a node stored inside a [`Document`].
///
/// Plain index into the document arena. Never reused: detaching a node leaves
/// a tombstone entry behind, so a stale `NodeId` can never alias a node
/// created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a [`NodeId`] from the raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index backing this identifier.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Payload of an element node.
#[derive(Debug, Default, Clone)]
pub struct ElementData {
    tag: String,
    /// Attribute pairs in insertion order, for deterministic serialization.
    attributes: Vec<(String, String)>,
    /// Identities of the state cells this element watches. Fixed at
    /// construction time; survives child teardown during a rebuild.
    watched: Vec<CellId>,
}

impl ElementData {
    /// The element's tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The attribute pairs in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

/// Payload stored for every node in the tree.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// An element with tag, attributes and watch markers.
    Element(ElementData),
    /// A text node; serialized with escaping.
    Text(String),
    /// Markup emitted verbatim (the builder's `html` flag).
    Raw(String),
    /// A reclaimed arena slot. The id stays burned so stale handles never
    /// alias a later node, but the payload and child links are gone.
    Tombstone,
}

#[derive(Debug)]
struct NodeEntry {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

impl NodeEntry {
    fn new(data: NodeData, parent: Option<NodeId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            data,
        }
    }
}

/// Arena storing the node tree.
///
/// The document itself is the only state store: there is no retained scene
/// graph beside it, and the reactive layer's watch relationships are read
/// back out of the attached nodes on every notification.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeEntry>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document whose root is a `<body>` element.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root("body")
    }

    /// Creates a document rooted at an element with the given tag.
    #[must_use]
    pub fn with_root(tag: impl Into<String>) -> Self {
        let root = NodeEntry::new(
            NodeData::Element(ElementData {
                tag: tag.into(),
                ..ElementData::default()
            }),
            None,
        );
        Self {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    /// Returns the root element.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of nodes ever allocated, tombstones included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena holds no nodes. Never true in practice
    /// since the root is allocated at construction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of entries still holding a payload, tombstones excluded.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.nodes
            .iter()
            .filter(|entry| !matches!(entry.data, NodeData::Tombstone))
            .count()
    }

    /// Allocates a detached element node.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeData::Element(ElementData {
            tag: tag.into(),
            ..ElementData::default()
        }))
    }

    /// Allocates a detached text node.
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(content.into()))
    }

    /// Allocates a detached raw-markup node.
    pub fn create_raw(&mut self, markup: impl Into<String>) -> NodeId {
        self.push(NodeData::Raw(markup.into()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeEntry::new(data, None));
        id
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// # Panics
    ///
    /// Panics when `parent` is `child` or sits inside `child`'s subtree. Such
    /// an append would turn the parent chain into a cycle and every traversal
    /// over it would diverge.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            !self.in_subtree_of(parent, child),
            "append would create a parent cycle: {parent:?} is inside {child:?}"
        );
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Walks `id`'s ancestor chain looking for `ancestor`, `id` included.
    fn in_subtree_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Detaches `id` from its parent, leaving its own subtree intact.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()]
                .children
                .retain(|&child| child != id);
        }
    }

    /// Detaches every child of `parent`. The detached subtrees keep their
    /// internal structure and watch markers but become invisible to live
    /// queries.
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.index()].children);
        for child in children {
            self.nodes[child.index()].parent = None;
        }
    }

    /// Detaches every child of `parent` and reclaims the detached subtrees:
    /// each of their entries becomes a tombstone with its payload and child
    /// links dropped. Returns the reclaimed ids so callers can drop any
    /// bookkeeping keyed on them.
    ///
    /// This is the teardown half of a rebuild. Without it the arena would
    /// retain every replaced subtree for the lifetime of the document.
    #[must_use]
    pub fn remove_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let children = std::mem::take(&mut self.nodes[parent.index()].children);
        let mut removed = Vec::new();
        for child in children {
            self.nodes[child.index()].parent = None;
            removed.extend(self.descendants(child));
        }
        for &id in &removed {
            let entry = &mut self.nodes[id.index()];
            entry.parent = None;
            entry.children = Vec::new();
            entry.data = NodeData::Tombstone;
        }
        removed
    }

    /// Returns the children of `id` in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map_or(&[], |entry| entry.children.as_slice())
    }

    /// Returns the parent of `id`, if attached to one.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|entry| entry.parent)
    }

    /// Returns `true` when `id` is reachable from the document root.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Returns the payload of `id`.
    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()].data
    }

    /// Returns the element payload of `id`, or `None` for text and raw nodes.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id.index()].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[id.index()].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Sets an attribute, replacing any previous value for the same name.
    /// Ignored on non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let Some(element) = self.element_mut(id) else {
            return;
        };
        let name = name.into();
        let value = value.into();
        if let Some(slot) = element
            .attributes
            .iter_mut()
            .find(|(existing, _)| *existing == name)
        {
            slot.1 = value;
        } else {
            element.attributes.push((name, value));
        }
    }

    /// Removes an attribute if present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(element) = self.element_mut(id) {
            element.attributes.retain(|(existing, _)| existing != name);
        }
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` when the attribute is present, whatever its value.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Stores the watched cell identities on an element. Set once, at
    /// construction; a rebuild tears down children but never touches the
    /// container's own markers.
    pub fn set_watched(&mut self, id: NodeId, cells: Vec<CellId>) {
        if let Some(element) = self.element_mut(id) {
            element.watched = cells;
        }
    }

    /// Returns the watched cell identities of `id`.
    #[must_use]
    pub fn watched(&self, id: NodeId) -> &[CellId] {
        self.element(id).map_or(&[], |element| &element.watched)
    }

    /// Scans every attached element whose watch set contains `cell`.
    ///
    /// Computed on demand, O(total nodes); detached watchers are invisible
    /// and never returned. UI trees are small enough that the scan beats
    /// maintaining a reverse index plus its invalidation.
    #[must_use]
    pub fn live_watchers(&self, cell: CellId) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId::new)
            .filter(|&id| {
                self.watched(id).contains(&cell) && self.is_attached(id)
            })
            .collect()
    }

    /// Resolves a simple selector (`#id`, `.class`, or a tag name) to the
    /// first matching attached element in document order.
    #[must_use]
    pub fn select(&self, selector: &str) -> Option<NodeId> {
        if selector.is_empty() {
            return None;
        }
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.matches(id, selector))
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        if let Some(wanted) = selector.strip_prefix('#') {
            self.attribute(id, "id") == Some(wanted)
        } else if let Some(wanted) = selector.strip_prefix('.') {
            self.attribute(id, "class")
                .is_some_and(|classes| classes.split_whitespace().any(|class| class == wanted))
        } else {
            element.tag == selector
        }
    }

    /// Returns `id` and every node below it, in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Concatenated content of every text node under `id` (raw markup
    /// excluded), in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let NodeData::Text(text) = self.data(node) {
                out.push_str(text);
            }
        }
        out
    }
}
