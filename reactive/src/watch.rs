//! Watch declarations: the set of cells an element depends on.

use std::fmt;
use std::rc::Rc;

use crate::cell::{CellId, Notify};
use crate::state::State;

/// A type-erased handle to a state cell usable in a watch declaration.
pub trait WatchTarget {
    /// Binds the cell to `sink` and returns its identity token.
    fn bind(&self, sink: &Rc<dyn Notify>) -> CellId;
}

impl<T: 'static> WatchTarget for State<T> {
    fn bind(&self, sink: &Rc<dyn Notify>) -> CellId {
        State::bind(self, sink)
    }
}

/// The normalized watch declaration carried by a builder property map.
///
/// Holds erased handles to one or more cells, possibly of mixed value types.
/// The set is fixed at element construction: a rebuilt subtree re-declares
/// its own nested watches, but the declaring element's set never mutates.
#[derive(Clone, Default)]
pub struct Watch {
    targets: Vec<Rc<dyn WatchTarget>>,
}

impl Watch {
    /// Creates an empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell to the declaration.
    #[must_use]
    pub fn with<T: 'static>(mut self, cell: &State<T>) -> Self {
        self.targets.push(Rc::new(cell.clone()));
        self
    }

    /// Folds another declaration into this one.
    pub fn extend(&mut self, other: Self) {
        self.targets.extend(other.targets);
    }

    /// Returns `true` when no cells are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of declared cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Binds every declared cell to `sink`, assigning identities lazily, and
    /// returns the identity set.
    #[must_use]
    pub fn bind_all(&self, sink: &Rc<dyn Notify>) -> Vec<CellId> {
        self.targets
            .iter()
            .map(|target| target.bind(sink))
            .collect()
    }
}

impl fmt::Debug for Watch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watch").field("len", &self.len()).finish()
    }
}

impl<T: 'static> From<&State<T>> for Watch {
    fn from(cell: &State<T>) -> Self {
        Self::new().with(cell)
    }
}

impl<A: 'static, B: 'static> From<(&State<A>, &State<B>)> for Watch {
    fn from((a, b): (&State<A>, &State<B>)) -> Self {
        Self::new().with(a).with(b)
    }
}

impl<A: 'static, B: 'static, C: 'static> From<(&State<A>, &State<B>, &State<C>)> for Watch {
    fn from((a, b, c): (&State<A>, &State<B>, &State<C>)) -> Self {
        Self::new().with(a).with(b).with(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Sink(RefCell<Vec<CellId>>);

    impl Notify for Sink {
        fn cell_changed(&self, cell: CellId) {
            self.0.borrow_mut().push(cell);
        }
    }

    #[test]
    fn bind_all_assigns_distinct_identities() {
        let a = State::new(1);
        let b = State::new("x".to_string());
        let watch = Watch::from((&a, &b));

        let sink: Rc<dyn Notify> = Rc::new(Sink(RefCell::new(Vec::new())));
        let ids = watch.bind_all(&sink);
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(a.id(), Some(ids[0]));
        assert_eq!(b.id(), Some(ids[1]));
    }

    #[test]
    fn rebinding_keeps_identities() {
        let a = State::new(1);
        let watch = Watch::from(&a);

        let sink: Rc<dyn Notify> = Rc::new(Sink(RefCell::new(Vec::new())));
        let first = watch.bind_all(&sink);
        let second = watch.bind_all(&sink);
        assert_eq!(first, second);
    }
}
