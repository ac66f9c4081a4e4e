//! The reactive value holder.

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::cell::{CellId, Notify};

type Compare<T> = Box<dyn Fn(&T, &T) -> bool>;

struct Inner<T> {
    value: RefCell<T>,
    compare: Compare<T>,
    debug: Cell<bool>,
    id: Cell<Option<CellId>>,
    sink: RefCell<Option<Weak<dyn Notify>>>,
}

/// A shared reactive value holder.
///
/// `State<T>` is a cheaply clonable handle (`Rc` inside) to a single value.
/// Reading is side-effect free; writing runs the change comparator and, when
/// it reports a difference, replaces the value and synchronously notifies the
/// installed [`Notify`] sink. There is no deferral, batching or scheduling:
/// by the time [`State::set`] returns, every dependent subtree has been
/// rebuilt.
///
/// A rebuild handler that unconditionally mutates the cell it watches will
/// recurse until the call stack is exhausted; no cycle guard exists.
pub struct State<T>(Rc<Inner<T>>);

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("value", &self.0.value.borrow())
            .field("id", &self.0.id.get())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + fmt::Debug + 'static> State<T> {
    /// Creates a cell with the default comparator (`PartialEq`).
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_compare(initial, T::eq)
    }
}

impl<T: Clone + fmt::Debug + 'static> State<T> {
    /// Creates a cell with a custom change comparator.
    ///
    /// The comparator receives `(current, candidate)` and returns `true` when
    /// the two are to be considered equal, i.e. when a plain `set` should not
    /// notify. A comparator that panics propagates to the `set` caller.
    #[must_use]
    pub fn with_compare(initial: T, compare: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(initial),
            compare: Box::new(compare),
            debug: Cell::new(false),
            id: Cell::new(None),
            sink: RefCell::new(None),
        }))
    }

    /// Enables or disables the old→new mutation trace on this cell.
    #[must_use]
    pub fn debug(self, enabled: bool) -> Self {
        self.0.debug.set(enabled);
        self
    }

    /// Returns a clone of the current value. No side effects.
    #[must_use]
    pub fn get(&self) -> T {
        self.0.value.borrow().clone()
    }

    /// Replaces the value if the comparator reports a change, then notifies.
    pub fn set(&self, value: T) {
        self.write(value, false);
    }

    /// Replaces the value and notifies regardless of the comparator.
    pub fn set_forced(&self, value: T) {
        self.write(value, true);
    }

    /// Applies `f` to the current value, then behaves like [`State::set`].
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        self.write(f(self.get()), false);
    }

    /// Applies `f` to the current value, then behaves like [`State::set_forced`].
    pub fn update_forced(&self, f: impl FnOnce(T) -> T) {
        self.write(f(self.get()), true);
    }

    fn write(&self, value: T, force: bool) {
        let unchanged = {
            let current = self.0.value.borrow();
            (self.0.compare)(&current, &value)
        };
        if unchanged && !force {
            return;
        }
        if self.0.debug.get() {
            let old = self.0.value.borrow();
            debug!(cell = ?self.0.id.get(), ?old, new = ?value, "state cell set");
        }
        *self.0.value.borrow_mut() = value;

        // Borrows must be released before the sink runs: rebuild handlers may
        // read this very cell.
        let sink = self.0.sink.borrow().clone();
        if let (Some(sink), Some(id)) = (sink.and_then(|weak| weak.upgrade()), self.0.id.get()) {
            sink.cell_changed(id);
        }
    }
}

impl<T: 'static> State<T> {
    /// Registers `sink` as this cell's notification target, assigning the
    /// identity token on first use, and returns the identity.
    ///
    /// Called by the builder when the cell appears in a watch declaration.
    /// Re-binding replaces the previous sink.
    pub fn bind(&self, sink: &Rc<dyn Notify>) -> CellId {
        let id = self.0.id.get().unwrap_or_else(|| {
            let id = CellId::next();
            self.0.id.set(Some(id));
            id
        });
        *self.0.sink.borrow_mut() = Some(Rc::downgrade(sink));
        id
    }

    /// Returns the identity token, if one has been assigned yet.
    #[must_use]
    pub fn id(&self) -> Option<CellId> {
        self.0.id.get()
    }
}
