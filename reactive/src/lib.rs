//! Reactive state cells for the `rill` builder.
//!
//! A [`State`] holds a value together with a change comparator. Elements built
//! by the `rill` crate declare which cells they depend on; when a cell's value
//! changes, the renderer rebuilds exactly those subtrees, synchronously, on
//! the same call stack.
//!
//! The crate deliberately knows nothing about documents or rendering. The
//! only seam is the [`Notify`] trait: whoever wants to hear about changes
//! installs itself as the cell's sink via [`State::bind`] and receives the
//! cell's [`CellId`] whenever an effective mutation occurs.

mod cell;
mod state;
mod watch;

pub use cell::{CellId, Notify};
pub use state::State;
pub use watch::{Watch, WatchTarget};
