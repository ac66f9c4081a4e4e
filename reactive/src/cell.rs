//! Cell identities and the notification seam.

use core::sync::atomic::{AtomicU64, Ordering};

/// Opaque identity token for a state cell.
///
/// Assigned at most once per cell, lazily, the first time the cell is used as
/// a watch dependency, and stable for the cell's lifetime. Identities are only
/// ever compared for membership; they carry no ordering or content semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(u64);

impl CellId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Sink notified when a bound cell's value changes.
///
/// Implemented by the renderer runtime. Cells hold the sink weakly, so a
/// dropped runtime silently deactivates notification rather than keeping the
/// whole document alive.
pub trait Notify {
    /// Called synchronously after the cell's value has been replaced.
    fn cell_changed(&self, cell: CellId);
}
