//! Host-owned page selection and the controller that keeps it in bounds.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Two-way channel to a selection value owned by the host.
///
/// The indicator never caches the value: every read goes through `get`, so
/// the host may change it at any time between events.
pub trait SelectionBinding {
    /// Current raw value, possibly out of range
    fn get(&self) -> usize;

    /// Store a new value. Only called with in-range indices.
    fn set(&mut self, index: usize);
}

/// Shared selection cell for single-threaded hosts.
///
/// Clones refer to the same value, so the host keeps one handle and gives
/// another to the indicator.
#[derive(Clone, Debug, Default)]
pub struct SharedSelection(Rc<Cell<usize>>);

impl SharedSelection {
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(Rc::new(Cell::new(index)))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }

    pub fn set(&self, index: usize) {
        self.0.set(index);
    }
}

impl SelectionBinding for SharedSelection {
    fn get(&self) -> usize {
        self.0.get()
    }

    fn set(&mut self, index: usize) {
        self.0.set(index);
    }
}

/// Binding built from a getter/setter pair
pub struct FnBinding<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> FnBinding<G, S>
where
    G: Fn() -> usize,
    S: FnMut(usize),
{
    pub fn new(getter: G, setter: S) -> Self {
        Self { getter, setter }
    }
}

impl<G, S> SelectionBinding for FnBinding<G, S>
where
    G: Fn() -> usize,
    S: FnMut(usize),
{
    fn get(&self) -> usize {
        (self.getter)()
    }

    fn set(&mut self, index: usize) {
        (self.setter)(index);
    }
}

impl<G, S> fmt::Debug for FnBinding<G, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBinding").finish_non_exhaustive()
    }
}

/// Clamp `index` into `[0, total)`. Returns 0 when there are no pages.
#[must_use]
pub fn clamp_index(index: usize, total: usize) -> usize {
    index.min(total.saturating_sub(1))
}

/// Validates and commits selection changes for a fixed page count.
///
/// Out-of-range values coming from the host are tolerated on input and
/// clamped on every read; values written back are always in range.
#[derive(Debug)]
pub struct SelectionController<B> {
    binding: B,
    total: usize,
}

impl<B: SelectionBinding> SelectionController<B> {
    pub fn new(binding: B, total: usize) -> Self {
        Self { binding, total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Committed selection, re-clamped on each read
    pub fn current(&self) -> usize {
        clamp_index(self.binding.get(), self.total)
    }

    /// Clamp and commit `index`.
    ///
    /// Returns `true` if the binding was written. Writes only happen when the
    /// clamped value differs from what the host currently holds, and never
    /// when there are no pages.
    pub fn set_selection(&mut self, index: usize) -> bool {
        if self.total == 0 {
            return false;
        }

        let clamped = clamp_index(index, self.total);
        let held = self.binding.get();
        if clamped == held {
            return false;
        }

        log::debug!("Selection {held} -> {clamped} (requested {index})");
        self.binding.set(clamped);
        true
    }

    /// Commit `from + offset`, saturating at both ends
    pub fn set_offset_from(&mut self, from: usize, offset: isize) -> bool {
        self.set_selection(from.saturating_add_signed(offset))
    }
}
