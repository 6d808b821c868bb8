//! Per-thread record of which high-level operation is in flight.
//!
//! A composite operation such as `select_value` is built from lower-level ones
//! (`select_one`, `select_all`, then the raw select). Each layer asks to run
//! under its own entry point, but only the outermost request takes effect, so
//! the statement that finally reaches the execution log is tagged with the
//! operation the caller actually invoked.

use std::cell::Cell;
use std::marker::PhantomData;

use crate::statement::EntryPoint;

thread_local! {
    static CURRENT: Cell<Option<EntryPoint>> = const { Cell::new(None) };
}

/// The entry point active on the calling thread.
pub fn current() -> Option<EntryPoint> {
    CURRENT.with(Cell::get)
}

/// Runs `body` under `entry_point` unless an outer operation already set one.
pub fn with_entry_point<R>(entry_point: EntryPoint, body: impl FnOnce() -> R) -> R {
    let _guard = EntryPointGuard::enter(entry_point);
    body()
}

/// Restores the slot when dropped, including during unwinding.
///
/// The guard is `!Send`: it must be dropped on the thread whose slot it set.
#[must_use]
pub struct EntryPointGuard {
    previous: Option<Option<EntryPoint>>,
    _not_send: PhantomData<*const ()>,
}

impl EntryPointGuard {
    pub fn enter(entry_point: EntryPoint) -> Self {
        let previous = CURRENT.with(|slot| match slot.get() {
            Some(_) => None,
            None => {
                slot.set(Some(entry_point));
                Some(None)
            }
        });
        EntryPointGuard {
            previous,
            _not_send: PhantomData,
        }
    }

    /// Whether this guard set the slot, as opposed to inheriting an outer tag.
    pub fn is_outermost(&self) -> bool {
        self.previous.is_some()
    }
}

impl Drop for EntryPointGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            CURRENT.with(|slot| slot.set(previous));
        }
    }
}
