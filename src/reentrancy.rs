//! Debug-only reentrancy detection.
//!
//! The map runs user code (`K: Hash + Eq`) while its probe state is live. If
//! that user code calls back into the same map, results would be computed
//! over state mid-operation. In debug builds a nested entry panics; release
//! builds compile the check away entirely.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-map entry tracker. Guard public entry points with
/// `let _g = self.reentrancy.enter();`.
///
/// Carries a `PhantomData<*mut ()>` so any containing type is `!Send + !Sync`,
/// matching the single-threaded contract of the map.
#[derive(Debug)]
pub struct DebugReentrancy {
    #[cfg(debug_assertions)]
    entered: Cell<bool>,
    _single_thread: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            entered: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Marks the map as entered until the returned guard drops. Panics in
    /// debug builds if the map is already entered.
    #[inline]
    pub fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.entered.get(),
                "reentrancy detected: map re-entered from key Hash/Eq code"
            );
            self.entered.set(true);
            return ReentrancyGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ReentrancyGuard { _z: PhantomData };
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`DebugReentrancy::enter`].
pub struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl<'a> Drop for ReentrancyGuard<'a> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.entered.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::DebugReentrancy;

    #[test]
    fn sequential_entries_are_ok() {
        let r = DebugReentrancy::new();
        {
            let _g = r.enter();
        }
        let _g = r.enter();
    }

    #[cfg(debug_assertions)]
    #[test]
    fn nested_entry_panics_in_debug() {
        let r = DebugReentrancy::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g1 = r.enter();
            let _g2 = r.enter();
        }));
        assert!(res.is_err(), "expected nested entry to panic");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn nested_entry_is_noop_in_release() {
        let r = DebugReentrancy::new();
        let _g1 = r.enter();
        let _g2 = r.enter();
    }
}
