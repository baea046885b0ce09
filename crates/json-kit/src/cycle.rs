//! Bookkeeping for walks that may meet a container graph with cycles.
//!
//! Containers are `Rc` handles, so a tree can hold itself. Every recursive
//! walk over the model (deep copy, deep equality, `Debug`) goes through one
//! of these helpers and stops when it reaches a container it is already in.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::value::Value;

/// Copies made so far during one `deep_clone`, keyed by source address.
/// A container reached twice maps to the same copy, so shared subtrees
/// stay shared and a cycle becomes a cycle in the copy.
pub(crate) type CloneMemo = HashMap<usize, Value>;

/// Address pairs currently being compared by one `==`.
pub(crate) type EqPath = Vec<(usize, usize)>;

thread_local! {
    static DEBUG_ACTIVE: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

struct DebugEntry;

impl Drop for DebugEntry {
    fn drop(&mut self) {
        DEBUG_ACTIVE.with(|active| {
            active.borrow_mut().pop();
        });
    }
}

/// Runs `body` unless the container at `addr` is already being formatted
/// further up, in which case `<cycle>` is written instead.
pub(crate) fn debug_container(
    addr: usize,
    f: &mut fmt::Formatter<'_>,
    body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    let entered = DEBUG_ACTIVE.with(|active| {
        let mut active = active.borrow_mut();
        if active.contains(&addr) {
            false
        } else {
            active.push(addr);
            true
        }
    });
    if !entered {
        return f.write_str("<cycle>");
    }
    let _entry = DebugEntry;
    body(f)
}
