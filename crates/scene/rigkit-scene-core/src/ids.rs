//! Identifiers for host scene objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a live host node. Handles are never reused, so a handle
/// to a deleted node stays stale forever.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeHandle(pub u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for NodeHandle.
#[derive(Default, Debug)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> NodeHandle {
        let id = NodeHandle(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = HandleAllocator::new();
        assert_eq!(alloc.alloc(), NodeHandle(0));
        assert_eq!(alloc.alloc(), NodeHandle(1));
        assert_eq!(NodeHandle(7).to_string(), "#7");
    }
}
