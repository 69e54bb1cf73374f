// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::node::Inode;

/// Hands out inode numbers in strictly increasing order.
///
/// The first value issued is `Inode::ROOT`. A value is never issued twice,
/// including values that belonged to deleted nodes.
#[derive(Debug, Clone)]
pub struct InodeAllocator {
    next: Inode,
}

impl InodeAllocator {
    pub fn new() -> Self {
        Self { next: Inode::ROOT }
    }

    /// Issue the next inode number and advance the counter.
    ///
    /// Returns `None`, consuming nothing, once the range is exhausted.
    /// `u64::MAX` itself is never issued.
    pub fn next_inode(&mut self) -> Option<Inode> {
        let issued = self.next;
        self.next = issued.successor()?;
        Some(issued)
    }

    /// The value `next_inode` would return, without consuming it.
    pub fn peek(&self) -> Inode {
        self.next
    }

    /// Continue strictly above `last`. Never moves the counter backwards.
    ///
    /// Returns the new next value, or `None` (leaving the counter as it
    /// was) when nothing remains above `last`.
    pub fn resume_after(&mut self, last: Inode) -> Option<Inode> {
        if last >= self.next {
            self.next = last.successor()?;
        }
        Some(self.next)
    }

    /// Whether another inode can still be issued.
    pub fn has_room(&self) -> bool {
        self.next.successor().is_some()
    }
}

impl Default for InodeAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_root() {
        let mut alloc = InodeAllocator::new();
        assert_eq!(alloc.peek(), Inode::ROOT);
        assert_eq!(alloc.next_inode(), Some(Inode::ROOT));
        assert_eq!(alloc.next_inode(), Some(Inode::new(2)));
        assert_eq!(alloc.peek(), Inode::new(3));
    }

    #[test]
    fn test_strictly_increasing() {
        let mut alloc = InodeAllocator::new();
        let issued: Vec<_> = (0..100).filter_map(|_| alloc.next_inode()).collect();
        assert_eq!(issued.len(), 100);
        assert!(issued.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_resume_after_never_goes_backwards() {
        let mut alloc = InodeAllocator::new();
        assert_eq!(alloc.resume_after(Inode::new(41)), Some(Inode::new(42)));
        assert_eq!(alloc.next_inode(), Some(Inode::new(42)));

        assert_eq!(alloc.resume_after(Inode::new(10)), Some(Inode::new(43)));
        assert_eq!(alloc.next_inode(), Some(Inode::new(43)));
    }

    #[test]
    fn test_top_of_range() {
        let mut alloc = InodeAllocator::new();
        assert_eq!(alloc.resume_after(Inode::new(u64::MAX)), None);
        assert_eq!(alloc.peek(), Inode::ROOT);

        let top = Inode::new(u64::MAX);
        assert_eq!(alloc.resume_after(Inode::new(u64::MAX - 2)), Some(Inode::new(u64::MAX - 1)));
        assert!(alloc.has_room());
        assert_eq!(alloc.next_inode(), Some(Inode::new(u64::MAX - 1)));
        assert!(!alloc.has_room());
        assert_eq!(alloc.next_inode(), None);
        assert_eq!(alloc.peek(), top);
    }
}
