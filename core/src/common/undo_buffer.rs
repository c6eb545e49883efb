// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::RingBuffer;

pub const DEFAULT_UNDO_CAPACITY: usize = 10;

/// # Undo/Redo Algorithm
///
/// The `UndoBuffer` keeps a bounded history of snapshots in a [`RingBuffer`], whose read
/// cursor points to the snapshot that matches the live state.
///
/// ## Adding a snapshot ([`UndoBuffer::add`])
///
/// 1. The snapshot is written right after the cursor, and the cursor moves onto it.
/// 2. Any snapshots that were after the cursor (ie, the ones that could have been redone)
///    are dropped.
/// 3. When the buffer is full, the oldest snapshot is overwritten and can no longer be
///    reached.
///
/// ## Undoing ([`UndoBuffer::prev`])
///
/// Moves the cursor back by one and returns that snapshot, or `None` if the cursor is
/// already on the oldest retained snapshot.
///
/// ## Redoing ([`UndoBuffer::next`])
///
/// Moves the cursor forward by one and returns that snapshot, or `None` if the cursor is
/// already on the newest snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct UndoBuffer<T> {
    versions: RingBuffer<T>,
}

impl<T> Default for UndoBuffer<T> {
    fn default() -> Self { Self::new(DEFAULT_UNDO_CAPACITY) }
}

impl<T> UndoBuffer<T> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            versions: RingBuffer::new(capacity),
        }
    }

    pub fn add(&mut self, snapshot: T) { self.versions.add_at_current_position(snapshot); }

    /// The snapshot under the cursor, ie the one that matches the live state.
    #[must_use]
    pub fn cur(&self) -> Option<&T> { self.versions.cur() }

    pub fn clear(&mut self) { self.versions.clear(); }

    #[must_use]
    pub fn len(&self) -> usize { self.versions.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.versions.is_empty() }

    #[must_use]
    pub fn capacity(&self) -> usize { self.versions.capacity() }

    /// How many times [`UndoBuffer::prev`] can succeed from here.
    #[must_use]
    pub fn undo_depth(&self) -> usize { self.versions.cursor_offset().unwrap_or(0) }
}

impl<T: Clone> UndoBuffer<T> {
    /// This is the underlying function that enables undo.
    pub fn prev(&mut self) -> Option<T> { self.versions.prev().cloned() }

    /// This is the underlying function that enables redo.
    pub fn next(&mut self) -> Option<T> { self.versions.next().cloned() }

    /// The snapshots from the cursor back to the oldest one, most recent first. Redo
    /// entries are not included.
    #[must_use]
    pub fn history_newest_first(&self) -> Vec<T> {
        let mut acc: Vec<T> = self.versions.iter_to_cursor().cloned().collect();
        acc.reverse();
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_undo_redo_walk() {
        let mut buffer: UndoBuffer<Vec<i32>> = UndoBuffer::default();
        buffer.add(vec![]);
        buffer.add(vec![1]);
        buffer.add(vec![1, 2]);
        assert_eq2!(buffer.cur(), Some(&vec![1, 2]));
        assert_eq2!(buffer.undo_depth(), 2);

        assert_eq2!(buffer.prev(), Some(vec![1]));
        assert_eq2!(buffer.prev(), Some(vec![]));
        assert_eq2!(buffer.prev(), None);
        assert_eq2!(buffer.cur(), Some(&vec![]));

        assert_eq2!(buffer.next(), Some(vec![1]));
        assert_eq2!(buffer.next(), Some(vec![1, 2]));
        assert_eq2!(buffer.next(), None);
    }

    #[test]
    fn test_empty_buffer_has_nothing_to_undo_or_redo() {
        let mut buffer: UndoBuffer<i32> = UndoBuffer::new(4);
        assert!(buffer.is_empty());
        assert_eq2!(buffer.prev(), None);
        assert_eq2!(buffer.next(), None);
        assert_eq2!(buffer.cur(), None);
        assert_eq2!(buffer.undo_depth(), 0);
    }

    #[test]
    fn test_add_after_undo_drops_redo_entries() {
        let mut buffer: UndoBuffer<i32> = UndoBuffer::new(5);
        buffer.add(1);
        buffer.add(2);
        buffer.add(3);
        assert_eq2!(buffer.prev(), Some(2));
        buffer.add(20);
        assert_eq2!(buffer.next(), None);
        assert_eq2!(buffer.len(), 3);
        assert_eq2!(buffer.prev(), Some(2));
        assert_eq2!(buffer.next(), Some(20));
    }

    #[test]
    fn test_exceeding_capacity_loses_oldest() {
        let mut buffer: UndoBuffer<i32> = UndoBuffer::default();
        for it in 1..=11 {
            buffer.add(it);
        }
        assert_eq2!(buffer.len(), DEFAULT_UNDO_CAPACITY);

        let mut undone = vec![];
        while let Some(it) = buffer.prev() {
            undone.push(it);
        }
        assert_eq2!(undone, vec![10, 9, 8, 7, 6, 5, 4, 3, 2]);
        assert_eq2!(buffer.cur(), Some(&2));
    }

    #[test]
    fn test_history_newest_first_skips_redo_entries() {
        let mut buffer: UndoBuffer<i32> = UndoBuffer::new(4);
        buffer.add(1);
        buffer.add(2);
        buffer.add(3);
        let _unused = buffer.prev();
        assert_eq2!(buffer.history_newest_first(), vec![2, 1]);
    }

    #[test]
    fn test_clear() {
        let mut buffer: UndoBuffer<i32> = UndoBuffer::new(4);
        buffer.add(1);
        buffer.add(2);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq2!(buffer.prev(), None);
        assert_eq2!(buffer.capacity(), 4);
    }
}
