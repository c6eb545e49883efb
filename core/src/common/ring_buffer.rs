// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// A fixed-capacity ring buffer with a read cursor that is independent of where items
/// are written.
///
/// The buffer keeps a *window* of valid slots, tracked by `begin` (the oldest valid slot)
/// and `count` (how many slots are valid). All index arithmetic wraps modulo the
/// capacity, which is fixed at construction and never resized.
///
/// There are two ways of filling it:
///
/// 1. Cursor based ([`Self::add_at_current_position`]). The new item lands right after
///    the read cursor, and everything that used to follow the cursor is discarded. This
///    is what an undo / redo history needs: adding after an undo drops the redo entries.
/// 2. Edge based ([`Self::append_to_end`] and [`Self::prepend_to_beginning`]). The
///    window grows at one edge until it is full, and then slides, dropping the item at
///    the opposite edge. This is what a scrolling plot sample cache needs.
///
/// Reading is done with [`Self::reset`] followed by repeated calls to [`Self::next`],
/// or by walking back with [`Self::prev`]. The stored type can itself be an [Option]
/// (eg: a plot sample that is undefined), in which case the caller has to tell apart
/// "no more items" (`None`) from "the item is absent" (`Some(&None)`).
///
/// # Examples
///
/// ```
/// use rpncalc_core::RingBuffer;
///
/// let mut ring_buffer: RingBuffer<Option<f64>> = RingBuffer::new(3);
///
/// ring_buffer.append_to_end(Some(1.0));
/// ring_buffer.append_to_end(None);
/// ring_buffer.append_to_end(Some(3.0));
/// ring_buffer.append_to_end(Some(4.0));
///
/// ring_buffer.reset();
/// assert_eq!(ring_buffer.next(), Some(&None));
/// assert_eq!(ring_buffer.next(), Some(&Some(3.0)));
/// assert_eq!(ring_buffer.next(), Some(&Some(4.0)));
/// assert_eq!(ring_buffer.next(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RingBuffer<T> {
    internal_storage: Vec<Option<T>>,
    begin: usize,
    count: usize,
    read: Option<usize>,
    reset_state: bool,
}

mod constructor {
    use super::RingBuffer;

    impl<T> RingBuffer<T> {
        /// A capacity of 0 is treated as 1.
        #[must_use]
        pub fn new(capacity: usize) -> Self {
            let capacity = capacity.max(1);
            Self {
                internal_storage: (0..capacity).map(|_| None).collect(),
                begin: 0,
                count: 0,
                read: None,
                reset_state: false,
            }
        }
    }
}

mod index_math {
    use super::RingBuffer;

    impl<T> RingBuffer<T> {
        pub(super) fn inc(&self, index: usize) -> usize { (index + 1) % self.capacity() }

        pub(super) fn dec(&self, index: usize) -> usize {
            (index + self.capacity() - 1) % self.capacity()
        }

        /// Physical slot of the newest valid item. Only meaningful when not empty.
        pub(super) fn end(&self) -> usize {
            (self.begin + self.count - 1) % self.capacity()
        }

        /// Distance from `begin` to the given physical slot.
        pub(super) fn offset_of(&self, index: usize) -> usize {
            (index + self.capacity() - self.begin) % self.capacity()
        }
    }
}

mod mutator {
    use super::RingBuffer;

    impl<T> RingBuffer<T> {
        /// Write `item` right after the read cursor, and move the read cursor onto it.
        /// Anything that used to come after the cursor is dropped. If the cursor has
        /// never been positioned, the item is appended after the newest one.
        pub fn add_at_current_position(&mut self, item: T) {
            let keep = match (self.read, self.reset_state) {
                (Some(read), false) if self.count > 0 => self.offset_of(read) + 1,
                (Some(_), true) => 0,
                _ => self.count,
            };

            // Clear the slots that are no longer part of the window.
            for offset in keep..self.count {
                let index = (self.begin + offset) % self.capacity();
                self.internal_storage[index] = None;
            }

            if keep == self.capacity() {
                // Full, and the cursor is on the newest item. Drop the oldest.
                self.begin = self.inc(self.begin);
                self.count = self.capacity();
            } else {
                self.count = keep + 1;
            }

            let write = self.end();
            self.internal_storage[write] = Some(item);
            self.read = Some(write);
            self.reset_state = false;
        }

        /// Grow the window by one slot past its end, and write there. When the window is
        /// already full, it slides, and the oldest item is dropped.
        pub fn append_to_end(&mut self, item: T) {
            if self.count == self.capacity() {
                self.begin = self.inc(self.begin);
            } else {
                self.count += 1;
            }
            let write = self.end();
            self.internal_storage[write] = Some(item);
        }

        /// Grow the window by one slot before its beginning, and write there. When the
        /// window is already full, it slides, and the newest item is dropped.
        pub fn prepend_to_beginning(&mut self, item: T) {
            self.begin = self.dec(self.begin);
            if self.count < self.capacity() {
                self.count += 1;
            }
            let write = self.begin;
            self.internal_storage[write] = Some(item);
        }

        /// Erase all items, and forget both the window and the read cursor. The capacity
        /// does not change.
        pub fn clear(&mut self) {
            self.internal_storage.iter_mut().for_each(|slot| *slot = None);
            self.begin = 0;
            self.count = 0;
            self.read = None;
            self.reset_state = false;
        }
    }
}

mod cursor {
    use super::RingBuffer;

    impl<T> RingBuffer<T> {
        /// Park the read cursor just before the oldest item, so that the next call to
        /// [`Self::next`] yields it. Does nothing if nothing has been written.
        pub fn reset(&mut self) {
            if self.count == 0 {
                return;
            }
            self.read = Some(self.dec(self.begin));
            self.reset_state = true;
        }

        /// Move the read cursor forward by one and return that item. Returns `None` once
        /// the newest item has been passed.
        pub fn next(&mut self) -> Option<&T> {
            if self.count == 0 {
                return None;
            }

            let next_read = match (self.read, self.reset_state) {
                (None, _) | (Some(_), true) => self.begin,
                (Some(read), false) => {
                    if self.offset_of(read) + 1 >= self.count {
                        return None;
                    }
                    self.inc(read)
                }
            };

            self.read = Some(next_read);
            self.reset_state = false;
            self.internal_storage[next_read].as_ref()
        }

        /// Move the read cursor back by one and return that item. Returns `None`, and
        /// leaves the cursor where it is, if the cursor is already on the oldest item or
        /// has not been positioned.
        pub fn prev(&mut self) -> Option<&T> {
            let read = match (self.read, self.reset_state) {
                (Some(read), false) if self.count > 0 => read,
                _ => return None,
            };

            if self.offset_of(read) == 0 {
                return None;
            }

            let prev_read = self.dec(read);
            self.read = Some(prev_read);
            self.internal_storage[prev_read].as_ref()
        }

        /// The item under the read cursor, without moving it.
        #[must_use]
        pub fn cur(&self) -> Option<&T> {
            match (self.read, self.reset_state) {
                (Some(read), false) if self.count > 0 => {
                    self.internal_storage[read].as_ref()
                }
                _ => None,
            }
        }

        /// How far the read cursor is from the oldest item. `None` when the cursor is not
        /// on an item.
        #[must_use]
        pub fn cursor_offset(&self) -> Option<usize> {
            match (self.read, self.reset_state) {
                (Some(read), false) if self.count > 0 => Some(self.offset_of(read)),
                _ => None,
            }
        }
    }
}

mod size {
    use super::RingBuffer;

    impl<T> RingBuffer<T> {
        #[must_use]
        pub fn len(&self) -> usize { self.count }

        #[must_use]
        pub fn capacity(&self) -> usize { self.internal_storage.len() }

        #[must_use]
        pub fn is_empty(&self) -> bool { self.count == 0 }

        #[must_use]
        pub fn is_full(&self) -> bool { self.count == self.capacity() }
    }
}

mod iterator {
    use super::RingBuffer;

    /// Walks the valid window from the oldest item to the newest. Does not touch the read
    /// cursor of the [`RingBuffer`].
    #[derive(Debug)]
    pub struct RingBufferIterator<'a, T> {
        ring_buffer: &'a RingBuffer<T>,
        iterator_index: usize,
        limit: usize,
    }

    impl<'a, T> Iterator for RingBufferIterator<'a, T> {
        type Item = &'a T;

        fn next(&mut self) -> Option<Self::Item> {
            if self.iterator_index >= self.limit {
                return None;
            }

            let actual_index = (self.ring_buffer.begin + self.iterator_index)
                % self.ring_buffer.capacity();
            self.iterator_index += 1;

            self.ring_buffer.internal_storage[actual_index].as_ref()
        }
    }

    impl<T> RingBuffer<T> {
        #[must_use]
        pub fn iter(&self) -> RingBufferIterator<'_, T> {
            RingBufferIterator {
                ring_buffer: self,
                iterator_index: 0,
                limit: self.count,
            }
        }

        /// Like [`Self::iter`], but stops at the item under the read cursor (inclusive).
        /// Yields nothing if the cursor is not on an item.
        #[must_use]
        pub fn iter_to_cursor(&self) -> RingBufferIterator<'_, T> {
            RingBufferIterator {
                ring_buffer: self,
                iterator_index: 0,
                limit: self.cursor_offset().map_or(0, |offset| offset + 1),
            }
        }
    }

    impl<'a, T> IntoIterator for &'a RingBuffer<T> {
        type Item = &'a T;
        type IntoIter = RingBufferIterator<'a, T>;

        fn into_iter(self) -> Self::IntoIter { self.iter() }
    }
}
pub use iterator::RingBufferIterator;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    fn collect<T: Clone>(ring_buffer: &RingBuffer<T>) -> Vec<T> {
        ring_buffer.iter().cloned().collect()
    }

    #[test]
    fn test_empty_ring_buffer() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        assert_eq2!(ring_buffer.len(), 0);
        assert_eq2!(ring_buffer.capacity(), 3);
        assert!(ring_buffer.is_empty());
        assert_eq2!(ring_buffer.cur(), None);
        assert_eq2!(ring_buffer.next(), None);
        assert_eq2!(ring_buffer.prev(), None);

        // Reset on a never written buffer is a no-op.
        ring_buffer.reset();
        assert_eq2!(ring_buffer.next(), None);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(0);
        assert_eq2!(ring_buffer.capacity(), 1);
        ring_buffer.append_to_end(1);
        ring_buffer.append_to_end(2);
        assert_eq2!(collect(&ring_buffer), vec![2]);
    }

    #[test]
    fn test_add_at_current_position_moves_cursor() {
        let mut ring_buffer: RingBuffer<&str> = RingBuffer::new(3);
        ring_buffer.add_at_current_position("Hello");
        assert_eq2!(ring_buffer.cur(), Some(&"Hello"));
        ring_buffer.add_at_current_position("World");
        assert_eq2!(ring_buffer.cur(), Some(&"World"));
        assert_eq2!(ring_buffer.len(), 2);
        assert_eq2!(collect(&ring_buffer), vec!["Hello", "World"]);
    }

    #[test]
    fn test_add_at_current_position_wraps_and_drops_oldest() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        for it in 1..=4 {
            ring_buffer.add_at_current_position(it);
        }
        assert!(ring_buffer.is_full());
        assert_eq2!(collect(&ring_buffer), vec![2, 3, 4]);
        assert_eq2!(ring_buffer.cur(), Some(&4));

        // Walk back to the oldest retained item, and no further.
        assert_eq2!(ring_buffer.prev(), Some(&3));
        assert_eq2!(ring_buffer.prev(), Some(&2));
        assert_eq2!(ring_buffer.prev(), None);
        assert_eq2!(ring_buffer.cur(), Some(&2));
    }

    #[test]
    fn test_add_after_prev_discards_following_items() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(5);
        for it in 1..=4 {
            ring_buffer.add_at_current_position(it);
        }
        assert_eq2!(ring_buffer.prev(), Some(&3));
        assert_eq2!(ring_buffer.prev(), Some(&2));

        ring_buffer.add_at_current_position(10);
        assert_eq2!(collect(&ring_buffer), vec![1, 2, 10]);
        assert_eq2!(ring_buffer.next(), None);
        assert_eq2!(ring_buffer.cur(), Some(&10));
    }

    #[test]
    fn test_next_after_prev() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        ring_buffer.add_at_current_position(1);
        ring_buffer.add_at_current_position(2);
        assert_eq2!(ring_buffer.prev(), Some(&1));
        assert_eq2!(ring_buffer.next(), Some(&2));
        assert_eq2!(ring_buffer.next(), None);
        assert_eq2!(ring_buffer.cur(), Some(&2));
    }

    #[test]
    fn test_append_to_end_slides_when_full() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        ring_buffer.append_to_end(1);
        ring_buffer.append_to_end(2);
        assert_eq2!(collect(&ring_buffer), vec![1, 2]);
        ring_buffer.append_to_end(3);
        ring_buffer.append_to_end(4);
        assert_eq2!(collect(&ring_buffer), vec![2, 3, 4]);
    }

    #[test]
    fn test_prepend_to_beginning_slides_when_full() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        ring_buffer.append_to_end(2);
        ring_buffer.prepend_to_beginning(1);
        assert_eq2!(collect(&ring_buffer), vec![1, 2]);
        ring_buffer.append_to_end(3);
        ring_buffer.prepend_to_beginning(0);
        assert_eq2!(collect(&ring_buffer), vec![0, 1, 2]);
    }

    #[test]
    fn test_reset_then_next_walks_whole_window() {
        let mut ring_buffer: RingBuffer<Option<f64>> = RingBuffer::new(4);
        ring_buffer.append_to_end(Some(1.0));
        ring_buffer.append_to_end(None);
        ring_buffer.prepend_to_beginning(Some(0.0));

        ring_buffer.reset();
        assert_eq2!(ring_buffer.cur(), None);
        assert_eq2!(ring_buffer.prev(), None);
        assert_eq2!(ring_buffer.next(), Some(&Some(0.0)));
        assert_eq2!(ring_buffer.next(), Some(&Some(1.0)));
        // The stored value is absent, but there is a value.
        assert_eq2!(ring_buffer.next(), Some(&None));
        assert_eq2!(ring_buffer.next(), None);

        // Reset again gives the same sequence.
        ring_buffer.reset();
        let double_optional = ring_buffer.next().copied();
        assert_eq2!(double_optional.flatten(), Some(0.0));
    }

    #[test]
    fn test_reset_when_full_wraps_correctly() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        for it in 1..=5 {
            ring_buffer.append_to_end(it);
        }
        ring_buffer.reset();
        assert_eq2!(ring_buffer.next(), Some(&3));
        assert_eq2!(ring_buffer.next(), Some(&4));
        assert_eq2!(ring_buffer.next(), Some(&5));
        assert_eq2!(ring_buffer.next(), None);
    }

    #[test]
    fn test_iter_to_cursor() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(4);
        for it in 1..=4 {
            ring_buffer.add_at_current_position(it);
        }
        let _unused = ring_buffer.prev();
        assert_eq2!(
            ring_buffer.iter_to_cursor().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        ring_buffer.reset();
        assert_eq2!(ring_buffer.iter_to_cursor().count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        ring_buffer.add_at_current_position(1);
        ring_buffer.add_at_current_position(2);
        ring_buffer.clear();
        assert!(ring_buffer.is_empty());
        assert_eq2!(ring_buffer.cur(), None);
        assert_eq2!(ring_buffer.next(), None);
        assert_eq2!(ring_buffer.capacity(), 3);
        assert_eq2!(ring_buffer.iter().count(), 0);

        ring_buffer.add_at_current_position(7);
        assert_eq2!(collect(&ring_buffer), vec![7]);
    }

    #[test]
    fn test_into_iterator_implementation() {
        let mut ring_buffer: RingBuffer<i32> = RingBuffer::new(3);
        ring_buffer.append_to_end(1);
        ring_buffer.append_to_end(2);
        let mut collected = vec![];
        for item in &ring_buffer {
            collected.push(*item);
        }
        assert_eq2!(collected, vec![1, 2]);
    }
}
