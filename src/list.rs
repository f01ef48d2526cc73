use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: isize, len: usize },
}

/// A singly linked list of `i32` values.
///
/// Every node is allocated with `Box::into_raw` and owned by the list until
/// it is unlinked and handed back to `Box::from_raw`. `head` and `tail` are
/// both null exactly when the list is empty; otherwise `tail` is the node
/// whose `next` is null.
pub struct OrderedList {
    head: Link,
    tail: Link,
    len: usize,
}

type Link = *mut Node;

struct Node {
    elem: i32,
    next: Link,
}

impl OrderedList {
    pub fn new() -> Self {
        OrderedList {
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }

    pub fn front(&self) -> Option<i32> {
        // SAFETY: head is null or a live node owned by this list.
        unsafe { self.head.as_ref() }.map(|node| node.elem)
    }

    pub fn back(&self) -> Option<i32> {
        // SAFETY: tail is null or the live last node of this list.
        unsafe { self.tail.as_ref() }.map(|node| node.elem)
    }

    pub fn insert_at_beginning(&mut self, elem: i32) {
        let node = Box::into_raw(Box::new(Node {
            elem,
            next: self.head,
        }));

        if self.tail.is_null() {
            self.tail = node;
        }
        self.head = node;
        self.len += 1;
        trace!(elem, len = self.len, "inserted at beginning");
    }

    pub fn insert_at_end(&mut self, elem: i32) {
        let node = Box::into_raw(Box::new(Node {
            elem,
            next: ptr::null_mut(),
        }));

        if self.tail.is_null() {
            self.head = node;
        } else {
            // SAFETY: a non-null tail is the live last node of this list.
            unsafe {
                (*self.tail).next = node;
            }
        }
        self.tail = node;
        self.len += 1;
        trace!(elem, len = self.len, "inserted at end");
    }

    /// Inserts `elem` before the first following node that is not smaller
    /// than it. Equal values land after the ones already present, so a list
    /// built only through this method stays non-decreasing.
    pub fn insert_sorted(&mut self, elem: i32) {
        // SAFETY: every pointer followed below is either head or the `next`
        // of a live node, and is checked for null before use.
        unsafe {
            if self.head.is_null() || (*self.head).elem >= elem {
                return self.insert_at_beginning(elem);
            }

            let mut current = self.head;
            while !(*current).next.is_null() && (*(*current).next).elem < elem {
                current = (*current).next;
            }

            let node = Box::into_raw(Box::new(Node {
                elem,
                next: (*current).next,
            }));
            (*current).next = node;

            if (*node).next.is_null() {
                self.tail = node;
            }
        }
        self.len += 1;
        trace!(elem, len = self.len, "inserted in order");
    }

    pub fn delete_first(&mut self) -> Option<i32> {
        if self.head.is_null() {
            return None;
        }

        // SAFETY: head is a live node allocated by Box::into_raw; it is
        // unlinked before the box is dropped.
        let node = unsafe { Box::from_raw(self.head) };
        self.head = node.next;
        if self.head.is_null() {
            self.tail = ptr::null_mut();
        }
        self.len -= 1;
        trace!(elem = node.elem, len = self.len, "deleted first");
        Some(node.elem)
    }

    pub fn delete_last(&mut self) -> Option<i32> {
        if self.head.is_null() {
            return None;
        }

        // SAFETY: the walk only follows non-null `next` links of live nodes,
        // and the last node is unlinked before its box is dropped.
        unsafe {
            if (*self.head).next.is_null() {
                return self.delete_first();
            }

            // Walk to the second-to-last node.
            let mut current = self.head;
            while !(*(*current).next).next.is_null() {
                current = (*current).next;
            }

            let last = Box::from_raw((*current).next);
            (*current).next = ptr::null_mut();
            self.tail = current;
            self.len -= 1;
            trace!(elem = last.elem, len = self.len, "deleted last");
            Some(last.elem)
        }
    }

    /// Removes the element at the zero-based `index` and returns it.
    pub fn delete_at_index(&mut self, index: isize) -> Result<i32, ListError> {
        let out_of_range = ListError::IndexOutOfRange {
            index,
            len: self.len,
        };
        if self.head.is_null() || index < 0 || index as usize >= self.len {
            debug!(%out_of_range, "rejected delete");
            return Err(out_of_range);
        }

        if index == 0 {
            return self.delete_first().ok_or(out_of_range);
        }

        // SAFETY: previous starts at the non-null head and is checked for
        // null after every step; the target is unlinked before its box drops.
        unsafe {
            let mut previous = self.head;
            for _ in 0..index - 1 {
                previous = (*previous).next;
                if previous.is_null() {
                    return Err(out_of_range);
                }
            }

            if (*previous).next.is_null() {
                return Err(out_of_range);
            }
            let target = Box::from_raw((*previous).next);
            (*previous).next = target.next;

            if target.next.is_null() {
                self.tail = previous;
            }
            self.len -= 1;
            trace!(index, elem = target.elem, len = self.len, "deleted at index");
            Ok(target.elem)
        }
    }

    /// Splits the values into a front and a back list, in order. With an odd
    /// count the extra element goes to the front. `self` is left untouched.
    pub fn front_back_split(&self) -> (OrderedList, OrderedList) {
        let mut front = OrderedList::new();
        let mut back = OrderedList::new();

        if self.head.is_null() {
            return (front, back);
        }

        // SAFETY: only reads through non-null links of nodes owned by `self`.
        let rest = unsafe {
            // slow stops on the last node of the front half.
            let mut slow = self.head;
            let mut fast = (*self.head).next;
            while !fast.is_null() && !(*fast).next.is_null() {
                slow = (*slow).next;
                fast = (*(*fast).next).next;
            }

            let mut current = self.head;
            loop {
                front.insert_at_end((*current).elem);
                let reached = current == slow;
                current = (*current).next;
                if reached {
                    break;
                }
            }
            current
        };
        back.extend(Iter::starting_at(rest).copied());

        debug!(front = front.len, back = back.len, "split list");
        (front, back)
    }

    /// Reorders the values into non-decreasing order.
    pub fn sort(&mut self) {
        let mut values = self.to_vec();
        values.sort_unstable();

        self.clear();
        self.extend(values);
        debug!(len = self.len, "sorted list");
    }

    /// Merges two non-decreasing lists into a new non-decreasing list.
    /// Ties take the element from `a` first. Neither input is modified.
    pub fn merge(a: &OrderedList, b: &OrderedList) -> OrderedList {
        let mut merged = OrderedList::new();
        let mut left = a.head;
        let mut right = b.head;

        // SAFETY: only reads through non-null links of nodes owned by `a`
        // and `b`, which are borrowed for the whole call.
        unsafe {
            while !left.is_null() && !right.is_null() {
                if (*left).elem <= (*right).elem {
                    merged.insert_at_end((*left).elem);
                    left = (*left).next;
                } else {
                    merged.insert_at_end((*right).elem);
                    right = (*right).next;
                }
            }
        }

        merged.extend(Iter::starting_at(left).copied());
        merged.extend(Iter::starting_at(right).copied());

        debug!(left = a.len, right = b.len, merged = merged.len, "merged lists");
        merged
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        *self = OrderedList::new();
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::starting_at(self.head)
    }
}

impl Default for OrderedList {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for OrderedList {
    fn drop(&mut self) {
        let mut cur_link = self.head;
        while !cur_link.is_null() {
            // SAFETY: each node is released exactly once, after its successor
            // has been read.
            let boxed = unsafe { Box::from_raw(cur_link) };
            cur_link = boxed.next;
        }
        self.head = ptr::null_mut();
        self.tail = ptr::null_mut();
    }
}

pub struct Iter<'a> {
    next: *const Node,
    _marker: PhantomData<&'a Node>,
}

impl<'a> Iter<'a> {
    // The caller ties 'a to a borrow of the list that owns `next`.
    fn starting_at(next: *const Node) -> Self {
        Iter {
            next,
            _marker: PhantomData,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a i32;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: the list is borrowed for 'a, so its nodes stay alive and
        // unmodified while the iterator exists.
        unsafe { self.next.as_ref() }.map(|node| {
            self.next = node.next;
            &node.elem
        })
    }
}

impl<'a> IntoIterator for &'a OrderedList {
    type Item = &'a i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<i32> for OrderedList {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for elem in iter {
            self.insert_at_end(elem);
        }
    }
}

impl FromIterator<i32> for OrderedList {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut list = OrderedList::new();
        list.extend(iter);
        list
    }
}

impl Clone for OrderedList {
    fn clone(&self) -> Self {
        self.iter().copied().collect()
    }
}

impl PartialEq for OrderedList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for OrderedList {}

impl fmt::Debug for OrderedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Values separated by single spaces; an empty list renders as "".
impl fmt::Display for OrderedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.iter();
        if let Some(first) = values.next() {
            write!(f, "{}", first)?;
            for elem in values {
                write!(f, " {}", elem)?;
            }
        }
        Ok(())
    }
}
