/// Stable reference to a list node
///
/// Handles carry the slot generation, so a handle to a removed node never
/// resolves to whatever value later reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    next: usize,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    entry: Option<Entry<T>>,
}

/// Circular singly-linked list stored in an arena of slots
///
/// Removed slots go on a free list and are reused by later inserts.
#[derive(Debug, Clone)]
pub struct CircularList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CircularList<T> {
    pub fn new() -> Self {
        CircularList {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<Handle> {
        self.head.map(|index| self.handle(index))
    }

    fn handle(&self, index: usize) -> Handle {
        Handle {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn entry(&self, handle: Handle) -> Option<&Entry<T>> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    fn entry_mut(&mut self, handle: Handle) -> Option<&mut Entry<T>> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.entry(handle).map(|entry| &entry.value)
    }

    /// Overwrite a value, returning the old one
    pub fn set(&mut self, handle: Handle, value: T) -> Option<T> {
        self.entry_mut(handle)
            .map(|entry| std::mem::replace(&mut entry.value, value))
    }

    /// Successor of `handle` (the head's predecessor wraps to the head)
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        self.entry(handle).map(|entry| self.handle(entry.next))
    }

    fn alloc(&mut self, value: T, next: Option<usize>) -> usize {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: None,
                });
                self.slots.len() - 1
            }
        };

        self.slots[index].entry = Some(Entry {
            value,
            next: next.unwrap_or(index),
        });
        self.len += 1;
        index
    }

    /// Insert right after the head; the first value becomes the head
    pub fn push_after_head(&mut self, value: T) -> Handle {
        let index = match self.head {
            Some(head) => {
                let next = self.slots[head].entry.as_ref().map_or(head, |entry| entry.next);
                let index = self.alloc(value, Some(next));
                if let Some(entry) = self.slots[head].entry.as_mut() {
                    entry.next = index;
                }
                index
            }
            None => {
                let index = self.alloc(value, None);
                self.head = Some(index);
                index
            }
        };
        self.handle(index)
    }

    /// Insert after `handle`, or `None` if the handle is stale
    pub fn insert_after(&mut self, handle: Handle, value: T) -> Option<Handle> {
        let next = self.entry(handle)?.next;
        let index = self.alloc(value, Some(next));

        if let Some(entry) = self.slots[handle.index].entry.as_mut() {
            entry.next = index;
        }
        Some(self.handle(index))
    }

    /// Unlink and return a value; removing the head moves it to its successor
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let next = self.entry(handle)?.next;

        if self.len == 1 {
            self.head = None;
        } else {
            let prev = self.predecessor(handle.index)?;
            if let Some(entry) = self.slots[prev].entry.as_mut() {
                entry.next = next;
            }
            if self.head == Some(handle.index) {
                self.head = Some(next);
            }
        }

        let slot = &mut self.slots[handle.index];
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;

        Some(entry.value)
    }

    fn predecessor(&self, index: usize) -> Option<usize> {
        let mut cursor = self.head?;
        for _ in 0..self.len {
            let next = self.slots[cursor].entry.as_ref()?.next;
            if next == index {
                return Some(cursor);
            }
            cursor = next;
        }
        None
    }

    /// Handle of the node `n` steps after the head
    pub fn nth(&self, n: usize) -> Option<Handle> {
        if n >= self.len {
            return None;
        }

        let mut cursor = self.head?;
        for _ in 0..n {
            cursor = self.slots[cursor].entry.as_ref()?.next;
        }
        Some(self.handle(cursor))
    }

    /// Values from the head, once around
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Remove everything; outstanding handles stop resolving
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.entry.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.head = None;
        self.len = 0;
    }
}

impl<T: PartialEq> CircularList<T> {
    /// First node holding `value`, with its position from the head
    pub fn find(&self, value: &T) -> Option<(usize, Handle)> {
        let index = self.iter().position(|v| v == value)?;
        Some((index, self.nth(index)?))
    }
}

pub struct Iter<'a, T> {
    list: &'a CircularList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.list.slots.get(self.cursor?)?.entry.as_ref()?;
        self.cursor = Some(entry.next);
        self.remaining -= 1;
        Some(&entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
