//! Bounded LRU cache for variable-path lookups
//!
//! Entries sit in a slab linked from least to most recently used. A hit
//! moves the entry to the tail; inserting past capacity reuses the head slot.

use std::collections::HashMap;

#[derive(Debug)]
struct Slot<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Least-recently-used cache keyed by request path
#[derive(Debug)]
pub(crate) struct LruCache<V> {
    map: HashMap<String, usize>,
    slots: Vec<Slot<V>>,
    /// Least recently used
    head: Option<usize>,
    /// Most recently used
    tail: Option<usize>,
    capacity: usize,
}

impl<V> LruCache<V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// Storage grows as entries arrive; nothing is reserved up front.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::new(),
            slots: Vec::new(),
            head: None,
            tail: None,
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Look up and mark as most recently used
    pub(crate) fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.promote(idx);
        Some(&self.slots[idx].value)
    }

    /// Insert as most recently used; returns the evicted key, if any
    pub(crate) fn insert(&mut self, key: String, value: V) -> Option<String> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&idx) = self.map.get(&key) {
            self.slots[idx].value = value;
            self.promote(idx);
            return None;
        }

        if self.slots.len() < self.capacity {
            let idx = self.slots.len();
            self.slots.push(Slot {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.map.insert(key, idx);
            self.push_back(idx);
            return None;
        }

        // Full: recycle the least recently used slot
        let idx = self.head?;
        self.unlink(idx);
        let slot = &mut self.slots[idx];
        let evicted = std::mem::replace(&mut slot.key, key.clone());
        slot.value = value;
        self.map.remove(&evicted);
        self.map.insert(key, idx);
        self.push_back(idx);
        Some(evicted)
    }

    /// Keys from least to most recently used
    pub(crate) fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            keys.push(self.slots[idx].key.as_str());
            cursor = self.slots[idx].next;
        }
        keys
    }

    fn promote(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_back(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }

    fn push_back(&mut self, idx: usize) {
        self.slots[idx].prev = self.tail;
        self.slots[idx].next = None;
        match self.tail {
            Some(t) => self.slots[t].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }
}
