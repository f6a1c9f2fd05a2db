/// Lifecycle hooks of an [`ObjectPool`].
///
/// The listener is passed to every call instead of being stored in the pool, so a hook may
/// borrow state that lives next to the pool (another pool, the host's object source, ...).
pub trait PoolListener<T> {
    /// Constructs a new instance. Called only when no idle instance is available.
    fn on_create(&mut self) -> T;

    fn on_acquire(&mut self, _item: &mut T) {}

    fn on_release(&mut self, _item: &mut T) {}

    fn on_dispose(&mut self, _item: T) {}
}

/// Handle to an instance owned by an [`ObjectPool`].
///
/// Handles carry a generation, so a handle kept after its release no longer resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    slot: u32,
    generation: u32,
}

impl PoolHandle {
    pub fn slot(self) -> usize {
        self.slot as usize
    }
}

#[derive(Debug)]
struct Slot<T> {
    value: T,
    generation: u32,
    active: bool,
}

/// A bounded acquire/release pool.
///
/// Instances stay in their slot for the whole life of the pool; acquire and release only move
/// the slot between the idle list and the active set. After the first working set is built, a
/// scroll session runs without allocations.
#[derive(Debug)]
pub struct ObjectPool<T> {
    slots: Vec<Slot<T>>,
    idle: Vec<u32>,
    active: usize,
    max_size: Option<usize>,
    disposed: bool,
    acquired_total: u64,
    released_total: u64,
}

impl<T> Default for ObjectPool<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> ObjectPool<T> {
    /// Creates an empty pool. `max_size` bounds the number of instances ever constructed.
    pub fn new(max_size: Option<usize>) -> Self {
        Self {
            slots: Vec::new(),
            idle: Vec::new(),
            active: 0,
            max_size,
            disposed: false,
            acquired_total: 0,
            released_total: 0,
        }
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Total number of constructed instances (idle + active).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn active_len(&self) -> usize {
        self.active
    }

    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of successful `acquire` calls since creation.
    pub fn acquired_total(&self) -> u64 {
        self.acquired_total
    }

    /// Number of successful `release` calls since creation.
    pub fn released_total(&self) -> u64 {
        self.released_total
    }

    fn can_grow(&self) -> bool {
        self.max_size.is_none_or(|max| self.slots.len() < max)
    }

    /// Constructs idle instances until at least `count` exist (bounded by `max_size`).
    ///
    /// Pre-warmed instances go through `on_create` only; `on_acquire` runs when they are handed
    /// out.
    pub fn prewarm(&mut self, count: usize, listener: &mut impl PoolListener<T>) {
        if self.disposed {
            return;
        }
        while self.slots.len() < count && self.can_grow() {
            let value = listener.on_create();
            let slot = self.slots.len() as u32;
            self.slots.push(Slot {
                value,
                generation: 0,
                active: false,
            });
            self.idle.push(slot);
        }
        vdebug!(count, len = self.slots.len(), "ObjectPool::prewarm");
    }

    /// Hands out an idle instance, or constructs one when the pool may still grow.
    ///
    /// Returns `None` when the pool is exhausted or disposed; never blocks.
    pub fn acquire(&mut self, listener: &mut impl PoolListener<T>) -> Option<PoolHandle> {
        if self.disposed {
            vwarn!("ObjectPool::acquire on a disposed pool");
            return None;
        }

        let slot = match self.idle.pop() {
            Some(slot) => slot,
            None if self.can_grow() => {
                let value = listener.on_create();
                let slot = self.slots.len() as u32;
                self.slots.push(Slot {
                    value,
                    generation: 0,
                    active: false,
                });
                slot
            }
            None => {
                vwarn!(
                    max_size = self.max_size,
                    active = self.active,
                    "ObjectPool::acquire: pool exhausted"
                );
                return None;
            }
        };

        let entry = &mut self.slots[slot as usize];
        entry.active = true;
        listener.on_acquire(&mut entry.value);
        self.active += 1;
        self.acquired_total += 1;
        Some(PoolHandle {
            slot,
            generation: entry.generation,
        })
    }

    /// Returns an instance to the idle set.
    ///
    /// Unknown, stale or already released handles are ignored with a warning and yield `false`.
    pub fn release(&mut self, handle: PoolHandle, listener: &mut impl PoolListener<T>) -> bool {
        let Some(entry) = self.slots.get_mut(handle.slot as usize) else {
            vwarn!(slot = handle.slot, "ObjectPool::release: handle not owned by this pool");
            return false;
        };
        if !entry.active || entry.generation != handle.generation {
            vwarn!(
                slot = handle.slot,
                generation = handle.generation,
                "ObjectPool::release: stale or double release"
            );
            return false;
        }

        listener.on_release(&mut entry.value);
        entry.active = false;
        entry.generation = entry.generation.wrapping_add(1);
        self.idle.push(handle.slot);
        self.active -= 1;
        self.released_total += 1;
        true
    }

    pub fn is_active(&self, handle: PoolHandle) -> bool {
        self.slots
            .get(handle.slot as usize)
            .is_some_and(|s| s.active && s.generation == handle.generation)
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.slot as usize)
            .filter(|s| s.active && s.generation == handle.generation)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|s| s.active && s.generation == handle.generation)
            .map(|s| &mut s.value)
    }

    /// Borrows two distinct active instances at once.
    pub fn get_pair_mut(&mut self, a: PoolHandle, b: PoolHandle) -> Option<(&mut T, &mut T)> {
        if a.slot == b.slot || !self.is_active(a) || !self.is_active(b) {
            return None;
        }
        let (lo, hi, swapped) = if a.slot < b.slot {
            (a.slot as usize, b.slot as usize, false)
        } else {
            (b.slot as usize, a.slot as usize, true)
        };
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = &mut head[lo].value;
        let second = &mut tail[0].value;
        Some(if swapped {
            (second, first)
        } else {
            (first, second)
        })
    }

    /// Runs `on_dispose` for every instance, idle and active, and frees the storage.
    ///
    /// The pool hands out nothing afterwards.
    pub fn dispose(&mut self, listener: &mut impl PoolListener<T>) {
        if self.disposed {
            return;
        }
        vdebug!(
            len = self.slots.len(),
            active = self.active,
            "ObjectPool::dispose"
        );
        for slot in self.slots.drain(..) {
            listener.on_dispose(slot.value);
        }
        self.idle.clear();
        self.active = 0;
        self.disposed = true;
    }
}
