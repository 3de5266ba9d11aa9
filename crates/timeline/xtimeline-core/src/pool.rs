//! Per-type recycler for track instances.
//!
//! Instances live in a slot arena addressed by generational handles. Returned
//! instances stay in their slot and are chained into a free list that is
//! private to the pool; the chain link is cleared as soon as a slot is handed
//! out again, so a live instance is never reachable through pool bookkeeping.
//! Reuse order is unspecified.

use log::{debug, trace};

use crate::config::Config;

/// Lifecycle hooks the pool invokes on its instances.
pub trait Poolable: Default {
    /// The instance is being handed out again for a new logical lifetime.
    fn on_acquire(&mut self) {}

    /// The instance is being returned to the pool.
    fn on_release(&mut self);
}

/// Generational handle to a pooled instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PoolHandle {
    index: u32,
    generation: u32,
}

impl PoolHandle {
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    occupied: bool,
    /// `None` once a released instance was dropped past `max_free`.
    value: Option<T>,
    /// Next vacant slot; only set while this slot is vacant.
    next_free: Option<u32>,
}

#[derive(Debug)]
pub struct TrackPool<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    free_len: usize,
    retained: usize,
    max_free: usize,
}

impl<T: Poolable> Default for TrackPool<T> {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl<T: Poolable> TrackPool<T> {
    pub fn new(cfg: &Config) -> Self {
        Self {
            slots: Vec::with_capacity(cfg.pool_capacity),
            free_head: None,
            free_len: 0,
            retained: 0,
            max_free: cfg.max_free,
        }
    }

    /// Hand out an instance, recycling a vacant slot when one exists.
    pub fn acquire(&mut self) -> PoolHandle {
        let Some(index) = self.free_head else {
            let index = self.slots.len() as u32;
            let mut value = T::default();
            value.on_acquire();
            self.slots.push(Slot {
                generation: 0,
                occupied: true,
                value: Some(value),
                next_free: None,
            });
            trace!("pool grew to {} slots", self.slots.len());
            return PoolHandle {
                index,
                generation: 0,
            };
        };

        let slot = &mut self.slots[index as usize];
        self.free_head = slot.next_free.take();
        self.free_len -= 1;
        if slot.value.is_some() {
            self.retained -= 1;
        }
        slot.occupied = true;
        slot.value.get_or_insert_with(T::default).on_acquire();
        debug!("reused pool slot {index} (generation {})", slot.generation);
        PoolHandle {
            index,
            generation: slot.generation,
        }
    }

    /// Return an instance. Stale or unknown handles are ignored and yield false.
    pub fn release(&mut self, handle: PoolHandle) -> bool {
        let free_head = self.free_head;
        let keep = self.retained < self.max_free;
        let Some(slot) = self.slot_mut(handle) else {
            return false;
        };
        if let Some(value) = slot.value.as_mut() {
            value.on_release();
        }
        slot.occupied = false;
        slot.generation = slot.generation.wrapping_add(1);
        slot.next_free = free_head;
        if !keep {
            slot.value = None;
        }
        if keep {
            self.retained += 1;
        }
        self.free_head = Some(handle.index);
        self.free_len += 1;
        debug!("returned pool slot {}", handle.index);
        true
    }

    fn slot_mut(&mut self, handle: PoolHandle) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.occupied && s.generation == handle.generation)
    }

    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.occupied && s.generation == handle.generation)
            .and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slot_mut(handle).and_then(|s| s.value.as_mut())
    }

    #[inline]
    pub fn contains(&self, handle: PoolHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Live (handed out) instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vacant slots waiting for reuse.
    #[inline]
    pub fn free_len(&self) -> usize {
        self.free_len
    }

    /// Vacant slots that still hold an instance.
    #[inline]
    pub fn retained_len(&self) -> usize {
        self.retained
    }

    /// Live instances with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            if !s.occupied {
                return None;
            }
            let handle = PoolHandle {
                index: i as u32,
                generation: s.generation,
            };
            s.value.as_ref().map(|v| (handle, v))
        })
    }
}
