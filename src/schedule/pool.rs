use crate::error::{Result, ScheduleError};
use crate::schedule::city_schedule::CitySchedule;
use std::collections::HashSet;

pub const DEFAULT_POOL_CAPACITY: usize = 50;

/// Reference to an active pool slot. Goes stale as soon as the slot is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

impl Handle {
    #[cfg(test)]
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Free,
    Active,
}

#[derive(Debug)]
struct Slot {
    schedule: CitySchedule,
    state: SlotState,
    generation: u32,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Default)]
struct List {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// Fixed arena of schedule slots, each linked into exactly one of two lists: free or active.
///
/// Links are slot indices, so moving a slot between lists never allocates. Both lists append at
/// the tail; the active list order is the order cities were added in.
#[derive(Debug)]
pub struct SchedulePool {
    slots: Box<[Slot]>,
    free: List,
    active: List,
}

impl SchedulePool {
    pub fn new(capacity: usize) -> SchedulePool {
        let slots = (0..capacity)
            .map(|_| Slot {
                schedule: CitySchedule::default(),
                state: SlotState::Free,
                generation: 0,
                prev: None,
                next: None,
            })
            .collect();
        let mut pool = SchedulePool {
            slots,
            free: List::default(),
            active: List::default(),
        };
        for idx in 0..capacity {
            pool.push_back(SlotState::Free, idx);
        }
        pool.assert_invariants();
        pool
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len
    }

    pub fn active_len(&self) -> usize {
        self.active.len
    }

    /// Moves the first free slot to the tail of the active list, wiped clean.
    pub fn acquire(&mut self) -> Result<Handle> {
        let idx = self.free.head.ok_or(ScheduleError::PoolExhausted)?;
        self.unlink(idx);
        self.slots[idx].schedule.reset();
        self.push_back(SlotState::Active, idx);
        self.assert_invariants();
        Ok(Handle {
            index: idx,
            generation: self.slots[idx].generation,
        })
    }

    /// Wipes the slot behind `handle` and returns it to the tail of the free list.
    pub fn release(&mut self, handle: Handle) -> Result<()> {
        let idx = self.resolve(handle)?;
        self.unlink(idx);
        let slot = &mut self.slots[idx];
        slot.schedule.reset();
        slot.generation = slot.generation.wrapping_add(1);
        self.push_back(SlotState::Free, idx);
        self.assert_invariants();
        Ok(())
    }

    pub fn get(&self, handle: Handle) -> Result<&CitySchedule> {
        let idx = self.resolve(handle)?;
        Ok(&self.slots[idx].schedule)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut CitySchedule> {
        let idx = self.resolve(handle)?;
        Ok(&mut self.slots[idx].schedule)
    }

    #[cfg(test)]
    pub fn state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(|s| s.state)
    }

    /// Active schedules in list order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &CitySchedule)> + Clone + '_ {
        self.walk(SlotState::Active).map(move |idx| {
            let slot = &self.slots[idx];
            (
                Handle {
                    index: idx,
                    generation: slot.generation,
                },
                &slot.schedule,
            )
        })
    }

    /// Slot indices of one list, head to tail.
    pub fn walk(&self, state: SlotState) -> Walk<'_> {
        Walk {
            slots: &self.slots,
            cursor: self.list(state).head,
        }
    }

    fn resolve(&self, handle: Handle) -> Result<usize> {
        self.slots
            .get(handle.index)
            .filter(|s| s.state == SlotState::Active && s.generation == handle.generation)
            .map(|_| handle.index)
            .ok_or(ScheduleError::InvalidHandle)
    }

    fn list(&self, state: SlotState) -> &List {
        match state {
            SlotState::Free => &self.free,
            SlotState::Active => &self.active,
        }
    }

    fn list_mut(&mut self, state: SlotState) -> &mut List {
        match state {
            SlotState::Free => &mut self.free,
            SlotState::Active => &mut self.active,
        }
    }

    fn push_back(&mut self, state: SlotState, idx: usize) {
        let tail = self.list(state).tail;
        match tail {
            Some(t) => self.slots[t].next = Some(idx),
            None => self.list_mut(state).head = Some(idx),
        }
        let slot = &mut self.slots[idx];
        slot.state = state;
        slot.prev = tail;
        slot.next = None;

        let list = self.list_mut(state);
        list.tail = Some(idx);
        list.len += 1;
    }

    fn unlink(&mut self, idx: usize) {
        let (state, prev, next) = {
            let slot = &self.slots[idx];
            (slot.state, slot.prev, slot.next)
        };
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.list_mut(state).head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.list_mut(state).tail = prev,
        }
        self.list_mut(state).len -= 1;

        let slot = &mut self.slots[idx];
        slot.prev = None;
        slot.next = None;
    }

    pub(crate) fn assert_invariants(&self) {
        for state in [SlotState::Free, SlotState::Active] {
            let members = self.walk(state).collect::<Vec<usize>>();
            debug_assert_eq!(
                self.list(state).len,
                members.len(),
                "{:?} list length out of sync with its links",
                state
            );
            debug_assert!(
                members.iter().all(|idx| self.slots[*idx].state == state),
                "Slot linked into the {:?} list carries another state",
                state
            );
            debug_assert!(
                members
                    .windows(2)
                    .all(|w| self.slots[w[1]].prev == Some(w[0])),
                "{:?} list back links broken",
                state
            );
            debug_assert_eq!(self.list(state).tail, members.last().copied());
        }

        debug_assert_eq!(
            self.capacity(),
            self.free.len + self.active.len,
            "Free + active must cover the whole pool"
        );

        let mut seen = HashSet::new();
        debug_assert!(
            self.iter()
                .filter_map(|(_, s)| s.destination())
                .all(|name| seen.insert(name)),
            "Active destinations must be unique"
        );
        debug_assert!(
            self.walk(SlotState::Free)
                .all(|idx| self.slots[idx].schedule == CitySchedule::default()),
            "Free slots must be reset"
        );
    }
}

/// Cursor over one of the pool's lists.
#[derive(Clone)]
pub struct Walk<'a> {
    slots: &'a [Slot],
    cursor: Option<usize>,
}

impl Iterator for Walk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let idx = self.cursor?;
        self.cursor = self.slots[idx].next;
        Some(idx)
    }
}

impl Default for SchedulePool {
    fn default() -> Self {
        SchedulePool::new(DEFAULT_POOL_CAPACITY)
    }
}
