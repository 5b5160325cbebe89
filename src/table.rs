//! Table: open-addressed string map with linear probing and tombstones.

use crate::error::TableError;
use crate::hash::{start_index, BuildPolynomialHasher};
use crate::slot::{Entry, Slot};
use core::hash::BuildHasher;
use core::mem;
use log::{debug, trace};

/// Growth is triggered once `len / capacity` would reach this value.
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.7;

// Integer form of the threshold: len * 10 >= capacity * 7.
const LOAD_NUMERATOR: u128 = 7;
const LOAD_DENOMINATOR: u128 = 10;

const GROWTH_FACTOR: usize = 2;

/// Outcome of an insert probe.
enum Probe {
    /// Slot holding the key.
    Hit(usize),
    /// Key absent; first reusable slot on the probe path, if any.
    Miss(Option<usize>),
}

/// Hash table mapping `String` keys to `String` values.
///
/// Collisions are resolved by linear probing from the hashed index, wrapping
/// at the end of the slot array. Removal leaves a tombstone so that entries
/// placed further along a probe chain stay reachable. Tombstones are only
/// cleared when the table grows and rehashes.
#[derive(Debug, Clone)]
pub struct Table<S = BuildPolynomialHasher> {
    hasher: S,
    slots: Vec<Slot>,
    count: usize,
    tombstones: usize,
}

impl Table {
    /// Creates a table with `capacity` slots using the polynomial hasher.
    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_capacity_and_hasher(capacity, BuildPolynomialHasher)
    }
}

impl<S> Table<S>
where
    S: BuildHasher,
{
    /// Creates a table with `capacity` slots that picks start indices with `hasher`.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::ZeroCapacity);
        }
        let slots = allocate_slots(capacity)?;
        trace!("created table with {capacity} slots");
        Ok(Self {
            hasher,
            slots,
            count: 0,
            tombstones: 0,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots marked deleted since the last growth.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots.len() as f64
    }

    /// Inserts or overwrites `key`.
    ///
    /// Returns the previous value when the key was already present. Adding a
    /// new key that brings the load factor to [`LOAD_FACTOR_THRESHOLD`] first
    /// doubles the slot array; if that allocation fails the table is left
    /// exactly as it was.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, TableError> {
        let key = key.into();
        let value = value.into();
        match self.probe(&key) {
            Probe::Hit(index) => Ok(self.replace_value(index, value)),
            Probe::Miss(vacancy) => {
                self.insert_new(Entry { key, value }, vacancy)?;
                Ok(None)
            }
        }
    }

    /// Returns the value stored under `key`.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let index = self.find(key)?;
        match &self.slots[index] {
            Slot::Occupied(entry) => Some(entry.value.as_str()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` and hands back its value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        let index = self.find(key)?;
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.count -= 1;
                self.tombstones += 1;
                trace!("tombstoned slot {index}");
                Some(entry.value)
            }
            other => {
                self.slots[index] = other;
                None
            }
        }
    }

    /// Releases every entry and the slot array.
    pub fn destroy(self) {
        trace!(
            "destroying table: {} entries in {} slots",
            self.count,
            self.slots.len()
        );
    }

    /// Index of the slot holding `key`. Stops at the first empty slot or
    /// after one full pass over the array.
    fn find(&self, key: &str) -> Option<usize> {
        let capacity = self.slots.len();
        let mut index = start_index(&self.hasher, key, capacity);
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return None,
                slot if slot.holds(key) => return Some(index),
                _ => {}
            }
            index = (index + 1) % capacity;
        }
        None
    }

    /// Like `find`, but also records the first tombstone passed so a new
    /// entry can reuse it once the key is known to be absent.
    fn probe(&self, key: &str) -> Probe {
        let capacity = self.slots.len();
        let mut index = start_index(&self.hasher, key, capacity);
        let mut first_tombstone = None;
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return Probe::Miss(Some(first_tombstone.unwrap_or(index))),
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(index);
                }
                slot if slot.holds(key) => return Probe::Hit(index),
                Slot::Occupied(_) => {}
            }
            index = (index + 1) % capacity;
        }
        Probe::Miss(first_tombstone)
    }

    fn replace_value(&mut self, index: usize, value: String) -> Option<String> {
        match &mut self.slots[index] {
            Slot::Occupied(entry) => Some(mem::replace(&mut entry.value, value)),
            _ => None,
        }
    }

    fn insert_new(&mut self, entry: Entry, vacancy: Option<usize>) -> Result<(), TableError> {
        let index = match vacancy {
            Some(index) if !self.over_threshold(self.count + 1) => index,
            _ => {
                self.grow()?;
                vacant_slot(&self.slots, &self.hasher, &entry.key)
            }
        };
        if let Slot::Tombstone = self.slots[index] {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(entry);
        self.count += 1;
        Ok(())
    }

    fn over_threshold(&self, count: usize) -> bool {
        count as u128 * LOAD_DENOMINATOR >= self.slots.len() as u128 * LOAD_NUMERATOR
    }

    /// Rehashes every live entry into an array twice the size. The new array
    /// is fully allocated before any entry moves.
    fn grow(&mut self) -> Result<(), TableError> {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity
            .checked_mul(GROWTH_FACTOR)
            .ok_or(TableError::CapacityOverflow {
                capacity: old_capacity,
            })?;
        let mut slots = allocate_slots(new_capacity)?;

        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied(entry) = slot {
                let index = vacant_slot(&slots, &self.hasher, &entry.key);
                slots[index] = Slot::Occupied(entry);
            }
        }

        debug!(
            "grew table from {old_capacity} to {new_capacity} slots ({} live, {} tombstones dropped)",
            self.count, self.tombstones
        );
        self.slots = slots;
        self.tombstones = 0;
        Ok(())
    }
}

fn allocate_slots(capacity: usize) -> Result<Vec<Slot>, TableError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|source| TableError::AllocationFailed { capacity, source })?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

/// First non-occupied slot on `key`'s probe path.
///
/// Callers guarantee at least one such slot exists (live entries stay below
/// the load threshold), so the scan always terminates.
fn vacant_slot<S: BuildHasher>(slots: &[Slot], hasher: &S, key: &str) -> usize {
    let capacity = slots.len();
    let mut index = start_index(hasher, key, capacity);
    while let Slot::Occupied(_) = slots[index] {
        index = (index + 1) % capacity;
    }
    index
}
