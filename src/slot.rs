//! Slot states of the probe array.

/// A stored key/value pair. Lives only inside an occupied slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Never used since the array was allocated; terminates every probe.
    #[default]
    Empty,
    Occupied(Entry),
    /// Previously occupied. Probes continue past it.
    Tombstone,
}

impl Slot {
    #[inline]
    pub(crate) fn holds(&self, key: &str) -> bool {
        matches!(self, Slot::Occupied(e) if e.key == key)
    }
}
