//! Ordered, deduplicated universe collection of fixed capacity.

use heapless::Vec;

use crate::UNASSIGNED_UNIVERSE;

/// Returned when a universe could not be stored because the set is full.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError(pub u16);

/// Universes in first-seen order, at most `N` of them.
///
/// Once full, further universes are dropped. The set remembers that it
/// saturated and how many distinct universes it had to turn away.
#[derive(Debug, Clone, Default)]
pub struct UniverseSet<const N: usize> {
    universes: Vec<u16, N>,
    dropped: usize,
}

impl<const N: usize> UniverseSet<N> {
    pub const fn new() -> Self {
        Self {
            universes: Vec::new(),
            dropped: 0,
        }
    }

    /// Insert a universe unless already present
    ///
    /// Returns `Ok(true)` if it was added, `Ok(false)` if it was already
    /// present or is the unassigned sentinel.
    pub fn insert(&mut self, universe: u16) -> Result<bool, CapacityError> {
        if universe == UNASSIGNED_UNIVERSE || self.contains(universe) {
            return Ok(false);
        }
        self.universes.push(universe).map_err(|universe| {
            self.dropped += 1;
            CapacityError(universe)
        })?;
        Ok(true)
    }

    pub fn contains(&self, universe: u16) -> bool {
        self.universes.contains(&universe)
    }

    pub fn len(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// True once an insert has been refused for lack of room
    pub const fn saturated(&self) -> bool {
        self.dropped > 0
    }

    /// Number of refused inserts
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.universes
    }

    pub fn iter(&self) -> core::slice::Iter<'_, u16> {
        self.universes.iter()
    }
}

impl<'a, const N: usize> IntoIterator for &'a UniverseSet<N> {
    type Item = &'a u16;
    type IntoIter = core::slice::Iter<'a, u16>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
