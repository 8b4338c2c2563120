//! Owning antenna registry with a fixed ordering policy and a position index.
//!
//! Invariants:
//! - No two antennas share a position.
//! - The ordering chosen at construction holds after every insert/remove.
//! - `index[pos]` is the slot of the antenna at `pos` for every stored antenna.

use std::collections::HashMap;

use crate::error::{AntennaError, Result};

use super::types::{Antenna, Bounds, Frequency, Pos};

/// How `insert` places a new antenna.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegistryOrder {
    /// Ascending `(x, y)`.
    #[default]
    Sorted,
    /// Insertion order.
    Append,
    /// Newest first.
    Prepend,
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    order: RegistryOrder,
    antennas: Vec<Antenna>,
    index: HashMap<Pos, usize>,
}

impl Registry {
    pub fn new(order: RegistryOrder) -> Self {
        Self {
            order,
            antennas: Vec::new(),
            index: HashMap::new(),
        }
    }
    #[inline]
    pub fn sorted() -> Self {
        Self::new(RegistryOrder::Sorted)
    }
    #[inline]
    pub fn appending() -> Self {
        Self::new(RegistryOrder::Append)
    }
    #[inline]
    pub fn order(&self) -> RegistryOrder {
        self.order
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.antennas.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.antennas.is_empty()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Antenna> {
        self.antennas.iter()
    }
    #[inline]
    pub fn as_slice(&self) -> &[Antenna] {
        &self.antennas
    }

    /// Insert according to the registry's ordering policy.
    ///
    /// Fails with `Occupied` when the position is taken and with `Allocation`
    /// when storage cannot grow; the registry is unchanged on failure.
    pub fn insert(&mut self, antenna: Antenna) -> Result<()> {
        if self.index.contains_key(&antenna.pos) {
            return Err(AntennaError::Occupied(antenna.pos));
        }
        self.antennas.try_reserve(1)?;
        self.index.try_reserve(1)?;
        let slot = match self.order {
            RegistryOrder::Sorted => self.sorted_slot(antenna.pos),
            RegistryOrder::Append => self.antennas.len(),
            RegistryOrder::Prepend => 0,
        };
        self.antennas.insert(slot, antenna);
        self.reindex_from(slot);
        Ok(())
    }

    /// Convenience for `insert(Antenna::new(frequency, x, y))`.
    pub fn insert_new(&mut self, frequency: Frequency, x: i32, y: i32) -> Result<()> {
        self.insert(Antenna::new(frequency, x, y))
    }

    /// Remove and return the antenna at `(x, y)`; `None` leaves the registry untouched.
    ///
    /// Adjacency entries in other antennas that pointed at the removed
    /// position are dropped as well.
    pub fn remove(&mut self, x: i32, y: i32) -> Option<Antenna> {
        let pos = Pos::new(x, y);
        let slot = self.index.remove(&pos)?;
        let removed = self.antennas.remove(slot);
        self.reindex_from(slot);
        for &peer in removed.adjacency() {
            if let Some(&i) = self.index.get(&peer) {
                self.antennas[i].remove_adjacent(pos);
            }
        }
        tracing::trace!(%pos, "antenna removed");
        Some(removed)
    }

    #[inline]
    pub fn find(&self, x: i32, y: i32) -> Option<&Antenna> {
        self.get(Pos::new(x, y))
    }

    #[inline]
    pub fn get(&self, pos: Pos) -> Option<&Antenna> {
        self.index.get(&pos).map(|&i| &self.antennas[i])
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.index.contains_key(&pos)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, pos: Pos) -> Option<&mut Antenna> {
        let i = *self.index.get(&pos)?;
        Some(&mut self.antennas[i])
    }

    pub(crate) fn antennas_mut(&mut self) -> &mut [Antenna] {
        &mut self.antennas
    }

    /// Distinct frequencies in order of first appearance.
    pub fn frequencies(&self) -> Vec<Frequency> {
        let mut out: Vec<Frequency> = Vec::new();
        for a in &self.antennas {
            if !out.contains(&a.frequency) {
                out.push(a.frequency);
            }
        }
        out
    }

    /// Smallest bounds holding every antenna with a non-negative position.
    ///
    /// Saturates at `i32::MAX`; an antenna on the last representable row or
    /// column is left outside.
    pub fn extent(&self) -> Bounds {
        self.antennas.iter().fold(Bounds::new(0, 0), |b, a| {
            Bounds::new(
                b.max_x.max(a.pos.x.saturating_add(1)),
                b.max_y.max(a.pos.y.saturating_add(1)),
            )
        })
    }

    pub fn clear(&mut self) {
        self.antennas.clear();
        self.index.clear();
    }

    /// First slot whose position is greater than `pos` (ties impossible by uniqueness).
    fn sorted_slot(&self, pos: Pos) -> usize {
        self.antennas.partition_point(|a| a.pos < pos)
    }

    fn reindex_from(&mut self, slot: usize) {
        for (i, a) in self.antennas.iter().enumerate().skip(slot) {
            self.index.insert(a.pos, i);
        }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Antenna;
    type IntoIter = std::slice::Iter<'a, Antenna>;

    fn into_iter(self) -> Self::IntoIter {
        self.antennas.iter()
    }
}
