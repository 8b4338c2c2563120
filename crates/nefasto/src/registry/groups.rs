//! Partition of a registry by frequency ("antenna types").
//!
//! Groups hold positions, not antennas; the registry stays the only owner.
//! Invariants: a frequency appears in at most one group, and every member of
//! a group has that group's frequency.

use crate::error::{AntennaError, Result};

use super::ordered::Registry;
use super::types::{Frequency, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyGroup {
    pub frequency: Frequency,
    pub members: Vec<Pos>,
}

/// Groups in order of first appearance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyGroups {
    groups: Vec<FrequencyGroup>,
}

impl FrequencyGroups {
    /// One group per frequency, members in registry order.
    pub fn from_registry(reg: &Registry) -> Self {
        let mut out = Self::default();
        for a in reg {
            match out.groups.iter_mut().find(|g| g.frequency == a.frequency) {
                Some(g) => g.members.push(a.pos),
                None => out.groups.push(FrequencyGroup {
                    frequency: a.frequency,
                    members: vec![a.pos],
                }),
            }
        }
        out
    }

    /// Register an empty type; no-op if it exists. Returns whether it was added.
    pub fn add_type(&mut self, frequency: Frequency) -> bool {
        if self.find(frequency).is_some() {
            return false;
        }
        self.groups.push(FrequencyGroup {
            frequency,
            members: Vec::new(),
        });
        true
    }

    /// Append the antenna at `pos` to its type.
    ///
    /// The type must already exist and the antenna must be present in `reg`
    /// with a matching frequency.
    pub fn insert_into_type(
        &mut self,
        reg: &Registry,
        frequency: Frequency,
        pos: Pos,
    ) -> Result<()> {
        let found = reg
            .get(pos)
            .map(|a| a.frequency)
            .ok_or(AntennaError::Missing(pos))?;
        if found != frequency {
            return Err(AntennaError::FrequencyMismatch {
                pos,
                expected: frequency.as_char(),
                found: found.as_char(),
            });
        }
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.frequency == frequency)
            .ok_or(AntennaError::UnknownType(frequency.as_char()))?;
        if !group.members.contains(&pos) {
            group.members.try_reserve(1)?;
            group.members.push(pos);
        }
        Ok(())
    }

    pub fn find(&self, frequency: Frequency) -> Option<&FrequencyGroup> {
        self.groups.iter().find(|g| g.frequency == frequency)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyGroup> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a FrequencyGroups {
    type Item = &'a FrequencyGroup;
    type IntoIter = std::slice::Iter<'a, FrequencyGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
