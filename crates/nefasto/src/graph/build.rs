//! Same-frequency adjacency construction.

use crate::registry::{Frequency, FrequencyGroups, Pos, Registry};

/// Connect every unordered pair of distinct same-frequency antennas.
///
/// Adjacency insertion has set semantics, so repeated calls add nothing.
/// Per antenna, neighbours end up in the registry order of its peers.
/// Returns the number of directed entries added.
pub fn connect_same_frequency(reg: &mut Registry) -> usize {
    let groups = FrequencyGroups::from_registry(reg);
    let added: usize = groups
        .iter()
        .map(|g| connect_members(reg, &g.members))
        .sum();
    tracing::debug!(groups = groups.len(), added, "same-frequency adjacency built");
    added
}

/// Same as [`connect_same_frequency`] restricted to one frequency.
pub fn connect_frequency(reg: &mut Registry, frequency: Frequency) -> usize {
    let groups = FrequencyGroups::from_registry(reg);
    match groups.find(frequency) {
        Some(g) => connect_members(reg, &g.members),
        None => 0,
    }
}

/// Drop every adjacency entry. Returns the number of directed entries removed.
pub fn disconnect_all(reg: &mut Registry) -> usize {
    reg.antennas_mut()
        .iter_mut()
        .map(|a| a.clear_adjacency())
        .sum()
}

fn connect_members(reg: &mut Registry, members: &[Pos]) -> usize {
    let mut added = 0;
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            added += link(reg, a, b) as usize;
            added += link(reg, b, a) as usize;
        }
    }
    added
}

#[inline]
fn link(reg: &mut Registry, from: Pos, to: Pos) -> bool {
    reg.get_mut(from).is_some_and(|a| a.add_adjacent(to))
}
