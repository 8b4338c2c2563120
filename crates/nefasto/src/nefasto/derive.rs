//! Pairwise derivation of nefasto points.

use std::collections::HashSet;

use crate::registry::{Antenna, Bounds, FrequencyGroups, Pos, Registry};

/// Which derived points are kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NefastoPolicy {
    /// Keep every point; output sorted by `(x, y)` with duplicates retained.
    #[default]
    Unbounded,
    /// Keep points inside the bounds, each once, in discovery order.
    Bounded(Bounds),
}

/// The two points projected by the ordered pair `(a, b)`: `a - d` and `b + d`.
///
/// `None` when both sit on the same cell. A side is `None` when it falls
/// outside the `i32` coordinate range.
#[inline]
pub fn pair_points(a: Pos, b: Pos) -> Option<[Option<Pos>; 2]> {
    let (va, vb) = (a.to_wide(), b.to_wide());
    let d = vb - va;
    if d.x == 0 && d.y == 0 {
        return None;
    }
    Some([Pos::from_wide(va - d), Pos::from_wide(vb + d)])
}

/// Derived interference points of a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NefastoPoints {
    pub policy: NefastoPolicy,
    pub points: Vec<Pos>,
}

impl NefastoPoints {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Pos> {
        self.points.iter()
    }
    pub fn contains(&self, p: Pos) -> bool {
        match self.policy {
            NefastoPolicy::Unbounded => self.points.binary_search(&p).is_ok(),
            NefastoPolicy::Bounded(_) => self.points.contains(&p),
        }
    }
    /// Sorted, duplicate-free copy of the points.
    pub fn unique_sorted(&self) -> Vec<Pos> {
        let mut v = self.points.clone();
        v.sort_unstable();
        v.dedup();
        v
    }
}

/// Visit every ordered pair of distinct same-frequency antennas.
///
/// Outer loop in registry order, inner loop over the outer antenna's
/// frequency group (also registry order).
fn for_each_pair<F>(reg: &Registry, mut visit: F)
where
    F: FnMut(&Antenna, &Antenna),
{
    let groups = FrequencyGroups::from_registry(reg);
    for a1 in reg {
        let Some(group) = groups.find(a1.frequency) else {
            continue;
        };
        for &p2 in &group.members {
            if p2 == a1.pos {
                continue;
            }
            if let Some(a2) = reg.get(p2) {
                visit(a1, a2);
            }
        }
    }
}

/// Cells above which the bounded deriver tracks seen points in a set
/// instead of a dense grid.
const DENSE_SEEN_LIMIT: usize = 1 << 22;

/// Points already reported by the bounded deriver.
enum Seen {
    Dense(Vec<bool>),
    Sparse(HashSet<Pos>),
}

impl Seen {
    fn for_bounds(bounds: Bounds) -> Self {
        let cells = bounds.cell_count();
        if cells <= DENSE_SEEN_LIMIT {
            Seen::Dense(vec![false; cells])
        } else {
            Seen::Sparse(HashSet::new())
        }
    }

    /// True the first time `p` (inside `bounds`) is offered.
    fn first(&mut self, bounds: Bounds, p: Pos) -> bool {
        let Some(i) = bounds.cell_index(p) else {
            return false;
        };
        match self {
            Seen::Dense(cells) => !std::mem::replace(&mut cells[i], true),
            Seen::Sparse(set) => set.insert(p),
        }
    }
}

/// Derive nefasto points under `policy`.
///
/// Projections outside the `i32` range are dropped under either policy.
pub fn derive(reg: &Registry, policy: NefastoPolicy) -> NefastoPoints {
    let points = match policy {
        NefastoPolicy::Unbounded => {
            let mut out = Vec::new();
            for_each_pair(reg, |a1, a2| {
                if let Some(pair) = pair_points(a1.pos, a2.pos) {
                    out.extend(pair.into_iter().flatten());
                }
            });
            out.sort();
            out
        }
        NefastoPolicy::Bounded(bounds) => {
            let mut seen = Seen::for_bounds(bounds);
            let mut out = Vec::new();
            for_each_pair(reg, |a1, a2| {
                let Some(pair) = pair_points(a1.pos, a2.pos) else {
                    return;
                };
                for p in pair.into_iter().flatten() {
                    if seen.first(bounds, p) {
                        out.push(p);
                    }
                }
            });
            out
        }
    };
    tracing::debug!(antennas = reg.len(), points = points.len(), ?policy, "nefasto derived");
    NefastoPoints { policy, points }
}
