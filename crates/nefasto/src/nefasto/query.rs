//! Point queries against the derivation and the guarded placement built on them.

use crate::error::{AntennaError, Result};
use crate::registry::{Antenna, Bounds, Frequency, Pos, Registry};

use super::derive::pair_points;

fn same_frequency(reg: &Registry, frequency: Frequency) -> Vec<Pos> {
    reg.iter()
        .filter(|a| a.frequency == frequency)
        .map(|a| a.pos)
        .collect()
}

/// True iff some ordered pair of distinct `frequency` antennas satisfies `hit`.
fn any_pair(reg: &Registry, frequency: Frequency, hit: impl Fn(Pos, Pos) -> bool) -> bool {
    let same = same_frequency(reg, frequency);
    same.iter()
        .any(|&a| same.iter().filter(|&&b| b != a).any(|&b| hit(a, b)))
}

/// True iff some ordered pair of distinct `frequency` antennas projects onto `p`.
pub fn is_nefasto_position(reg: &Registry, frequency: Frequency, p: Pos) -> bool {
    any_pair(reg, frequency, |a, b| {
        pair_points(a, b).is_some_and(|pair| pair.contains(&Some(p)))
    })
}

/// The two points two deltas beyond an aligned pair: `a - 2d` and `b + 2d`.
///
/// Only pairs sharing a row, a column or a diagonal project; `None`
/// otherwise and for a degenerate pair. A side is `None` outside the `i32`
/// range.
pub fn interference_points(a: Pos, b: Pos) -> Option<[Option<Pos>; 2]> {
    let (va, vb) = (a.to_wide(), b.to_wide());
    let d = vb - va;
    let aligned = d.x == 0 || d.y == 0 || d.x.abs() == d.y.abs();
    if (d.x == 0 && d.y == 0) || !aligned {
        return None;
    }
    Some([Pos::from_wide(va - d * 2), Pos::from_wide(vb + d * 2)])
}

/// True iff `p` lies two deltas beyond some aligned pair of `frequency` antennas.
pub fn is_interference_position(reg: &Registry, frequency: Frequency, p: Pos) -> bool {
    any_pair(reg, frequency, |a, b| {
        interference_points(a, b).is_some_and(|pair| pair.contains(&Some(p)))
    })
}

/// Insert `antenna` only if its cell is inside `bounds`, is neither a
/// nefasto nor an interference point for its frequency, and is free.
pub fn place_checked(reg: &mut Registry, antenna: Antenna, bounds: Bounds) -> Result<()> {
    let p = antenna.pos;
    if !bounds.contains(p) {
        return Err(AntennaError::OutOfBounds(p));
    }
    if is_nefasto_position(reg, antenna.frequency, p) {
        return Err(AntennaError::Harmful(p));
    }
    if is_interference_position(reg, antenna.frequency, p) {
        return Err(AntennaError::Interference(p));
    }
    reg.insert(antenna)
}
