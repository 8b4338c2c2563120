//! Grid positions, frequencies, bounds and the antenna record.
//!
//! Kept small and explicit so `ordered`, `groups` and the graph code stay easy
//! to read.

use std::fmt;

use nalgebra::Vector2;

use crate::error::AntennaError;

/// Grid position; `x` is the row (line) index, `y` the column index.
///
/// Ordering is lexicographic on `(x, y)`, i.e. row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
    /// Widened to `i64` so pair arithmetic on any two positions cannot overflow.
    #[inline]
    pub fn to_wide(self) -> Vector2<i64> {
        Vector2::new(i64::from(self.x), i64::from(self.y))
    }
    /// Back from the widened form; `None` outside the `i32` range.
    #[inline]
    pub fn from_wide(v: Vector2<i64>) -> Option<Self> {
        Some(Self::new(i32::try_from(v.x).ok()?, i32::try_from(v.y).ok()?))
    }
}

impl From<(i32, i32)> for Pos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Antenna frequency: one printable ASCII byte other than `.`.
///
/// Case-sensitive; `'a'` and `'A'` are different frequencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Frequency(u8);

impl Frequency {
    /// Accepts any ASCII graphic byte except `.` (the empty-cell marker).
    #[inline]
    pub fn from_ascii(b: u8) -> Option<Self> {
        (b.is_ascii_graphic() && b != b'.').then_some(Self(b))
    }
    #[inline]
    pub fn is_letter(self) -> bool {
        self.0.is_ascii_alphabetic()
    }
    #[inline]
    pub fn as_byte(self) -> u8 {
        self.0
    }
    #[inline]
    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl TryFrom<char> for Frequency {
    type Error = AntennaError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        u8::try_from(c)
            .ok()
            .and_then(Frequency::from_ascii)
            .ok_or(AntennaError::InvalidFrequency(c as u8))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Rectangular extent `[0, max_x) × [0, max_y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    #[inline]
    pub const fn new(max_x: i32, max_y: i32) -> Self {
        Self { max_x, max_y }
    }
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.x >= 0 && p.x < self.max_x && p.y >= 0 && p.y < self.max_y
    }
    /// Number of cells; zero for degenerate (non-positive) extents.
    #[inline]
    pub fn cell_count(&self) -> usize {
        if self.max_x <= 0 || self.max_y <= 0 {
            0
        } else {
            (self.max_x as usize).saturating_mul(self.max_y as usize)
        }
    }
    /// Row-major cell index of `p`, if inside.
    #[inline]
    pub fn cell_index(&self, p: Pos) -> Option<usize> {
        self.contains(p)
            .then(|| p.x as usize * self.max_y as usize + p.y as usize)
    }
}

/// One antenna: frequency, position and its same-frequency neighbours.
///
/// Adjacency entries are position keys resolved through the owning
/// [`Registry`](super::Registry); they never own or point at other records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Antenna {
    pub frequency: Frequency,
    pub pos: Pos,
    adjacency: Vec<Pos>,
}

impl Antenna {
    pub fn new(frequency: Frequency, x: i32, y: i32) -> Self {
        Self {
            frequency,
            pos: Pos::new(x, y),
            adjacency: Vec::new(),
        }
    }

    /// Neighbour positions in the order they were connected.
    #[inline]
    pub fn adjacency(&self) -> &[Pos] {
        &self.adjacency
    }

    /// Set-semantics insert: own position and repeats are ignored.
    /// Returns whether the edge was new.
    pub(crate) fn add_adjacent(&mut self, p: Pos) -> bool {
        if p == self.pos || self.adjacency.contains(&p) {
            return false;
        }
        self.adjacency.push(p);
        true
    }

    pub(crate) fn remove_adjacent(&mut self, p: Pos) -> bool {
        let before = self.adjacency.len();
        self.adjacency.retain(|q| *q != p);
        before != self.adjacency.len()
    }

    pub(crate) fn clear_adjacency(&mut self) -> usize {
        let n = self.adjacency.len();
        self.adjacency.clear();
        n
    }
}
