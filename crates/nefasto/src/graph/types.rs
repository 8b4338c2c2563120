//! Traversal results and search configuration.

use crate::registry::{Antenna, Pos};

/// One visited antenna, borrowed from the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit<'a> {
    pub pos: Pos,
    pub antenna: &'a Antenna,
}

/// Visitation sequence; no position appears twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Traversal<'a> {
    pub visits: Vec<Visit<'a>>,
}

impl<'a> Traversal<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.visits.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Visit<'a>> {
        self.visits.iter()
    }
    pub fn positions(&self) -> Vec<Pos> {
        self.visits.iter().map(|v| v.pos).collect()
    }
}

/// Which traversal to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchKind {
    #[default]
    DepthFirst,
    BreadthFirst,
}

/// Path enumeration limits.
#[derive(Clone, Copy, Debug)]
pub struct PathCfg {
    /// Stop after this many paths. Same-frequency groups are complete graphs,
    /// so the number of simple paths grows factorially with group size.
    pub max_paths: usize,
    /// Stop after extending a partial path this many times, found or not.
    pub max_steps: usize,
}

impl Default for PathCfg {
    fn default() -> Self {
        Self {
            max_paths: 1024,
            max_steps: 1_000_000,
        }
    }
}
