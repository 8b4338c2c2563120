//! Depth-first and breadth-first traversal over same-frequency adjacency.
//!
//! Every call owns a fresh visited set. Neighbours are skipped silently when
//! they fall outside the bounds or no longer resolve to an antenna.

use std::collections::{HashSet, VecDeque};

use crate::registry::{Antenna, Bounds, Pos, Registry};

use super::types::{SearchKind, Traversal, Visit};

/// Depth-first pre-order from the antenna at `start`.
///
/// Empty when `start` holds no antenna or lies outside `bounds`.
pub fn dfs(reg: &Registry, start: Pos, bounds: Bounds) -> Traversal<'_> {
    Walker::new(reg, bounds).dfs(start)
}

/// Level-order from the antenna at `start`; neighbours are marked when enqueued.
///
/// Empty when `start` holds no antenna or lies outside `bounds`.
pub fn bfs(reg: &Registry, start: Pos, bounds: Bounds) -> Traversal<'_> {
    Walker::new(reg, bounds).bfs(start)
}

pub fn traverse(reg: &Registry, start: Pos, bounds: Bounds, kind: SearchKind) -> Traversal<'_> {
    match kind {
        SearchKind::DepthFirst => dfs(reg, start, bounds),
        SearchKind::BreadthFirst => bfs(reg, start, bounds),
    }
}

/// Per-call traversal state.
struct Walker<'a> {
    reg: &'a Registry,
    bounds: Bounds,
    visited: HashSet<Pos>,
    out: Vec<Visit<'a>>,
}

impl<'a> Walker<'a> {
    fn new(reg: &'a Registry, bounds: Bounds) -> Self {
        Self {
            reg,
            bounds,
            visited: HashSet::with_capacity(reg.len()),
            out: Vec::new(),
        }
    }

    /// In bounds, unvisited and resolvable.
    fn admit(&self, p: Pos) -> Option<&'a Antenna> {
        let reg = self.reg;
        if !self.bounds.contains(p) || self.visited.contains(&p) {
            return None;
        }
        reg.get(p)
    }

    fn record(&mut self, a: &'a Antenna) {
        self.out.push(Visit {
            pos: a.pos,
            antenna: a,
        });
    }

    fn finish(self, kind: SearchKind, start: Pos) -> Traversal<'a> {
        tracing::trace!(?kind, %start, visited = self.out.len(), "traversal done");
        Traversal { visits: self.out }
    }

    // Explicit stack; pushing neighbours in reverse and checking `visited` on
    // pop yields the same order as the recursive formulation.
    fn dfs(mut self, start: Pos) -> Traversal<'a> {
        let mut stack: Vec<Pos> = Vec::new();
        if self.admit(start).is_some() {
            stack.push(start);
        }
        while let Some(p) = stack.pop() {
            let Some(a) = self.admit(p) else {
                continue;
            };
            self.visited.insert(p);
            self.record(a);
            for &n in a.adjacency().iter().rev() {
                if self.admit(n).is_some() {
                    stack.push(n);
                }
            }
        }
        self.finish(SearchKind::DepthFirst, start)
    }

    fn bfs(mut self, start: Pos) -> Traversal<'a> {
        let mut queue: VecDeque<&'a Antenna> = VecDeque::new();
        if let Some(a) = self.admit(start) {
            self.visited.insert(start);
            queue.push_back(a);
        }
        while let Some(a) = queue.pop_front() {
            self.record(a);
            for &n in a.adjacency() {
                if let Some(b) = self.admit(n) {
                    self.visited.insert(n);
                    queue.push_back(b);
                }
            }
        }
        self.finish(SearchKind::BreadthFirst, start)
    }
}
