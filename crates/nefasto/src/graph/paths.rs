//! Reachability and simple-path enumeration between two antennas.

use std::collections::HashSet;

use crate::registry::{Bounds, Pos, Registry};

use super::traverse::bfs;
use super::types::PathCfg;

/// True iff `to` is reachable from `from` along adjacency edges within `bounds`.
pub fn path_exists(reg: &Registry, from: Pos, to: Pos, bounds: Bounds) -> bool {
    bfs(reg, from, bounds).iter().any(|v| v.pos == to)
}

/// Simple paths (no repeated position) from `from` to `to`, depth-first in
/// adjacency order, at most `cfg.max_paths` of them.
///
/// Each path lists positions from `from` to `to` inclusive. Empty without
/// searching when `to` is unreachable; the walk also stops after
/// `cfg.max_steps` extensions, so a capped result may be partial.
pub fn all_paths(
    reg: &Registry,
    from: Pos,
    to: Pos,
    bounds: Bounds,
    cfg: PathCfg,
) -> Vec<Vec<Pos>> {
    let ok = |p: Pos| bounds.contains(p) && reg.contains(p);
    if cfg.max_paths == 0 || !ok(from) || !ok(to) || !path_exists(reg, from, to, bounds) {
        return Vec::new();
    }
    let mut runner = PathRunner {
        reg,
        bounds,
        target: to,
        cfg,
        on_path: HashSet::new(),
        stack: Vec::new(),
        found: Vec::new(),
        steps: 0,
    };
    runner.on_path.insert(from);
    runner.stack.push(from);
    runner.recur(from);
    tracing::trace!(
        %from,
        %to,
        paths = runner.found.len(),
        steps = runner.steps,
        "paths enumerated"
    );
    runner.found
}

struct PathRunner<'a> {
    reg: &'a Registry,
    bounds: Bounds,
    target: Pos,
    cfg: PathCfg,
    on_path: HashSet<Pos>,
    stack: Vec<Pos>,
    found: Vec<Vec<Pos>>,
    steps: usize,
}

impl PathRunner<'_> {
    fn recur(&mut self, cur: Pos) {
        if cur == self.target {
            self.found.push(self.stack.clone());
            return;
        }
        let reg = self.reg;
        let Some(a) = reg.get(cur) else {
            return;
        };
        for &n in a.adjacency() {
            if self.found.len() >= self.cfg.max_paths || self.steps >= self.cfg.max_steps {
                return;
            }
            if !self.bounds.contains(n) || self.on_path.contains(&n) || !reg.contains(n) {
                continue;
            }
            self.steps += 1;
            self.on_path.insert(n);
            self.stack.push(n);
            self.recur(n);
            self.stack.pop();
            self.on_path.remove(&n);
        }
    }
}
