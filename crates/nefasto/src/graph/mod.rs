//! Same-frequency antenna graph: adjacency builder and traversals.
//!
//! Purpose
//! - Connect every pair of same-frequency antennas with a bidirectional edge
//!   stored as position keys on each antenna (no ownership, no pointers).
//! - Walk the relation depth-first or breadth-first inside a rectangular
//!   bound, and answer reachability / simple-path queries.
//!
//! Layout
//! - `types.rs` (Visit, Traversal, SearchKind, PathCfg), `build.rs`
//!   (adjacency), `traverse.rs` (DFS/BFS), `paths.rs` (path queries).

mod build;
mod paths;
mod traverse;
mod types;

pub use build::{connect_frequency, connect_same_frequency, disconnect_all};
pub use paths::{all_paths, path_exists};
pub use traverse::{bfs, dfs, traverse};
pub use types::{PathCfg, SearchKind, Traversal, Visit};

#[cfg(test)]
mod tests;
