//! Curated surface for the CLI and other in-workspace callers (UNSTABLE).
//!
//! Re-exports plus a few end-to-end helpers that chain the modules the way
//! the command line uses them.

pub use crate::graph::{
    all_paths, bfs, connect_frequency, connect_same_frequency, dfs, disconnect_all, path_exists,
    traverse, PathCfg, SearchKind, Traversal, Visit,
};
pub use crate::nefasto::{
    derive, interference_points, is_interference_position, is_nefasto_position, pair_points,
    place_checked, render_map, NefastoPoints, NefastoPolicy, NEFASTO_GLYPH,
};
pub use crate::registry::rand::{random_registry, RandomLayoutCfg};
pub use crate::registry::{
    load_from_path, load_from_text, read_dump, write_dump, AcceptPolicy, Antenna, Bounds,
    Frequency, FrequencyGroup, FrequencyGroups, LoadCfg, LoadedMap, Pos, Registry, RegistryOrder,
    RECORD_LEN,
};

/// Load a map, derive its nefasto points under `policy` and render the marked map.
///
/// Pre: `text` is a character grid.
/// Post: returns the derived points and the map with every nefasto cell set to `#`.
pub fn mark_map(
    text: &str,
    cfg: LoadCfg,
    policy: NefastoPolicy,
) -> crate::Result<(NefastoPoints, String)> {
    let map = load_from_text(text, cfg)?;
    let points = derive(&map.registry, policy);
    let rendered = render_map(text, points.iter());
    Ok((points, rendered))
}

/// Load a map and connect its same-frequency antennas, ready for traversal.
pub fn load_network(text: &str, cfg: LoadCfg) -> crate::Result<LoadedMap> {
    let mut map = load_from_text(text, cfg)?;
    connect_same_frequency(&mut map.registry);
    Ok(map)
}
