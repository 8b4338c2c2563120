//! Nefasto (harmful interference) points.
//!
//! Purpose
//! - For every ordered pair of distinct same-frequency antennas A, B with
//!   delta d = B − A, project the two points A − d and B + d.
//! - Expose both retention policies explicitly: unbounded (sorted, duplicates
//!   kept) and bounded (clipped to the grid, each point once).
//!
//! Also here: point queries and guarded placement (`query.rs`) and the map
//! renderer that marks nefasto cells with `#` (`render.rs`).

mod derive;
mod query;
mod render;

pub use derive::{derive, pair_points, NefastoPoints, NefastoPolicy};
pub use query::{
    interference_points, is_interference_position, is_nefasto_position, place_checked,
};
pub use render::{render_map, NEFASTO_GLYPH};
