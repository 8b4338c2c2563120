//! Antenna grids: registry, nefasto (harmful interference) points and the
//! same-frequency graph.
//!
//! Coordinates follow the text maps antennas are loaded from: `x` is the row
//! (line) index and `y` the column index, both 0-based.
//!
//! API Policy
//! - `registry`, `nefasto` and `graph` are the working surface; `api` and
//!   `prelude` re-export the common items. There is no stability promise
//!   beyond the workspace.

pub mod api;
pub mod error;
pub mod graph;
pub mod nefasto;
pub mod registry;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{AntennaError, Result};
pub use registry::{Antenna, Bounds, Frequency, Pos, Registry};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{AntennaError, Result};
    pub use crate::graph::{bfs, connect_same_frequency, dfs, SearchKind, Traversal};
    pub use crate::nefasto::{derive, render_map, NefastoPoints, NefastoPolicy};
    pub use crate::registry::{
        load_from_path, load_from_text, AcceptPolicy, Antenna, Bounds, Frequency, LoadCfg, Pos,
        Registry, RegistryOrder,
    };
}
