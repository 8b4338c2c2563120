//! Antenna registry: the ordered, exclusively owning collection of antennas.
//!
//! Purpose
//! - Store antenna records unique by position, in a fixed ordering policy
//!   (sorted row-major, append, or prepend), with O(1) lookup by position.
//! - Partition by frequency, load from text maps, dump/restore flat records.
//!
//! Layout
//! - `types.rs` (Pos, Frequency, Bounds, Antenna), `ordered.rs` (Registry),
//!   `groups.rs` (frequency groups), `map.rs` (text loader), `dump.rs`
//!   (binary records), `rand.rs` (seeded layouts).

mod dump;
mod groups;
mod map;
mod ordered;
pub mod rand;
mod types;

pub use dump::{read_dump, write_dump, RECORD_LEN};
pub use groups::{FrequencyGroup, FrequencyGroups};
pub use map::{load_from_path, load_from_text, AcceptPolicy, LoadCfg, LoadedMap};
pub use ordered::{Registry, RegistryOrder};
pub use types::{Antenna, Bounds, Frequency, Pos};
