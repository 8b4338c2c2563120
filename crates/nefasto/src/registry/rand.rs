//! Seeded random antenna layouts for benches and property tests.
//!
//! Positions are drawn without replacement from the cells of `bounds`, so the
//! uniqueness invariant holds by construction. Frequencies are drawn from the
//! first `frequencies` upper-case letters.

use rand::rngs::StdRng;
use rand::{seq::index, Rng, SeedableRng};

use super::ordered::{Registry, RegistryOrder};
use super::types::{Antenna, Bounds, Frequency};

#[derive(Clone, Copy, Debug)]
pub struct RandomLayoutCfg {
    pub bounds: Bounds,
    /// Requested antenna count; clamped to the number of cells.
    pub antennas: usize,
    /// Number of distinct letters in use, clamped to `1..=26`.
    pub frequencies: u8,
    pub order: RegistryOrder,
}

impl Default for RandomLayoutCfg {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(12, 12),
            antennas: 16,
            frequencies: 3,
            order: RegistryOrder::Sorted,
        }
    }
}

/// Draw a layout. The same `(cfg, seed)` always yields the same registry.
pub fn random_registry(cfg: RandomLayoutCfg, seed: u64) -> Registry {
    let mut rng = StdRng::seed_from_u64(seed);
    let cells = cfg.bounds.cell_count();
    let n = cfg.antennas.min(cells);
    let letters = cfg.frequencies.clamp(1, 26);
    let mut reg = Registry::new(cfg.order);
    if n == 0 {
        return reg;
    }
    let width = cfg.bounds.max_y as usize;
    for cell in index::sample(&mut rng, cells, n) {
        let letter = b'A' + rng.gen_range(0..letters);
        let Some(f) = Frequency::from_ascii(letter) else {
            continue;
        };
        let (x, y) = ((cell / width) as i32, (cell % width) as i32);
        // Sampled cells are distinct, so insertion cannot collide.
        if reg.insert(Antenna::new(f, x, y)).is_err() {
            break;
        }
    }
    reg
}
