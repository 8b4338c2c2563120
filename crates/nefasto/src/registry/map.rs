//! Text-map loader.
//!
//! Coordinates: `x` is the line index, `y` the character index within the
//! line, both 0-based. Every character advances the column once (including
//! `\r`, skipped glyphs and non-ASCII characters, which are never antennas);
//! `\n` starts a new row at column 0.

use std::path::Path;

use crate::error::Result;

use super::ordered::{Registry, RegistryOrder};
use super::types::{Antenna, Bounds, Frequency};

/// Which map glyphs become antennas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AcceptPolicy {
    /// ASCII letters only; other glyphs are treated as empty cells.
    #[default]
    Letters,
    /// Every ASCII graphic glyph except `.`.
    AnyGlyph,
}

impl AcceptPolicy {
    #[inline]
    pub fn accept(self, b: u8) -> Option<Frequency> {
        let f = Frequency::from_ascii(b)?;
        match self {
            AcceptPolicy::Letters if !f.is_letter() => None,
            _ => Some(f),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LoadCfg {
    pub accept: AcceptPolicy,
    pub order: RegistryOrder,
}

/// A parsed map: its antennas plus the scanned extent (rows × widest row).
#[derive(Clone, Debug)]
pub struct LoadedMap {
    pub registry: Registry,
    pub extent: Bounds,
}

/// Parse a character grid into a registry.
///
/// Fails only when storage cannot grow; a text map cannot repeat a position.
pub fn load_from_text(text: &str, cfg: LoadCfg) -> Result<LoadedMap> {
    let mut registry = Registry::new(cfg.order);
    let (mut x, mut y) = (0i32, 0i32);
    let mut width = 0i32;
    let mut rows = 0i32;
    for c in text.chars() {
        if c == '\n' {
            x += 1;
            y = 0;
            continue;
        }
        if let Some(f) = u8::try_from(c).ok().and_then(|b| cfg.accept.accept(b)) {
            registry.insert(Antenna::new(f, x, y))?;
        }
        y += 1;
        width = width.max(y);
        rows = x + 1;
    }
    let extent = Bounds::new(rows, width);
    tracing::debug!(
        antennas = registry.len(),
        rows = extent.max_x,
        cols = extent.max_y,
        "map loaded"
    );
    Ok(LoadedMap { registry, extent })
}

/// Read and parse a map file. Missing or unreadable files surface as `Io`.
pub fn load_from_path<P: AsRef<Path>>(path: P, cfg: LoadCfg) -> Result<LoadedMap> {
    let text = std::fs::read_to_string(path.as_ref())?;
    load_from_text(&text, cfg)
}
