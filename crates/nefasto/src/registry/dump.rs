//! Flat binary dump of antenna records.
//!
//! Record layout (9 bytes): frequency byte, `x` as little-endian `i32`,
//! `y` as little-endian `i32`. Records follow registry order. No header,
//! count or checksum; adjacency is not stored.

use std::io::{Read, Write};

use crate::error::{AntennaError, Result};

use super::ordered::{Registry, RegistryOrder};
use super::types::{Antenna, Frequency};

pub const RECORD_LEN: usize = 9;

#[inline]
fn encode(a: &Antenna) -> [u8; RECORD_LEN] {
    let mut rec = [0u8; RECORD_LEN];
    rec[0] = a.frequency.as_byte();
    rec[1..5].copy_from_slice(&a.pos.x.to_le_bytes());
    rec[5..9].copy_from_slice(&a.pos.y.to_le_bytes());
    rec
}

#[inline]
fn decode(rec: &[u8; RECORD_LEN]) -> Result<Antenna> {
    let f = Frequency::from_ascii(rec[0]).ok_or(AntennaError::InvalidFrequency(rec[0]))?;
    let x = i32::from_le_bytes([rec[1], rec[2], rec[3], rec[4]]);
    let y = i32::from_le_bytes([rec[5], rec[6], rec[7], rec[8]]);
    Ok(Antenna::new(f, x, y))
}

/// Write every record in registry order. Returns the number of records written.
pub fn write_dump<W: Write>(reg: &Registry, mut w: W) -> Result<usize> {
    for a in reg {
        w.write_all(&encode(a))?;
    }
    w.flush()?;
    Ok(reg.len())
}

/// Rebuild a registry from a record stream.
///
/// The target ordering is the caller's choice; `Append` reproduces the dumped
/// order exactly.
pub fn read_dump<R: Read>(mut r: R, order: RegistryOrder) -> Result<Registry> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)?;
    let chunks = bytes.chunks_exact(RECORD_LEN);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        return Err(AntennaError::TruncatedDump { trailing });
    }
    let mut reg = Registry::new(order);
    for chunk in chunks {
        let mut rec = [0u8; RECORD_LEN];
        rec.copy_from_slice(chunk);
        reg.insert(decode(&rec)?)?;
    }
    tracing::debug!(records = reg.len(), "dump restored");
    Ok(reg)
}
