//! Crate error type.
//!
//! Not-found conditions (removal, traversal start) are reported through
//! `Option` or empty results and never reach this enum.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::registry::Pos;

#[derive(Error, Debug)]
pub enum AntennaError {
    #[error("could not reserve storage for a new record: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("position {0} is already occupied")]
    Occupied(Pos),

    #[error("position {0} lies outside the grid")]
    OutOfBounds(Pos),

    #[error("position {0} is a nefasto point for this frequency")]
    Harmful(Pos),

    #[error("position {0} would interfere with an aligned pair of this frequency")]
    Interference(Pos),

    #[error("byte {0:#04x} is not a valid antenna frequency")]
    InvalidFrequency(u8),

    #[error("no antenna at {0}")]
    Missing(Pos),

    #[error("no antenna type '{0}' registered")]
    UnknownType(char),

    #[error("antenna at {pos} has frequency '{found}', type expects '{expected}'")]
    FrequencyMismatch {
        pos: Pos,
        expected: char,
        found: char,
    },

    #[error("dump ends with a partial record ({trailing} trailing bytes)")]
    TruncatedDump { trailing: usize },
}

pub type Result<T> = std::result::Result<T, AntennaError>;
