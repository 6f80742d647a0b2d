//! Co-channel interferer selection
//!
//! Static assignment tables for the 19-cell layout. Which (cell, sector)
//! pairs share the victim's sub-band depends only on the reuse factor and
//! the fixed topology, never on the snapshot geometry.
//!
//! | N | Co-channel set |
//! |---|----------------|
//! | 1 | Sector 0 of every other cell, plus sectors whose users sit inside the victim wedge |
//! | 3 | Sector 0 of every other cell |
//! | 9 | Sector 0 of the six mid-edge ring-2 cells (3-cell cluster, D = 3R) |

use crate::{SimError, NUM_CELLS, NUM_SECTORS, VICTIM_CELL, VICTIM_SECTOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal reuse: co-channel sectors per cell.
///
/// Sector 0 everywhere except the victim's own cell, plus every sector whose
/// centroid bearing from site 0 falls in the victim wedge [0°, 120°].
pub const REUSE_1_SECTORS: [&[usize]; NUM_CELLS] = [
    &[],        // 0: victim site
    &[0, 1, 2], // 1
    &[0, 1, 2], // 2
    &[0],       // 3
    &[0],       // 4
    &[0],       // 5
    &[0],       // 6
    &[0, 1, 2], // 7
    &[0, 1, 2], // 8
    &[0, 2],    // 9
    &[0, 1, 2], // 10
    &[0],       // 11
    &[0],       // 12
    &[0],       // 13
    &[0],       // 14
    &[0],       // 15
    &[0],       // 16
    &[0, 1],    // 17
    &[0],       // 18
];

/// Reuse 9: cells sharing the victim's cluster colour (sector 0 only)
pub const REUSE_9_CELLS: [usize; 6] = [7, 9, 11, 13, 15, 17];

/// Frequency reuse factor (number of sub-bands)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ReuseFactor {
    #[default]
    One,
    Three,
    Nine,
}

impl ReuseFactor {
    pub const ALL: [ReuseFactor; 3] = [ReuseFactor::One, ReuseFactor::Three, ReuseFactor::Nine];

    /// Number of sub-bands the spectrum is split into
    pub fn sub_bands(self) -> u32 {
        match self {
            ReuseFactor::One => 1,
            ReuseFactor::Three => 3,
            ReuseFactor::Nine => 9,
        }
    }

    /// Whether (cell, sector) transmits on the victim's sub-band.
    ///
    /// Out-of-range indices are never co-channel.
    pub fn is_co_channel(self, cell: usize, sector: usize) -> bool {
        if cell >= NUM_CELLS || sector >= NUM_SECTORS {
            return false;
        }
        if cell == VICTIM_CELL && sector == VICTIM_SECTOR {
            return false;
        }

        match self {
            ReuseFactor::One => REUSE_1_SECTORS[cell].contains(&sector),
            ReuseFactor::Three => sector == 0 && cell != VICTIM_CELL,
            ReuseFactor::Nine => sector == 0 && REUSE_9_CELLS.contains(&cell),
        }
    }

    /// All co-channel (cell, sector) pairs, in cell-major order
    pub fn interferers(self) -> impl Iterator<Item = (usize, usize)> {
        (0..NUM_CELLS)
            .flat_map(|cell| (0..NUM_SECTORS).map(move |sector| (cell, sector)))
            .filter(move |&(cell, sector)| self.is_co_channel(cell, sector))
    }
}

impl TryFrom<u32> for ReuseFactor {
    type Error = SimError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReuseFactor::One),
            3 => Ok(ReuseFactor::Three),
            9 => Ok(ReuseFactor::Nine),
            other => Err(SimError::InvalidReuseFactor(other)),
        }
    }
}

impl From<ReuseFactor> for u32 {
    fn from(reuse: ReuseFactor) -> Self {
        reuse.sub_bands()
    }
}

impl fmt::Display for ReuseFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sub_bands())
    }
}

/// Free-function form of [`ReuseFactor::is_co_channel`]
pub fn is_co_channel(cell: usize, sector: usize, reuse: ReuseFactor) -> bool {
    reuse.is_co_channel(cell, sector)
}
