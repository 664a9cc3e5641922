//! CHR ROM contents: procedurally generated pattern tiles.
//!
//! A tile is 16 bytes: eight bytes of bit plane 0 followed by eight bytes of bit
//! plane 1, one byte per pixel row. Even tiles get a checkerboard whose planes
//! are identical (colors 0 and 3); odd tiles get a diagonal gradient whose
//! planes are complementary (colors 1 and 2).
//!
//! Only the first pattern table (`$0000`, 256 tiles) is generated. The second
//! half of the bank stays zero.

use tracing::debug;

use crate::header::CHR_ROM_UNIT;
use crate::memory::ppu::{CHR_SIZE, PATTERN_TABLE_SIZE};

/// Size of the single NROM CHR bank.
pub const CHR_ROM_SIZE: usize = CHR_ROM_UNIT;

/// Bytes per tile (two 8-byte planes).
pub const TILE_SIZE: usize = 16;
/// Pixel rows per tile.
pub const TILE_ROWS: usize = 8;
/// Tiles per pattern table.
pub const TILES_PER_TABLE: usize = PATTERN_TABLE_SIZE / TILE_SIZE;
/// Tiles in the whole CHR bank.
pub const TILE_COUNT: usize = CHR_ROM_SIZE / TILE_SIZE;

/// Checkerboard row byte for even rows.
pub const CHECKER_EVEN_ROW: u8 = 0xAA;
/// Checkerboard row byte for odd rows.
pub const CHECKER_ODD_ROW: u8 = 0x55;

const _: () = assert!(CHR_ROM_SIZE == CHR_SIZE);

/// Generation rule, selected by tile index parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Checkerboard,
    Gradient,
}

impl Pattern {
    pub const fn for_tile(tile: usize) -> Self {
        if tile % 2 == 0 {
            Pattern::Checkerboard
        } else {
            Pattern::Gradient
        }
    }

    /// Plane 0 and plane 1 bytes for one row of `tile`.
    pub const fn row(self, tile: usize, row: usize) -> (u8, u8) {
        match self {
            Pattern::Checkerboard => {
                let bits = if row % 2 == 0 {
                    CHECKER_EVEN_ROW
                } else {
                    CHECKER_ODD_ROW
                };
                (bits, bits)
            }
            Pattern::Gradient => {
                let bits = (tile as u8).wrapping_add((row as u8).wrapping_mul(16));
                (bits, !bits)
            }
        }
    }
}

/// The 16 bytes of `tile`, plane 0 first.
pub fn tile_bytes(tile: usize) -> [u8; TILE_SIZE] {
    let pattern = Pattern::for_tile(tile);
    let mut bytes = [0u8; TILE_SIZE];
    for row in 0..TILE_ROWS {
        let (plane0, plane1) = pattern.row(tile, row);
        bytes[row] = plane0;
        bytes[row + TILE_ROWS] = plane1;
    }
    bytes
}

/// Builds the CHR bank: tiles 0..256 generated, the `$1000` table left zero.
pub fn build_chr_rom() -> Box<[u8; CHR_ROM_SIZE]> {
    let mut bytes = Box::new([0u8; CHR_ROM_SIZE]);
    for (tile, chunk) in bytes
        .chunks_exact_mut(TILE_SIZE)
        .take(TILES_PER_TABLE)
        .enumerate()
    {
        chunk.copy_from_slice(&tile_bytes(tile));
    }
    debug!("CHR: {TILES_PER_TABLE} of {TILE_COUNT} tiles generated, {CHR_ROM_SIZE} bytes");
    bytes
}

/// 2-bit color index of pixel `x` (0 = leftmost) in `row` of a tile.
pub fn pixel(tile: &[u8; TILE_SIZE], x: usize, row: usize) -> u8 {
    debug_assert!(x < 8 && row < TILE_ROWS, "pixel ({x}, {row}) outside the tile");
    let shift = 7 - x;
    let low = (tile[row] >> shift) & 1;
    let high = (tile[row + TILE_ROWS] >> shift) & 1;
    low | (high << 1)
}
