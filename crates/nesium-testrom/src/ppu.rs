//! PPU register values written by the generated program.

use bitflags::bitflags;

bitflags! {
    /// PPUCTRL bits. Only NMI enable and the background table are set by the
    /// generated program.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Control: u8 {
        /// Base nametable, `$2000 + 0x400 * n`.
        const NAMETABLE = 0b0000_0011;
        /// VRAM address increment of 32 instead of 1 (bit 2).
        const INCREMENT_32 = 0b0000_0100;
        /// Sprite pattern table at `$1000` for 8x8 sprites (bit 3).
        const SPRITE_TABLE = 0b0000_1000;
        /// Background pattern table at `$1000` (bit 4).
        const BACKGROUND_TABLE = 0b0001_0000;
        /// 8x16 sprites (bit 5).
        const SPRITE_SIZE_16 = 0b0010_0000;
        /// EXT pin direction; never set on a stock console.
        const MASTER_SLAVE = 0b0100_0000;
        /// NMI at the start of every VBlank.
        const GENERATE_NMI = 0b1000_0000;
    }
}

bitflags! {
    /// PPUMASK bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Mask: u8 {
        const GRAYSCALE = 0b0000_0001;
        const SHOW_BACKGROUND_LEFT = 0b0000_0010;
        const SHOW_SPRITES_LEFT = 0b0000_0100;
        const SHOW_BACKGROUND = 0b0000_1000;
        const SHOW_SPRITES = 0b0001_0000;
        const EMPHASIZE_RED = 0b0010_0000;
        const EMPHASIZE_GREEN = 0b0100_0000;
        const EMPHASIZE_BLUE = 0b1000_0000;
    }
}

bitflags! {
    /// PPUSTATUS bits polled by the warm-up loop.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        const SPRITE_OVERFLOW = 0b0010_0000;
        const SPRITE_ZERO_HIT = 0b0100_0000;
        /// Set while the PPU is in VBlank; mirrored into the CPU N flag by `LDA $2002`.
        const VERTICAL_BLANK = 0b1000_0000;
    }
}

/// Control value written once the tables are uploaded: NMI on, background from `$1000`.
pub const DISPLAY_CONTROL: Control = Control::GENERATE_NMI.union(Control::BACKGROUND_TABLE);

/// Mask value enabling both layers, including the leftmost eight pixels.
pub const DISPLAY_MASK: Mask = Mask::SHOW_BACKGROUND_LEFT
    .union(Mask::SHOW_SPRITES_LEFT)
    .union(Mask::SHOW_BACKGROUND)
    .union(Mask::SHOW_SPRITES);
