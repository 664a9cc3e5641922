//! Addresses and sizes from the NES memory map that the generated ROM touches.
//!
//! The generated program talks to the PPU through its CPU-mapped registers and
//! lands its vectors at the top of the CPU address space.

/// CPU side.
pub mod cpu {
    /// First CPU address mapped to PRG ROM.
    pub const PRG_ROM_START: u16 = 0x8000;

    /// Little-endian handler addresses at the top of the CPU address space.
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Vector {
        Nmi = 0xFFFA,
        /// Entry point after power-on and reset.
        Reset = 0xFFFC,
        /// Shared by IRQ and BRK.
        Irq = 0xFFFE,
    }

    impl Vector {
        pub const ALL: [Vector; 3] = [Vector::Nmi, Vector::Reset, Vector::Irq];

        pub const fn addr(self) -> u16 {
            self as u16
        }
    }

    /// Offset of a CPU address inside a 16 KiB PRG bank mapped at `$8000`.
    ///
    /// NROM-128 mirrors its single bank at `$C000`, so the mask folds both
    /// windows onto the same bank offset.
    pub const fn prg_offset(addr: u16) -> usize {
        (addr & 0x3FFF) as usize
    }
}

/// PPU register layout and VRAM regions.
pub mod ppu {
    /// Background palette 0, color 0.
    pub const PALETTE_BASE: u16 = 0x3F00;
    /// Palette RAM bytes covering the four background palettes.
    pub const BACKGROUND_PALETTE_SIZE: usize = 0x10;

    /// Top-left nametable.
    pub const NAMETABLE_BASE: u16 = 0x2000;
    /// Size of a single nametable in bytes, attribute table included.
    pub const NAMETABLE_SIZE: u16 = 0x0400;
    /// Attribute table of nametable 0 (`$23C0`).
    pub const ATTRIBUTE_TABLE_BASE: u16 = 0x23C0;
    /// Attribute bytes per nametable.
    pub const ATTRIBUTE_TABLE_SIZE: u16 = 0x40;

    /// One pattern table, 256 tiles.
    pub const PATTERN_TABLE_SIZE: usize = 0x1000;
    /// `$0000-$1FFF`, both pattern tables.
    pub const CHR_SIZE: usize = 0x2000;

    /// PPU registers as seen from the CPU bus (first mirror only).
    #[repr(u16)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Register {
        /// PPUCTRL
        Control = 0x2000,
        /// PPUMASK
        Mask = 0x2001,
        /// PPUSTATUS
        Status = 0x2002,
        /// PPUADDR, high byte then low byte
        Addr = 0x2006,
        /// PPUDATA
        Data = 0x2007,
    }

    impl Register {
        pub const fn addr(self) -> u16 {
            self as u16
        }
    }
}
