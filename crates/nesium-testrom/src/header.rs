//! iNES header emission.
//!
//! The first 16 bytes of every `.nes` file are the *iNES header*: the `NES<EOF>`
//! magic, the PRG/CHR sizes in bank units and two flag bytes that split the
//! mapper number across their high nibbles. The generator only ever writes
//! the NROM layout returned by [`Header::nrom`], but the encoder is written
//! against the whole iNES 1.0 field set so [`Header::parse`] can read the
//! result back for verification.
//!
//! ```text
//! 0-3  "NES" 0x1A
//! 4    PRG ROM units (16 KiB)
//! 5    CHR ROM units (8 KiB)
//! 6    flags 6: mapper low nibble | four-screen | trainer | battery | mirroring
//! 7    flags 7: mapper high nibble | NES 2.0 id | PlayChoice | Vs.
//! 8-15 zero padding
//! ```

use bitflags::bitflags;

use crate::error::Error;

/// Magic signature opening every iNES file.
pub const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;

/// Bytes per PRG ROM unit advertised in header byte 4.
pub const PRG_ROM_UNIT: usize = 16 * 1024;

/// Bytes per CHR ROM unit advertised in header byte 5.
pub const CHR_ROM_UNIT: usize = 8 * 1024;

bitflags! {
    /// Header byte 6.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags6: u8 {
        const VERTICAL_MIRRORING = 1 << 0;
        const PERSISTENT_RAM     = 1 << 1;
        const HAS_TRAINER        = 1 << 2;
        const FOUR_SCREEN        = 1 << 3;
        /// Mapper bits 0-3.
        const MAPPER_LOW         = 0xF0;
    }
}

bitflags! {
    /// Header byte 7.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags7: u8 {
        const VS_SYSTEM   = 1 << 0;
        const PLAYCHOICE  = 1 << 1;
        /// `0b10` here marks a NES 2.0 header.
        const FORMAT      = 0b0000_1100;
        /// Mapper bits 4-7.
        const MAPPER_HIGH = 0xF0;
    }
}

/// Nametable arrangement wired on the cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// Header flavour, detected from bits 2-3 of flags 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RomFormat {
    /// iNES 1.0, the only flavour this crate writes.
    INes,
    /// NES 2.0 extended header.
    Nes20,
    /// Pre-standard dumps with garbage in bytes 7-15.
    Archaic,
}

impl RomFormat {
    fn from_flags7(flags7: Flags7) -> Self {
        match (flags7 & Flags7::FORMAT).bits() >> 2 {
            0b10 => Self::Nes20,
            0b00 => Self::INes,
            _ => Self::Archaic,
        }
    }
}

/// iNES 1.0 header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    /// PRG ROM size in 16 KiB units.
    pub prg_rom_units: u8,
    /// CHR ROM size in 8 KiB units.
    pub chr_rom_units: u8,
    /// Mapper ID (0 == NROM).
    pub mapper: u8,
    /// How the PPU nametables are mirrored.
    pub mirroring: Mirroring,
    /// Battery-backed PRG RAM present.
    pub battery_backed_ram: bool,
    /// 512-byte trainer between header and PRG data.
    pub trainer_present: bool,
}

impl Header {
    /// NROM-128: one PRG bank, one CHR bank, mapper 0, horizontal mirroring.
    pub const fn nrom() -> Self {
        Self {
            prg_rom_units: 1,
            chr_rom_units: 1,
            mapper: 0,
            mirroring: Mirroring::Horizontal,
            battery_backed_ram: false,
            trainer_present: false,
        }
    }

    /// Amount of PRG ROM in bytes.
    pub const fn prg_rom_size(&self) -> usize {
        self.prg_rom_units as usize * PRG_ROM_UNIT
    }

    /// Amount of CHR ROM in bytes.
    pub const fn chr_rom_size(&self) -> usize {
        self.chr_rom_units as usize * CHR_ROM_UNIT
    }

    pub fn flags6(&self) -> Flags6 {
        let mut flags = Flags6::from_bits_retain(self.mapper << 4);
        match self.mirroring {
            Mirroring::Horizontal => {}
            Mirroring::Vertical => flags.insert(Flags6::VERTICAL_MIRRORING),
            Mirroring::FourScreen => flags.insert(Flags6::FOUR_SCREEN),
        }
        flags.set(Flags6::PERSISTENT_RAM, self.battery_backed_ram);
        flags.set(Flags6::HAS_TRAINER, self.trainer_present);
        flags
    }

    pub fn flags7(&self) -> Flags7 {
        Flags7::from_bits_retain(self.mapper & 0xF0)
    }

    /// Serializes the header into its 16-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; NES_HEADER_LEN] {
        let mut bytes = [0u8; NES_HEADER_LEN];
        bytes[0..4].copy_from_slice(NES_MAGIC);
        bytes[4] = self.prg_rom_units;
        bytes[5] = self.chr_rom_units;
        bytes[6] = self.flags6().bits();
        bytes[7] = self.flags7().bits();
        bytes
    }

    /// Parse an iNES 1.0 header from the given byte slice.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        let bytes = bytes.get(..NES_HEADER_LEN).ok_or(Error::TooShort {
            actual: bytes.len(),
        })?;

        if &bytes[0..4] != NES_MAGIC {
            return Err(Error::InvalidMagic);
        }

        let flags6 = Flags6::from_bits_truncate(bytes[6]);
        let flags7 = Flags7::from_bits_truncate(bytes[7]);

        match RomFormat::from_flags7(flags7) {
            RomFormat::INes => {}
            format => return Err(Error::UnsupportedFormat(format)),
        }

        let mirroring = if flags6.contains(Flags6::FOUR_SCREEN) {
            Mirroring::FourScreen
        } else if flags6.contains(Flags6::VERTICAL_MIRRORING) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(Self {
            prg_rom_units: bytes[4],
            chr_rom_units: bytes[5],
            mapper: (flags7 & Flags7::MAPPER_HIGH).bits()
                | (flags6 & Flags6::MAPPER_LOW).bits() >> 4,
            mirroring,
            battery_backed_ram: flags6.contains(Flags6::PERSISTENT_RAM),
            trainer_present: flags6.contains(Flags6::HAS_TRAINER),
        })
    }
}
