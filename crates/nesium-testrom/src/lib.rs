//! Synthetic NROM test cartridge for the Nesium test harness.
//!
//! The image is built entirely from constants: a 16-byte iNES header, one
//! 16 KiB PRG bank holding a small boot program that puts a tile ramp on screen,
//! and one 8 KiB CHR bank of procedurally generated tiles. The same bytes come
//! out on every run.
//!
//! ```no_run
//! let written = nesium_testrom::write_rom(nesium_testrom::DEFAULT_OUTPUT)?;
//! assert_eq!(written, nesium_testrom::ROM_IMAGE_SIZE);
//! # Ok::<(), nesium_testrom::Error>(())
//! ```

pub mod asm;
pub mod chr;
pub mod cpu;
pub mod error;
pub mod header;
pub mod image;
pub mod memory;
pub mod ppu;
pub mod program;

pub use error::Error;
pub use header::Header;
pub use image::{DEFAULT_OUTPUT, ROM_IMAGE_SIZE, RomImage, write_rom};
