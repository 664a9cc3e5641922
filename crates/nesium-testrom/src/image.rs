//! Final `.nes` image: header, PRG bank and CHR bank back to back.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::chr::{CHR_ROM_SIZE, build_chr_rom};
use crate::error::Error;
use crate::header::{Header, NES_HEADER_LEN};
use crate::program::{PRG_ROM_SIZE, PrgRom, build_prg_rom};

/// Total size of the generated file.
pub const ROM_IMAGE_SIZE: usize = NES_HEADER_LEN + PRG_ROM_SIZE + CHR_ROM_SIZE;

/// Default destination, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "test.nes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    header: Header,
    prg_rom: PrgRom,
    chr_rom: Box<[u8; CHR_ROM_SIZE]>,
}

impl RomImage {
    /// Builds all three regions in memory.
    pub fn build() -> Result<Self, Error> {
        let header = Header::nrom();
        let prg_rom = build_prg_rom()?;
        let chr_rom = build_chr_rom();

        debug_assert_eq!(header.prg_rom_size(), PRG_ROM_SIZE);
        debug_assert_eq!(header.chr_rom_size(), CHR_ROM_SIZE);

        Ok(Self {
            header,
            prg_rom,
            chr_rom,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn prg_rom(&self) -> &PrgRom {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8; CHR_ROM_SIZE] {
        &self.chr_rom
    }

    /// Header ++ PRG ++ CHR.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(ROM_IMAGE_SIZE);
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(self.prg_rom.as_bytes());
        bytes.extend_from_slice(self.chr_rom.as_slice());
        bytes
    }

    /// Writes the image to `path`, replacing any existing file.
    ///
    /// The bytes go to a sibling `.tmp` file that is synced and then renamed
    /// over `path`, so `path` never holds a truncated image.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<usize, Error> {
        let path = path.as_ref();
        let bytes = self.to_bytes();
        let tmp = tmp_path(path);

        if let Err(err) = write_synced(&tmp, &bytes) {
            discard(&tmp);
            return Err(err);
        }
        if let Err(source) = fs::rename(&tmp, path) {
            discard(&tmp);
            return Err(Error::io(path, source));
        }

        info!("ROM image written to {} ({} bytes)", path.display(), bytes.len());
        Ok(bytes.len())
    }
}

/// Builds the image and writes it to `path`, returning the number of bytes written.
pub fn write_rom(path: impl AsRef<Path>) -> Result<usize, Error> {
    RomImage::build()?.write_to(path)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let mut file = File::create(path).map_err(|source| Error::io(path, source))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(|source| Error::io(path, source))?;
    debug!("synced {}", path.display());
    Ok(())
}

fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!("failed to remove {}: {}", path.display(), err);
        }
    }
}
