use std::path::PathBuf;

use thiserror::Error;

use crate::asm::AsmError;
use crate::header::{NES_HEADER_LEN, RomFormat};

#[derive(Debug, Error)]
pub enum Error {
    /// Provided buffer is shorter than the 16-byte header.
    #[error("header expected {expected} bytes, got {actual}", expected = NES_HEADER_LEN)]
    TooShort { actual: usize },

    /// Magic number ("NES<EOF>") is missing.
    #[error("missing NES magic bytes")]
    InvalidMagic,

    /// Header uses a flavour this crate does not emit.
    #[error("unsupported iNES header format: {0:?}")]
    UnsupportedFormat(RomFormat),

    /// The program failed to assemble into its region.
    #[error("assembly failed: {0}")]
    Asm(#[from] AsmError),

    /// The ROM image could not be created, written or moved into place.
    #[error("i/o error while writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
