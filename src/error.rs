//! Fatal error kinds for loading and running a cartridge.
//!
//! Nothing here is recoverable: every variant means the core is incomplete for
//! the running program, or the cartridge is incompatible. They are returned rather
//! than panicked so that callers (and tests) can tell them apart.

use std::fmt;

use thiserror::Error;

/// Read-only parts of the address spaces, named in [`Error::ReadOnly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Cartridge PRG ROM, $8000–$FFFF on the CPU bus.
    ProgramRom,
    /// PPUSTATUS ($2002).
    PpuStatus,
    /// CHR memory, $0000–$1FFF on the PPU side, reached through PPUDATA.
    GraphicsMemory,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::ProgramRom => write!(f, "PRG ROM"),
            Region::PpuStatus => write!(f, "PPUSTATUS"),
            Region::GraphicsMemory => write!(f, "CHR memory"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read cartridge image: {0}")]
    Io(#[from] std::io::Error),

    #[error("not an iNES image (magic {found:02X?})")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported mapper {0} (only NROM, mapper 0, is supported)")]
    UnsupportedMapper(u8),

    #[error("cartridge image truncated: need {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("cartridge has no PRG ROM")]
    EmptyProgram,

    #[error("unimplemented opcode ${opcode:02X} at ${addr:04X}")]
    UnimplementedOpcode { opcode: u8, addr: u16 },

    #[error("opcode ${opcode:02X} at ${addr:04X} has no operand to act on")]
    MissingOperand { opcode: u8, addr: u16 },

    #[error("access to unmapped address ${0:04X}")]
    UnmappedAddress(u16),

    #[error("write to read-only {region} at ${addr:04X}")]
    ReadOnly { region: Region, addr: u16 },

    #[error("no PPU register at index {0}")]
    InvalidRegister(u8),

    #[error("PPU address ${0:04X} is outside CHR, nametable and palette memory")]
    UnmappedVideoAddress(u16),
}

pub type Result<T> = std::result::Result<T, Error>;
