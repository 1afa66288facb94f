//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: Parses iNES (.nes) images into PRG/CHR byte vectors and header flags.
//! - **mapper**: CPU-side PRG decoding; only NROM (mapper 0) is implemented.

/// Nametable mirroring layout, from iNES byte 6 bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

pub mod cartridge;
pub mod mapper;
