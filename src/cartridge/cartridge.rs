//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper, etc.), an optional
//! 512-byte trainer, then PRG ROM, then CHR ROM. The parsed byte vectors are handed to the bus
//! (PRG) and PPU (CHR), which own them for the rest of the run.

use std::fs;
use std::path::Path;

use log::debug;

use crate::cartridge::Mirroring;
use crate::error::{Error, Result};

/// "NES" followed by MS-DOS end-of-file.
pub const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_UNIT: usize = 16 * 1024;
const CHR_UNIT: usize = 8 * 1024;

/// Parsed iNES image: PRG/CHR contents plus the header fields the core uses.
#[derive(Debug)]
pub struct Cartridge {
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
    pub mirroring: Mirroring,
    pub mapper_id: u8,
}

impl Cartridge {
    /// Read and parse an iNES file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Parse an in-memory iNES image. Header bytes 4–5 = PRG/CHR size; bytes 6–7 = mapper number
    /// (low nibble from 6, high nibble from 7). See iNES "File format".
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::Truncated {
                expected: HEADER_LEN,
                found: data.len(),
            });
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&data[0..4]);
        if magic != INES_MAGIC {
            return Err(Error::BadMagic { found: magic });
        }

        let mapper_id = (data[7] & 0xF0) | (data[6] >> 4);
        if mapper_id != 0 {
            return Err(Error::UnsupportedMapper(mapper_id));
        }

        let prg_rom_size = data[4] as usize * PRG_UNIT;
        let chr_rom_size = data[5] as usize * CHR_UNIT;
        if prg_rom_size == 0 {
            return Err(Error::EmptyProgram);
        }

        let has_trainer = data[6] & 0b0000_1000 != 0;
        let prg_start = HEADER_LEN + if has_trainer { TRAINER_LEN } else { 0 };
        let prg_end = prg_start + prg_rom_size;
        let chr_end = prg_end + chr_rom_size;
        if data.len() < chr_end {
            return Err(Error::Truncated {
                expected: chr_end,
                found: data.len(),
            });
        }

        let prg_rom = data[prg_start..prg_end].to_vec();
        let chr_rom = if chr_rom_size > 0 {
            data[prg_end..chr_end].to_vec()
        } else {
            vec![0; CHR_UNIT] // No CHR ROM → 8 KiB of blank pattern memory
        };

        let mirroring = if data[6] & 1 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        debug!(
            "iNES: {} KiB PRG, {} KiB CHR, mapper {}, {:?} mirroring{}",
            prg_rom.len() / 1024,
            chr_rom.len() / 1024,
            mapper_id,
            mirroring,
            if has_trainer { ", trainer skipped" } else { "" }
        );

        Ok(Self {
            prg_rom,
            chr_rom,
            mirroring,
            mapper_id,
        })
    }
}
