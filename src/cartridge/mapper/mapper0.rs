//! Mapper 0 (NROM): no bank switching, 16/32KB PRG.

use crate::{
    cartridge::mapper::mapper::Mapper,
    error::{Error, Region, Result},
};

/// NROM mapper: fixed PRG, mirrored across $8000–$FFFF when shorter than 32KB.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
}

impl Mapper0 {
    /// Create Mapper0 over the given PRG ROM.
    pub fn new(prg_rom: Vec<u8>) -> Result<Self> {
        if prg_rom.is_empty() {
            return Err(Error::EmptyProgram);
        }
        Ok(Self { prg_rom })
    }
}

impl Mapper for Mapper0 {
    fn read(&self, addr: u16) -> Result<u8> {
        match addr {
            0x8000..=0xFFFF => {
                let offset = (addr - 0x8000) as usize % self.prg_rom.len();
                Ok(self.prg_rom[offset])
            }
            _ => Err(Error::UnmappedAddress(addr)),
        }
    }

    fn write(&mut self, addr: u16, _data: u8) -> Result<()> {
        match addr {
            0x8000..=0xFFFF => Err(Error::ReadOnly {
                region: Region::ProgramRom,
                addr,
            }),
            _ => Err(Error::UnmappedAddress(addr)),
        }
    }
}
