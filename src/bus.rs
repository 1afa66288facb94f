//! Memory bus and address decoding for the NES.
//!
//! Maps CPU addresses to RAM, PPU registers, cartridge RAM, and cartridge ROM. Every address
//! belongs to exactly one arm of the decoder; anything outside the known regions is a fatal
//! [`Error::UnmappedAddress`].

use log::{debug, trace};

use crate::{
    cartridge::{
        cartridge::Cartridge,
        mapper::{self, mapper::Mapper},
    },
    error::{Error, Result},
    ppu::ppu::{OAM_LEN, PPU, PpuPort},
};

pub const RAM_SIZE: usize = 0x0800;
pub const PRG_RAM_SIZE: usize = 0x2000;

/// OAMDMA: a write copies page `data << 8` into OAM.
pub const OAM_DMA: u16 = 0x4014;

/// Trait for memory-mapped I/O and bus access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> Result<u8>;
    fn write(&mut self, addr: u16, data: u8) -> Result<()>;

    /// Little-endian word at `addr`, `addr + 1`.
    fn read_u16(&mut self, addr: u16) -> Result<u16> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    fn write_u16(&mut self, addr: u16, data: u16) -> Result<()> {
        self.write(addr, data as u8)?;
        self.write(addr.wrapping_add(1), (data >> 8) as u8)
    }
}

/// Main NES bus: work RAM, PPU registers, cartridge RAM and PRG through the mapper.
pub struct NesBus<P: PpuPort = PPU> {
    pub ram: [u8; RAM_SIZE],
    pub prg_ram: [u8; PRG_RAM_SIZE],
    pub mapper: Box<dyn Mapper>,
    pub ppu: P,
}

impl NesBus<PPU> {
    /// Create a bus from a parsed cartridge. PRG moves into the mapper, CHR into the PPU.
    pub fn new(cart: Cartridge) -> Result<Self> {
        let Cartridge {
            prg_rom,
            chr_rom,
            mirroring,
            mapper_id,
        } = cart;
        let mapper = mapper::create(mapper_id, prg_rom)?;
        Ok(Self::with_parts(mapper, PPU::new(chr_rom, mirroring)))
    }
}

impl<P: PpuPort> NesBus<P> {
    /// Assemble a bus from an already-built mapper and PPU.
    pub fn with_parts(mapper: Box<dyn Mapper>, ppu: P) -> Self {
        Self {
            ram: [0; RAM_SIZE],
            prg_ram: [0; PRG_RAM_SIZE],
            mapper,
            ppu,
        }
    }

    /// OAM DMA: gather the whole source page first, then hand it to the PPU in one go.
    fn oam_dma(&mut self, page: u8) -> Result<()> {
        let base = (page as u16) << 8;
        let mut buffer = [0u8; OAM_LEN];
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = self.read(base + i as u16)?;
        }
        debug!("OAM DMA from ${:04X}", base);
        self.ppu.oam_dma(&buffer);
        Ok(())
    }
}

impl<P: PpuPort> Bus for NesBus<P> {
    fn read(&mut self, addr: u16) -> Result<u8> {
        match addr {
            // Internal RAM (mirrored 4x in 0x0000-0x1FFF)
            0x0000..=0x1FFF => Ok(self.ram[addr as usize % RAM_SIZE]),
            // PPU registers $2000-$3FFF (mirrored every 8 bytes)
            0x2000..=0x3FFF => self.ppu.read_register(((addr - 0x2000) % 8) as u8),
            // APU and I/O: not modelled
            0x4000..=0x4018 => {
                trace!("read from unsupported APU/IO register ${:04X}", addr);
                Ok(0)
            }
            // Cartridge RAM
            0x6000..=0x7FFF => Ok(self.prg_ram[(addr - 0x6000) as usize]),
            // Cartridge PRG ROM
            0x8000..=0xFFFF => self.mapper.read(addr),
            _ => Err(Error::UnmappedAddress(addr)),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        match addr {
            0x0000..=0x1FFF => {
                self.ram[addr as usize % RAM_SIZE] = data;
                Ok(())
            }
            0x2000..=0x3FFF => self.ppu.write_register(((addr - 0x2000) % 8) as u8, data),
            OAM_DMA => self.oam_dma(data),
            0x4000..=0x4013 | 0x4015..=0x4018 => {
                trace!("write ${:02X} to unsupported APU/IO register ${:04X}", data, addr);
                Ok(())
            }
            0x6000..=0x7FFF => {
                self.prg_ram[(addr - 0x6000) as usize] = data;
                Ok(())
            }
            // Mapper decides: NROM rejects every PRG write
            0x8000..=0xFFFF => self.mapper.write(addr, data),
            _ => Err(Error::UnmappedAddress(addr)),
        }
    }
}
