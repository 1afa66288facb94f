//! NES PPU register file.
//!
//! Registers: $2000–$2007 (mirrored every 8 bytes on the CPU bus), plus OAM DMA at $4014 which
//! the bus drives separately. Holds OAM, 2 KiB nametable VRAM, palette RAM, and the cartridge
//! CHR memory (read-only from here).

use crate::cartridge::Mirroring;
use crate::error::{Error, Region, Result};

pub const PPUCTRL: u8 = 0;
pub const PPUMASK: u8 = 1;
pub const PPUSTATUS: u8 = 2;
pub const OAMADDR: u8 = 3;
pub const OAMDATA: u8 = 4;
pub const PPUSCROLL: u8 = 5;
pub const PPUADDR: u8 = 6;
pub const PPUDATA: u8 = 7;

/// OAM (Object Attribute Memory): 64 sprites × 4 bytes. Each entry: Y, tile, attr, X.
pub const OAM_LEN: usize = 256;
/// Internal nametable RAM.
pub const VRAM_LEN: usize = 0x800;
/// Palette RAM $3F00–$3F1F.
pub const PALETTE_LEN: usize = 32;

/// PPUCTRL bit 2: VRAM address increment per PPUDATA access (0: +1, 1: +32).
const CTRL_INCREMENT_32: u8 = 0x04;
/// PPUSTATUS bit 7: vertical blank started. Cleared by reading PPUSTATUS.
const STATUS_VBLANK: u8 = 0x80;

/// What the CPU bus may do to the PPU: indexed register access and the OAM DMA side channel.
pub trait PpuPort {
    /// Read register `index` (0–7).
    fn read_register(&mut self, index: u8) -> Result<u8>;
    /// Write register `index` (0–7).
    fn write_register(&mut self, index: u8, data: u8) -> Result<()>;
    /// Copy a full page into OAM, starting at OAM byte 0.
    fn oam_dma(&mut self, page: &[u8; OAM_LEN]);
}

/// PPU state visible to the CPU: raw registers, latches, and the memories behind them.
pub struct PPU {
    pub ctrl: u8,
    pub mask: u8,
    pub status: u8,
    /// OAM address for $2003/$2004 (byte index 0..255).
    pub oam_addr: u8,
    pub scroll_x: u8,
    pub scroll_y: u8,
    /// VRAM address set through $2006 and dereferenced by $2007.
    pub addr: u16,
    /// Write toggle shared by $2005 and $2006; false means the next write is the first of a pair.
    /// Reset by reading $2002.
    pub write_latch: bool,
    pub mirroring: Mirroring,
    pub oam: [u8; OAM_LEN],
    pub vram: [u8; VRAM_LEN],
    pub palette: [u8; PALETTE_LEN],
    chr: Vec<u8>,
}

impl PPU {
    /// Create a PPU over the cartridge's CHR memory with its nametable layout.
    pub fn new(chr: Vec<u8>, mirroring: Mirroring) -> Self {
        Self {
            ctrl: 0,
            mask: 0,
            status: 0,
            oam_addr: 0,
            scroll_x: 0,
            scroll_y: 0,
            addr: 0,
            write_latch: false,
            mirroring,
            oam: [0; OAM_LEN],
            vram: [0; VRAM_LEN],
            palette: [0; PALETTE_LEN],
            chr,
        }
    }

    /// CHR memory as loaded from the cartridge.
    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    /// Raise or clear status bits (vblank, sprite 0 hit, overflow) from a timing collaborator.
    pub fn set_status(&mut self, status: u8) {
        self.status = status;
    }

    /// Read PPUSTATUS ($2002). Clears vblank and resets the $2005/$2006 write toggle.
    pub fn read_status(&mut self) -> u8 {
        let status = self.status;
        self.status &= !STATUS_VBLANK;
        self.write_latch = false;
        status
    }

    /// Write PPUCTRL ($2000).
    pub fn write_ctrl(&mut self, data: u8) {
        self.ctrl = data;
    }

    /// Write PPUMASK ($2001).
    pub fn write_mask(&mut self, data: u8) {
        self.mask = data;
    }

    /// Write OAMADDR ($2003).
    pub fn write_oam_addr(&mut self, data: u8) {
        self.oam_addr = data;
    }

    /// Read OAMDATA ($2004); returns OAM byte at current OAMADDR (read does not increment on real NES).
    pub fn read_oam_data(&self) -> u8 {
        self.oam[self.oam_addr as usize]
    }

    /// Write OAMDATA ($2004); writes OAM and increments OAMADDR.
    pub fn write_oam_data(&mut self, data: u8) {
        self.oam[self.oam_addr as usize] = data;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    /// Write PPUSCROLL ($2005): X on the first write of a pair, Y on the second.
    pub fn write_scroll(&mut self, data: u8) {
        if !self.write_latch {
            self.scroll_x = data;
        } else {
            self.scroll_y = data;
        }
        self.write_latch = !self.write_latch;
    }

    /// Write PPUADDR ($2006): two-byte write for 16-bit VRAM address (high then low).
    pub fn write_addr(&mut self, data: u8) {
        if !self.write_latch {
            self.addr = (self.addr & 0x00FF) | ((data as u16) << 8);
        } else {
            self.addr = (self.addr & 0xFF00) | data as u16;
        }
        self.write_latch = !self.write_latch;
    }

    /// Read PPUDATA ($2007); auto-increments VRAM address.
    pub fn read_data(&mut self) -> Result<u8> {
        let addr = self.addr;
        let data = match addr {
            // CHR: pattern tables
            0x0000..=0x1FFF => *self
                .chr
                .get(addr as usize)
                .ok_or(Error::UnmappedVideoAddress(addr))?,
            // Nametables, $3000–$3EFF mirroring $2000–$2EFF
            0x2000..=0x3EFF => self.vram[self.nametable_index(addr)],
            // Palette RAM $3F00-$3F1F and $3F20-$3FFF mirrors
            0x3F00..=0x3FFF => self.palette[(addr - 0x3F00) as usize % PALETTE_LEN],
            _ => return Err(Error::UnmappedVideoAddress(addr)),
        };
        self.increment_addr();
        Ok(data)
    }

    /// Write PPUDATA ($2007); auto-increments VRAM address. CHR cannot be written from here.
    pub fn write_data(&mut self, data: u8) -> Result<()> {
        let addr = self.addr;
        match addr {
            0x0000..=0x1FFF => {
                return Err(Error::ReadOnly {
                    region: Region::GraphicsMemory,
                    addr,
                });
            }
            0x2000..=0x3EFF => {
                let index = self.nametable_index(addr);
                self.vram[index] = data;
            }
            0x3F00..=0x3FFF => self.palette[(addr - 0x3F00) as usize % PALETTE_LEN] = data,
            _ => return Err(Error::UnmappedVideoAddress(addr)),
        }
        self.increment_addr();
        Ok(())
    }

    /// Map a nametable address ($2000–$3EFF) to an index into the 2 KiB VRAM using mirroring.
    pub fn nametable_index(&self, addr: u16) -> usize {
        let offset = (addr - 0x2000) as usize % 0x1000;
        match self.mirroring {
            // $2000/$2800 share, $2400/$2C00 share: a flat 2 KiB repeat.
            Mirroring::Vertical => offset % VRAM_LEN,
            // $2000/$2400 share, $2800/$2C00 share.
            Mirroring::Horizontal => (offset / 0x800) * 0x400 + offset % 0x400,
        }
    }

    fn increment_addr(&mut self) {
        let step = if self.ctrl & CTRL_INCREMENT_32 != 0 { 32 } else { 1 };
        self.addr = self.addr.wrapping_add(step);
    }
}

impl PpuPort for PPU {
    fn read_register(&mut self, index: u8) -> Result<u8> {
        match index {
            PPUSTATUS => Ok(self.read_status()),
            OAMDATA => Ok(self.read_oam_data()),
            PPUDATA => self.read_data(),
            // Write-only registers read back as open bus; model it as 0.
            PPUCTRL | PPUMASK | OAMADDR | PPUSCROLL | PPUADDR => Ok(0),
            _ => Err(Error::InvalidRegister(index)),
        }
    }

    fn write_register(&mut self, index: u8, data: u8) -> Result<()> {
        match index {
            PPUCTRL => self.write_ctrl(data),
            PPUMASK => self.write_mask(data),
            PPUSTATUS => {
                return Err(Error::ReadOnly {
                    region: Region::PpuStatus,
                    addr: 0x2000 + index as u16,
                });
            }
            OAMADDR => self.write_oam_addr(data),
            OAMDATA => self.write_oam_data(data),
            PPUSCROLL => self.write_scroll(data),
            PPUADDR => self.write_addr(data),
            PPUDATA => self.write_data(data)?,
            _ => return Err(Error::InvalidRegister(index)),
        }
        Ok(())
    }

    fn oam_dma(&mut self, page: &[u8; OAM_LEN]) {
        self.oam.copy_from_slice(page);
    }
}
