//! Mapper trait: CPU-side cartridge space ($8000–$FFFF).

use crate::error::Result;

/// Trait for NES cartridge mappers. The bus routes $8000–$FFFF through it.
pub trait Mapper {
    /// Read from PRG ROM ($8000–$FFFF).
    fn read(&self, addr: u16) -> Result<u8>;
    /// Write to PRG space. Boards without registers reject this.
    fn write(&mut self, addr: u16, data: u8) -> Result<()>;
}
