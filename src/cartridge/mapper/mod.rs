//! NES mappers for PRG memory mapping.
//!
//! The `Mapper` trait is the seam for bank-switching boards; Mapper0 (NROM) is the
//! only board wired in.

pub mod mapper;
pub mod mapper0;

use crate::error::{Error, Result};

use self::{mapper::Mapper, mapper0::Mapper0};

/// Build the mapper for an iNES mapper number, taking ownership of PRG ROM.
pub fn create(mapper_id: u8, prg_rom: Vec<u8>) -> Result<Box<dyn Mapper>> {
    match mapper_id {
        0 => Ok(Box::new(Mapper0::new(prg_rom)?)),
        _ => Err(Error::UnsupportedMapper(mapper_id)),
    }
}
