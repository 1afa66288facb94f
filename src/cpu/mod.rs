//! 6502 CPU emulation for the NES.
//!
//! Official instruction set driven by a static opcode table; undocumented opcodes are
//! reported as unimplemented. Bus trait used for memory and I/O (PPU registers, cartridge).

pub mod cpu;
pub mod flags;
pub mod opcodes;

#[cfg(test)]
mod tests;
