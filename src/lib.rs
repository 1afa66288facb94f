//! nescore: the instruction-execution core of an NES (Nintendo Entertainment System) emulator.
//!
//! Implements the CPU-facing half of the NES chipset as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): the 6502 core of the Ricoh
//! 2A03, the CPU memory map, and the 2C02 PPU's register interface. Rendering, audio, input and
//! bank-switching mappers are left to collaborators built on top of this crate.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map): RAM and mirrors,
//!   PPU register window, cartridge RAM/ROM, [OAM DMA](https://www.nesdev.org/wiki/PPU_registers#OAMDMA)
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0)
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU): documented opcodes, status flags, stack
//! - **error** – fatal load, decode and address-space errors
//! - **ppu** – [PPU registers](https://www.nesdev.org/wiki/PPU_registers), OAM, nametables, palette

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod ppu;
