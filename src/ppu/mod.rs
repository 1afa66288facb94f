//! PPU (Picture Processing Unit) register file for the NES.
//!
//! See [PPU registers](https://www.nesdev.org/wiki/PPU_registers) and the
//! [PPU memory map](https://www.nesdev.org/wiki/PPU_memory_map). Only the CPU-visible side is
//! modelled: the eight registers at $2000–$2007, OAM, nametable VRAM, palette RAM, and CHR.
//! Rendering and scanline timing live outside this crate.

pub mod ppu;
