use log::{debug, trace};

use crate::{
    bus::{Bus, NesBus},
    cartridge::cartridge::Cartridge,
    cpu::{
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE,
            FLAG_OVERFLOW, FLAG_UNUSED, FLAG_ZERO,
        },
        opcodes::{AddressingMode, Mnemonic, OPCODES, Opcode, OpcodeTable},
    },
    error::{Error, Result},
};

pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_BRK_VECTOR: u16 = 0xFFFE;

/// Where an instruction's operand lives once its addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Memory(u16),
}

/// Whether an instruction moved the program counter itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Jump,
}

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: usize,
    /// Call stack, indexed by `sp`. Grows downward and wraps.
    pub stack: [u8; 256],
    pub bus: B,
    opcodes: &'static OpcodeTable,
    /// Opcode byte and address of the instruction being executed, for diagnostics.
    current: (u8, u16),
}

impl CPU<NesBus> {
    /// Install a cartridge: PRG to the bus, CHR to the PPU, pc from the reset vector.
    pub fn load(cart: Cartridge) -> Result<Self> {
        let mut cpu = CPU::new(NesBus::new(cart)?);
        cpu.reset()?;
        Ok(cpu)
    }
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            status: 0,
            cycles: 0,
            stack: [0; 256],
            bus,
            opcodes: &OPCODES,
            current: (0, 0),
        }
    }

    pub fn reset(&mut self) -> Result<()> {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0;
        self.status = 0;
        self.cycles = 0;

        self.pc = self.bus.read_u16(RESET_VECTOR)?;
        debug!("reset vector: ${:04X}", self.pc);
        Ok(())
    }

    /// Execute exactly one instruction, leaving pc at the next one.
    pub fn step(&mut self) -> Result<()> {
        let addr = self.pc;
        let code = self.fetch_byte()?;
        let opcode = *self
            .opcodes
            .get(code)
            .ok_or(Error::UnimplementedOpcode { opcode: code, addr })?;
        self.current = (code, addr);
        self.trace(addr, &opcode);

        // Operand bytes are addressed relative to pc but not consumed; skip them afterwards
        // unless the instruction already redirected pc.
        let after_fetch = self.pc;
        if self.execute(&opcode)? == Flow::Next {
            self.pc = after_fetch.wrapping_add(opcode.len as u16 - 1);
        }
        self.cycles += opcode.cycles as usize;
        Ok(())
    }

    /// Step until an error, or until `max_steps` instructions have run. Returns the step count.
    pub fn run(&mut self, max_steps: Option<u64>) -> Result<u64> {
        let mut steps = 0;
        while max_steps.is_none_or(|max| steps < max) {
            self.step()?;
            steps += 1;
        }
        Ok(steps)
    }

    pub fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    fn fetch_byte(&mut self) -> Result<u8> {
        let byte = self.bus.read(self.pc)?;
        self.pc = self.pc.wrapping_add(1);
        Ok(byte)
    }

    fn trace(&self, pc: u16, opcode: &Opcode) {
        trace!(
            "{:04X}  {:02X}  {:?} {:<11} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            opcode.code,
            opcode.mnemonic,
            format!("{:?}", opcode.mode),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            self.cycles
        );
    }

    /// Effective address for `mode`, computed from pc (which points just past the opcode).
    fn resolve(&mut self, mode: AddressingMode) -> Result<Operand> {
        let pc = self.pc;
        let addr = match mode {
            AddressingMode::Implied => return Ok(Operand::Implied),
            AddressingMode::Accumulator => return Ok(Operand::Accumulator),
            AddressingMode::Immediate | AddressingMode::Relative => pc,
            AddressingMode::ZeroPage => self.bus.read(pc)? as u16,
            AddressingMode::ZeroPageX => self.bus.read(pc)?.wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => self.bus.read(pc)?.wrapping_add(self.y) as u16,
            AddressingMode::Absolute => self.bus.read_u16(pc)?,
            AddressingMode::AbsoluteX => self.bus.read_u16(pc)?.wrapping_add(self.x as u16),
            AddressingMode::AbsoluteY => self.bus.read_u16(pc)?.wrapping_add(self.y as u16),
            AddressingMode::Indirect => {
                let ptr = self.bus.read_u16(pc)?;
                let lo = self.bus.read(ptr)? as u16;
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF); // page-boundary bug
                let hi = self.bus.read(hi_addr)? as u16;
                (hi << 8) | lo
            }
            AddressingMode::IndirectX => {
                let ptr = self.bus.read(pc)?.wrapping_add(self.x);
                self.read_zero_page_word(ptr)?
            }
            AddressingMode::IndirectY => {
                let ptr = self.bus.read(pc)?;
                self.read_zero_page_word(ptr)?.wrapping_add(self.y as u16)
            }
        };
        Ok(Operand::Memory(addr))
    }

    /// Pointer stored in zero page; the high byte wraps to $00 after $FF.
    fn read_zero_page_word(&mut self, ptr: u8) -> Result<u16> {
        let lo = self.bus.read(ptr as u16)? as u16;
        let hi = self.bus.read(ptr.wrapping_add(1) as u16)? as u16;
        Ok((hi << 8) | lo)
    }

    fn missing_operand(&self) -> Error {
        let (opcode, addr) = self.current;
        Error::MissingOperand { opcode, addr }
    }

    fn address(&self, operand: Operand) -> Result<u16> {
        match operand {
            Operand::Memory(addr) => Ok(addr),
            _ => Err(self.missing_operand()),
        }
    }

    fn read_operand(&mut self, operand: Operand) -> Result<u8> {
        match operand {
            Operand::Accumulator => Ok(self.a),
            Operand::Memory(addr) => self.bus.read(addr),
            Operand::Implied => Err(self.missing_operand()),
        }
    }

    fn store(&mut self, operand: Operand, value: u8) -> Result<()> {
        match operand {
            Operand::Accumulator => {
                self.a = value;
                Ok(())
            }
            Operand::Memory(addr) => self.bus.write(addr, value),
            Operand::Implied => Err(self.missing_operand()),
        }
    }

    /// Load, transform, store back; N and Z follow the stored value.
    fn read_modify_write(
        &mut self,
        operand: Operand,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) -> Result<()> {
        let value = self.read_operand(operand)?;
        let result = f(self, value);
        self.store(operand, result)?;
        self.update_zero_and_negative_flags(result);
        Ok(())
    }

    fn execute(&mut self, opcode: &Opcode) -> Result<Flow> {
        let operand = self.resolve(opcode.mode)?;

        match opcode.mnemonic {
            Mnemonic::Lda => {
                self.a = self.read_operand(operand)?;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Ldx => {
                self.x = self.read_operand(operand)?;
                self.update_zero_and_negative_flags(self.x);
            }
            Mnemonic::Ldy => {
                self.y = self.read_operand(operand)?;
                self.update_zero_and_negative_flags(self.y);
            }
            Mnemonic::Sta => self.store(operand, self.a)?,
            Mnemonic::Stx => self.store(operand, self.x)?,
            Mnemonic::Sty => self.store(operand, self.y)?,

            Mnemonic::Tax => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
            }
            Mnemonic::Tay => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
            }
            Mnemonic::Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
            }
            Mnemonic::Txa => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Txs => self.sp = self.x,
            Mnemonic::Tya => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
            }

            Mnemonic::And => {
                let value = self.read_operand(operand)?;
                self.a &= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Ora => {
                let value = self.read_operand(operand)?;
                self.a |= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Eor => {
                let value = self.read_operand(operand)?;
                self.a ^= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Adc => {
                let value = self.read_operand(operand)?;
                self.add_with_carry(value);
            }
            Mnemonic::Sbc => {
                let value = self.read_operand(operand)?;
                self.add_with_carry(value ^ 0xFF);
            }
            Mnemonic::Cmp => {
                let value = self.read_operand(operand)?;
                self.compare(self.a, value);
            }
            Mnemonic::Cpx => {
                let value = self.read_operand(operand)?;
                self.compare(self.x, value);
            }
            Mnemonic::Cpy => {
                let value = self.read_operand(operand)?;
                self.compare(self.y, value);
            }
            Mnemonic::Bit => {
                let value = self.read_operand(operand)?;
                self.set_flag(FLAG_ZERO, self.a & value == 0);
                self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
                self.set_flag(FLAG_OVERFLOW, value & 0x40 != 0);
            }

            Mnemonic::Inc => self.read_modify_write(operand, |_, v| v.wrapping_add(1))?,
            Mnemonic::Dec => self.read_modify_write(operand, |_, v| v.wrapping_sub(1))?,
            Mnemonic::Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Mnemonic::Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative_flags(self.y);
            }
            Mnemonic::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.x);
            }
            Mnemonic::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.y);
            }

            Mnemonic::Asl => self.read_modify_write(operand, |cpu, v| {
                cpu.set_flag(FLAG_CARRY, v & 0x80 != 0);
                v << 1
            })?,
            Mnemonic::Lsr => self.read_modify_write(operand, |cpu, v| {
                cpu.set_flag(FLAG_CARRY, v & 0x01 != 0);
                v >> 1
            })?,
            Mnemonic::Rol => self.read_modify_write(operand, |cpu, v| {
                let old_carry = cpu.flag(FLAG_CARRY) as u8;
                cpu.set_flag(FLAG_CARRY, v & 0x80 != 0);
                (v << 1) | old_carry
            })?,
            Mnemonic::Ror => self.read_modify_write(operand, |cpu, v| {
                let old_carry = cpu.flag(FLAG_CARRY) as u8;
                cpu.set_flag(FLAG_CARRY, v & 0x01 != 0);
                (v >> 1) | (old_carry << 7)
            })?,

            Mnemonic::Bcc => return self.branch(operand, !self.flag(FLAG_CARRY)),
            Mnemonic::Bcs => return self.branch(operand, self.flag(FLAG_CARRY)),
            Mnemonic::Bne => return self.branch(operand, !self.flag(FLAG_ZERO)),
            Mnemonic::Beq => return self.branch(operand, self.flag(FLAG_ZERO)),
            Mnemonic::Bpl => return self.branch(operand, !self.flag(FLAG_NEGATIVE)),
            Mnemonic::Bmi => return self.branch(operand, self.flag(FLAG_NEGATIVE)),
            Mnemonic::Bvc => return self.branch(operand, !self.flag(FLAG_OVERFLOW)),
            Mnemonic::Bvs => return self.branch(operand, self.flag(FLAG_OVERFLOW)),

            Mnemonic::Jmp => {
                self.pc = self.address(operand)?;
                return Ok(Flow::Jump);
            }
            Mnemonic::Jsr => {
                let target = self.address(operand)?;
                // Return address - 1: the last byte of this JSR.
                let return_addr = self.pc.wrapping_add(1);
                self.push((return_addr >> 8) as u8);
                self.push(return_addr as u8);
                self.pc = target;
                return Ok(Flow::Jump);
            }
            Mnemonic::Rts => {
                let lo = self.pop() as u16;
                let hi = self.pop() as u16;
                self.pc = ((hi << 8) | lo).wrapping_add(1);
                return Ok(Flow::Jump);
            }
            Mnemonic::Brk => {
                // +1 because of padding byte
                let return_addr = self.pc.wrapping_add(1);
                self.push((return_addr >> 8) as u8);
                self.push(return_addr as u8);
                self.push(self.status | FLAG_BREAK | FLAG_UNUSED);

                self.status |= FLAG_BREAK | FLAG_INTERRUPT_DISABLE;
                self.pc = self.bus.read_u16(IRQ_BRK_VECTOR)?;
                return Ok(Flow::Jump);
            }
            Mnemonic::Rti => {
                let status = self.pop();
                self.status = (status & !FLAG_BREAK) | FLAG_UNUSED;
                let lo = self.pop() as u16;
                let hi = self.pop() as u16;
                self.pc = (hi << 8) | lo;
                return Ok(Flow::Jump);
            }

            Mnemonic::Pha => self.push(self.a),
            Mnemonic::Php => self.push(self.status | FLAG_BREAK | FLAG_UNUSED),
            Mnemonic::Pla => {
                self.a = self.pop();
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Plp => {
                let value = self.pop();
                self.status = (value & !FLAG_BREAK) | FLAG_UNUSED;
            }

            Mnemonic::Clc => self.set_flag(FLAG_CARRY, false),
            Mnemonic::Sec => self.set_flag(FLAG_CARRY, true),
            Mnemonic::Cli => self.set_flag(FLAG_INTERRUPT_DISABLE, false),
            Mnemonic::Sei => self.set_flag(FLAG_INTERRUPT_DISABLE, true),
            Mnemonic::Cld => self.set_flag(FLAG_DECIMAL, false),
            Mnemonic::Sed => self.set_flag(FLAG_DECIMAL, true),
            Mnemonic::Clv => self.set_flag(FLAG_OVERFLOW, false),

            Mnemonic::Nop => {}
        }

        Ok(Flow::Next)
    }

    /// Binary-mode ADC; SBC passes the one's complement of its operand.
    fn add_with_carry(&mut self, value: u8) {
        let carry_in = self.flag(FLAG_CARRY) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(FLAG_CARRY, sum > 0xFF);
        self.set_flag(
            FLAG_OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0,
        );

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    /// Carry iff `register >= value`; N and Z from the wrapped difference. Carry and zero are
    /// independent (both set on equality).
    fn compare(&mut self, register: u8, value: u8) {
        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(register.wrapping_sub(value));
    }

    /// `operand` is the offset byte; a taken branch lands relative to the byte after it.
    fn branch(&mut self, operand: Operand, condition: bool) -> Result<Flow> {
        if !condition {
            return Ok(Flow::Next);
        }
        let offset_addr = self.address(operand)?;
        let offset = self.bus.read(offset_addr)? as i8;
        self.pc = offset_addr.wrapping_add(1).wrapping_add(offset as u16);
        Ok(Flow::Jump)
    }

    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }

    fn push(&mut self, value: u8) {
        self.stack[self.sp as usize] = value;
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.stack[self.sp as usize]
    }
}
