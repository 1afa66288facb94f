use pretty_assertions::assert_eq;
use test_case::test_case;

use crate::{
    bus::{Bus, NesBus},
    cartridge::{Mirroring, cartridge::Cartridge},
    cpu::{
        cpu::CPU,
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW,
            FLAG_UNUSED, FLAG_ZERO,
        },
        opcodes::{AddressingMode, Mnemonic, OPCODES},
    },
    error::{Error, Region, Result},
};

struct TestBus {
    mem: [u8; 65536],
}

impl TestBus {
    fn new() -> Self {
        let mut bus = Self { mem: [0; 65536] };
        bus.mem[0xFFFC] = 0x00;
        bus.mem[0xFFFD] = 0x80;
        bus
    }

    /// Place `program` at $8000, where the reset vector points.
    fn with_program(program: &[u8]) -> Self {
        let mut bus = Self::new();
        bus.mem[0x8000..0x8000 + program.len()].copy_from_slice(program);
        bus
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u16) -> Result<u8> {
        Ok(self.mem[addr as usize])
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        self.mem[addr as usize] = data;
        Ok(())
    }
}

fn new_cpu(bus: TestBus) -> CPU<TestBus> {
    let mut cpu = CPU::new(bus);
    cpu.reset().unwrap();
    cpu
}

fn run(program: &[u8], steps: usize) -> CPU<TestBus> {
    let mut cpu = new_cpu(TestBus::with_program(program));
    for _ in 0..steps {
        cpu.step().unwrap();
    }
    cpu
}

#[test]
fn reset_zeroes_registers_and_reads_vector() {
    let mut cpu = CPU::new(TestBus::new());
    cpu.a = 1;
    cpu.x = 2;
    cpu.y = 3;
    cpu.sp = 4;
    cpu.status = 0xFF;
    cpu.reset().unwrap();

    assert_eq!((cpu.a, cpu.x, cpu.y, cpu.sp, cpu.status), (0, 0, 0, 0, 0));
    assert_eq!(cpu.pc, 0x8000);
}

#[test]
fn lda_immediate_loads_value() {
    let cpu = run(&[0xA9, 0x42], 1); // LDA #$42

    assert_eq!(cpu.a, 0x42);
    assert_eq!(cpu.pc, 0x8002);
}

#[test]
fn lda_sets_zero_flag() {
    let cpu = run(&[0xA9, 0x00], 1); // LDA #$00

    assert!(cpu.status & FLAG_ZERO != 0)
}

#[test]
fn lda_sets_negative_flag() {
    let cpu = run(&[0xA9, 0x80], 1); // LDA #$80

    assert!(cpu.status & FLAG_NEGATIVE != 0)
}

#[test_case(0x00 ; "zero")]
#[test_case(0x01 ; "positive")]
#[test_case(0x7F ; "largest positive")]
#[test_case(0x80 ; "smallest negative")]
#[test_case(0xFF ; "all ones")]
fn zero_and_negative_follow_result_regardless_of_prior_flags(value: u8) {
    for prior in [0x00, FLAG_ZERO | FLAG_NEGATIVE] {
        // LDX #value; TXA; INY; DEY
        let mut cpu = new_cpu(TestBus::with_program(&[0xA2, value, 0x8A, 0xC8, 0x88]));
        cpu.y = value.wrapping_sub(1);

        for _ in 0..4 {
            cpu.status = prior;
            cpu.step().unwrap();
        }

        // Last result: DEY brings y back to value - 1.
        let result = value.wrapping_sub(1);
        assert_eq!(cpu.y, result);
        assert_eq!(cpu.status & FLAG_ZERO != 0, result == 0);
        assert_eq!(cpu.status & FLAG_NEGATIVE != 0, result & 0x80 != 0);
        assert_eq!(cpu.a, value);
    }
}

#[test]
fn tax_transfers_a_to_x() {
    let cpu = run(&[0xA9, 0x10, 0xAA], 2); // LDA #$10; TAX

    assert_eq!(cpu.x, 0x10)
}

#[test]
fn sta_writes_to_memory() {
    let cpu = run(&[0xA9, 0x33, 0x8D, 0x00, 0x02], 2); // LDA #$33; STA $0200

    assert_eq!(cpu.bus.mem[0x0200], 0x33);
    assert_eq!(cpu.pc, 0x8005);
}

#[test]
fn jmp_changes_program_counter() {
    let mut bus = TestBus::with_program(&[0x4C, 0x00, 0x90]); // JMP $9000
    bus.mem[0x9000] = 0xA9; // LDA #$55
    bus.mem[0x9001] = 0x55;

    let mut cpu = new_cpu(bus);
    cpu.step().unwrap(); // JMP
    assert_eq!(cpu.pc, 0x9000);
    cpu.step().unwrap(); // LDA

    assert_eq!(cpu.a, 0x55);
}

#[test]
fn jmp_indirect_wraps_within_page() {
    let mut bus = TestBus::with_program(&[0x6C, 0xFF, 0x30]); // JMP ($30FF)
    bus.mem[0x30FF] = 0x80;
    bus.mem[0x3000] = 0x50;
    bus.mem[0x3100] = 0x40;

    let mut cpu = new_cpu(bus);
    cpu.step().unwrap();

    assert_eq!(cpu.pc, 0x5080);
}

#[test]
fn jmp_indirect_reads_pointer_normally_inside_page() {
    let mut bus = TestBus::with_program(&[0x6C, 0x20, 0x30]); // JMP ($3020)
    bus.mem[0x3020] = 0x34;
    bus.mem[0x3021] = 0x12;

    let mut cpu = new_cpu(bus);
    cpu.step().unwrap();

    assert_eq!(cpu.pc, 0x1234);
}

#[test]
fn inx_increments_x() {
    let cpu = run(&[0xA2, 0x01, 0xE8], 2); // LDX #$01; INX

    assert_eq!(cpu.x, 0x02);
}

#[test]
fn dex_sets_zero_flag() {
    let cpu = run(&[0xA2, 0x01, 0xCA], 2); // LDX #$01; DEX

    assert!(cpu.status & FLAG_ZERO != 0);
}

#[test]
fn bne_loops_until_zero() {
    // LDX #3; DEX; BNE -3
    let cpu = run(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD], 7);

    assert_eq!(cpu.x, 0x00);
    assert_eq!(cpu.pc, 0x8005);
}

#[test_case(0x90, 0, FLAG_CARRY ; "bcc")]
#[test_case(0xB0, FLAG_CARRY, 0 ; "bcs")]
#[test_case(0xD0, 0, FLAG_ZERO ; "bne")]
#[test_case(0xF0, FLAG_ZERO, 0 ; "beq")]
#[test_case(0x10, 0, FLAG_NEGATIVE ; "bpl")]
#[test_case(0x30, FLAG_NEGATIVE, 0 ; "bmi")]
#[test_case(0x50, 0, FLAG_OVERFLOW ; "bvc")]
#[test_case(0x70, FLAG_OVERFLOW, 0 ; "bvs")]
fn branches(opcode: u8, taken_status: u8, skipped_status: u8) {
    let mut cpu = new_cpu(TestBus::with_program(&[opcode, 0x10]));
    cpu.status = taken_status;
    cpu.step().unwrap();
    assert_eq!(cpu.pc, 0x8012);

    let mut cpu = new_cpu(TestBus::with_program(&[opcode, 0x10]));
    cpu.status = skipped_status;
    cpu.step().unwrap();
    assert_eq!(cpu.pc, 0x8002);
}

#[test]
fn branch_backwards_crosses_page() {
    let mut bus = TestBus::new();
    bus.mem[0x8100] = 0xF0; // BEQ -$10
    bus.mem[0x8101] = 0xF0;

    let mut cpu = new_cpu(bus);
    cpu.pc = 0x8100;
    cpu.status = FLAG_ZERO;
    cpu.step().unwrap();

    assert_eq!(cpu.pc, 0x80F2);
}

#[test]
fn branch_to_own_offset_byte_is_not_skipped() {
    // BEQ -1 lands on its own operand; pc must not be advanced past it.
    let mut cpu = new_cpu(TestBus::with_program(&[0xF0, 0xFF]));
    cpu.status = FLAG_ZERO;
    cpu.step().unwrap();

    assert_eq!(cpu.pc, 0x8001);
}

#[test]
fn every_non_control_opcode_advances_by_its_length() {
    for op in OPCODES.iter() {
        let control = matches!(
            op.mnemonic,
            Mnemonic::Jmp | Mnemonic::Jsr | Mnemonic::Rts | Mnemonic::Rti | Mnemonic::Brk
        );
        if control || op.mode == AddressingMode::Relative {
            continue;
        }

        // Operands point into RAM at $0210 / zero page $10.
        let mut cpu = new_cpu(TestBus::with_program(&[op.code, 0x10, 0x02]));
        cpu.step().unwrap();

        assert_eq!(
            cpu.pc,
            0x8000 + op.len as u16,
            "{:?} {:?} (${:02X})",
            op.mnemonic,
            op.mode,
            op.code
        );
    }
}

#[test]
fn jsr_and_rts_work() {
    let mut bus = TestBus::with_program(&[
        0x20, 0x00, 0x90, // JSR $9000
        0xA9, 0x11, // LDA #$11
    ]);
    bus.mem[0x9000] = 0xA9; // LDA #$22
    bus.mem[0x9001] = 0x22;
    bus.mem[0x9002] = 0x60; // RTS

    let mut cpu = new_cpu(bus);

    cpu.step().unwrap(); // JSR
    assert_eq!(cpu.pc, 0x9000);
    // Return address - 1, high byte pushed first.
    assert_eq!(cpu.stack[0x00], 0x80);
    assert_eq!(cpu.stack[0xFF], 0x02);
    assert_eq!(cpu.sp, 0xFE);

    cpu.step().unwrap(); // LDA #$22
    cpu.step().unwrap(); // RTS
    assert_eq!(cpu.pc, 0x8003);
    assert_eq!(cpu.sp, 0x00);

    cpu.step().unwrap(); // LDA #$11
    assert_eq!(cpu.a, 0x11);
}

#[test]
fn pha_pla_round_trip() {
    // LDA #$C3; PHA; LDA #$00; PLA
    let mut cpu = new_cpu(TestBus::with_program(&[0xA9, 0xC3, 0x48, 0xA9, 0x00, 0x68]));
    cpu.x = 0x12;
    cpu.y = 0x34;
    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.a, 0xC3);
    assert_eq!((cpu.x, cpu.y), (0x12, 0x34));
    assert_eq!(cpu.sp, 0x00);
    assert!(cpu.status & FLAG_NEGATIVE != 0);
}

#[test]
fn php_plp_round_trip() {
    // SEC; SED; PHP; CLC; CLD; PLP
    let cpu = run(&[0x38, 0xF8, 0x08, 0x18, 0xD8, 0x28], 6);

    assert_eq!(cpu.status, 0x08 | FLAG_CARRY | FLAG_UNUSED);
}

#[test]
fn plp_ignores_pulled_break_bit() {
    // LDA #$FF; PHA; PLP
    let cpu = run(&[0xA9, 0xFF, 0x48, 0x28], 3);

    assert_eq!(cpu.status, 0xFF & !FLAG_BREAK);
}

#[test]
fn stack_pointer_wraps() {
    let mut cpu = new_cpu(TestBus::with_program(&[0x48, 0x68])); // PHA; PLA
    cpu.a = 0x99;
    cpu.step().unwrap();
    assert_eq!(cpu.sp, 0xFF);
    assert_eq!(cpu.stack[0], 0x99);

    cpu.a = 0;
    cpu.step().unwrap();
    assert_eq!(cpu.sp, 0x00);
    assert_eq!(cpu.a, 0x99);
}

#[test]
fn txs_tsx() {
    // LDX #$FD; TXS; LDX #$00; TSX
    let cpu = run(&[0xA2, 0xFD, 0x9A, 0xA2, 0x00, 0xBA], 4);

    assert_eq!(cpu.sp, 0xFD);
    assert_eq!(cpu.x, 0xFD);
    assert!(cpu.status & FLAG_NEGATIVE != 0);
}

#[test]
fn brk_jumps_to_irq_vector() {
    let mut bus = TestBus::with_program(&[0x00]); // BRK
    bus.mem[0xFFFE] = 0x00;
    bus.mem[0xFFFF] = 0x90;

    let mut cpu = new_cpu(bus);
    cpu.status = FLAG_CARRY;
    cpu.step().unwrap();

    assert_eq!(cpu.pc, 0x9000);
    assert!(cpu.status & FLAG_BREAK != 0);
    assert!(cpu.status & FLAG_INTERRUPT_DISABLE != 0);
    // Return address (BRK + 2), then status.
    assert_eq!(cpu.stack[0x00], 0x80);
    assert_eq!(cpu.stack[0xFF], 0x02);
    assert_eq!(cpu.stack[0xFE], FLAG_CARRY | FLAG_BREAK | FLAG_UNUSED);
}

#[test]
fn brk_rti_round_trip() {
    let mut bus = TestBus::with_program(&[0x00, 0xEA, 0xA9, 0x07]); // BRK; pad; LDA #$07
    bus.mem[0xFFFE] = 0x00;
    bus.mem[0xFFFF] = 0x90;
    bus.mem[0x9000] = 0x40; // RTI

    let mut cpu = new_cpu(bus);
    cpu.status = FLAG_OVERFLOW;
    cpu.step().unwrap(); // BRK
    cpu.step().unwrap(); // RTI

    assert_eq!(cpu.pc, 0x8002);
    assert_eq!(cpu.sp, 0x00);
    assert_eq!(cpu.status, FLAG_OVERFLOW | FLAG_UNUSED);

    cpu.step().unwrap();
    assert_eq!(cpu.a, 0x07);
}

#[test]
fn cmp_equal_sets_carry_and_zero() {
    let cpu = run(&[0xA9, 0x40, 0xC9, 0x40], 2); // LDA #$40; CMP #$40

    assert!(cpu.status & FLAG_CARRY != 0);
    assert!(cpu.status & FLAG_ZERO != 0);
    assert!(cpu.status & FLAG_NEGATIVE == 0);
}

#[test_case(0x50, 0x30, true, false, false ; "greater")]
#[test_case(0x30, 0x50, false, false, true ; "less")]
#[test_case(0x01, 0xFF, false, false, false ; "less wrapping positive")]
#[test_case(0xFF, 0x01, true, false, true ; "greater wrapping negative")]
fn compare_flags(register: u8, value: u8, carry: bool, zero: bool, negative: bool) {
    // CPX / CPY / CMP immediate all share the same rule.
    for (load, cmp) in [(0xA9, 0xC9), (0xA2, 0xE0), (0xA0, 0xC0)] {
        let cpu = run(&[load, register, cmp, value], 2);

        assert_eq!(cpu.status & FLAG_CARRY != 0, carry);
        assert_eq!(cpu.status & FLAG_ZERO != 0, zero);
        assert_eq!(cpu.status & FLAG_NEGATIVE != 0, negative);
    }
}

#[test]
fn adc_sets_carry_and_overflow() {
    // LDA #$7F; ADC #$01
    let cpu = run(&[0xA9, 0x7F, 0x69, 0x01], 2);
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.status & FLAG_OVERFLOW != 0);
    assert!(cpu.status & FLAG_CARRY == 0);

    // SEC; LDA #$FF; ADC #$00
    let cpu = run(&[0x38, 0xA9, 0xFF, 0x69, 0x00], 3);
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.status & FLAG_CARRY != 0);
    assert!(cpu.status & FLAG_ZERO != 0);
    assert!(cpu.status & FLAG_OVERFLOW == 0);
}

#[test]
fn sbc_borrows_through_carry() {
    // SEC; LDA #$05; SBC #$03
    let cpu = run(&[0x38, 0xA9, 0x05, 0xE9, 0x03], 3);
    assert_eq!(cpu.a, 0x02);
    assert!(cpu.status & FLAG_CARRY != 0);

    // CLC; LDA #$05; SBC #$03  (borrow in)
    let cpu = run(&[0x18, 0xA9, 0x05, 0xE9, 0x03], 3);
    assert_eq!(cpu.a, 0x01);

    // SEC; LDA #$80; SBC #$01  (signed overflow)
    let cpu = run(&[0x38, 0xA9, 0x80, 0xE9, 0x01], 3);
    assert_eq!(cpu.a, 0x7F);
    assert!(cpu.status & FLAG_OVERFLOW != 0);
    assert!(cpu.status & FLAG_CARRY != 0);
}

#[test]
fn bit_copies_operand_bits() {
    let mut cpu = new_cpu(TestBus::with_program(&[0x24, 0x10])); // BIT $10
    cpu.bus.mem[0x10] = 0xC0;
    cpu.a = 0x01;
    cpu.step().unwrap();

    assert!(cpu.status & FLAG_ZERO != 0);
    assert!(cpu.status & FLAG_NEGATIVE != 0);
    assert!(cpu.status & FLAG_OVERFLOW != 0);
    assert_eq!(cpu.a, 0x01);
}

#[test]
fn shifts_and_rotates() {
    // LDA #$81; ASL A  → $02, C=1
    let cpu = run(&[0xA9, 0x81, 0x0A], 2);
    assert_eq!(cpu.a, 0x02);
    assert!(cpu.status & FLAG_CARRY != 0);

    // SEC; LDA #$01; ROR A → $80, C=1, N=1
    let cpu = run(&[0x38, 0xA9, 0x01, 0x6A], 3);
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.status & FLAG_CARRY != 0);
    assert!(cpu.status & FLAG_NEGATIVE != 0);

    // SEC; ROL $20 with $20 = $80 → $01, C=1
    let mut cpu = new_cpu(TestBus::with_program(&[0x38, 0x26, 0x20]));
    cpu.bus.mem[0x20] = 0x80;
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.bus.mem[0x20], 0x01);
    assert!(cpu.status & FLAG_CARRY != 0);

    // LSR $0300 with $01 → $00, C=1, Z=1
    let mut cpu = new_cpu(TestBus::with_program(&[0x4E, 0x00, 0x03]));
    cpu.bus.mem[0x0300] = 0x01;
    cpu.step().unwrap();
    assert_eq!(cpu.bus.mem[0x0300], 0x00);
    assert!(cpu.status & FLAG_CARRY != 0);
    assert!(cpu.status & FLAG_ZERO != 0);
}

#[test]
fn inc_dec_memory() {
    // INC $10; DEC $11
    let mut cpu = new_cpu(TestBus::with_program(&[0xE6, 0x10, 0xC6, 0x11]));
    cpu.bus.mem[0x10] = 0xFF;
    cpu.bus.mem[0x11] = 0x00;
    cpu.step().unwrap();
    assert_eq!(cpu.bus.mem[0x10], 0x00);
    assert!(cpu.status & FLAG_ZERO != 0);

    cpu.step().unwrap();
    assert_eq!(cpu.bus.mem[0x11], 0xFF);
    assert!(cpu.status & FLAG_NEGATIVE != 0);
}

#[test]
fn zero_page_x_wraps_within_page_zero() {
    let mut cpu = new_cpu(TestBus::with_program(&[0xB5, 0xF0])); // LDA $F0,X
    cpu.x = 0x20;
    cpu.bus.mem[0x0010] = 0x66;
    cpu.bus.mem[0x0110] = 0x99;
    cpu.step().unwrap();

    assert_eq!(cpu.a, 0x66);
}

#[test]
fn absolute_y_crosses_pages() {
    let mut cpu = new_cpu(TestBus::with_program(&[0xBE, 0xF0, 0x02])); // LDX $02F0,Y
    cpu.y = 0x20;
    cpu.bus.mem[0x0310] = 0x5A;
    cpu.step().unwrap();

    assert_eq!(cpu.x, 0x5A);
}

#[test]
fn indirect_x_reads_pointer_from_zero_page() {
    let mut cpu = new_cpu(TestBus::with_program(&[0xA1, 0xFE])); // LDA ($FE,X)
    cpu.x = 0x01;
    // Pointer at $FF/$00 (wraps in zero page).
    cpu.bus.mem[0x00FF] = 0x34;
    cpu.bus.mem[0x0000] = 0x12;
    cpu.bus.mem[0x1234] = 0xAB;
    cpu.step().unwrap();

    assert_eq!(cpu.a, 0xAB);
}

#[test]
fn indirect_y_indexes_after_dereference() {
    let mut cpu = new_cpu(TestBus::with_program(&[0x91, 0x40])); // STA ($40),Y
    cpu.a = 0x77;
    cpu.y = 0x10;
    cpu.bus.mem[0x40] = 0xF8;
    cpu.bus.mem[0x41] = 0x03;
    cpu.step().unwrap();

    assert_eq!(cpu.bus.mem[0x0408], 0x77);
}

#[test]
fn flag_instructions() {
    let cpu = run(&[0x38, 0x78, 0xF8], 3); // SEC; SEI; SED
    assert_eq!(cpu.status, FLAG_CARRY | FLAG_INTERRUPT_DISABLE | 0x08);

    let mut cpu = new_cpu(TestBus::with_program(&[0x18, 0x58, 0xD8, 0xB8])); // CLC; CLI; CLD; CLV
    cpu.status = 0xFF;
    for _ in 0..4 {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.status, 0xFF & !(FLAG_CARRY | FLAG_INTERRUPT_DISABLE | 0x08 | FLAG_OVERFLOW));
}

#[test]
fn unimplemented_opcode_is_reported_with_address() {
    let mut cpu = new_cpu(TestBus::with_program(&[0xEA, 0x02])); // NOP; JAM
    cpu.step().unwrap();
    let err = cpu.step().unwrap_err();

    assert!(matches!(
        err,
        Error::UnimplementedOpcode {
            opcode: 0x02,
            addr: 0x8001
        }
    ));
}

#[test]
fn run_stops_at_step_limit() {
    let mut cpu = new_cpu(TestBus::with_program(&[0xEA; 8]));

    assert_eq!(cpu.run(Some(5)).unwrap(), 5);
    assert_eq!(cpu.pc, 0x8005);
    assert_eq!(cpu.cycles, 10);
}

// Full core: CPU over the NES bus, PPU and NROM.

fn nes(program: &[u8]) -> CPU<NesBus> {
    let mut prg = vec![0xEA; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    prg[0x3FFC] = 0x00;
    prg[0x3FFD] = 0x80;

    let cart = Cartridge {
        prg_rom: prg,
        chr_rom: vec![0; 8 * 1024],
        mirroring: Mirroring::Vertical,
        mapper_id: 0,
    };
    CPU::load(cart).unwrap()
}

#[test]
fn load_seeds_pc_from_reset_vector() {
    let cpu = nes(&[]);

    assert_eq!(cpu.pc, 0x8000);
}

#[test]
fn program_writes_nametable_through_ppu_registers() {
    let mut cpu = nes(&[
        0xAD, 0x02, 0x20, // LDA $2002
        0xA9, 0x21, // LDA #$21
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x08, // LDA #$08
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x5A, // LDA #$5A
        0x8D, 0x07, 0x20, // STA $2007
    ]);
    cpu.run(Some(7)).unwrap();

    assert_eq!(cpu.bus.ppu.vram[0x108], 0x5A);
    assert_eq!(cpu.bus.ppu.addr, 0x2109);
}

#[test]
fn sprite_dma_from_program() {
    let mut cpu = nes(&[
        0xA2, 0x00, // LDX #$00
        0x8A, // loop: TXA
        0x9D, 0x00, 0x02, // STA $0200,X
        0xE8, // INX
        0xD0, 0xF9, // BNE loop
        0xA9, 0x02, // LDA #$02
        0x8D, 0x14, 0x40, // STA $4014
    ]);
    cpu.run(Some(1 + 256 * 4 + 2)).unwrap();

    for i in 0..256 {
        assert_eq!(cpu.bus.ppu.oam[i], i as u8);
    }
}

#[test]
fn reading_write_only_ppu_register_continues() {
    let mut cpu = nes(&[0xA9, 0x55, 0xAD, 0x00, 0x20, 0xEA]); // LDA #$55; LDA $2000; NOP
    cpu.run(Some(3)).unwrap();

    assert_eq!(cpu.a, 0x00);
    assert!(cpu.status & FLAG_ZERO != 0);
    assert_eq!(cpu.pc, 0x8006);
}

#[test]
fn mirrored_ram_through_cpu() {
    // LDA #$3C; STA $0000; LDX $0800; LDY $1800
    let mut cpu = nes(&[0xA9, 0x3C, 0x85, 0x00, 0xAE, 0x00, 0x08, 0xAC, 0x00, 0x18]);
    cpu.run(Some(4)).unwrap();

    assert_eq!((cpu.x, cpu.y), (0x3C, 0x3C));
}

#[test]
fn store_into_prg_rom_is_fatal() {
    let mut cpu = nes(&[0x8D, 0x00, 0x80]); // STA $8000

    assert!(matches!(
        cpu.step(),
        Err(Error::ReadOnly {
            region: Region::ProgramRom,
            addr: 0x8000
        })
    ));
}

#[test]
fn unmapped_access_is_fatal() {
    let mut cpu = nes(&[0xAD, 0x00, 0x50]); // LDA $5000

    assert!(matches!(cpu.step(), Err(Error::UnmappedAddress(0x5000))));
}
