use crate::hardware::cpu::execute::InstructionAddress;
use crate::hardware::cpu::execute::JumpModifier;
use crate::hardware::cpu::registers::Reg16::*;
use crate::hardware::cpu::registers::Reg8::*;
use crate::hardware::cpu::tests::{initial_cpu, read_short, set_short};
use crate::io::interrupts::Interrupts;
use pretty_assertions::assert_eq;

#[test]
fn test_load_16bit() {
    use InstructionAddress::*;
    let mut cpu = initial_cpu();

    cpu.registers.sp = 0x200;
    cpu.registers.set_hl(0x500);

    cpu.load_16bit(SP, HL);

    assert_eq!(cpu.registers.sp, 0x500);

    cpu.registers.pc = 1;
    set_short(&mut cpu, 1, 0x0105);

    cpu.load_16bit(BC, DIRECT);

    assert_eq!(cpu.registers.bc(), 0x0105);
}

#[test]
fn test_load_16bit_direct_mem_cycle_cost() {
    let mut cpu = initial_cpu();

    cpu.registers.sp = 0x500;
    cpu.registers.pc = 0;
    cpu.mmu.write_byte(0, 0x08);
    set_short(&mut cpu, 1, 0x0105);
    cpu.cycles_performed = 0;

    cpu.step_cycle();

    assert_eq!(read_short(&cpu, 0x0105), 0x500);
    assert_eq!(cpu.cycles_performed, 20);
    assert_eq!(cpu.registers.pc, 3);
}

#[test]
fn test_load_8bit() {
    let mut cpu = initial_cpu();

    cpu.registers.c = 40;
    cpu.registers.set_hl(0x4000);
    cpu.mmu.write_byte(0x4000, 30);

    cpu.load_8bit(B, C);
    assert_eq!(cpu.registers.b, 40);

    cpu.load_8bit(D, InstructionAddress::HLI);
    assert_eq!(cpu.registers.d, 30);
}

#[test]
fn test_increment_sets_half_carry_and_zero() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0x0F;
    cpu.increment(A);
    assert_eq!(cpu.registers.a, 0x10);
    assert!(cpu.registers.hf());
    assert!(!cpu.registers.zf());

    cpu.registers.a = 0xFF;
    cpu.increment(A);
    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
    assert!(cpu.registers.hf());
    // INC never touches the carry flag.
    cpu.registers.set_cf(true);
    cpu.increment(A);
    assert!(cpu.registers.cf());
}

#[test]
fn test_decrement_sets_n_and_zero() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0x01;
    cpu.decrement(A);
    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
    assert!(cpu.registers.n());

    cpu.registers.a = 0x00;
    cpu.decrement(A);
    assert_eq!(cpu.registers.a, 0xFF);
    assert!(cpu.registers.hf());
}

#[test]
fn test_add_flags() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0x0F;
    cpu.registers.b = 0x01;
    cpu.add(B);

    assert_eq!(cpu.registers.a, 0x10);
    assert!(cpu.registers.hf());
    assert!(!cpu.registers.cf());
    assert!(!cpu.registers.n());

    cpu.registers.a = 0xFF;
    cpu.registers.b = 0x01;
    cpu.add(B);

    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
    assert!(cpu.registers.cf());
}

#[test]
fn test_adc_includes_carry_in() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0x0E;
    cpu.registers.b = 0x01;
    cpu.registers.set_cf(true);
    cpu.adc(B);

    assert_eq!(cpu.registers.a, 0x10);
    assert!(cpu.registers.hf());
}

#[test]
fn test_sub_and_compare_set_carry_on_borrow() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0x03;
    cpu.registers.b = 0x05;
    cpu.sub(B);

    assert_eq!(cpu.registers.a, 0xFE);
    assert!(cpu.registers.cf());
    assert!(cpu.registers.n());

    cpu.registers.a = 0x10;
    cpu.registers.b = 0x10;
    cpu.compare(B);

    assert!(cpu.registers.zf());
    assert!(!cpu.registers.cf());
    // CP never writes A.
    assert_eq!(cpu.registers.a, 0x10);
}

#[test]
fn test_and_or_xor() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0xF0;
    cpu.registers.b = 0x0F;
    cpu.and(B);
    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
    assert!(cpu.registers.hf());

    cpu.registers.a = 0xF0;
    cpu.or(B);
    assert_eq!(cpu.registers.a, 0xFF);
    assert!(!cpu.registers.hf());

    cpu.registers.a = 0xFF;
    cpu.xor(A);
    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
}

#[test]
fn test_daa_after_bcd_addition() {
    let mut cpu = initial_cpu();

    // 0x15 + 0x27 = 0x3C in binary, 42 (0x42) in BCD.
    cpu.registers.a = 0x15;
    cpu.registers.b = 0x27;
    cpu.add(B);
    cpu.daa();

    assert_eq!(cpu.registers.a, 0x42);
    assert!(!cpu.registers.cf());
}

#[test]
fn test_daa_after_bcd_subtraction() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0x42;
    cpu.registers.b = 0x27;
    cpu.sub(B);
    cpu.daa();

    assert_eq!(cpu.registers.a, 0x15);
}

#[test]
fn test_rotate_left_carry_wraps_through_carry_flag() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0b1000_0001;
    cpu.registers.set_cf(false);
    cpu.rotate_left_carry(A);

    assert_eq!(cpu.registers.a, 0b0000_0010);
    assert!(cpu.registers.cf());

    cpu.rotate_left_carry(A);
    assert_eq!(cpu.registers.a, 0b0000_0101);
    assert!(!cpu.registers.cf());
}

#[test]
fn test_bit_set_res() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0;
    cpu.bit(3, A);
    assert!(cpu.registers.zf());

    cpu.set(3, A);
    assert_eq!(cpu.registers.a, 0b0000_1000);
    cpu.bit(3, A);
    assert!(!cpu.registers.zf());

    cpu.res(3, A);
    assert_eq!(cpu.registers.a, 0);
}

#[test]
fn test_swap() {
    let mut cpu = initial_cpu();

    cpu.registers.a = 0xAB;
    cpu.swap(A);
    assert_eq!(cpu.registers.a, 0xBA);
    assert!(!cpu.registers.zf());

    cpu.registers.a = 0;
    cpu.swap(A);
    assert!(cpu.registers.zf());
}

#[test]
fn test_push_pop_roundtrip() {
    let mut cpu = initial_cpu();

    cpu.registers.sp = 0xFFFE;
    cpu.registers.set_bc(0xBEEF);
    cpu.push(BC);
    assert_eq!(cpu.registers.sp, 0xFFFC);

    cpu.pop(DE);
    assert_eq!(cpu.registers.de(), 0xBEEF);
    assert_eq!(cpu.registers.sp, 0xFFFE);
}

#[test]
fn test_relative_jump_taken_and_not_taken() {
    let mut cpu = initial_cpu();

    cpu.registers.pc = 0x10;
    cpu.mmu.write_byte(0x10, 0x05);
    cpu.registers.set_zf(true);

    cpu.relative_jump(JumpModifier::NotZero);
    // Condition false: only the offset byte is consumed, PC advances by 1.
    assert_eq!(cpu.registers.pc, 0x11);

    cpu.registers.pc = 0x10;
    cpu.mmu.write_byte(0x10, 0x05);
    cpu.relative_jump(JumpModifier::Zero);
    assert_eq!(cpu.registers.pc, 0x16);
}

#[test]
fn test_call_and_ret() {
    let mut cpu = initial_cpu();

    cpu.registers.pc = 0x100;
    cpu.registers.sp = 0xFFFE;
    set_short(&mut cpu, 0x100, 0x0200);

    cpu.call(JumpModifier::Always);
    assert_eq!(cpu.registers.pc, 0x200);
    assert_eq!(cpu.registers.sp, 0xFFFC);
    assert_eq!(read_short(&cpu, 0xFFFC), 0x102);

    cpu.ret(JumpModifier::Always);
    assert_eq!(cpu.registers.pc, 0x102);
    assert_eq!(cpu.registers.sp, 0xFFFE);
}

#[test]
fn test_interrupts_routine_pushes_pc_and_jumps_to_vector() {
    let mut cpu = initial_cpu();

    cpu.registers.pc = 0x1234;
    cpu.registers.sp = 0xFFFE;
    cpu.ime = true;

    cpu.interrupts_routine(Interrupts::VBLANK);

    assert!(!cpu.ime);
    assert_eq!(cpu.registers.pc, 0x0040);
    assert_eq!(read_short(&cpu, 0xFFFC), 0x1234);
}

#[test]
fn test_ei_takes_effect_after_next_instruction() {
    let mut cpu = initial_cpu();

    cpu.registers.pc = 0;
    cpu.mmu.write_byte(0, 0xFB); // EI
    cpu.mmu.write_byte(1, 0x00); // NOP

    cpu.step_cycle();
    assert!(!cpu.ime, "IME must not be set immediately after EI");

    cpu.step_cycle();
    assert!(cpu.ime, "IME takes effect after the instruction following EI");
}

#[test]
fn test_halt_bug_executes_following_opcode_twice() {
    let mut cpu = initial_cpu();

    cpu.mmu.interrupts_mut().write_ie(0x01);
    cpu.mmu.interrupts_mut().write_if(0x01);
    cpu.ime = false;

    cpu.registers.pc = 0;
    cpu.mmu.write_byte(0, 0x76); // HALT, with an interrupt already pending and IME=0.
    cpu.mmu.write_byte(1, 0x04); // INC B

    cpu.step_cycle(); // executes HALT, sets the halt_bug latch.
    assert!(!cpu.halted);
    assert_eq!(cpu.registers.pc, 1);

    cpu.step_cycle(); // INC B, but PC does not advance afterwards.
    assert_eq!(cpu.registers.b, 1);
    assert_eq!(cpu.registers.pc, 1);

    cpu.step_cycle(); // INC B executes again from the same PC.
    assert_eq!(cpu.registers.b, 2);
    assert_eq!(cpu.registers.pc, 2);
}

#[test]
fn test_undefined_opcode_locks_cpu() {
    let mut cpu = initial_cpu();

    cpu.registers.pc = 0;
    cpu.mmu.write_byte(0, 0xD3); // genuinely undefined
    cpu.mmu.write_byte(1, 0x3C); // INC A, should never run

    cpu.step_cycle();
    assert!(cpu.locked);

    let pc_before = cpu.registers.pc;
    cpu.step_cycle();
    assert_eq!(cpu.registers.a, 0);
    assert_eq!(cpu.registers.pc, pc_before);
}
