use crate::hardware::apu::APU;
use crate::hardware::cartridge::Cartridge;
use crate::hardware::cpu::registers::Registers;
use crate::hardware::cpu::CPU;
use crate::hardware::mmu::MemoryMapper;
use crate::hardware::ppu::PPU;
use crate::io::interrupts::{InterruptController, InterruptFlags};
use crate::io::timer::TimerRegisters;
use std::fmt;
use std::fmt::{Debug, Formatter};

mod cycle_tests;
mod instruction_tests;

// Common functionality for the tests.

struct TestMemory {
    mem: Vec<u8>,
    pub ppu: PPU,
    pub apu: APU,
    pub timers: TimerRegisters,
    pub interrupts: InterruptController,
}

impl MemoryMapper for TestMemory {
    fn read_byte(&self, address: u16) -> u8 {
        self.mem[address as usize]
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        self.mem[address as usize] = value
    }

    fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }

    fn cartridge(&self) -> Option<&Cartridge> {
        None
    }

    fn do_m_cycle(&mut self) -> Option<InterruptFlags> {
        let mut flags = self.ppu.do_cycle(4);

        if let Some(timer_flags) = self.timers.tick_timers() {
            flags = Some(flags.unwrap_or_else(InterruptFlags::empty) | timer_flags);
        }

        self.apu.tick(4);

        flags
    }
}

impl Debug for TestMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestMemory").finish()
    }
}

impl<T: MemoryMapper> CPU<T> {
    fn set_instruction(&mut self, code: u8) {
        self.mmu.write_byte(0, code);
    }
}

fn initial_cpu() -> CPU<TestMemory> {
    let mut cpu = CPU::new(TestMemory {
        mem: vec![0; 0x10000],
        ppu: PPU::new(false),
        apu: APU::new(),
        timers: Default::default(),
        interrupts: Default::default(),
    });
    cpu.registers = Registers::new();
    cpu
}

pub fn read_short<T: MemoryMapper>(cpu: &CPU<T>, address: u16) -> u16 {
    let least_s_byte = cpu.mmu.read_byte(address) as u16;
    let most_s_byte = cpu.mmu.read_byte(address.wrapping_add(1)) as u16;

    (most_s_byte << 8) | least_s_byte
}

pub fn set_short<T: MemoryMapper>(cpu: &mut CPU<T>, address: u16, value: u16) {
    cpu.mmu.write_byte(address, (value & 0xFF) as u8); // Least significant byte first.
    cpu.mmu
        .write_byte(address.wrapping_add(1), ((value & 0xFF00) >> 8) as u8);
}
