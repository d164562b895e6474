//! Purely here to provide an extra implementation block so that the main mod.rs doesn't get
//! too cluttered. Everything that moves a T-cycle forward lives here.

use crate::hardware::cpu::CPU;
use crate::hardware::mmu::MemoryMapper;
use crate::io::interrupts::{InterruptFlags, Interrupts};

impl<M: MemoryMapper> CPU<M> {
    /// Advance every bus-side component (PPU, timer, APU, and the rare DMA/speed-switch
    /// scheduler events) by one M-cycle (4 T-cycles), and fold any interrupts those
    /// components raised into IF.
    pub fn add_cycles(&mut self) {
        self.cycles_performed += 4;
        let interrupt = self.mmu.do_m_cycle();
        self.add_new_interrupts(interrupt);
    }

    /// Read the next opcode, advance the PC, and call the execute function for
    /// a prefix (`0xCB`) opcode.
    pub fn cb_prefix_call(&mut self) {
        self.opcode = self.get_instr_u8();
        self.execute_prefix(self.opcode);
    }

    /// Services the highest-priority pending interrupt, if IME allows it. Returns `true` if an
    /// interrupt was serviced (in which case the caller should not also fetch an opcode this
    /// step). If IME is 0 but a service-worthy interrupt is pending, this merely wakes a halted
    /// CPU (costing 4 cycles) without actually servicing anything.
    pub fn handle_interrupts(&mut self) -> bool {
        let interrupt_flags: InterruptFlags = self.mmu.interrupts().interrupt_flag;
        let interrupt_enable: InterruptFlags = self.mmu.interrupts().interrupt_enable;

        if !self.ime {
            // Only charge the wake-up cost when we actually transition out of HALT; with IME=0
            // and the CPU already running, pending-but-undeliverable interrupts are free.
            if self.halted && !(interrupt_flags & interrupt_enable).is_empty() {
                self.halted = false;
                self.add_cycles();
            }
            return false;
        }

        if interrupt_flags.is_empty() {
            return false;
        }

        // `Interrupts::iter()` walks in fixed hardware priority order (VBlank highest).
        for interrupt in Interrupts::iter() {
            let repr_flag = InterruptFlags::from_bits_truncate(interrupt as u8);
            if !(repr_flag & interrupt_flags & interrupt_enable).is_empty() {
                let mut remaining = interrupt_flags;
                remaining.remove(repr_flag);
                self.mmu.interrupts_mut().interrupt_flag = remaining;

                self.interrupts_routine(interrupt);
                return true;
            }
        }

        false
    }

    /// Based on the current `PC` will interpret the value at the location in memory as a `u8`
    /// value.
    ///
    /// Advances the `PC` by 1, unless the HALT bug latch is set, in which case this one fetch
    /// re-reads the same byte the next instruction will also read.
    pub fn get_instr_u8(&mut self) -> u8 {
        let result = self.read_byte_cycle(self.registers.pc);
        if self.halt_bug {
            self.halt_bug = false;
        } else {
            self.registers.pc = self.registers.pc.wrapping_add(1);
        }

        result
    }

    /// Based on the current `PC` will interpret the `current` and `current + 1` byte at those locations
    /// in memory as a `u16` value resolved as little endian (least significant byte first).
    ///
    /// Advances the `PC` by 2.
    pub fn get_instr_u16(&mut self) -> u16 {
        let least_s_byte = self.get_instr_u8() as u16;
        let most_s_byte = self.get_instr_u8() as u16;

        (most_s_byte << 8) | least_s_byte
    }

    /// Read a byte from the `MMU` and increment the cycle counter by 4.
    pub fn read_byte_cycle(&mut self, address: u16) -> u8 {
        self.add_cycles();
        self.mmu.read_byte(address)
    }

    /// Set a byte in the `MMU` and increment the cycle counter by 4.
    pub fn write_byte_cycle(&mut self, address: u16, value: u8) {
        self.add_cycles();
        self.mmu.write_byte(address, value);
    }

    /// Read a `short` in the `MMU` and increment the cycle counter by 8.
    pub fn read_short_cycle(&mut self, address: u16) -> u16 {
        let least_s_byte = self.read_byte_cycle(address) as u16;
        let most_s_byte = self.read_byte_cycle(address.wrapping_add(1)) as u16;

        (most_s_byte << 8) | least_s_byte
    }

    /// Set a `short` in the `MMU` and increment the cycle counter by 8.
    pub fn write_short_cycle(&mut self, address: u16, value: u16) {
        self.write_byte_cycle(address, (value & 0xFF) as u8); // Least significant byte first.
        self.write_byte_cycle(address.wrapping_add(1), (value >> 8) as u8);
    }

    /// Fold a bus-raised interrupt (PPU VBlank/STAT, timer overflow) into IF.
    pub fn add_new_interrupts(&mut self, interrupt: Option<InterruptFlags>) {
        if let Some(intr) = interrupt {
            self.mmu.interrupts_mut().insert_interrupt(intr);
        }
    }
}
