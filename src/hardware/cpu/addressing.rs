//! Concrete [`ToU8`]/[`SetU8`]/[`ToU16`]/[`SetU16`] implementations for the handful of operand
//! shapes the opcode tables in `execute.rs` dispatch against: plain registers, the handful of
//! `(rr)`-style indirect addressing modes, and the two immediate forms (`n8`/`n16`).

use crate::hardware::cpu::execute::{InstructionAddress, WrapperEnum};
use crate::hardware::cpu::registers::{Reg16, Reg8};
use crate::hardware::cpu::traits::{SetU16, SetU8, ToU16, ToU8};
use crate::hardware::cpu::CPU;
use crate::hardware::mmu::MemoryMapper;

impl<M: MemoryMapper> ToU8<Reg8> for CPU<M> {
    fn read_u8_value(&mut self, target: Reg8) -> u8 {
        match target {
            Reg8::A => self.registers.a,
            Reg8::B => self.registers.b,
            Reg8::C => self.registers.c,
            Reg8::D => self.registers.d,
            Reg8::E => self.registers.e,
            Reg8::H => self.registers.h,
            Reg8::L => self.registers.l,
        }
    }
}

impl<M: MemoryMapper> SetU8<Reg8> for CPU<M> {
    fn set_u8_value(&mut self, target: Reg8, value: u8) {
        match target {
            Reg8::A => self.registers.a = value,
            Reg8::B => self.registers.b = value,
            Reg8::C => self.registers.c = value,
            Reg8::D => self.registers.d = value,
            Reg8::E => self.registers.e = value,
            Reg8::H => self.registers.h = value,
            Reg8::L => self.registers.l = value,
        }
    }
}

impl<M: MemoryMapper> ToU16<Reg16> for CPU<M> {
    fn read_u16_value(&mut self, target: Reg16) -> u16 {
        match target {
            Reg16::AF => self.registers.af(),
            Reg16::BC => self.registers.bc(),
            Reg16::DE => self.registers.de(),
            Reg16::HL => self.registers.hl(),
            Reg16::SP => self.registers.sp,
        }
    }
}

impl<M: MemoryMapper> SetU16<Reg16> for CPU<M> {
    fn set_u16_value(&mut self, target: Reg16, value: u16) {
        match target {
            Reg16::AF => self.registers.set_af(value),
            Reg16::BC => self.registers.set_bc(value),
            Reg16::DE => self.registers.set_de(value),
            Reg16::HL => self.registers.set_hl(value),
            Reg16::SP => self.registers.sp = value,
        }
    }
}

impl<M: MemoryMapper> ToU8<InstructionAddress> for CPU<M> {
    fn read_u8_value(&mut self, target: InstructionAddress) -> u8 {
        use InstructionAddress::*;
        match target {
            BCI => {
                let addr = self.registers.bc();
                self.read_byte_cycle(addr)
            }
            DEI => {
                let addr = self.registers.de();
                self.read_byte_cycle(addr)
            }
            HLI => {
                let addr = self.registers.hl();
                self.read_byte_cycle(addr)
            }
            HLIP => {
                let addr = self.registers.hl();
                let value = self.read_byte_cycle(addr);
                self.registers.set_hl(addr.wrapping_add(1));
                value
            }
            HLIN => {
                let addr = self.registers.hl();
                let value = self.read_byte_cycle(addr);
                self.registers.set_hl(addr.wrapping_sub(1));
                value
            }
            DIRECT => self.get_instr_u8(),
            DirectMem => {
                let addr = self.get_instr_u16();
                self.read_byte_cycle(addr)
            }
            IoDirect => {
                let offset = self.get_instr_u8() as u16;
                self.read_byte_cycle(0xFF00 + offset)
            }
            IoC => {
                let addr = 0xFF00 + self.registers.c as u16;
                self.read_byte_cycle(addr)
            }
        }
    }
}

impl<M: MemoryMapper> SetU8<InstructionAddress> for CPU<M> {
    fn set_u8_value(&mut self, target: InstructionAddress, value: u8) {
        use InstructionAddress::*;
        match target {
            BCI => {
                let addr = self.registers.bc();
                self.write_byte_cycle(addr, value);
            }
            DEI => {
                let addr = self.registers.de();
                self.write_byte_cycle(addr, value);
            }
            HLI => {
                let addr = self.registers.hl();
                self.write_byte_cycle(addr, value);
            }
            HLIP => {
                let addr = self.registers.hl();
                self.write_byte_cycle(addr, value);
                self.registers.set_hl(addr.wrapping_add(1));
            }
            HLIN => {
                let addr = self.registers.hl();
                self.write_byte_cycle(addr, value);
                self.registers.set_hl(addr.wrapping_sub(1));
            }
            DirectMem => {
                let addr = self.get_instr_u16();
                self.write_byte_cycle(addr, value);
            }
            IoDirect => {
                let offset = self.get_instr_u8() as u16;
                self.write_byte_cycle(0xFF00 + offset, value);
            }
            IoC => {
                let addr = 0xFF00 + self.registers.c as u16;
                self.write_byte_cycle(addr, value);
            }
            DIRECT => unreachable!("an immediate operand is never a write destination"),
        }
    }
}

impl<M: MemoryMapper> ToU16<InstructionAddress> for CPU<M> {
    fn read_u16_value(&mut self, target: InstructionAddress) -> u16 {
        match target {
            InstructionAddress::DIRECT => self.get_instr_u16(),
            other => unreachable!("no 16-bit read defined for {:?}", other),
        }
    }
}

impl<M: MemoryMapper> SetU16<InstructionAddress> for CPU<M> {
    fn set_u16_value(&mut self, target: InstructionAddress, value: u16) {
        match target {
            InstructionAddress::DirectMem => {
                let addr = self.get_instr_u16();
                self.write_short_cycle(addr, value);
            }
            other => unreachable!("no 16-bit write defined for {:?}", other),
        }
    }
}

impl<M: MemoryMapper> ToU8<WrapperEnum> for CPU<M> {
    fn read_u8_value(&mut self, target: WrapperEnum) -> u8 {
        match target {
            WrapperEnum::Reg8(reg) => self.read_u8_value(reg),
            WrapperEnum::InstructionAddress(addr) => self.read_u8_value(addr),
        }
    }
}

impl<M: MemoryMapper> SetU8<WrapperEnum> for CPU<M> {
    fn set_u8_value(&mut self, target: WrapperEnum, value: u8) {
        match target {
            WrapperEnum::Reg8(reg) => self.set_u8_value(reg, value),
            WrapperEnum::InstructionAddress(addr) => self.set_u8_value(addr, value),
        }
    }
}
