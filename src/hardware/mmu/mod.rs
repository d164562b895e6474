use std::fmt::Debug;

use crate::emulator::EmulatorMode;
use crate::error::CoreError;
use crate::hardware::apu::{APU, APU_MEM_END, APU_MEM_START, WAVE_SAMPLE_END, WAVE_SAMPLE_START};
use crate::hardware::cartridge::Cartridge;
use crate::hardware::mmu::cgb_mem::CgbData;
use crate::hardware::mmu::hram::Hram;
use crate::hardware::mmu::wram::Wram;
use crate::hardware::ppu::{
    CGB_BG_PALETTE_DATA, CGB_BG_PALETTE_INDEX, CGB_OBJ_PALETTE_DATA, CGB_OBJ_PALETTE_INDEX, CGB_VRAM_BANK,
    DMA_TRANSFER, FRAMEBUFFER_SIZE, PPU,
};
use crate::io::interrupts::{InterruptController, InterruptFlags, Interrupts};
use crate::io::io_registers::IORegisters;
use crate::io::joypad::{InputKey, JoyPad, JOYPAD_REGISTER};
use crate::io::timer::{TimerRegisters, DIVIDER_REGISTER, TIMER_CONTROL, TIMER_COUNTER, TIMER_MODULO};
use crate::scheduler::{EventType, Scheduler};

pub mod cgb_mem;
mod dma;
mod hram;
mod wram;

/// 16 KB ROM bank 00, always fixed. From the cartridge, read-only.
pub const ROM_BANK_00_START: u16 = 0x0000;
pub const ROM_BANK_00_END: u16 = 0x3FFF;
/// 16 KB ROM bank 01-NN, switchable via the mapper. From the cartridge, read-only.
pub const ROM_BANK_NN_START: u16 = 0x4000;
pub const ROM_BANK_NN_END: u16 = 0x7FFF;
/// 8 KB of VRAM.
pub const VRAM_START: u16 = 0x8000;
pub const VRAM_END: u16 = 0x9FFF;
/// 8 KB of external RAM, if present on the cartridge.
pub const EXTERNAL_RAM_START: u16 = 0xA000;
pub const EXTERNAL_RAM_END: u16 = 0xBFFF;
/// 4 KB Work RAM bank 0.
pub const WRAM_BANK_00_START: u16 = 0xC000;
pub const WRAM_BANK_00_END: u16 = 0xCFFF;
/// 4 KB Work RAM bank 1-7, switchable via `SVBK` in CGB mode (fixed at bank 1 in DMG mode).
pub const WRAM_BANK_NN_START: u16 = 0xD000;
pub const WRAM_BANK_NN_END: u16 = 0xDFFF;
/// Mirror of C000-DDFF.
pub const ECHO_RAM_START: u16 = 0xE000;
pub const ECHO_RAM_END: u16 = 0xFDFF;
/// Sprite attribute table (OAM).
pub const OAM_ATTRIBUTE_START: u16 = 0xFE00;
pub const OAM_ATTRIBUTE_END: u16 = 0xFE9F;
/// Not usable; always reads as `0xFF`.
pub const NOT_USABLE_START: u16 = 0xFEA0;
pub const NOT_USABLE_END: u16 = 0xFEFF;
/// I/O Registers.
pub const IO_START: u16 = 0xFF00;
pub const IO_END: u16 = 0xFF7F;
/// The flag used to signal that an interrupt is pending.
pub const INTERRUPTS_FLAG: u16 = 0xFF0F;
/// High RAM (HRAM).
pub const HRAM_START: u16 = 0xFF80;
pub const HRAM_END: u16 = 0xFFFE;
/// Interrupts Enable register (IE).
pub const INTERRUPTS_ENABLE: u16 = 0xFFFF;
/// The value returned for an invalid/locked read.
pub const INVALID_READ: u8 = 0xFF;

/// `KEY1` - prepares/reports a CGB double-speed switch.
pub const CGB_PREPARE_SWITCH: u16 = 0xFF4D;
/// `SVBK` - Work RAM bank select, CGB only.
pub const CGB_WRAM_BANK: u16 = 0xFF70;

/// Sole address-range arbiter for the system: owns every bus-addressable component and is the
/// only thing any of them talk to each other through.
pub trait MemoryMapper: Debug {
    fn read_byte(&self, address: u16) -> u8;
    fn write_byte(&mut self, address: u16, value: u8);
    fn interrupts(&self) -> &InterruptController;
    fn interrupts_mut(&mut self) -> &mut InterruptController;
    /// Returns the cartridge, if any is mounted (always `Some` once a `Memory` exists; the
    /// `TestMemory` harness in `hardware/cpu/tests` is the only `MemoryMapper` without one).
    fn cartridge(&self) -> Option<&Cartridge>;
    /// Advance every bus-side component by one M-cycle (4 T-cycles). Returns any interrupts
    /// that were raised as a side effect so the CPU can fold them into IF.
    fn do_m_cycle(&mut self) -> Option<InterruptFlags>;
    /// Called by the CPU's `STOP` handler; completes a pending CGB speed switch. No-op in DMG
    /// mode or when no switch has been armed via `KEY1`.
    fn attempt_speed_switch(&mut self) {}
}

#[derive(Debug)]
pub struct Memory {
    cartridge: Cartridge,
    scheduler: Scheduler,
    emulation_mode: EmulatorMode,
    cgb_data: CgbData,
    /// T-cycle timestamp until which the bus is locked to everything but HRAM, due to OAM-DMA.
    dma_locked_until: u64,
    frame_complete: bool,

    ppu: PPU,
    apu: APU,
    hram: Hram,
    wram: Wram,

    joypad_register: JoyPad,
    timers: TimerRegisters,
    interrupts: InterruptController,
    io_registers: IORegisters,
}

impl Memory {
    pub fn new(rom: Vec<u8>, saved_ram: Option<Vec<u8>>, mode: EmulatorMode) -> Result<Self, CoreError> {
        let cartridge = Cartridge::new(rom, saved_ram)?;
        let emulation_mode = mode.resolve(cartridge.header().cgb_flag);

        log::info!(
            "Constructed cartridge \"{}\" in {:?} mode",
            cartridge.title(),
            emulation_mode
        );

        Ok(Memory {
            cartridge,
            scheduler: Scheduler::new(),
            emulation_mode,
            cgb_data: CgbData::new(),
            dma_locked_until: 0,
            frame_complete: false,
            ppu: PPU::new(emulation_mode.is_cgb()),
            apu: APU::new(),
            hram: Hram::new(),
            wram: Wram::new(),
            joypad_register: JoyPad::new(),
            timers: TimerRegisters::default(),
            interrupts: InterruptController::new(),
            io_registers: IORegisters::new(),
        })
    }

    /// Resets every piece of state but the cartridge itself, as at power-on.
    pub fn reset(&mut self) {
        self.scheduler = Scheduler::new();
        self.cgb_data = CgbData::new();
        self.dma_locked_until = 0;
        self.frame_complete = false;
        self.ppu = PPU::new(self.emulation_mode.is_cgb());
        self.apu = APU::new();
        self.hram = Hram::new();
        self.wram = Wram::new();
        self.joypad_register = JoyPad::new();
        self.timers = TimerRegisters::default();
        self.interrupts = InterruptController::new();
        self.io_registers = IORegisters::new();
    }

    /// DMG shade index (0-3) or CGB composite palette index (0-31) per pixel.
    pub fn index_buffer(&self) -> &[u8; FRAMEBUFFER_SIZE] {
        self.ppu.index_buffer()
    }

    /// `index_buffer()` resolved to RGB888 triples through the active DMG/CGB palette(s).
    pub fn rgb_buffer(&self) -> &[(u8, u8, u8); FRAMEBUFFER_SIZE] {
        self.ppu.rgb_buffer()
    }

    /// Returns and clears the "a frame just finished rendering" flag, set by `do_m_cycle` the
    /// instant the PPU raises V-Blank.
    pub fn take_frame_complete(&mut self) -> bool {
        std::mem::replace(&mut self.frame_complete, false)
    }

    pub fn press_key(&mut self, key: InputKey) {
        if self.joypad_register.press_key(key) {
            self.interrupts.request(Interrupts::JOYPAD);
        }
    }

    pub fn release_key(&mut self, key: InputKey) {
        self.joypad_register.release_key(key);
    }

    pub fn save_ram(&self) -> Option<&[u8]> {
        self.cartridge.battery_ram()
    }

    pub fn read_byte(&self, address: u16) -> u8 {
        if self.dma_bus_locked() && !(HRAM_START..=HRAM_END).contains(&address) {
            return INVALID_READ;
        }

        match address {
            ROM_BANK_00_START..=ROM_BANK_00_END => self.cartridge.read_0000_3fff(address),
            ROM_BANK_NN_START..=ROM_BANK_NN_END => self.cartridge.read_4000_7fff(address),
            VRAM_START..=VRAM_END => self.ppu.read_vram(address),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => self.cartridge.read_external_ram(address),
            WRAM_BANK_00_START..=WRAM_BANK_00_END => self.wram.read_bank_0(address),
            WRAM_BANK_NN_START..=WRAM_BANK_NN_END => self.wram.read_bank_n(address),
            ECHO_RAM_START..=ECHO_RAM_END => self.wram.read_echo_ram(address),
            OAM_ATTRIBUTE_START..=OAM_ATTRIBUTE_END => self.ppu.read_vram(address),
            NOT_USABLE_START..=NOT_USABLE_END => INVALID_READ,
            IO_START..=IO_END => self.read_io_byte(address),
            HRAM_START..=HRAM_END => self.hram.read_byte(address),
            INTERRUPTS_ENABLE => self.interrupts.read_ie(),
            _ => INVALID_READ,
        }
    }

    pub fn write_byte(&mut self, address: u16, value: u8) {
        if self.dma_bus_locked() && !(HRAM_START..=HRAM_END).contains(&address) {
            return;
        }

        match address {
            ROM_BANK_00_START..=ROM_BANK_NN_END => self.cartridge.write_byte(address, value),
            VRAM_START..=VRAM_END => self.write_vram(address, value),
            EXTERNAL_RAM_START..=EXTERNAL_RAM_END => self.cartridge.write_byte(address, value),
            WRAM_BANK_00_START..=WRAM_BANK_00_END => self.wram.write_bank_0(address, value),
            WRAM_BANK_NN_START..=WRAM_BANK_NN_END => self.wram.write_bank_n(address, value),
            ECHO_RAM_START..=ECHO_RAM_END => self.wram.write_echo_ram(address, value),
            OAM_ATTRIBUTE_START..=OAM_ATTRIBUTE_END => self.write_vram(address, value),
            NOT_USABLE_START..=NOT_USABLE_END => log::trace!("Write to non-usable memory: {:04X}", address),
            IO_START..=IO_END => self.write_io_byte(address, value),
            HRAM_START..=HRAM_END => self.hram.set_byte(address, value),
            INTERRUPTS_ENABLE => self.interrupts.write_ie(value),
            _ => {}
        }
    }

    fn write_vram(&mut self, address: u16, value: u8) {
        if let Some(flags) = self.ppu.write_vram(address, value) {
            self.interrupts.insert_interrupt(flags);
        }
    }

    fn read_io_byte(&self, address: u16) -> u8 {
        match address {
            JOYPAD_REGISTER => self.joypad_register.get_register(),
            DIVIDER_REGISTER => self.timers.divider_register(),
            TIMER_COUNTER => self.timers.timer_counter,
            TIMER_MODULO => self.timers.timer_modulo,
            TIMER_CONTROL => self.timers.timer_control.to_bits(),
            INTERRUPTS_FLAG => self.interrupts.read_if(),
            APU_MEM_START..=APU_MEM_END => self.apu.read_register(address),
            WAVE_SAMPLE_START..=WAVE_SAMPLE_END => self.apu.read_register(address),
            DMA_TRANSFER => self.io_registers.read_byte(address),
            CGB_PREPARE_SWITCH => {
                if self.emulation_mode.is_cgb() {
                    self.cgb_data.read_prepare_switch()
                } else {
                    INVALID_READ
                }
            }
            CGB_WRAM_BANK => self.wram.read_bank_select(),
            crate::hardware::ppu::LCD_CONTROL_REGISTER..=crate::hardware::ppu::WX_REGISTER => {
                self.ppu.read_vram(address)
            }
            CGB_VRAM_BANK | CGB_BG_PALETTE_INDEX | CGB_BG_PALETTE_DATA | CGB_OBJ_PALETTE_INDEX | CGB_OBJ_PALETTE_DATA => {
                self.ppu.read_vram(address)
            }
            _ => self.io_registers.read_byte(address),
        }
    }

    fn write_io_byte(&mut self, address: u16, value: u8) {
        // Used by Blargg-style test ROMs to report pass/fail over the serial port.
        if address == 0xFF02 && value == 0x81 {
            print!("{}", self.read_byte(0xFF01) as char);
        }

        match address {
            JOYPAD_REGISTER => self.joypad_register.set_register(value),
            DIVIDER_REGISTER => self.timers.set_divider(),
            TIMER_COUNTER => self.timers.set_timer_counter(value),
            TIMER_MODULO => self.timers.set_tma(value),
            TIMER_CONTROL => self.timers.set_timer_control(value),
            INTERRUPTS_FLAG => self.interrupts.write_if(value),
            APU_MEM_START..=APU_MEM_END => self.apu.write_register(address, value),
            WAVE_SAMPLE_START..=WAVE_SAMPLE_END => self.apu.write_register(address, value),
            DMA_TRANSFER => self.dma_transfer(value),
            CGB_PREPARE_SWITCH => self.cgb_data.write_prepare_switch(value),
            CGB_WRAM_BANK => self.wram.write_bank_select(value),
            crate::hardware::ppu::LCD_CONTROL_REGISTER..=crate::hardware::ppu::WX_REGISTER => {
                self.write_vram(address, value)
            }
            CGB_VRAM_BANK | CGB_BG_PALETTE_INDEX | CGB_BG_PALETTE_DATA | CGB_OBJ_PALETTE_INDEX | CGB_OBJ_PALETTE_DATA => {
                self.write_vram(address, value)
            }
            _ => self.io_registers.write_byte(address, value),
        }
    }

    fn get_speed_shift(&self) -> u32 {
        self.cgb_data.double_speed as u32
    }
}

impl MemoryMapper for Memory {
    fn read_byte(&self, address: u16) -> u8 {
        self.read_byte(address)
    }

    fn write_byte(&mut self, address: u16, value: u8) {
        self.write_byte(address, value)
    }

    fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }

    fn cartridge(&self) -> Option<&Cartridge> {
        Some(&self.cartridge)
    }

    fn do_m_cycle(&mut self) -> Option<InterruptFlags> {
        self.scheduler.add_cycles(4);

        while let Some(event) = self.scheduler.pop_closest() {
            match event.event_type {
                EventType::DmaRequested => self.begin_dma_copy(),
                EventType::DmaTransferComplete => self.end_dma_copy(),
                EventType::SpeedSwitchComplete | EventType::NONE => {}
            }
        }

        let mut flags = InterruptFlags::empty();
        let mut raised = false;
        let peripheral_cycles = 4 >> self.get_speed_shift();

        if let Some(ppu_flags) = self.ppu.do_cycle(peripheral_cycles) {
            if ppu_flags.contains(InterruptFlags::VBLANK) {
                self.frame_complete = true;
            }
            flags.insert(ppu_flags);
            raised = true;
        }

        if let Some(timer_flags) = self.timers.tick_timers() {
            flags.insert(timer_flags);
            raised = true;
        }

        self.apu.tick(peripheral_cycles);

        if raised {
            Some(flags)
        } else {
            None
        }
    }

    fn attempt_speed_switch(&mut self) {
        if self.emulation_mode.is_cgb() && self.cgb_data.should_prepare() {
            self.cgb_data.toggle_speed();
        }
    }
}
