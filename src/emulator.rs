//! The top-level handle a caller embeds: owns the CPU/bus and exposes the frame-stepping API.

use crate::error::CoreError;
use crate::hardware::cpu::CPU;
use crate::hardware::mmu::{Memory, MemoryMapper};
use crate::hardware::ppu::FRAMEBUFFER_SIZE;
use crate::io::joypad::InputKey;

/// T-cycles in one full 154-line frame (70224 = 456 cycles/line * 154 lines).
pub const CYCLES_PER_FRAME: u32 = 70224;

/// Which hardware variant the cartridge is run as.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmulatorMode {
    /// Original Game Boy.
    Dmg,
    /// Game Boy Color, including double-speed mode.
    Cgb,
    /// Resolved to `Dmg` or `Cgb` from the cartridge header's CGB flag at construction time.
    Auto,
}

impl EmulatorMode {
    pub fn is_cgb(&self) -> bool {
        matches!(self, EmulatorMode::Cgb)
    }

    /// Turns `Auto` into a concrete mode using the cartridge header's CGB flag; `Dmg`/`Cgb`
    /// pass through unchanged.
    pub fn resolve(self, cgb_flag: bool) -> EmulatorMode {
        match self {
            EmulatorMode::Auto if cgb_flag => EmulatorMode::Cgb,
            EmulatorMode::Auto => EmulatorMode::Dmg,
            other => other,
        }
    }
}

/// An index into `Machine::frame_buffer()`/`rgb_frame_buffer()` bumped every time
/// `step_frame` completes a V-Blank.
pub type FrameId = u64;

/// Bit layout for `step_frame`'s `joypad_bits`: 1 means pressed.
/// bit0=Right bit1=Left bit2=Up bit3=Down bit4=A bit5=B bit6=Select bit7=Start
const JOYPAD_BITS: [InputKey; 8] = [
    InputKey::RIGHT,
    InputKey::LEFT,
    InputKey::UP,
    InputKey::DOWN,
    InputKey::A,
    InputKey::B,
    InputKey::SELECT,
    InputKey::START,
];

/// A fully self-contained Game Boy / Game Boy Color core. Generic CPU wiring lives in
/// [`crate::hardware::cpu`]; this is the thing a frontend actually holds onto.
#[derive(Debug)]
pub struct Machine {
    cpu: CPU<Memory>,
    mode: EmulatorMode,
    joypad_state: u8,
    frame_id: FrameId,
}

impl Machine {
    /// Parses and loads `rom_bytes`, restoring `saved_ram` as the cartridge's battery-backed
    /// RAM if its size matches what the header declares. `mode` picks the hardware variant;
    /// `EmulatorMode::Auto` resolves from the ROM header's CGB flag.
    pub fn new(rom_bytes: &[u8], saved_ram: Option<Vec<u8>>, mode: EmulatorMode) -> Result<Self, CoreError> {
        let mmu = Memory::new(rom_bytes.to_vec(), saved_ram, mode)?;
        let resolved_mode = mode.resolve(mmu.cartridge().map(|c| c.header().cgb_flag).unwrap_or(false));

        let mut cpu = CPU::new(mmu);
        cpu.reset(resolved_mode);

        Ok(Machine { cpu, mode: resolved_mode, joypad_state: 0, frame_id: 0 })
    }

    /// Resets CPU and bus state to power-on values; the cartridge and its RAM are untouched.
    pub fn reset(&mut self) {
        self.cpu.mmu.reset();
        self.cpu.reset(self.mode);
        self.joypad_state = 0;
        self.frame_id = 0;
    }

    /// Applies `joypad_bits` (see [`JOYPAD_BITS`] for the layout), then runs the CPU until a
    /// full frame's worth of V-Blank has been produced. Returns the new frame's id.
    pub fn step_frame(&mut self, joypad_bits: u8) -> FrameId {
        self.apply_joypad(joypad_bits);

        loop {
            self.cpu.step_cycle();
            if self.cpu.mmu.take_frame_complete() {
                break;
            }
        }

        self.frame_id += 1;
        self.frame_id
    }

    fn apply_joypad(&mut self, joypad_bits: u8) {
        let changed = self.joypad_state ^ joypad_bits;
        for (bit, key) in JOYPAD_BITS.iter().enumerate() {
            if changed & (1 << bit) == 0 {
                continue;
            }
            if joypad_bits & (1 << bit) != 0 {
                self.cpu.mmu.press_key(*key);
            } else {
                self.cpu.mmu.release_key(*key);
            }
        }
        self.joypad_state = joypad_bits;
    }

    /// DMG shade index (0-3) or CGB composite palette index (`palette_number * 4 + colour`,
    /// 0-31) per pixel, row-major, 160x144 - the raw, pre-palette-lookup value.
    pub fn frame_buffer(&self) -> &[u8; FRAMEBUFFER_SIZE] {
        self.cpu.mmu.index_buffer()
    }

    /// `frame_buffer()` resolved through the active DMG/CGB palette(s) to RGB888 triples.
    pub fn rgb_frame_buffer(&self) -> &[(u8, u8, u8); FRAMEBUFFER_SIZE] {
        self.cpu.mmu.rgb_buffer()
    }

    /// The cartridge's battery-backed RAM, if it has any, for save persistence.
    pub fn save_ram(&self) -> Option<&[u8]> {
        self.cpu.mmu.save_ram()
    }

    pub fn mode(&self) -> EmulatorMode {
        self.mode
    }
}
