use crate::hardware::mmu::Memory;
use crate::hardware::ppu::DMA_TRANSFER;
use crate::scheduler::EventType::{DmaRequested, DmaTransferComplete};

/// OAM-DMA's bus lock, in T-cycles, starting from the moment the transfer itself begins
/// (4 cycles after the triggering write to FF46).
pub const DMA_DURATION: u64 = 640;

impl Memory {
    /// Starts the sequence of events for an OAM-DMA transfer: the write to FF46 only records
    /// the source page, the actual copy begins 4 T-cycles later.
    pub fn dma_transfer(&mut self, value: u8) {
        self.io_registers.write_byte(DMA_TRANSFER, value);
        self.scheduler.remove_event_type(DmaTransferComplete);
        self.scheduler.push_relative(DmaRequested, 4);
    }

    pub(crate) fn begin_dma_copy(&mut self) {
        let source = (self.io_registers.read_byte(DMA_TRANSFER) as u16) << 8;
        for i in 0..0xA0u16 {
            let byte = self.read_byte(source + i);
            self.ppu.oam_dma_write(i as u8, byte);
        }
        self.dma_locked_until = self.scheduler.current_time + DMA_DURATION;
        self.scheduler.push_relative(DmaTransferComplete, DMA_DURATION);
    }

    pub(crate) fn end_dma_copy(&mut self) {
        self.dma_locked_until = 0;
    }

    /// Whether the CPU-visible bus is currently locked to everything but HRAM, per the real
    /// OAM-DMA's 640 T-cycle lock.
    pub fn dma_bus_locked(&self) -> bool {
        self.dma_locked_until > self.scheduler.current_time
    }
}
