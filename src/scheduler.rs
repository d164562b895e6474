use binary_heap_plus::{BinaryHeap, MinComparator};
use bitflags::_core::cmp::Ordering;

/// Events the bus schedules ahead of time rather than checking every tick.
///
/// The CPU, timer and PPU line/mode clocks are all ticked directly once per instruction (see
/// `Machine::step_frame`); only the handful of bus-level events that fire rarely relative to
/// the T-cycle clock go through the scheduler.
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq)]
#[repr(u8)]
pub enum EventType {
    NONE = 255,
    /// OAM-DMA actually begins 4 cycles after the triggering write to FF46.
    DmaRequested = 0,
    /// OAM-DMA's 640 T-cycle bus lock has elapsed.
    DmaTransferComplete = 1,
    /// A CGB speed-switch STOP sequence finishes after its documented delay.
    SpeedSwitchComplete = 2,
}

#[derive(Debug, Copy, Clone, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub event_type: EventType,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.timestamp.partial_cmp(&other.timestamp)
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

#[derive(Debug)]
pub struct Scheduler {
    // Want the smallest timestamp first, so MinComparator.
    event_queue: BinaryHeap<Event, MinComparator>,
    pub current_time: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        let mut result = Self {
            event_queue: BinaryHeap::with_capacity_min(16),
            current_time: 0,
        };
        result.event_queue.push(Event {
            timestamp: u64::MAX,
            event_type: EventType::NONE,
        });
        result
    }

    /// Pop the next event if its timestamp has been reached, without removing events still in
    /// the future.
    pub fn pop_closest(&mut self) -> Option<Event> {
        if let Some(event) = self.event_queue.peek() {
            if event.timestamp <= self.current_time && event.event_type != EventType::NONE {
                return self.event_queue.pop();
            }
        }
        None
    }

    pub fn push_relative(&mut self, event_type: EventType, relative_timestamp: u64) {
        self.event_queue.push(Event {
            timestamp: self.current_time + relative_timestamp,
            event_type,
        });
    }

    pub fn remove_event_type(&mut self, event_type: EventType) {
        self.event_queue = BinaryHeap::from_vec(
            self.event_queue
                .clone()
                .into_iter()
                .filter(|e| e.event_type != event_type)
                .collect(),
        );
    }

    #[inline]
    pub fn add_cycles(&mut self, delta_cycles: u64) {
        self.current_time += delta_cycles;
    }
}
