use std::fmt;

/// Errors that can occur while constructing a [`crate::emulator::Machine`].
///
/// Only raised at construction time; once a `Machine` exists, malformed mapper writes and
/// undefined opcodes are handled as internal state per Pan Docs, not surfaced as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The ROM header failed a sanity check (too short, or an inconsistent size field).
    BadHeader(String),
    /// The header names a mapper id this core does not implement.
    UnsupportedMapper(u8),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::BadHeader(reason) => write!(f, "bad cartridge header: {}", reason),
            CoreError::UnsupportedMapper(id) => write!(f, "unsupported mapper id: 0x{:02X}", id),
        }
    }
}

impl std::error::Error for CoreError {}
