//! Streaming IEEE-802.3 CRC-32, reflected form, polynomial 0xEDB88320.
//!
//! The 256-entry table is built once, lazily, behind a `OnceLock` so every
//! caller observes a fully populated table regardless of which thread
//! triggers the first build.

use std::sync::OnceLock;

const POLY: u32 = 0xEDB88320;

static TABLE: OnceLock<[u32; 256]> = OnceLock::new();

fn table() -> &'static [u32; 256] {
    TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        let mut i = 0usize;
        while i < 256 {
            let mut crc = i as u32;
            let mut j = 0;
            while j < 8 {
                crc = if crc & 1 != 0 {
                    (crc >> 1) ^ POLY
                } else {
                    crc >> 1
                };
                j += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    })
}

/// Streaming CRC-32 accumulator. Handles the conventional xor-in/xor-out of
/// `0xFFFFFFFF` internally; callers just `update` and `finalize`.
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    /// Start a fresh accumulator.
    pub fn new() -> Self {
        Self { state: 0xFFFFFFFF }
    }

    /// Fold `bytes` into the running checksum.
    pub fn update(&mut self, bytes: &[u8]) {
        let table = table();
        let mut crc = self.state;
        for &byte in bytes {
            crc = table[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        self.state = crc;
    }

    /// Consume the accumulator and return the final CRC-32.
    pub fn finalize(self) -> u32 {
        self.state ^ 0xFFFFFFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot CRC-32 of a full buffer.
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(bytes);
    crc.finalize()
}
