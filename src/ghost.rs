//! The ghost record: a fixed, 160-byte LFH-shaped header at offset 0 of every
//! archive this crate writes, carrying up to seven (offset, length) pairs
//! that point applications at externally appended metadata.
//!
//! Layout:
//!
//! ```text
//! offset  size  field
//! 0       4     local file header signature (0x04034B50)
//! 4       2     version needed (45)
//! 6       2     general purpose flags (0)
//! 8       2     method (0 = STORE)
//! 10      4     mod time / date (0)
//! 14      4     crc32 (0)
//! 18      4     compressed size (0)
//! 22      4     uncompressed size (0)
//! 26      2     name length (10)
//! 28      2     extra field length (120)
//! 30      10    name: "TACO_GHOST"
//! 40      2     extra field id (0x7454)
//! 42      2     extra field data size (116)
//! 44      1     payload: count (0..=7)
//! 45      3     payload: padding (zero)
//! 48      112   payload: 7 * (offset: u64, length: u64)
//! ```
//!
//! Total size: 160 bytes. The payload (bytes 44..160) is the only region
//! `ghost_io::update_ghost` ever rewrites after creation.
//!
//! The payload is 116 bytes: 1 count byte, 3 padding bytes, and 7 pairs of
//! 16 bytes each.

use crate::codec::{get_u16_le, get_u32_le, get_u64_le, put_u16_le, put_u32_le, put_u64_le};
use crate::error::{Result, TacoZipError};

/// Local file header signature shared with every entry.
pub const LFH_SIGNATURE: u32 = 0x0403_4B50;
/// Version-needed-to-extract for every record this crate writes (4.5).
pub const VERSION_NEEDED_ZIP64: u16 = 45;

/// Fixed archive name of the ghost entry.
pub const GHOST_NAME: &[u8] = b"TACO_GHOST";
/// Length of [`GHOST_NAME`].
pub const GHOST_NAME_LEN: usize = 10;
/// Ghost's custom extra field id.
pub const GHOST_EXTRA_ID: u16 = 0x7454;
/// Ghost's custom extra field data size: 1 count byte + 3 pad + 7*16 pairs.
pub const GHOST_EXTRA_DATA_SIZE: usize = 116;
/// Ghost's LFH-declared extra field length (id + size header + data).
pub const GHOST_EXTRA_LEN: usize = 4 + GHOST_EXTRA_DATA_SIZE;
/// Maximum number of (offset, length) pairs the ghost can carry.
pub const MAX_ENTRIES: usize = 7;
/// Total on-disk size of the ghost record.
pub const GHOST_SIZE: usize = 30 + GHOST_NAME_LEN + GHOST_EXTRA_LEN;
/// Byte offset of the payload's leading count byte within the ghost.
pub const PAYLOAD_COUNT_OFFSET: usize = 44;
/// Byte offset of the first (offset, length) pair within the ghost.
pub const PAYLOAD_PAIRS_OFFSET: usize = 48;

const _: () = assert!(GHOST_SIZE == 160);

/// Up to seven (offset, length) pointers to externally appended metadata.
///
/// `count` is always derived, never set directly: it is the index of the
/// first `(0, 0)` pair scanning from index 0 (or 7 if there is none),
/// keeping "unused trailing pairs are (0,0)" a structural invariant instead
/// of a documentation-only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostEntries {
    pairs: [(u64, u64); MAX_ENTRIES],
    count: u8,
}

impl GhostEntries {
    /// Build from up to seven pairs. Trailing `(0, 0)` pairs are treated as
    /// unused; a `(0, 0)` pair followed by a non-zero pair is rejected,
    /// since that would make `count` ambiguous.
    pub fn new(pairs: [(u64, u64); MAX_ENTRIES]) -> Result<Self> {
        let mut count = 0u8;
        let mut seen_zero = false;
        for &pair in &pairs {
            if pair == (0, 0) {
                seen_zero = true;
            } else if seen_zero {
                return Err(TacoZipError::Parameter(
                    "ghost pairs must not have a live entry after a (0,0) gap".to_string(),
                ));
            } else {
                count += 1;
            }
        }
        Ok(Self { pairs, count })
    }

    /// An empty ghost: all seven pairs `(0, 0)`.
    pub fn empty() -> Self {
        Self {
            pairs: [(0, 0); MAX_ENTRIES],
            count: 0,
        }
    }

    /// Number of leading live pairs.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// All seven pairs, live and padding alike, in slot order.
    pub fn pairs(&self) -> &[(u64, u64); MAX_ENTRIES] {
        &self.pairs
    }

    /// Serialize the full 160-byte ghost record.
    pub fn to_bytes(&self, utf8_flag: bool) -> [u8; GHOST_SIZE] {
        let mut buf = [0u8; GHOST_SIZE];
        put_u32_le(&mut buf, 0, LFH_SIGNATURE);
        put_u16_le(&mut buf, 4, VERSION_NEEDED_ZIP64);
        put_u16_le(&mut buf, 6, if utf8_flag { 0x0800 } else { 0 });
        put_u16_le(&mut buf, 8, 0); // method: STORE
        put_u32_le(&mut buf, 10, 0); // mod time/date
        put_u32_le(&mut buf, 14, 0); // crc32
        put_u32_le(&mut buf, 18, 0); // compressed size
        put_u32_le(&mut buf, 22, 0); // uncompressed size
        put_u16_le(&mut buf, 26, GHOST_NAME_LEN as u16);
        put_u16_le(&mut buf, 28, GHOST_EXTRA_LEN as u16);
        buf[30..30 + GHOST_NAME_LEN].copy_from_slice(GHOST_NAME);
        put_u16_le(&mut buf, 40, GHOST_EXTRA_ID);
        put_u16_le(&mut buf, 42, GHOST_EXTRA_DATA_SIZE as u16);
        self.write_payload(&mut buf[PAYLOAD_COUNT_OFFSET..]);
        buf
    }

    /// Write just the 116-byte payload (count + padding + pairs) into `out`.
    fn write_payload(&self, out: &mut [u8]) {
        out[0] = self.count;
        out[1] = 0;
        out[2] = 0;
        out[3] = 0;
        for (i, &(offset, length)) in self.pairs.iter().enumerate() {
            let base = 4 + i * 16;
            put_u64_le(out, base, offset);
            put_u64_le(out, base + 8, length);
        }
    }

    /// Just the 116-byte payload, for patching an existing ghost in place.
    pub fn payload_bytes(&self) -> [u8; GHOST_EXTRA_DATA_SIZE] {
        let mut out = [0u8; GHOST_EXTRA_DATA_SIZE];
        self.write_payload(&mut out);
        out
    }

    /// Parse a validated 160-byte ghost buffer into its pairs.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        validate(buf)?;
        Self::parse_payload(&buf[PAYLOAD_COUNT_OFFSET..])
    }

    fn parse_payload(payload: &[u8]) -> Result<Self> {
        let count = payload[0];
        if count as usize > MAX_ENTRIES {
            return Err(TacoZipError::InvalidGhost(format!(
                "ghost count {} exceeds max {}",
                count, MAX_ENTRIES
            )));
        }
        let mut pairs = [(0u64, 0u64); MAX_ENTRIES];
        for (i, pair) in pairs.iter_mut().enumerate() {
            let base = 4 + i * 16;
            let offset = get_u64_le(payload, base);
            let length = get_u64_le(payload, base + 8);
            *pair = (offset, length);
        }
        Ok(Self { pairs, count })
    }
}

/// Validate that `buf` is a structurally well-formed 160-byte ghost record.
/// Checks signature, name, extra-field id/size, and the count bound; does
/// not interpret the pair values themselves.
pub fn validate(buf: &[u8]) -> Result<()> {
    if buf.len() != GHOST_SIZE {
        return Err(TacoZipError::InvalidGhost(format!(
            "expected {} bytes, got {}",
            GHOST_SIZE,
            buf.len()
        )));
    }
    let signature = get_u32_le(buf, 0);
    if signature != LFH_SIGNATURE {
        return Err(TacoZipError::InvalidGhost(format!(
            "bad LFH signature 0x{:08X}",
            signature
        )));
    }
    let name_len = get_u16_le(buf, 26) as usize;
    if name_len != GHOST_NAME_LEN {
        return Err(TacoZipError::InvalidGhost(format!(
            "bad name length {}",
            name_len
        )));
    }
    let extra_len = get_u16_le(buf, 28) as usize;
    if extra_len != GHOST_EXTRA_LEN {
        return Err(TacoZipError::InvalidGhost(format!(
            "bad extra field length {}",
            extra_len
        )));
    }
    if &buf[30..30 + GHOST_NAME_LEN] != GHOST_NAME {
        return Err(TacoZipError::InvalidGhost(
            "name does not match TACO_GHOST".to_string(),
        ));
    }
    let extra_id = get_u16_le(buf, 40);
    if extra_id != GHOST_EXTRA_ID {
        return Err(TacoZipError::InvalidGhost(format!(
            "bad extra field id 0x{:04X}",
            extra_id
        )));
    }
    let extra_data_size = get_u16_le(buf, 42) as usize;
    if extra_data_size != GHOST_EXTRA_DATA_SIZE {
        return Err(TacoZipError::InvalidGhost(format!(
            "bad extra data size {}",
            extra_data_size
        )));
    }
    let count = buf[PAYLOAD_COUNT_OFFSET];
    if count as usize > MAX_ENTRIES {
        return Err(TacoZipError::InvalidGhost(format!(
            "count {} exceeds max {}",
            count, MAX_ENTRIES
        )));
    }
    Ok(())
}
