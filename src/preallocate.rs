//! Preallocation hint: best-effort filesystem reservation sized from the
//! expected final archive length. Never a correctness gate; failure is
//! silently ignored.

use std::fs::File;

/// One entry's contribution to the expected output size: a name and a
/// source payload length.
pub struct EntrySize {
    pub name_len: usize,
    pub file_len: u64,
}

/// Size of the ghost record this crate writes (multi-pair variant).
use crate::ghost::GHOST_SIZE;

/// Sum the expected final archive length: ghost + per-entry contributions +
/// the fixed-size ZIP64 trailer.
pub fn expected_archive_size(entries: &[EntrySize]) -> u64 {
    let mut total = GHOST_SIZE as u64;
    for e in entries {
        // LFH(30) + name + data + data descriptor(24)
        total += 30 + e.name_len as u64 + e.file_len + 24;
        // CDFH(46) + name + ZIP64 extra(28)
        total += 46 + e.name_len as u64 + 28;
    }
    // ZIP64 EOCD(56) + locator(20) + classic EOCD(22)
    total += 56 + 20 + 22;
    total
}

/// Request a best-effort reservation of `len` bytes for `file`. Any failure
/// (unsupported filesystem, permissions, etc.) is silently ignored: this is
/// a performance optimization, not a correctness gate.
pub fn preallocate(file: &File, len: u64) {
    let _ = file.set_len(len);
}
