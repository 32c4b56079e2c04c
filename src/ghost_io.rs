//! Ghost reader/updater: touches only the first 160 bytes of an existing
//! archive. Never parses the central directory, which is what gives callers
//! a constant-time way to locate external metadata by reading only the
//! first entry of the file.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::Result;
use crate::ghost::{validate, GhostEntries, GHOST_SIZE, PAYLOAD_COUNT_OFFSET};

/// Read the ghost pairs from an existing archive at `zip_path`.
///
/// Opens read-only, reads exactly [`GHOST_SIZE`] bytes, validates, and
/// decodes. Returns [`crate::error::TacoZipError::InvalidGhost`] if the
/// leading bytes don't parse as a ghost record, or
/// [`crate::error::TacoZipError::Io`] if the file is shorter than the ghost.
pub fn read_ghost<P: AsRef<Path>>(zip_path: P) -> Result<GhostEntries> {
    let mut file = OpenOptions::new().read(true).open(zip_path)?;
    let mut buf = [0u8; GHOST_SIZE];
    file.read_exact(&mut buf)?;
    GhostEntries::from_bytes(&buf)
}

/// Patch the ghost's payload in place with `new_ghost`'s pairs, leaving the
/// surrounding LFH and extra-field header byte-identical.
///
/// Validates the existing ghost header before writing anything; on
/// mismatch the file is left untouched.
pub fn update_ghost<P: AsRef<Path>>(zip_path: P, new_ghost: GhostEntries) -> Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(zip_path)?;

    let mut prefix = [0u8; GHOST_SIZE];
    file.read_exact(&mut prefix)?;
    validate(&prefix)?;

    file.seek(SeekFrom::Start(PAYLOAD_COUNT_OFFSET as u64))?;
    file.write_all(&new_ghost.payload_bytes())?;
    file.flush()?;
    Ok(())
}
