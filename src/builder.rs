//! Archive builder: orchestrates a full `create()` call. Opens the output,
//! preallocates, writes the ghost, streams each entry, writes the central
//! directory, then flushes and closes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::central::write_central_directory;
use crate::entry::{write_entry, EntryRecord, COPY_BUFFER_SIZE};
use crate::error::{Result, TacoZipError};
use crate::ghost::GhostEntries;
use crate::preallocate::{expected_archive_size, preallocate, EntrySize};

/// Output buffer size target: at least 4 MiB.
pub const OUTPUT_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// One (source path, archive name) pair to be written by [`create`].
///
/// A single slice of pairs, rather than parallel `src_paths`/`arc_names`
/// arrays, rules out an array-size-mismatch parameter error by construction.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub source: PathBuf,
    pub name: String,
}

impl ArchiveEntry {
    /// Convenience constructor.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(source: P, name: S) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }
}

/// Whether the UTF-8 general-purpose flag bit is set on every LFH/CDFH this
/// build emits. Compile-time switch via the `utf8-names` feature.
#[cfg(feature = "utf8-names")]
const UTF8_FLAG: bool = true;
#[cfg(not(feature = "utf8-names"))]
const UTF8_FLAG: bool = false;

/// Create a complete ZIP64 archive at `zip_path` containing `entries`, with
/// `ghost` embedded at byte offset 0.
///
/// Fails with [`TacoZipError::Parameter`] if `entries` is empty or any name
/// is out of the 1..=65535 byte range; fails with
/// [`TacoZipError::Io`] on any I/O error. On any failure the partially
/// written output file is left in place; removing it is the caller's
/// responsibility.
pub fn create<P: AsRef<Path>>(
    zip_path: P,
    entries: &[ArchiveEntry],
    ghost: GhostEntries,
) -> Result<()> {
    if entries.is_empty() {
        return Err(TacoZipError::Parameter(
            "at least one entry is required".to_string(),
        ));
    }
    for entry in entries {
        let len = entry.name.as_bytes().len();
        if len == 0 || len > u16::MAX as usize {
            return Err(TacoZipError::Parameter(format!(
                "archive name {:?} length {} out of range 1..=65535",
                entry.name, len
            )));
        }
    }

    let file = File::create(zip_path.as_ref())?;

    let sizes: Vec<EntrySize> = entries
        .iter()
        .map(|e| {
            let file_len = std::fs::metadata(&e.source).map(|m| m.len()).unwrap_or(0);
            EntrySize {
                name_len: e.name.as_bytes().len(),
                file_len,
            }
        })
        .collect();
    preallocate(&file, expected_archive_size(&sizes));

    let mut out = BufWriter::with_capacity(OUTPUT_BUFFER_SIZE, file);

    let ghost_bytes = ghost.to_bytes(UTF8_FLAG);
    out.write_all(&ghost_bytes)?;

    let mut copy_buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut records: Vec<EntryRecord> = Vec::with_capacity(entries.len());
    for entry in entries {
        let src = File::open(&entry.source)?;
        let record = write_entry(
            &mut out,
            entry.name.as_bytes(),
            src,
            UTF8_FLAG,
            &mut copy_buf,
        )?;
        records.push(record);
    }

    write_central_directory(&mut out, &records)?;

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    fn write_src(dir: &std::path::Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn create_rejects_empty_entry_list() {
        let dir = tempdir().unwrap();
        let zip_path = dir.path().join("out.zip");
        let err = create(&zip_path, &[], GhostEntries::empty()).unwrap_err();
        assert!(matches!(err, TacoZipError::Parameter(_)));
    }

    #[test]
    fn create_e1_single_file_matches_expected_length() {
        let dir = tempdir().unwrap();
        let src = write_src(dir.path(), "a.txt", b"hello");
        let zip_path = dir.path().join("out.zip");

        let mut pairs = [(0u64, 0u64); 7];
        pairs[0] = (100, 50);
        let ghost = GhostEntries::new(pairs).unwrap();

        create(&zip_path, &[ArchiveEntry::new(src, "a.txt")], ghost).unwrap();

        let len = std::fs::metadata(&zip_path).unwrap().len();
        // ghost(160) + LFH+name+data+DD(30+5+5+24) + CDFH+name+extra(46+5+28)
        // + EOCD64(56) + locator(20) + EOCD(22)
        let expected = 160 + (30 + 5 + 5 + 24) + (46 + 5 + 28) + (56 + 20 + 22);
        assert_eq!(len, expected);
    }

    #[test]
    fn create_two_files_monotonic_lfh_offsets() {
        let dir = tempdir().unwrap();
        let src_x = write_src(dir.path(), "x", b"abc");
        let src_y = write_src(dir.path(), "y", b"defgh");
        let zip_path = dir.path().join("out.zip");

        create(
            &zip_path,
            &[
                ArchiveEntry::new(src_x, "x"),
                ArchiveEntry::new(src_y, "sub/y"),
            ],
            GhostEntries::empty(),
        )
        .unwrap();

        let mut bytes = Vec::new();
        File::open(&zip_path).unwrap().read_to_end(&mut bytes).unwrap();
        // First entry's LFH starts right after the 160-byte ghost.
        assert_eq!(&bytes[160..164], &0x0403_4B50u32.to_le_bytes());
        // Second entry's LFH: 160 + 30 + name("x")=1 + data(3) + DD(24) = 218
        let second_offset = 160 + 30 + 1 + 3 + 24;
        assert_eq!(&bytes[second_offset..second_offset + 4], &0x0403_4B50u32.to_le_bytes());
    }

    #[test]
    fn create_is_deterministic() {
        let dir = tempdir().unwrap();
        let src = write_src(dir.path(), "a.txt", b"hello world");
        let zip_a = dir.path().join("a.zip");
        let zip_b = dir.path().join("b.zip");

        create(
            &zip_a,
            &[ArchiveEntry::new(&src, "a.txt")],
            GhostEntries::empty(),
        )
        .unwrap();
        create(
            &zip_b,
            &[ArchiveEntry::new(&src, "a.txt")],
            GhostEntries::empty(),
        )
        .unwrap();

        let bytes_a = std::fs::read(&zip_a).unwrap();
        let bytes_b = std::fs::read(&zip_b).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }
}
