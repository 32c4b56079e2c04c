//! # tacozip: ZIP64 archive writer with an embedded ghost metadata record
//!
//! `tacozip` writes ZIP64 archives that are readable by any conforming
//! ZIP64 reader, while embedding a fixed "ghost" record at byte offset 0
//! that carries up to seven (offset, length) pairs pointing applications
//! at externally appended metadata (e.g. a columnar index footer appended
//! after the archive itself). The ghost gives callers a constant-time way
//! to locate that metadata without walking the central directory.
//!
//! Fixed policy, by design: every archive is always ZIP64 (no small-file
//! fast path, no boundary cases at 4 GiB), and every entry is always
//! STORE (no compression).
//!
//! ## Quick start
//!
//! ```no_run
//! use tacozip::{create, read_ghost, update_ghost, ArchiveEntry, GhostEntries};
//!
//! let mut pairs = [(0u64, 0u64); 7];
//! pairs[0] = (1000, 500); // externally appended metadata at byte 1000, 500 bytes long
//! let ghost = GhostEntries::new(pairs)?;
//!
//! let entries = [
//!     ArchiveEntry::new("a.bin", "a.bin"),
//!     ArchiveEntry::new("b.bin", "sub/b.bin"),
//! ];
//! create("out.taco.zip", &entries, ghost)?;
//!
//! let read_back = read_ghost("out.taco.zip")?;
//! assert_eq!(read_back, ghost);
//!
//! let mut updated = pairs;
//! updated[0] = (1500, 600);
//! update_ghost("out.taco.zip", GhostEntries::new(updated)?)?;
//! # Ok::<(), tacozip::TacoZipError>(())
//! ```

pub mod builder;
pub mod central;
pub mod codec;
pub mod crc32;
pub mod entry;
pub mod error;
pub mod ghost;
pub mod ghost_io;
pub mod preallocate;

pub use builder::{create, ArchiveEntry};
pub use error::{Result, TacoZipError};
pub use ghost::GhostEntries;
pub use ghost_io::{read_ghost, update_ghost};
