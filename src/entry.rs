//! Entry writer: emits one local file header, streams the source bytes
//! while folding them into a running CRC, then emits the ZIP64 data
//! descriptor. Always STORE; sizes always carried in ZIP64-sized fields.

use std::io::{self, Read, Write};

use crate::codec::{write_u16, write_u32, write_u64};
use crate::crc32::Crc32;
use crate::error::{Result, TacoZipError};
use crate::ghost::{LFH_SIGNATURE, VERSION_NEEDED_ZIP64};

/// Data descriptor signature.
const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x0807_4B50;

/// General-purpose flag bit 3: sizes/CRC live in the trailing data descriptor.
const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;
/// General-purpose flag bit 11: the archive name is UTF-8 (build-time switch).
const FLAG_UTF8: u16 = 0x0800;

/// Copy buffer size target: at least 1 MiB.
pub const COPY_BUFFER_SIZE: usize = 1024 * 1024;

/// Per-entry bookkeeping the builder accumulates for the central directory.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    pub name: Vec<u8>,
    pub flags: u16,
    pub crc32: u32,
    pub size: u64,
    pub lfh_offset: u64,
}

/// Write one entry: LFH, name, streamed payload, ZIP64 data descriptor.
///
/// `copy_buf` is a reusable scratch buffer the caller owns across calls,
/// sized at least [`COPY_BUFFER_SIZE`].
pub fn write_entry<W: Write + io::Seek, R: Read>(
    out: &mut W,
    name: &[u8],
    mut src: R,
    utf8_flag: bool,
    copy_buf: &mut [u8],
) -> Result<EntryRecord> {
    if name.is_empty() || name.len() > u16::MAX as usize {
        return Err(TacoZipError::Parameter(format!(
            "archive name length {} out of range 1..=65535",
            name.len()
        )));
    }

    let lfh_offset = out.stream_position()?;
    let flags = FLAG_DATA_DESCRIPTOR | if utf8_flag { FLAG_UTF8 } else { 0 };

    write_u32(out, LFH_SIGNATURE)?;
    write_u16(out, VERSION_NEEDED_ZIP64)?;
    write_u16(out, flags)?;
    write_u16(out, 0)?; // method: STORE
    write_u32(out, 0)?; // mod time/date
    write_u32(out, 0)?; // crc32 placeholder
    write_u32(out, 0xFFFF_FFFF)?; // compressed size sentinel
    write_u32(out, 0xFFFF_FFFF)?; // uncompressed size sentinel
    write_u16(out, name.len() as u16)?;
    write_u16(out, 0)?; // LFH extra length
    out.write_all(name)?;

    let mut crc = Crc32::new();
    let mut size: u64 = 0;
    loop {
        let n = src.read(copy_buf)?;
        if n == 0 {
            break;
        }
        crc.update(&copy_buf[..n]);
        out.write_all(&copy_buf[..n])?;
        size += n as u64;
    }
    let crc = crc.finalize();

    write_u32(out, DATA_DESCRIPTOR_SIGNATURE)?;
    write_u32(out, crc)?;
    write_u64(out, size)?; // compressed size == uncompressed size (STORE)
    write_u64(out, size)?;

    Ok(EntryRecord {
        name: name.to_vec(),
        flags,
        crc32: crc,
        size,
        lfh_offset,
    })
}
