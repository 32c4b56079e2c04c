//! Central directory writer: one CDFH + name + ZIP64 extra per entry, then
//! the ZIP64 EOCD, ZIP64 locator, and classic EOCD. Always emits the ZIP64
//! forms and the classic EOCD's four sentinel fields regardless of archive
//! size.

use std::io::{self, Write};

use crate::codec::{write_u16, write_u32, write_u64};
use crate::entry::EntryRecord;
use crate::ghost::VERSION_NEEDED_ZIP64;

const CENTRAL_DIR_SIGNATURE: u32 = 0x0201_4B50;
const ZIP64_EOCD_SIGNATURE: u32 = 0x0606_4B50;
const ZIP64_LOCATOR_SIGNATURE: u32 = 0x0706_4B50;
const EOCD_SIGNATURE: u32 = 0x0605_4B50;

const VERSION_MADE_BY: u16 = 0x031E;
const ZIP64_EXTRA_ID: u16 = 0x0001;
const ZIP64_EXTRA_DATA_SIZE: u16 = 24;
const ZIP64_EOCD_RECORD_SIZE: u64 = 44;

/// Write the central directory, ZIP64 EOCD, ZIP64 locator, and classic
/// EOCD for `entries`, in that order, to `out`.
pub fn write_central_directory<W: Write + io::Seek>(
    out: &mut W,
    entries: &[EntryRecord],
) -> io::Result<()> {
    let cd_start = out.stream_position()?;

    for entry in entries {
        write_u32(out, CENTRAL_DIR_SIGNATURE)?;
        write_u16(out, VERSION_MADE_BY)?;
        write_u16(out, VERSION_NEEDED_ZIP64)?;
        write_u16(out, entry.flags)?;
        write_u16(out, 0)?; // method: STORE
        write_u32(out, 0)?; // mod time/date
        write_u32(out, entry.crc32)?;
        write_u32(out, 0xFFFF_FFFF)?; // compressed size sentinel
        write_u32(out, 0xFFFF_FFFF)?; // uncompressed size sentinel
        write_u16(out, entry.name.len() as u16)?;
        write_u16(out, 28)?; // extra field length: id+size header(4) + data(24)
        write_u16(out, 0)?; // comment length
        write_u16(out, 0)?; // disk number start
        write_u16(out, 0)?; // internal attributes
        write_u32(out, 0)?; // external attributes
        write_u32(out, 0xFFFF_FFFF)?; // LFH offset sentinel
        out.write_all(&entry.name)?;

        write_u16(out, ZIP64_EXTRA_ID)?;
        write_u16(out, ZIP64_EXTRA_DATA_SIZE)?;
        write_u64(out, entry.size)?; // uncompressed size
        write_u64(out, entry.size)?; // compressed size
        write_u64(out, entry.lfh_offset)?;
    }

    let cd_end = out.stream_position()?;
    let cd_size = cd_end - cd_start;
    let count = entries.len() as u64;

    let zip64_eocd_offset = out.stream_position()?;
    write_u32(out, ZIP64_EOCD_SIGNATURE)?;
    write_u64(out, ZIP64_EOCD_RECORD_SIZE)?;
    write_u16(out, VERSION_MADE_BY)?;
    write_u16(out, VERSION_NEEDED_ZIP64)?;
    write_u32(out, 0)?; // disk number
    write_u32(out, 0)?; // disk where central dir starts
    write_u64(out, count)?; // entries on this disk
    write_u64(out, count)?; // total entries
    write_u64(out, cd_size)?;
    write_u64(out, cd_start)?;

    write_u32(out, ZIP64_LOCATOR_SIGNATURE)?;
    write_u32(out, 0)?; // disk with the ZIP64 EOCD
    write_u64(out, zip64_eocd_offset)?;
    write_u32(out, 1)?; // total number of disks

    write_u32(out, EOCD_SIGNATURE)?;
    write_u16(out, 0)?; // disk number
    write_u16(out, 0)?; // disk where central dir starts
    write_u16(out, 0xFFFF)?; // entries on this disk: see ZIP64 EOCD
    write_u16(out, 0xFFFF)?; // total entries: see ZIP64 EOCD
    write_u32(out, 0xFFFF_FFFF)?; // cd size: see ZIP64 EOCD
    write_u32(out, 0xFFFF_FFFF)?; // cd offset: see ZIP64 EOCD
    write_u16(out, 0)?; // comment length

    Ok(())
}
