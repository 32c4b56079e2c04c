//! End-to-end coverage of spec.md §8's testable properties and worked
//! scenarios E1, E2, E3, E6.

use std::io::Read;

use tacozip::{create, read_ghost, update_ghost, ArchiveEntry, GhostEntries};
use tempfile::tempdir;

fn pairs_with(entries: &[(usize, u64, u64)]) -> [(u64, u64); 7] {
    let mut pairs = [(0u64, 0u64); 7];
    for &(i, offset, length) in entries {
        pairs[i] = (offset, length);
    }
    pairs
}

#[test]
fn e1_single_file_exact_length_and_crc() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("a.txt");
    std::fs::write(&src, b"hello").unwrap();
    let zip_path = dir.path().join("out.zip");

    let ghost = GhostEntries::new(pairs_with(&[(0, 100, 50)])).unwrap();
    create(&zip_path, &[ArchiveEntry::new(&src, "a.txt")], ghost).unwrap();

    let len = std::fs::metadata(&zip_path).unwrap().len();
    // ghost(160) + LFH+name+data+DD(30+5+5+24) + CDFH+name+extra(46+5+28)
    // + EOCD64(56) + locator(20) + EOCD(22)
    assert_eq!(len, 160 + 64 + 79 + 98);

    let read_back = read_ghost(&zip_path).unwrap();
    assert_eq!(read_back, ghost);
}

#[test]
fn e2_two_files_monotonic_offsets() {
    let dir = tempdir().unwrap();
    let src_x = dir.path().join("x");
    std::fs::write(&src_x, b"abc").unwrap();
    let src_y = dir.path().join("y");
    std::fs::write(&src_y, b"defgh").unwrap();
    let zip_path = dir.path().join("out.zip");

    create(
        &zip_path,
        &[
            ArchiveEntry::new(&src_x, "x"),
            ArchiveEntry::new(&src_y, "sub/y"),
        ],
        GhostEntries::empty(),
    )
    .unwrap();

    let mut bytes = Vec::new();
    std::fs::File::open(&zip_path)
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();

    assert_eq!(&bytes[160..164], &0x0403_4B50u32.to_le_bytes());
    let second_lfh_offset = 160 + 30 + 1 + 3 + 24;
    assert_eq!(
        &bytes[second_lfh_offset..second_lfh_offset + 4],
        &0x0403_4B50u32.to_le_bytes()
    );
}

#[test]
fn e3_update_ghost_preserves_prefix() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("a.txt");
    std::fs::write(&src, b"hello").unwrap();
    let zip_path = dir.path().join("out.zip");

    let ghost = GhostEntries::new(pairs_with(&[(0, 100, 50)])).unwrap();
    create(&zip_path, &[ArchiveEntry::new(&src, "a.txt")], ghost).unwrap();
    assert_eq!(read_ghost(&zip_path).unwrap(), ghost);

    let before = std::fs::read(&zip_path).unwrap();

    let updated = GhostEntries::new(pairs_with(&[(0, 7, 9)])).unwrap();
    update_ghost(&zip_path, updated).unwrap();
    assert_eq!(read_ghost(&zip_path).unwrap(), updated);

    let after = std::fs::read(&zip_path).unwrap();
    assert_eq!(before[0..44], after[0..44]);
}

#[test]
fn e4_read_ghost_on_truncated_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("short.zip");
    std::fs::write(&path, [0u8; 16]).unwrap();

    let err = read_ghost(&path).unwrap_err();
    assert!(matches!(err, tacozip::TacoZipError::Io(_)));
}

#[test]
fn e5_read_ghost_on_zeroed_signature_is_invalid_ghost() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zeroed.zip");
    std::fs::write(&path, [0u8; 160]).unwrap();

    let err = read_ghost(&path).unwrap_err();
    assert!(matches!(err, tacozip::TacoZipError::InvalidGhost(_)));
}

#[test]
fn e6_multi_pair_count_and_trailing_zero_pairs() {
    let ghost = GhostEntries::new(pairs_with(&[(0, 10, 1), (1, 20, 2)])).unwrap();
    assert_eq!(ghost.count(), 2);
    assert_eq!(
        ghost.pairs(),
        &[(10, 1), (20, 2), (0, 0), (0, 0), (0, 0), (0, 0), (0, 0)]
    );
}

#[test]
fn name_length_boundary_65535_succeeds_65536_fails() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src.bin");
    std::fs::write(&src, b"x").unwrap();

    let ok_name = "a".repeat(65535);
    let zip_path = dir.path().join("ok.zip");
    create(
        &zip_path,
        &[ArchiveEntry::new(&src, ok_name)],
        GhostEntries::empty(),
    )
    .unwrap();

    let bad_name = "a".repeat(65536);
    let zip_path_bad = dir.path().join("bad.zip");
    let err = create(
        &zip_path_bad,
        &[ArchiveEntry::new(&src, bad_name)],
        GhostEntries::empty(),
    )
    .unwrap_err();
    assert!(matches!(err, tacozip::TacoZipError::Parameter(_)));
}

#[test]
fn empty_source_file_yields_zero_crc_and_valid_archive() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("empty.bin");
    std::fs::write(&src, b"").unwrap();
    let zip_path = dir.path().join("out.zip");

    create(
        &zip_path,
        &[ArchiveEntry::new(&src, "empty.bin")],
        GhostEntries::empty(),
    )
    .unwrap();

    let bytes = std::fs::read(&zip_path).unwrap();
    // Data descriptor immediately follows the LFH+name (no payload bytes):
    // ghost(160) + LFH(30) + name(9) = 199
    let dd_offset = 160 + 30 + 9;
    assert_eq!(&bytes[dd_offset..dd_offset + 4], &0x0807_4B50u32.to_le_bytes());
    let crc = u32::from_le_bytes(bytes[dd_offset + 4..dd_offset + 8].try_into().unwrap());
    assert_eq!(crc, 0);
}

#[test]
fn determinism_across_two_runs() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("a.txt");
    std::fs::write(&src, b"determinism check").unwrap();

    let zip_a = dir.path().join("a.zip");
    let zip_b = dir.path().join("b.zip");
    let ghost = GhostEntries::new(pairs_with(&[(3, 42, 7)])).unwrap();

    create(&zip_a, &[ArchiveEntry::new(&src, "a.txt")], ghost).unwrap();
    create(&zip_b, &[ArchiveEntry::new(&src, "a.txt")], ghost).unwrap();

    assert_eq!(std::fs::read(&zip_a).unwrap(), std::fs::read(&zip_b).unwrap());
}
