//! Archive integration tests.
//!
//! Tests verify:
//! - The bundle holds exactly part_1.png .. part_9.png, in order
//! - Entry contents equal the individual tile downloads
//! - Rebuilding from the same tiles gives identical bytes
//! - Failures never yield a partial archive

use grid_splitter::archive::{build_archive, ArchiveCompression, ArchiveEntry, ArchiveOptions};
use grid_splitter::error::ArchiveError;
use grid_splitter::input::SourceImage;
use grid_splitter::tile::TileService;

use super::test_utils::{expected_names, read_zip, solid_png};

#[test]
fn test_bundle_layout_matches_tiles() {
    let source = SourceImage::decode(&solid_png(60, 45, [10, 200, 30])).unwrap();
    let tiles = TileService::new().split(&source).unwrap();

    let archive = build_archive(&tiles.archive_entries(), ArchiveOptions::default()).unwrap();
    let entries = read_zip(&archive);

    let names: Vec<String> = entries.iter().map(|(n, _)| n.clone()).collect();
    assert_eq!(names, expected_names());

    for (tile, (_, data)) in tiles.iter().zip(&entries) {
        assert_eq!(&tile.data[..], &data[..]);
    }
}

#[test]
fn test_rebuild_is_byte_identical() {
    let source = SourceImage::decode(&solid_png(30, 30, [1, 2, 3])).unwrap();
    let tiles = TileService::new().split(&source).unwrap();
    let entries = tiles.archive_entries();

    for compression in [ArchiveCompression::Stored, ArchiveCompression::Deflated] {
        let options = ArchiveOptions::new(compression);
        let first = build_archive(&entries, options).unwrap();
        let second = build_archive(&entries, options).unwrap();
        assert_eq!(first, second);
        assert_eq!(read_zip(&first), read_zip(&second));
    }
}

#[test]
fn test_independent_splits_give_identical_bundles() {
    let png = solid_png(33, 33, [255, 255, 0]);

    let bundle = |data: &[u8]| {
        let source = SourceImage::decode(data).unwrap();
        let tiles = TileService::new().split(&source).unwrap();
        build_archive(&tiles.archive_entries(), ArchiveOptions::default()).unwrap()
    };

    assert_eq!(bundle(&png), bundle(&png));
}

#[test]
fn test_duplicate_names_fail_whole_archive() {
    let mut entries: Vec<ArchiveEntry> = (1..=9)
        .map(|i| ArchiveEntry::new(format!("part_{}.png", i), vec![i as u8]))
        .collect();
    entries[8].file_name = "part_1.png".to_string();

    let result = build_archive(&entries, ArchiveOptions::default());
    assert!(matches!(result, Err(ArchiveError::DuplicateEntry { .. })));
}
