//! Archive assembly for the "download all" bundle.
//!
//! Tiles are packed into a single ZIP container with one entry per tile,
//! in tile order. Output is reproducible: entry timestamps and permissions
//! are fixed, so identical inputs give byte-identical archives.
//!
//! # Example
//!
//! ```
//! use grid_splitter::archive::{build_archive, ArchiveEntry, ArchiveOptions};
//!
//! let entries = vec![
//!     ArchiveEntry::new("part_1.png", vec![1, 2, 3]),
//!     ArchiveEntry::new("part_2.png", vec![4, 5, 6]),
//! ];
//! let zip = build_archive(&entries, ArchiveOptions::default()).unwrap();
//! assert_eq!(&zip[..2], b"PK");
//! ```

mod writer;

pub use writer::{
    build_archive, ArchiveCompression, ArchiveEntry, ArchiveOptions, DEFAULT_ARCHIVE_NAME,
};
