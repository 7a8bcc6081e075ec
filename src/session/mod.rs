//! Split session.
//!
//! The session replaces the page-level globals of a browser tool with an
//! explicit object: it owns the current source image, runs the pipeline for
//! each upload, and serves single-tile and bundle downloads from the most
//! recent successful split.
//!
//! ```text
//!   Upload ──► validate ──► decode ──► split ──► commit
//!                 │            │          │
//!                 ▼            ▼          ▼
//!            InputError   InputError  TileError       (state unchanged)
//!
//!   tile_download(n)   ──► Download (part_n.png)
//!   archive_download() ──► Download (split_images.zip, rebuilt each call)
//! ```

mod controller;

pub use controller::{Session, SessionConfig, SplitOutcome};
