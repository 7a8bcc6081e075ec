//! Machine-readable summary of a split, printed by `--json`.

use serde::Serialize;

use crate::input::ImageInfo;
use crate::session::SplitOutcome;
use crate::sink::Download;
use crate::tile::{remainder, TileRect, TileSet};

/// Summary of one split.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport {
    pub width: u32,
    pub height: u32,
    pub label: String,

    /// Pixel columns on the right edge that belong to no tile
    pub dropped_columns: u32,

    /// Pixel rows on the bottom edge that belong to no tile
    pub dropped_rows: u32,

    pub tiles: Vec<TileReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<FileReport>,
}

/// One tile in a [`SplitReport`].
#[derive(Debug, Clone, Serialize)]
pub struct TileReport {
    pub file_name: String,
    pub rect: TileRect,
    pub bytes: usize,
}

/// A produced file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_name: String,
    pub bytes: usize,
}

impl SplitReport {
    /// Summarize a split outcome.
    pub fn new(outcome: &SplitOutcome) -> Self {
        Self::from_parts(outcome.info, &outcome.tiles)
    }

    pub fn from_parts(info: ImageInfo, tiles: &TileSet) -> Self {
        let (dropped_columns, dropped_rows) = remainder(info.width, info.height);
        Self {
            width: info.width,
            height: info.height,
            label: info.label(),
            dropped_columns,
            dropped_rows,
            tiles: tiles
                .iter()
                .map(|t| TileReport {
                    file_name: t.file_name.clone(),
                    rect: t.rect,
                    bytes: t.data.len(),
                })
                .collect(),
            archive: None,
        }
    }

    /// Record the bundle download.
    pub fn with_archive(mut self, download: &Download) -> Self {
        self.archive = Some(FileReport {
            file_name: download.file_name.clone(),
            bytes: download.len(),
        });
        self
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
