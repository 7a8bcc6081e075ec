//! Session state and the split pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::archive::{build_archive, ArchiveOptions, DEFAULT_ARCHIVE_NAME};
use crate::error::{InputError, SplitError};
use crate::input::{
    decode_source, validate_upload, ImageInfo, SourceImage, Upload, DEFAULT_MAX_FILE_SIZE,
};
use crate::sink::{Download, DownloadSink};
use crate::tile::{PngTileEncoder, TileService, TileSet, GRID_SIZE};

// =============================================================================
// Configuration
// =============================================================================

/// Settings that shape every split in a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Largest accepted upload in bytes
    pub max_file_size: u64,

    /// Tile encoder
    pub encoder: PngTileEncoder,

    /// Archive assembly settings
    pub archive: ArchiveOptions,

    /// File name of the bundle download
    pub archive_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            encoder: PngTileEncoder::new(),
            archive: ArchiveOptions::default(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Dimensions of the decoded source
    pub info: ImageInfo,

    /// The rendered tiles
    pub tiles: Arc<TileSet>,
}

#[derive(Default)]
struct SessionState {
    source: Option<Arc<SourceImage>>,
    tiles: Option<Arc<TileSet>>,
}

// =============================================================================
// Session
// =============================================================================

/// One user's transient split session.
///
/// The session owns a single "current image" slot. Each upload runs
/// validate → decode → split strictly in sequence and replaces the slot
/// wholesale on success. Failed uploads leave the previous image and tiles
/// in place.
///
/// Uploads may overlap. Every upload that passes validation takes a new
/// generation number; when it finishes, its result is committed only if no
/// later upload has started. Otherwise it returns [`SplitError::Superseded`]
/// and the newer upload owns the slot.
///
/// # Example
///
/// ```ignore
/// use grid_splitter::{Session, Upload};
///
/// let session = Session::new();
/// let outcome = session.upload(Upload::new("image/png", bytes)).await?;
/// println!("{}", outcome.info.label());
///
/// let bundle = session.archive_download().await?;
/// ```
pub struct Session {
    config: SessionConfig,
    service: Arc<TileService>,
    state: RwLock<SessionState>,
    generation: AtomicU64,
}

impl Session {
    /// Create a session with default settings.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with custom settings.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            service: Arc::new(TileService::with_encoder(config.encoder)),
            config,
            state: RwLock::new(SessionState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Accept an upload, decode it and split it into tiles.
    ///
    /// # Errors
    ///
    /// - [`SplitError::Input`] if the upload is rejected, cannot be decoded,
    ///   or is smaller than 3×3 pixels
    /// - [`SplitError::Tile`] if a tile cannot be rendered
    /// - [`SplitError::Superseded`] if a newer upload started meanwhile
    ///
    /// In every error case the session state is unchanged.
    pub async fn upload(&self, upload: Upload) -> Result<SplitOutcome, SplitError> {
        let name = upload.file_name.as_deref().unwrap_or("<unnamed>");
        if let Err(e) = validate_upload(&upload, self.config.max_file_size) {
            warn!("Upload {} rejected: {}", name, e);
            return Err(e.into());
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "Upload #{} ({}) accepted: {} bytes, type {}",
            generation,
            name,
            upload.size(),
            upload.mime
        );

        let source = Arc::new(decode_source(upload.data).await?);
        let info = source.info();
        if info.width < GRID_SIZE || info.height < GRID_SIZE {
            warn!("Upload {} rejected: {} is too small", name, info.label());
            return Err(InputError::TooSmall {
                width: info.width,
                height: info.height,
                min: GRID_SIZE,
            }
            .into());
        }
        self.ensure_latest(generation)?;

        let service = Arc::clone(&self.service);
        let split_source = Arc::clone(&source);
        let tiles =
            Arc::new(tokio::task::spawn_blocking(move || service.split(&split_source)).await??);

        let mut state = self.state.write().await;
        self.ensure_latest(generation)?;
        state.source = Some(source);
        state.tiles = Some(Arc::clone(&tiles));
        drop(state);

        info!(
            "Split {} into {} tiles ({} bytes)",
            info.label(),
            tiles.len(),
            tiles.total_bytes()
        );

        Ok(SplitOutcome { info, tiles })
    }

    fn ensure_latest(&self, generation: u64) -> Result<(), SplitError> {
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Upload #{} superseded, discarding", generation);
            return Err(SplitError::Superseded);
        }
        Ok(())
    }

    /// Dimensions of the current image, if any.
    pub async fn current_info(&self) -> Option<ImageInfo> {
        self.state.read().await.source.as_ref().map(|s| s.info())
    }

    /// The current image, if any.
    pub async fn current_source(&self) -> Option<Arc<SourceImage>> {
        self.state.read().await.source.clone()
    }

    /// Tiles of the current image, if any.
    pub async fn tiles(&self) -> Option<Arc<TileSet>> {
        self.state.read().await.tiles.clone()
    }

    async fn require_tiles(&self) -> Result<Arc<TileSet>, SplitError> {
        self.tiles().await.ok_or(SplitError::NoImage)
    }

    /// Download a single tile by its one-based number.
    pub async fn tile_download(&self, number: usize) -> Result<Download, SplitError> {
        let tiles = self.require_tiles().await?;
        let tile = tiles.get(number)?;
        Ok(Download::png(tile.file_name.clone(), tile.data.clone()))
    }

    /// Bundle the current tiles into a freshly built archive.
    pub async fn archive_download(&self) -> Result<Download, SplitError> {
        let tiles = self.require_tiles().await?;
        let options = self.config.archive;

        let data = tokio::task::spawn_blocking(move || {
            build_archive(&tiles.archive_entries(), options)
        })
        .await??;

        debug!("Built {} ({} bytes)", self.config.archive_name, data.len());
        Ok(Download::zip(self.config.archive_name.clone(), data))
    }

    /// Save one tile through `sink`.
    pub async fn save_tile<S: DownloadSink + ?Sized>(
        &self,
        number: usize,
        sink: &S,
    ) -> Result<Download, SplitError> {
        let download = self.tile_download(number).await?;
        sink.save(&download).await?;
        Ok(download)
    }

    /// Save every tile through `sink`, in tile order.
    pub async fn save_all_tiles<S: DownloadSink + ?Sized>(
        &self,
        sink: &S,
    ) -> Result<Vec<Download>, SplitError> {
        let tiles = self.require_tiles().await?;
        let mut saved = Vec::with_capacity(tiles.len());
        for tile in tiles.iter() {
            let download = Download::png(tile.file_name.clone(), tile.data.clone());
            sink.save(&download).await?;
            saved.push(download);
        }
        Ok(saved)
    }

    /// Build the archive and save it through `sink`.
    pub async fn save_archive<S: DownloadSink + ?Sized>(
        &self,
        sink: &S,
    ) -> Result<Download, SplitError> {
        let download = self.archive_download().await?;
        sink.save(&download).await?;
        Ok(download)
    }

    /// Drop the current image and tiles. In-flight uploads are discarded.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *state = SessionState::default();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
