use thiserror::Error;

/// Errors raised while accepting and decoding an uploaded image
#[derive(Debug, Clone, Error)]
pub enum InputError {
    /// The upload does not declare an image MIME type
    #[error("Please upload an image file (got type \"{mime}\")")]
    InvalidInputType { mime: String },

    /// The upload is larger than the configured limit
    #[error("File size must not exceed {max_size} bytes (got {size} bytes)")]
    OversizedInput { size: u64, max_size: u64 },

    /// The bytes could not be decoded into a bitmap
    #[error("Could not decode image: {message}")]
    DecodeFailure { message: String },

    /// The image is too small to cut into a 3×3 grid
    #[error("Image must be at least {min} × {min} pixels (got {width} × {height})")]
    TooSmall { width: u32, height: u32, min: u32 },
}

/// Errors that can occur when rendering tiles
#[derive(Debug, Clone, Error)]
pub enum TileError {
    /// PNG encoding of a tile failed
    #[error("Failed to encode tile: {message}")]
    EncodeError { message: String },

    /// The tile rectangle covers no pixels (source narrower or shorter than the grid)
    #[error("Tile would be empty ({width}x{height}): image must be at least 3x3 pixels")]
    EmptyRect { width: u32, height: u32 },

    /// The rectangle is larger than the source and shares no pixel with it
    #[error("Tile rectangle {width}x{height} at ({x}, {y}) lies outside the image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Tile number outside 1..=9
    #[error("Invalid tile number {index}: expected 1 to {max}")]
    InvalidIndex { index: usize, max: usize },
}

/// Errors that can occur when assembling an archive
#[derive(Debug, Clone, Error)]
pub enum ArchiveError {
    /// Error reported by the ZIP writer
    #[error("ZIP error: {message}")]
    Zip { message: String },

    /// Two entries share the same file name
    #[error("Duplicate archive entry: {name}")]
    DuplicateEntry { name: String },

    /// An entry has an empty file name
    #[error("Archive entry has an empty file name")]
    EmptyName,

    /// Write error while streaming entry data
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        ArchiveError::Zip {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(err: std::io::Error) -> Self {
        ArchiveError::Io(err.to_string())
    }
}

/// Errors raised when handing a download to the host
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// Writing the file failed
    #[error("Failed to save {path}: {message}")]
    Io { path: String, message: String },

    /// The download name would escape the target directory
    #[error("Invalid file name: {name}")]
    InvalidFileName { name: String },
}

/// Errors surfaced by a split session
///
/// Every variant is terminal for the operation that produced it only; the
/// session stays usable for the next upload.
#[derive(Debug, Clone, Error)]
pub enum SplitError {
    /// Upload rejected or undecodable
    #[error(transparent)]
    Input(#[from] InputError),

    /// Tile rendering failed
    #[error(transparent)]
    Tile(#[from] TileError),

    /// Archive assembly failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Download delivery failed
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A download was requested before any image was split
    #[error("No image has been split yet")]
    NoImage,

    /// A newer upload started while this one was in flight
    #[error("Upload superseded by a newer upload")]
    Superseded,

    /// A blocking worker task did not complete
    #[error("Worker task failed: {message}")]
    Worker { message: String },
}

impl From<tokio::task::JoinError> for SplitError {
    fn from(err: tokio::task::JoinError) -> Self {
        SplitError::Worker {
            message: err.to_string(),
        }
    }
}
