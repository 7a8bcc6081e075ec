//! Upload validation and decoding.
//!
//! The host hands over raw file bytes as an [`Upload`]. Before any pixel work
//! the upload is checked by [`validate_upload`], then decoded into a
//! [`SourceImage`] on a blocking worker by [`decode_source`].

mod source;
mod validate;

pub use source::{decode_source, ImageInfo, SourceImage};
pub use validate::{
    is_image_mime, sniff_mime, validate_upload, Upload, DEFAULT_MAX_FILE_SIZE, UNKNOWN_MIME,
};
