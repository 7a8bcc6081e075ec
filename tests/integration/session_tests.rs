//! Session scenario tests.
//!
//! Tests verify:
//! - A 300×300 red PNG yields nine 100×100 red tiles and a nine-entry bundle
//! - A 6MB PNG is rejected before decoding
//! - A text file posing as a PNG is rejected by type
//! - Errors leave the previous image in place
//! - Overlapping uploads end with the newest image

use image::{GenericImageView, Rgba};

use grid_splitter::error::{InputError, SplitError};
use grid_splitter::input::{ImageInfo, Upload};
use grid_splitter::session::{Session, SessionConfig};

use super::test_utils::{decode_png, expected_names, pad_to, read_zip, solid_png};

const RED: [u8; 3] = [255, 0, 0];

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_red_square_scenario() {
    let session = Session::new();
    let upload = Upload::sniffed(solid_png(300, 300, RED)).with_file_name("red.png");
    assert_eq!(upload.mime, "image/png");

    let outcome = session.upload(upload).await.unwrap();
    assert_eq!(outcome.info.label(), "300 × 300px");
    assert_eq!(outcome.tiles.len(), 9);

    for number in 1..=9 {
        let download = session.tile_download(number).await.unwrap();
        assert_eq!(download.file_name, format!("part_{}.png", number));

        let tile = decode_png(&download.data);
        assert_eq!(tile.dimensions(), (100, 100));
        assert!(tile.pixels().all(|(_, _, p)| p == Rgba([255, 0, 0, 255])));
    }

    let bundle = session.archive_download().await.unwrap();
    assert_eq!(bundle.file_name, "split_images.zip");

    let entries = read_zip(&bundle.data);
    let names: Vec<String> = entries.iter().map(|(n, _)| n.clone()).collect();
    assert_eq!(names, expected_names());
    for (_, data) in &entries {
        let tile = decode_png(data);
        assert_eq!(tile.dimensions(), (100, 100));
        assert!(tile.pixels().all(|(_, _, p)| p == Rgba([255, 0, 0, 255])));
    }
}

#[tokio::test]
async fn test_six_megabyte_png_rejected() {
    let session = Session::new();
    let data = pad_to(solid_png(10, 10, RED), 6 * 1024 * 1024);
    let upload = Upload::sniffed(data);
    assert_eq!(upload.mime, "image/png");

    let err = session.upload(upload).await.unwrap_err();
    assert!(matches!(
        err,
        SplitError::Input(InputError::OversizedInput {
            max_size: 5_242_880,
            ..
        })
    ));
    assert!(session.current_info().await.is_none());
    assert!(session.tiles().await.is_none());
}

#[tokio::test]
async fn test_renamed_text_file_rejected() {
    let session = Session::new();

    let sniffed = Upload::sniffed(b"just some notes, not an image".to_vec())
        .with_file_name("notes.png");
    let err = session.upload(sniffed).await.unwrap_err();
    assert!(matches!(
        err,
        SplitError::Input(InputError::InvalidInputType { .. })
    ));

    let declared = Upload::new("text/plain", solid_png(9, 9, RED)).with_file_name("fake.png");
    let err = session.upload(declared).await.unwrap_err();
    assert!(matches!(
        err,
        SplitError::Input(InputError::InvalidInputType { ref mime }) if mime == "text/plain"
    ));

    assert!(session.current_info().await.is_none());
}

#[tokio::test]
async fn test_limit_is_configurable() {
    let data = solid_png(9, 9, RED);
    let exact = data.len() as u64;

    let session = Session::with_config(SessionConfig {
        max_file_size: exact,
        ..SessionConfig::default()
    });
    let outcome = session.upload(Upload::sniffed(data.clone())).await.unwrap();
    assert_eq!(outcome.info, ImageInfo { width: 9, height: 9 });

    let session = Session::with_config(SessionConfig {
        max_file_size: exact - 1,
        ..SessionConfig::default()
    });
    assert!(matches!(
        session.upload(Upload::sniffed(data)).await,
        Err(SplitError::Input(InputError::OversizedInput { .. }))
    ));
}

// =============================================================================
// State handling
// =============================================================================

#[tokio::test]
async fn test_new_upload_replaces_previous() {
    let session = Session::new();
    session
        .upload(Upload::sniffed(solid_png(30, 30, RED)))
        .await
        .unwrap();
    session
        .upload(Upload::sniffed(solid_png(60, 90, [0, 0, 255])))
        .await
        .unwrap();

    assert_eq!(
        session.current_info().await,
        Some(ImageInfo {
            width: 60,
            height: 90
        })
    );
    let tile = decode_png(&session.tile_download(1).await.unwrap().data);
    assert_eq!(tile.dimensions(), (20, 30));
    assert_eq!(tile.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
}

#[tokio::test]
async fn test_decode_failure_keeps_previous_tiles() {
    let session = Session::new();
    session
        .upload(Upload::sniffed(solid_png(30, 30, RED)))
        .await
        .unwrap();
    let before = session.tiles().await.unwrap();

    // Valid signature, corrupt body.
    let mut broken = solid_png(30, 30, RED);
    broken.truncate(40);
    let err = session.upload(Upload::sniffed(broken)).await.unwrap_err();
    assert!(matches!(
        err,
        SplitError::Input(InputError::DecodeFailure { .. })
    ));

    let after = session.tiles().await.unwrap();
    assert_eq!(*before, *after);

    // The session is still usable.
    assert!(session.archive_download().await.is_ok());
}

#[tokio::test]
async fn test_overlapping_uploads_end_with_newest() {
    let session = Session::new();

    let first = session.upload(Upload::sniffed(solid_png(300, 300, RED)));
    let second = session.upload(Upload::sniffed(solid_png(9, 12, [0, 255, 0])));
    let (first, second) = tokio::join!(first, second);

    assert!(second.is_ok());
    assert!(matches!(first, Ok(_) | Err(SplitError::Superseded)));
    assert_eq!(
        session.current_info().await,
        Some(ImageInfo {
            width: 9,
            height: 12
        })
    );
}

#[tokio::test]
async fn test_rejected_upload_does_not_supersede() {
    let session = Session::new();

    let valid = session.upload(Upload::sniffed(solid_png(30, 30, RED)));
    let rejected = session.upload(Upload::new("text/plain", b"hi".to_vec()));
    let (valid, rejected) = tokio::join!(valid, rejected);

    assert!(valid.is_ok());
    assert!(rejected.is_err());
    assert_eq!(
        session.current_info().await,
        Some(ImageInfo {
            width: 30,
            height: 30
        })
    );
}
