// SPDX-License-Identifier: MPL-2.0
//! Asynchronous texture acquisition.
//!
//! The loader fetches one equirectangular asset at a time and reports byte
//! progress while doing so. Remote assets are streamed over HTTP; local
//! assets are read in chunks so progress behaves the same either way. The
//! fetched bytes are decoded into an Iced image handle off the UI thread.
//!
//! Each fetch runs as an Iced subscription keyed by the load generation:
//! navigating to another panorama drops the old subscription and starts a
//! fresh one, and every emitted event carries the generation it belongs to
//! so late events from a superseded load are discarded by the receiver.
//!
//! Byte progress tops out at [`MAX_BYTE_PROGRESS`]; only the terminal
//! `Completed`/`Failed` event stands for 100. Decoding happens between the
//! last byte and the terminal event, so nothing downstream may treat the
//! load as finished before that event arrives.

use crate::error::{Error, Result};
use futures_util::StreamExt;
use iced::futures::SinkExt;
use iced::widget::image;
use iced::{stream, Subscription};
use tokio::io::AsyncReadExt;

/// Chunk size for local file reads.
const FILE_CHUNK_BYTES: usize = 64 * 1024;

/// Highest percentage a byte-progress event may carry. 100 is reserved for
/// the terminal event, emitted after decoding.
pub const MAX_BYTE_PROGRESS: u8 = 99;

/// Identifies one texture fetch; equal to the navigator's load generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

/// Decoded texture ready for rendering.
///
/// The handle owns the pixel data; dropping the last clone releases it.
/// The viewer keeps exactly one `TextureData` alive per load, so the
/// texture of a superseded panorama is released when it is replaced.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

/// Events emitted by a texture fetch.
#[derive(Debug, Clone)]
pub enum Event {
    Progress { id: LoadId, percent: u8 },
    Completed { id: LoadId, texture: TextureData },
    Failed { id: LoadId, reason: String },
}

/// Whether a source location is fetched over HTTP rather than from disk.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Byte progress as a rounded percentage; 0 when the total is unknown.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_from_bytes(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = (loaded as f64 / total as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Creates the subscription that fetches and decodes `location`.
pub fn fetch(location: String, id: LoadId) -> Subscription<Event> {
    Subscription::run_with((id, location), |(id, location)| {
        let id = *id;
        let location = location.clone();
        stream::channel(32, move |mut output| async move {
            let event = match fetch_bytes(&location, id, &mut output).await {
                Ok(bytes) => match decode(&bytes) {
                    Ok(texture) => Event::Completed { id, texture },
                    Err(error) => {
                        eprintln!("Failed to decode texture {location}: {error}");
                        Event::Failed {
                            id,
                            reason: error.to_string(),
                        }
                    }
                },
                Err(error) => {
                    eprintln!("Failed to load texture {location}: {error}");
                    Event::Failed {
                        id,
                        reason: error.to_string(),
                    }
                }
            };

            let _ = output.send(event).await;

            // Keep the stream open until the viewer drops the subscription;
            // returning would let the runtime restart the fetch.
            iced::futures::future::pending::<()>().await;
        })
    })
}

async fn fetch_bytes(
    location: &str,
    id: LoadId,
    output: &mut iced::futures::channel::mpsc::Sender<Event>,
) -> Result<Vec<u8>> {
    if is_remote(location) {
        fetch_remote(location, id, output).await
    } else {
        fetch_local(location, id, output).await
    }
}

async fn fetch_remote(
    location: &str,
    id: LoadId,
    output: &mut iced::futures::channel::mpsc::Sender<Event>,
) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent("PanoLens/0.1.0")
        .build()
        .map_err(|e| Error::AssetLoad(e.to_string()))?;

    let response = client
        .get(location)
        .send()
        .await
        .map_err(|e| Error::AssetLoad(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::AssetLoad(format!(
            "HTTP status: {}",
            response.status()
        )));
    }

    let total = response.content_length().unwrap_or(0);
    let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::AssetLoad(e.to_string()))?;
        bytes.extend_from_slice(&chunk);

        if total > 0 {
            let percent = percent_from_bytes(bytes.len() as u64, total).min(MAX_BYTE_PROGRESS);
            let _ = output.send(Event::Progress { id, percent }).await;
        }
    }

    Ok(bytes)
}

async fn fetch_local(
    location: &str,
    id: LoadId,
    output: &mut iced::futures::channel::mpsc::Sender<Event>,
) -> Result<Vec<u8>> {
    let mut file = tokio::fs::File::open(location)
        .await
        .map_err(|e| Error::AssetLoad(e.to_string()))?;
    let total = file
        .metadata()
        .await
        .map(|meta| meta.len())
        .unwrap_or(0);

    let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    let mut chunk = vec![0u8; FILE_CHUNK_BYTES];

    loop {
        let read = file
            .read(&mut chunk)
            .await
            .map_err(|e| Error::AssetLoad(e.to_string()))?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);

        if total > 0 {
            let percent = percent_from_bytes(bytes.len() as u64, total).min(MAX_BYTE_PROGRESS);
            let _ = output.send(Event::Progress { id, percent }).await;
        }
    }

    Ok(bytes)
}

fn decode(bytes: &[u8]) -> Result<TextureData> {
    let decoded = image_rs::load_from_memory(bytes).map_err(|e| Error::AssetLoad(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData {
        handle: image::Handle::from_rgba(width, height, rgba.into_raw()),
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection_matches_schemes() {
        assert!(is_remote("https://example.com/pano.png"));
        assert!(is_remote("http://example.com/pano.png"));
        assert!(!is_remote("assets/panoramas/harbor.png"));
        assert!(!is_remote("/var/data/pano.png"));
    }

    #[test]
    fn percent_rounds_byte_ratio() {
        assert_eq!(percent_from_bytes(0, 200), 0);
        assert_eq!(percent_from_bytes(100, 200), 50);
        assert_eq!(percent_from_bytes(199, 200), 100);
        assert_eq!(percent_from_bytes(200, 200), 100);
        assert_eq!(percent_from_bytes(1, 300), 0);
    }

    #[test]
    fn percent_with_unknown_total_is_zero() {
        assert_eq!(percent_from_bytes(1024, 0), 0);
    }

    #[test]
    fn decode_accepts_png_bytes() {
        let buffer = image_rs::ImageBuffer::from_pixel(2, 2, image_rs::Rgba([10u8, 20, 30, 255]));
        let mut bytes = Vec::new();
        image_rs::DynamicImage::ImageRgba8(buffer)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image_rs::ImageFormat::Png,
            )
            .expect("encode test png");

        let texture = decode(&bytes).expect("decode should succeed");
        assert_eq!(texture.width, 2);
        assert_eq!(texture.height, 2);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode(b"not an image").is_err());
    }

    #[tokio::test]
    async fn local_fetch_reports_progress_and_bytes() {
        use std::io::Write;

        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("pano.bin");
        let payload = vec![7u8; 1000];
        std::fs::File::create(&path)
            .expect("create file")
            .write_all(&payload)
            .expect("write file");

        let (mut tx, mut rx) = iced::futures::channel::mpsc::channel(32);
        let bytes = fetch_local(path.to_str().unwrap(), LoadId(0), &mut tx)
            .await
            .expect("fetch should succeed");

        assert_eq!(bytes, payload);
        match rx.try_next() {
            Ok(Some(Event::Progress { percent, .. })) => assert_eq!(percent, MAX_BYTE_PROGRESS),
            other => panic!("expected progress event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn byte_progress_never_reports_full_completion() {
        use std::io::Write;

        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("pano.bin");
        let payload = vec![3u8; FILE_CHUNK_BYTES * 3];
        std::fs::File::create(&path)
            .expect("create file")
            .write_all(&payload)
            .expect("write file");

        let (mut tx, mut rx) = iced::futures::channel::mpsc::channel(32);
        fetch_local(path.to_str().unwrap(), LoadId(0), &mut tx)
            .await
            .expect("fetch should succeed");

        while let Ok(Some(event)) = rx.try_next() {
            match event {
                Event::Progress { percent, .. } => assert!(percent <= MAX_BYTE_PROGRESS),
                other => panic!("expected only progress events, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn local_fetch_missing_file_fails() {
        let (mut tx, _rx) = iced::futures::channel::mpsc::channel(4);
        let result = fetch_local("/no/such/panorama.png", LoadId(0), &mut tx).await;
        assert!(result.is_err());
    }
}
