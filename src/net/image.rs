//! Asset thumbnails.
//!
//! Image bytes are decoded with `image` and shrunk to a small RGBA buffer
//! for the panel's asset list. [`PreviewLoader`] does the fetching and
//! decoding on background threads and is polled once per frame.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

use crate::net::fetch::fetch_bytes;

/// Default longest side of a thumbnail, in pixels.
pub const PREVIEW_SIZE: u32 = 64;

/// Decoded RGBA thumbnail.
#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode image bytes into a thumbnail no larger than `max_side` on
/// either axis. Returns `None` for formats `image` can't read (SVG
/// included).
pub fn decode_preview(bytes: &[u8], max_side: u32) -> Option<Preview> {
    let img = image::load_from_memory(bytes).ok()?;
    let img = if img.width() > max_side || img.height() > max_side {
        img.thumbnail(max_side, max_side)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(Preview {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

/// File extension for sniffed image bytes, e.g. `png`.
pub fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
}

/// Background thumbnail fetcher keyed by resolved URL.
pub struct PreviewLoader {
    pending: HashMap<String, mpsc::Receiver<Option<Preview>>>,
    loaded: HashMap<String, Preview>,
    failed: HashSet<String>,
}

impl PreviewLoader {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Start fetching `url` unless it is already known.
    pub fn request(&mut self, url: &str) {
        if self.loaded.contains_key(url) || self.pending.contains_key(url) || self.failed.contains(url)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let url_owned = url.to_string();
        std::thread::spawn(move || {
            let preview = match fetch_bytes(&url_owned) {
                Ok(bytes) => decode_preview(&bytes, PREVIEW_SIZE),
                Err(e) => {
                    log::warn!("Preview fetch failed for {}: {}", url_owned, e);
                    None
                }
            };
            let _ = tx.send(preview);
        });

        self.pending.insert(url.to_string(), rx);
    }

    /// Move finished fetches into `loaded` / `failed`. Returns whether
    /// anything completed.
    pub fn poll(&mut self) -> bool {
        let mut completed = Vec::new();
        for (url, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Some(preview)) => {
                    self.loaded.insert(url.clone(), preview);
                    completed.push(url.clone());
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                    self.failed.insert(url.clone());
                    completed.push(url.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for url in &completed {
            self.pending.remove(url);
        }
        !completed.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&Preview> {
        self.loaded.get(url)
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Forget everything (new selection).
    pub fn clear(&mut self) {
        self.pending.clear();
        self.loaded.clear();
        self.failed.clear();
    }
}

impl Default for PreviewLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(w, h, Rgba([59, 130, 246, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn small_images_keep_their_size() {
        let p = decode_preview(&png_bytes(10, 4), PREVIEW_SIZE).unwrap();
        assert_eq!((p.width, p.height), (10, 4));
        assert_eq!(p.rgba.len(), 10 * 4 * 4);
        assert_eq!(&p.rgba[..4], &[59, 130, 246, 255]);
    }

    #[test]
    fn large_images_are_shrunk() {
        let p = decode_preview(&png_bytes(256, 128), 64).unwrap();
        assert!(p.width <= 64 && p.height <= 64);
        assert_eq!(p.width, 64);
    }

    #[test]
    fn svg_and_garbage_do_not_decode() {
        assert!(decode_preview(b"<svg xmlns='http://www.w3.org/2000/svg'/>", 64).is_none());
        assert!(sniff_extension(b"nope").is_none());
        assert_eq!(sniff_extension(&png_bytes(1, 1)), Some("png"));
    }

    #[test]
    fn loader_deduplicates_requests() {
        let mut loader = PreviewLoader::new();
        loader.request("file:///nonexistent/chardow/a.png");
        loader.request("file:///nonexistent/chardow/a.png");
        assert_eq!(loader.pending_count(), 1);
        loader.clear();
        assert_eq!(loader.pending_count(), 0);
    }
}
