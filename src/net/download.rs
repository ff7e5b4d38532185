//! Saving extracted assets to disk.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::inspect::Asset;
use crate::net::fetch::{fetch_bytes, resolve_url};
use crate::net::image::sniff_extension;

#[derive(Debug, Clone)]
pub struct DownloadError {
    pub message: String,
}

impl std::fmt::Display for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DownloadError {}

/// A file written by [`save_asset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedAsset {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Write `asset` (at position `index` in its list) into `dir`.
///
/// SVGs are written from their markup. Images are fetched after resolving
/// `src` against `base_url`; when the URL carries no usable extension the
/// sniffed format decides it.
pub fn save_asset(
    asset: &Asset,
    index: usize,
    base_url: &str,
    dir: &Path,
) -> Result<SavedAsset, DownloadError> {
    std::fs::create_dir_all(dir).map_err(|e| DownloadError {
        message: format!("Cannot create {}: {}", dir.display(), e),
    })?;

    let (file_name, data) = match asset {
        Asset::Svg { markup } => (asset.file_name(index), markup.as_bytes().to_vec()),
        Asset::Image { src, .. } => {
            let url = resolve_url(base_url, src);
            let data = fetch_bytes(&url).map_err(|e| DownloadError {
                message: format!("Download failed: {}", e),
            })?;
            let file_name = match sniff_extension(&data) {
                Some(ext) if !src_has_extension(src) => {
                    format!("chardow-asset-{}.{}", index + 1, ext)
                }
                _ => asset.file_name(index),
            };
            (file_name, data)
        }
    };

    let path = dir.join(file_name);
    std::fs::write(&path, &data).map_err(|e| DownloadError {
        message: format!("Cannot write {}: {}", path.display(), e),
    })?;

    log::info!("Saved {} ({} bytes)", path.display(), data.len());
    Ok(SavedAsset {
        path,
        bytes: data.len(),
    })
}

fn src_has_extension(src: &str) -> bool {
    let path = src.split(|c: char| c == '?' || c == '#').next().unwrap_or(src);
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}

/// Save every asset in parallel. Results are in input order.
pub fn save_all(
    assets: &[Asset],
    base_url: &str,
    dir: &Path,
) -> Vec<Result<SavedAsset, DownloadError>> {
    assets
        .par_iter()
        .enumerate()
        .map(|(index, asset)| save_asset(asset, index, base_url, dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use url::Url;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("chardow-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn svg_written_from_markup() {
        let dir = scratch("svg");
        let asset = Asset::Svg { markup: "<svg></svg>".into() };
        let saved = save_asset(&asset, 0, "https://example.com/", &dir).unwrap();
        assert_eq!(saved.path, dir.join("chardow-asset-1.svg"));
        assert_eq!(std::fs::read_to_string(&saved.path).unwrap(), "<svg></svg>");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn local_images_resolve_and_sniff_extension() {
        let site = scratch("site");
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        std::fs::write(site.join("pixel"), buf.get_ref()).unwrap();
        std::fs::write(site.join("icon.gif"), b"GIF89a-not-really").unwrap();

        let base = Url::from_file_path(site.join("index.html")).unwrap().to_string();
        let out = scratch("out");
        let assets = vec![
            Asset::Svg { markup: "<svg/>".into() },
            Asset::Image { src: "pixel".into(), alt: String::new() },
            Asset::Image { src: "icon.gif".into(), alt: String::new() },
            Asset::Image { src: "missing.png".into(), alt: String::new() },
        ];

        let results = save_all(&assets, &base, &out);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().path, out.join("chardow-asset-1.svg"));
        assert_eq!(results[1].as_ref().unwrap().path, out.join("chardow-asset-2.png"));
        assert_eq!(results[2].as_ref().unwrap().path, out.join("chardow-asset-3.gif"));
        assert!(results[3].is_err());

        std::fs::remove_dir_all(&site).ok();
        std::fs::remove_dir_all(&out).ok();
    }

    #[test]
    fn extension_detection() {
        assert!(src_has_extension("/a/b.png?x=1"));
        assert!(!src_has_extension("https://cdn.example.com/avatar"));
        assert!(!src_has_extension("pixel"));
    }
}
