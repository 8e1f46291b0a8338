//! Image resource loader
//!
//! Fetches a texture over HTTP or from disk and checks that the bytes are an
//! image a browser could decode.

use super::http::{error_chain, resolve_url, ReqwestHttpClient};
use super::{LoadedResource, ProbeError, ResourceLoader};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Recognised image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Ico,
    Svg,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::WebP => "WebP",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Ico => "ICO",
            ImageFormat::Svg => "SVG",
        };
        f.write_str(name)
    }
}

const SVG_SNIFF_WINDOW: usize = 1024;

/// Identify an image format from its leading bytes
pub fn sniff_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some(ImageFormat::Png);
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageFormat::Jpeg);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some(ImageFormat::Gif);
    }
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some(ImageFormat::WebP);
    }
    if bytes.starts_with(b"BM") {
        return Some(ImageFormat::Bmp);
    }
    if bytes.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        return Some(ImageFormat::Ico);
    }

    let head = &bytes[..bytes.len().min(SVG_SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    if (text.starts_with("<svg") || text.starts_with("<?xml")) && text.contains("<svg") {
        return Some(ImageFormat::Svg);
    }

    None
}

/// Loads textures over HTTP(S) or from the local filesystem
///
/// Relative locations are fetched from the base URL when one is configured
/// and read from disk otherwise.
#[derive(Debug, Clone)]
pub struct ImageResourceLoader {
    http: ReqwestHttpClient,
}

impl ImageResourceLoader {
    pub fn new(http: ReqwestHttpClient) -> Self {
        Self { http }
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ProbeError> {
        let remote = Url::parse(location).is_ok() || self.http.base_url().is_some();
        if !remote {
            return read_file(PathBuf::from(location)).await;
        }

        let url = resolve_url(self.http.base_url(), location)?;
        match url.scheme() {
            "http" | "https" => self.fetch_remote(url).await,
            "file" => {
                let path = url.to_file_path().map_err(|_| {
                    ProbeError::Unsupported(format!("file URL without local path: {}", url))
                })?;
                read_file(path).await
            }
            scheme => Err(ProbeError::Unsupported(format!(
                "URL scheme {} for {}",
                scheme, location
            ))),
        }
    }

    async fn fetch_remote(&self, url: Url) -> Result<Vec<u8>, ProbeError> {
        debug!(%url, "fetching texture");
        let response = self
            .http
            .client()
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeError::Transport(error_chain(&e)))?;
        Ok(body.to_vec())
    }
}

async fn read_file(path: PathBuf) -> Result<Vec<u8>, ProbeError> {
    debug!(path = %path.display(), "reading texture");
    tokio::fs::read(&path)
        .await
        .map_err(|source| ProbeError::Io { path, source })
}

#[async_trait]
impl ResourceLoader for ImageResourceLoader {
    async fn load(&self, location: &str) -> Result<LoadedResource, ProbeError> {
        let bytes = self.fetch(location).await?;
        let format = sniff_image_format(&bytes)
            .ok_or_else(|| ProbeError::NotAnImage(location.to_string()))?;

        Ok(LoadedResource {
            location: location.to_string(),
            format,
            size: bytes.len(),
        })
    }
}
