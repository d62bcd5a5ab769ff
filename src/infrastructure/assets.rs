//! Image URL resolution and the svg2png asset cache
//!
//! Raster assets are served straight from the configured base URL.
//! Vector assets are rasterized on first access into a cache directory
//! and served from there afterwards; presence on disk is the only
//! cache-hit signal. Two concurrent first accesses may both render the
//! same file - the output is idempotent, so the last writer wins and
//! the duplicate work is tolerated.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use resvg::{tiny_skia, usvg};
use tracing::{error, warn};

/// Cache directory for rasterized vector assets, relative to the
/// configured base path.
const CACHE_SUBDIR: &str = "svg2png/";

const SVG_EXTENSION: &str = ".svg";
const PNG_EXTENSION: &str = ".png";

#[derive(Debug, thiserror::Error)]
pub enum RasterizeError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid svg: {0}")]
    InvalidSvg(String),

    #[error("svg canvas has zero size")]
    EmptyCanvas,

    #[error("png encoding failed: {0}")]
    PngEncode(String),
}

/// Conversion seam: turns a vector source file into raster bytes on
/// disk. Abstracted so tests can count invocations.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, source: &Path, destination: &Path) -> Result<(), RasterizeError>;
}

/// Production rasterizer: renders the SVG at its intrinsic size with
/// resvg and writes a PNG, creating cache directories as needed.
#[derive(Debug, Default)]
pub struct SvgRasterizer;

#[async_trait]
impl Rasterizer for SvgRasterizer {
    async fn rasterize(&self, source: &Path, destination: &Path) -> Result<(), RasterizeError> {
        let data = tokio::fs::read(source).await?;
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(&data, &options)
            .map_err(|e| RasterizeError::InvalidSvg(e.to_string()))?;
        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or(RasterizeError::EmptyCanvas)?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        let png = pixmap
            .encode_png()
            .map_err(|e| RasterizeError::PngEncode(e.to_string()))?;

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(destination, png).await?;
        Ok(())
    }
}

/// Maps stored relative image paths to publicly servable URLs, running
/// vector assets through the write-through svg2png cache.
pub struct AssetResolver {
    base_url: String,
    base_path: PathBuf,
    rasterizer: Arc<dyn Rasterizer>,
}

impl AssetResolver {
    pub fn new(base_url: String, base_path: PathBuf) -> Self {
        Self::with_rasterizer(base_url, base_path, Arc::new(SvgRasterizer))
    }

    pub fn with_rasterizer(
        base_url: String,
        base_path: PathBuf,
        rasterizer: Arc<dyn Rasterizer>,
    ) -> Self {
        Self {
            base_url,
            base_path,
            rasterizer,
        }
    }

    /// Resolve a stored relative path to a servable URL.
    ///
    /// No path yields the fallback URL (or `None` without a fallback).
    /// Non-vector paths resolve directly against the base URL with no
    /// filesystem access. Vector paths resolve to their cached raster
    /// counterpart, rendering it first if absent; a failed render is
    /// logged and degrades to the fallback rather than propagating.
    pub async fn resolve_image_url(
        &self,
        path: Option<&str>,
        fallback: Option<&str>,
    ) -> Option<String> {
        let Some(path) = path.filter(|p| !p.is_empty()) else {
            return self.fallback_url(fallback);
        };

        let Some(stem) = path.strip_suffix(SVG_EXTENSION) else {
            return Some(format!("{}{}", self.base_url, path));
        };

        let cache_rel = format!("{CACHE_SUBDIR}{stem}{PNG_EXTENSION}");
        let cache_abs = self.base_path.join(&cache_rel);
        if !tokio::fs::try_exists(&cache_abs).await.unwrap_or(false) {
            warn!("attempting to convert {path} to {cache_rel}...");
            let started = Instant::now();
            let source = self.base_path.join(path);
            if let Err(e) = self.rasterizer.rasterize(&source, &cache_abs).await {
                error!("failed to convert {path}: {e}");
                return self.fallback_url(fallback);
            }
            warn!(
                "took {:.3} seconds to convert to PNG",
                started.elapsed().as_secs_f64()
            );
        }
        Some(format!("{}{}", self.base_url, cache_rel))
    }

    fn fallback_url(&self, fallback: Option<&str>) -> Option<String> {
        fallback.map(|f| format!("{}{}", self.base_url, f))
    }
}
