use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{SceneError, SceneResult};

/// Source of raw asset bytes.
///
/// Called from a background loader thread, hence `Send + Sync`.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the encoded bytes behind `source`.
    fn fetch(&self, source: &str) -> SceneResult<Vec<u8>>;
}

/// Fetches assets from relative paths under a root directory.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageFetcher for FsFetcher {
    fn fetch(&self, source: &str) -> SceneResult<Vec<u8>> {
        let norm = normalize_rel_path(source)?;
        let p = self.root.join(Path::new(&norm));
        std::fs::read(&p)
            .map_err(|e| SceneError::asset(format!("failed to read asset '{}': {e}", p.display())))
    }
}

/// Normalize and validate asset-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SceneResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SceneError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(SceneError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SceneError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SceneError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[derive(Debug)]
enum LoadOutcome {
    Ready(PreparedImage),
    Failed,
}

/// Raster image whose load completes in the background.
///
/// Renderers poll [`ImageAsset::image`] once per frame: `None` until decoding finished, and `None`
/// forever if the fetch or decode failed.
#[derive(Clone, Debug)]
pub struct ImageAsset {
    source: Arc<str>,
    slot: Arc<OnceLock<LoadOutcome>>,
}

impl ImageAsset {
    /// Asset that has not finished loading.
    pub fn pending(source: &str) -> Self {
        Self {
            source: Arc::from(source),
            slot: Arc::new(OnceLock::new()),
        }
    }

    /// Asset that is already decoded.
    pub fn ready(source: &str, image: PreparedImage) -> Self {
        let asset = Self::pending(source);
        let _ = asset.slot.set(LoadOutcome::Ready(image));
        asset
    }

    /// Asset that will never become ready.
    pub fn failed(source: &str) -> Self {
        let asset = Self::pending(source);
        let _ = asset.slot.set(LoadOutcome::Failed);
        asset
    }

    /// Fetch and decode on the calling thread.
    pub fn load_blocking(source: &str, fetcher: &dyn ImageFetcher) -> Self {
        let asset = Self::pending(source);
        asset.complete(fetcher);
        asset
    }

    /// Start a fire-and-forget background load and return the pending handle immediately.
    pub fn spawn_load(source: &str, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let asset = Self::pending(source);
        let worker = asset.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("asset-load:{source}"))
            .spawn(move || worker.complete(fetcher.as_ref()));
        if let Err(e) = spawned {
            tracing::warn!(source, error = %e, "could not spawn asset loader");
            let _ = asset.slot.set(LoadOutcome::Failed);
        }
        asset
    }

    fn complete(&self, fetcher: &dyn ImageFetcher) {
        let outcome = match fetcher
            .fetch(&self.source)
            .and_then(|bytes| decode_image(&bytes))
        {
            Ok(image) => {
                tracing::debug!(
                    source = %self.source,
                    width = image.width,
                    height = image.height,
                    "image ready"
                );
                LoadOutcome::Ready(image)
            }
            Err(e) => {
                tracing::warn!(source = %self.source, error = %e, "image load failed");
                LoadOutcome::Failed
            }
        };
        let _ = self.slot.set(outcome);
    }

    /// Source string the asset was created from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Decoded image once ready.
    pub fn image(&self) -> Option<&PreparedImage> {
        match self.slot.get() {
            Some(LoadOutcome::Ready(img)) => Some(img),
            _ => None,
        }
    }

    /// Whether decoding finished successfully.
    pub fn is_ready(&self) -> bool {
        self.image().is_some()
    }

    /// Whether loading finished with an error.
    pub fn has_failed(&self) -> bool {
        matches!(self.slot.get(), Some(LoadOutcome::Failed))
    }

    /// Whether loading finished either way.
    pub fn is_settled(&self) -> bool {
        self.slot.get().is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
