//! Asset discovery and bucket loading.
//!
//! Assets live in a directory tree `<root>/{hands,feet}/{left,right}/`;
//! every decodable image under a leaf directory belongs to that
//! (kind, side) bucket. Files that fail to decode are skipped with a
//! warning.

pub mod fingerprint;

pub use fingerprint::fingerprint;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TestError;
use crate::models::{Asset, Kind, Side};

/// The (kind, side) asset lists selected for one run. Only buckets for
/// the kinds under test are present.
#[derive(Debug, Clone, Default)]
pub struct AssetBuckets {
    buckets: Vec<Bucket>,
}

#[derive(Debug, Clone)]
struct Bucket {
    kind: Kind,
    side: Side,
    assets: Vec<Asset>,
}

impl AssetBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: Kind, side: Side, assets: Vec<Asset>) {
        self.buckets.push(Bucket { kind, side, assets });
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_len(&self, kind: Kind, side: Side) -> usize {
        self.buckets
            .iter()
            .find(|b| b.kind == kind && b.side == side)
            .map_or(0, |b| b.assets.len())
    }

    /// Size of the smallest bucket; zero when no buckets are loaded.
    pub fn min_bucket_len(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| b.assets.len())
            .min()
            .unwrap_or(0)
    }

    /// Replace every bucket with a uniform without-replacement sample of
    /// the smallest bucket's size, so no category is structurally
    /// over-represented.
    pub fn equalize<R: Rng>(&mut self, rng: &mut R) {
        let min = self.min_bucket_len();
        for bucket in &mut self.buckets {
            let sampled: Vec<Asset> = bucket.assets.choose_multiple(rng, min).cloned().collect();
            bucket.assets = sampled;
        }
    }

    /// Concatenate all buckets into one flat pool.
    pub fn into_working_set(self) -> Vec<Asset> {
        self.buckets
            .into_iter()
            .flat_map(|b| b.assets)
            .collect()
    }
}

/// Filesystem-backed asset store rooted at `assets/` (or wherever the
/// CLI points it).
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_dir(&self, kind: Kind, side: Side) -> PathBuf {
        self.root.join(kind.as_str()).join(side.as_str())
    }

    /// Create any missing leaf directories so a fresh checkout has the
    /// expected layout.
    pub fn ensure_layout(&self) -> anyhow::Result<()> {
        use anyhow::Context;
        for kind in Kind::ALL {
            for side in Side::ALL {
                let dir = self.bucket_dir(kind, side);
                fs::create_dir_all(&dir).with_context(|| {
                    format!("Failed to create asset directory {}", dir.display())
                })?;
            }
        }
        Ok(())
    }

    /// Load the buckets for `kinds`. A bucket with no usable assets is an
    /// `InvalidConfiguration` error; individual unreadable or
    /// non-decodable files are skipped with a warning.
    pub fn load(&self, kinds: &[Kind]) -> Result<AssetBuckets, TestError> {
        let mut buckets = AssetBuckets::new();
        for &kind in kinds {
            for side in Side::ALL {
                let dir = self.bucket_dir(kind, side);
                let assets = self.load_bucket(&dir, kind, side)?;
                if assets.is_empty() {
                    return Err(TestError::InvalidConfiguration(format!(
                        "no usable assets in {}",
                        dir.display()
                    )));
                }
                debug!("{} {} {}", kind, side, assets.len());
                buckets.push(kind, side, assets);
            }
        }
        warn_on_duplicates(&buckets);
        Ok(buckets)
    }

    fn load_bucket(&self, dir: &Path, kind: Kind, side: Side) -> Result<Vec<Asset>, TestError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            TestError::InvalidConfiguration(format!(
                "cannot read asset directory {}: {e}",
                dir.display()
            ))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        // Directory order is platform-dependent; sort for reproducible logs.
        paths.sort();

        let mut assets = Vec::new();
        for path in paths {
            match load_asset(&path, kind, side) {
                Ok(asset) => {
                    debug!("image {} hash {}", asset.path.display(), asset.id);
                    assets.push(asset);
                }
                Err(err) => warn!("{err}"),
            }
        }
        Ok(assets)
    }
}

/// Read and decode one candidate file, producing an `Asset` with its
/// content fingerprint.
fn load_asset(path: &Path, kind: Kind, side: Side) -> Result<Asset, TestError> {
    let bytes = fs::read(path).map_err(|e| TestError::AssetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    image::load_from_memory(&bytes).map_err(|e| TestError::AssetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(Asset::new(path, fingerprint(&bytes), kind, side))
}

/// Identical bytes under two paths would be logged under one identity;
/// worth flagging, but not fatal.
fn warn_on_duplicates(buckets: &AssetBuckets) {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for bucket in &buckets.buckets {
        for asset in &bucket.assets {
            if let Some(first) = seen.insert(asset.id.as_str(), asset.path.as_path()) {
                warn!(
                    "duplicate image content: {} duplicates {}",
                    asset.path.display(),
                    first.display()
                );
            }
        }
    }
}
