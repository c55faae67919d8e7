//! Dataset context: file list, class set and optional decoded-image cache

use crate::io::error::{ExplorerError, Result};
use crate::io::progress::TaskProgress;
use image::RgbImage;
use indexmap::IndexSet;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Class label of a file: the name of its immediate parent directory
///
/// Names that are not valid UTF-8 are converted lossily.
pub fn class_name(path: &Path) -> Option<Cow<'_, str>> {
    path.parent()
        .and_then(Path::file_name)
        .map(OsStr::to_string_lossy)
}

/// Decode an image from disk as 8-bit RGB
///
/// # Errors
///
/// Returns an image load error carrying the failing path.
pub fn decode_image(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(|image| image.to_rgb8())
        .map_err(|source| ExplorerError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}

/// Everything the analyses know about the dataset
///
/// Built once per run and read-only afterwards. `classes` holds the distinct
/// parent directory names of `files` in first-appearance order.
#[derive(Debug, Clone)]
pub struct DatasetContext {
    root: PathBuf,
    files: Vec<PathBuf>,
    classes: IndexSet<String>,
    image_cache: HashMap<PathBuf, RgbImage>,
    cached: bool,
}

impl DatasetContext {
    /// Scan `root` recursively and build a context over every regular file
    ///
    /// # Errors
    ///
    /// Returns a file system error if the root or one of its directories
    /// cannot be read.
    pub fn from_directory(root: &Path) -> Result<Self> {
        let root = std::fs::canonicalize(root).map_err(|e| ExplorerError::FileSystem {
            path: root.to_path_buf(),
            operation: "resolve dataset root",
            source: e,
        })?;

        let mut files = Vec::new();
        collect_files(&root, &mut files)?;
        files.sort();

        debug!(root = %root.display(), files = files.len(), "scanned dataset");
        Ok(Self::from_files(root, files))
    }

    /// Build a context from an explicit file list
    pub fn from_files(root: PathBuf, files: Vec<PathBuf>) -> Self {
        let classes = files
            .iter()
            .filter_map(|file| class_name(file))
            .map(Cow::into_owned)
            .collect();

        Self {
            root,
            files,
            classes,
            image_cache: HashMap::new(),
            cached: false,
        }
    }

    /// Decode every file into memory
    ///
    /// Files that fail to decode are skipped here; analyses will retry them
    /// from disk and record the failure.
    #[must_use]
    pub fn with_cache(mut self, progress: &TaskProgress) -> Self {
        let mut cache = HashMap::with_capacity(self.files.len());
        for file in &self.files {
            match decode_image(file) {
                Ok(image) => {
                    cache.insert(file.clone(), image);
                }
                Err(error) => warn!(%error, "skipping image while filling cache"),
            }
            progress.advance();
        }
        progress.finish("cached");

        debug!(
            cached = cache.len(),
            files = self.files.len(),
            "preloaded images"
        );
        self.image_cache = cache;
        self.cached = true;
        self
    }

    /// Fail fast when there is nothing to analyze
    ///
    /// # Errors
    ///
    /// Returns an empty dataset error if no files or no classes were found.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() || self.classes.is_empty() {
            return Err(ExplorerError::EmptyDataset {
                root: self.root.clone(),
            });
        }
        Ok(())
    }

    /// Dataset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All candidate image files, sorted
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Distinct class names in declaration order
    pub const fn classes(&self) -> &IndexSet<String> {
        &self.classes
    }

    /// Whether the cache was filled, even if no image decoded
    pub const fn is_cached(&self) -> bool {
        self.cached
    }

    /// Number of preloaded images
    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    /// Fetch an image from the cache, decoding it from disk on a miss
    ///
    /// # Errors
    ///
    /// Returns an image load error if the file cannot be decoded.
    pub fn load(&self, path: &Path) -> Result<Cow<'_, RgbImage>> {
        match self.image_cache.get(path) {
            Some(image) => Ok(Cow::Borrowed(image)),
            None => decode_image(path).map(Cow::Owned),
        }
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| ExplorerError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}
