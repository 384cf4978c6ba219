use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

// @module: Lookup of already-downloaded article images

/// Image file extensions recognised in the images directory
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Suffix marking a thumbnail (`<slug>_thumb.<ext>`)
const THUMBNAIL_SUFFIX: &str = "_thumb";

/// Images attached to one article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaSet {
    /// Main image path, relative to the content root
    pub main_img: Option<String>,
    /// Thumbnail path, relative to the content root
    pub thumbnail: Option<String>,
}

/// Resolves a filesystem slug to its images
pub trait ImageLookup {
    fn lookup(&self, slug_fs: &str) -> Option<&MediaSet>;
}

/// Image lookup backed by a scanned directory
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    entries: HashMap<String, MediaSet>,
}

impl ImageIndex {
    /// Walk `images_dir` once, recording paths relative to `content_root`
    ///
    /// A missing directory gives an empty index.
    pub fn scan<P1: AsRef<Path>, P2: AsRef<Path>>(images_dir: P1, content_root: P2) -> Result<Self> {
        let images_dir = images_dir.as_ref();
        let content_root = content_root.as_ref();
        let mut index = Self::default();

        if !images_dir.is_dir() {
            debug!("Images directory {:?} not found, no images attached", images_dir);
            return Ok(index);
        }

        for entry in WalkDir::new(images_dir).sort_by_file_name() {
            let entry = entry.context("Failed to read images directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let is_image = path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()));
            if !is_image {
                continue;
            }

            let Some(stem) = path.file_stem().map(|stem| stem.to_string_lossy().to_string()) else {
                continue;
            };

            let relative = path.strip_prefix(content_root).unwrap_or(path);
            let relative = relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            match stem.strip_suffix(THUMBNAIL_SUFFIX) {
                Some(slug) => index.insert_thumbnail(slug, relative),
                None => index.insert_main(&stem, relative),
            }
        }

        debug!("Indexed images for {} slugs", index.len());
        Ok(index)
    }

    /// Register a main image, keeping the first one found
    pub fn insert_main(&mut self, slug_fs: &str, path: String) {
        let media = self.entries.entry(slug_fs.to_string()).or_default();
        if media.main_img.is_none() {
            media.main_img = Some(path);
        }
    }

    /// Register a thumbnail, keeping the first one found
    pub fn insert_thumbnail(&mut self, slug_fs: &str, path: String) {
        let media = self.entries.entry(slug_fs.to_string()).or_default();
        if media.thumbnail.is_none() {
            media.thumbnail = Some(path);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageLookup for ImageIndex {
    fn lookup(&self, slug_fs: &str) -> Option<&MediaSet> {
        self.entries.get(slug_fs)
    }
}
