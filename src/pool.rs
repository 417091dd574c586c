use std::{collections::HashSet, ffi::OsString, fs, path::PathBuf};

use image::RgbImage;
use rand::Rng;

use crate::{
    decode,
    error::{SegprepError, SegprepResult},
};

/// Samples background images from a directory without repeating a file until
/// every file has been handed out, then starts a fresh cycle. The used set
/// lives for one processing run and is never persisted.
#[derive(Debug)]
pub struct BackgroundPool {
    dir: PathBuf,
    files: Vec<OsString>,
    used: HashSet<OsString>,
}

impl BackgroundPool {
    /// Lists the directory once, keeping files that pass the image extension
    /// filter. An empty pool is a configuration error raised here, before any
    /// processing starts.
    pub fn open(dir: impl Into<PathBuf>) -> SegprepResult<Self> {
        let dir = dir.into();
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && decode::is_image_path(&path) {
                files.push(entry.file_name());
            }
        }
        if files.is_empty() {
            return Err(SegprepError::EmptyPool(dir));
        }
        // Listing order is platform-defined; sort for stable seeded runs.
        files.sort();
        Ok(Self {
            dir,
            files,
            used: HashSet::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Chooses the next background file uniformly among those not yet used
    /// and marks it used. When the pool is exhausted the used set is cleared
    /// first, so a pick always succeeds.
    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> PathBuf {
        if self.used.len() == self.files.len() {
            self.used.clear();
        }
        let available: Vec<&OsString> = self
            .files
            .iter()
            .filter(|name| !self.used.contains(*name))
            .collect();
        let name = available[rng.gen_range(0..available.len())].clone();
        self.used.insert(name.clone());
        self.dir.join(name)
    }

    /// Picks and decodes the next background. A decode failure of the chosen
    /// file propagates to the caller; it is not caught here.
    pub fn sample<R: Rng>(&mut self, rng: &mut R) -> SegprepResult<RgbImage> {
        let path = self.pick(rng);
        decode::load_background(&path)
    }
}
