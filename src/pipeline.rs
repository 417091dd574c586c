use std::{fs, path::PathBuf};

use rand::Rng;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{
    background,
    composite::{alpha_mask, composite_over},
    decode,
    error::SegprepResult,
    pool::BackgroundPool,
};

#[derive(Clone, Debug)]
pub enum BackgroundSource {
    /// Synthesize a background per image (solid, striped or blended).
    Synthetic,
    /// Sample backgrounds from this directory, no repeats until exhausted.
    Pool(PathBuf),
}

#[derive(Clone, Debug)]
pub struct ProcessOptions {
    pub input_dir: PathBuf,
    pub mask_dir: PathBuf,
    pub composite_dir: PathBuf,
    pub source: BackgroundSource,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub removed: usize,
    pub missing_dirs: usize,
}

/// Walks the input directory once, sequentially. Every file passing the image
/// extension filter gets the next 1-based index; masks land in
/// `mask_dir/{index}.png` and composites in `composite_dir/{index}.png` (PNG
/// is the output format for both). Data-level failures skip the file with a
/// warning; write failures abort the run.
#[tracing::instrument(skip(rng))]
pub fn process_directory<R: Rng>(opts: &ProcessOptions, rng: &mut R) -> SegprepResult<RunSummary> {
    fs::create_dir_all(&opts.mask_dir)?;
    fs::create_dir_all(&opts.composite_dir)?;

    let mut pool = match &opts.source {
        BackgroundSource::Pool(dir) => Some(BackgroundPool::open(dir)?),
        BackgroundSource::Synthetic => None,
    };

    let mut summary = RunSummary::default();
    let mut index = 0usize;

    for entry in fs::read_dir(&opts.input_dir)? {
        let path = entry?.path();
        if !path.is_file() || !decode::is_image_path(&path) {
            continue;
        }
        index += 1;

        let fg = match decode::load_foreground(&path) {
            Ok(fg) => fg,
            Err(err) if err.is_data_error() => {
                warn!(index, path = %path.display(), %err, "skipping image");
                summary.skipped += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let mask = alpha_mask(&fg);
        mask.save(opts.mask_dir.join(format!("{index}.png")))?;

        let bg = match pool.as_mut() {
            Some(pool) => pool.sample(rng)?,
            None => background::generate(rng, fg.width(), fg.height())?,
        };
        composite_over(&fg, &bg).save(opts.composite_dir.join(format!("{index}.png")))?;

        summary.processed += 1;
        if summary.processed % 100 == 0 {
            info!(processed = summary.processed, "progress");
        }
    }

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "run complete"
    );
    Ok(summary)
}

/// Recursively deletes image files from each listed directory. Missing
/// directories are logged and skipped; running twice removes nothing the
/// second time.
pub fn clean_directories(dirs: &[PathBuf]) -> SegprepResult<CleanSummary> {
    let mut summary = CleanSummary::default();
    for dir in dirs {
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "directory does not exist, nothing to clean");
            summary.missing_dirs += 1;
            continue;
        }
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if entry.file_type().is_file() && decode::is_image_path(path) {
                fs::remove_file(path)?;
                summary.removed += 1;
            }
        }
        info!(dir = %dir.display(), "cleaned");
    }
    Ok(summary)
}
