//! Headless export of the animation as a PNG sequence.
//!
//! Drives a [`Scene`] for a fixed number of ticks and writes each composed
//! page to `frame_000001.png`, `frame_000002.png` and so on. A `settings.toml`
//! snapshot next to the frames records the parameters they were rendered
//! with.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::layout::compose;
use crate::scene::Scene;
use crate::settings::Settings;


/// What an export wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub directory: PathBuf,
    pub frames: u64,
    pub elapsed: Duration,
}

/// Path of the `index`-th frame (1-based) inside `dir`.
pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{:06}.png", index))
}

/// Renders `settings.frames` ticks into `dir`, creating it if needed.
pub fn export(settings: &Settings, dir: &Path) -> Result<ExportSummary> {
    let start = Instant::now();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let snapshot = toml::to_string(settings).context("serializing settings")?;
    let snapshot_path = dir.join("settings.toml");
    fs::write(&snapshot_path, snapshot)
        .with_context(|| format!("writing {}", snapshot_path.display()))?;

    tracing::info!(
        "exporting {} frames to {} ({} mode, {:.1} deg)",
        settings.frames,
        dir.display(),
        settings.mode,
        settings.angle
    );

    let mut scene = Scene::from_settings(settings);
    let layout = *scene.layout();

    let pb = ProgressBar::new(settings.frames);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg} ETA: {eta_precise}",
        )
        .context("building progress bar style")?
        .progress_chars("█▇▆▅▄▃▂▁"),
    );
    pb.set_message("frame".to_string());

    let mut written = 0;
    for index in 1..=settings.frames {
        let Some(frames) = scene.tick() else {
            break;
        };
        let page = compose(frames, &layout);
        let path = frame_path(dir, index);
        page.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!("wrote {} (t = {})", path.display(), frames.time);
        written = index;
        pb.inc(1);
    }
    scene.teardown();
    pb.finish_with_message("done");

    let summary = ExportSummary {
        directory: dir.to_path_buf(),
        frames: written,
        elapsed: start.elapsed(),
    };
    tracing::info!(
        "exported {} frames to {} in {:.2?}",
        summary.frames,
        summary.directory.display(),
        summary.elapsed
    );
    Ok(summary)
}
