use anyhow::{bail, Context, Result};
use clap::Parser;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::sampler::DisplayMode;


/// Runtime configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Incidence angle in degrees from the surface normal.
    pub angle: f32,
    pub speed: f32,
    pub mode: DisplayMode,
    pub running: bool,
    /// Output directory for a headless export. The viewer runs when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<PathBuf>,
    pub frames: u64,
}

/// Compiled-in values for every key, so a missing config file is not fatal.
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>> {
    let builder = Config::builder()
        .set_default("angle", crate::config::DEFAULT_ANGLE as f64)?
        .set_default("speed", crate::config::DEFAULT_SPEED as f64)?
        .set_default("mode", DisplayMode::default().to_string())?
        .set_default("running", true)?
        .set_default("frames", 120_i64)?;
    Ok(builder)
}

/// Loads `config/default.toml` on top of the built-in defaults.
///
/// Ignores `config/local.toml`, environment variables and the command line,
/// so the result is reproducible.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings = builder_with_defaults()?
        .add_source(File::from(default_config_file.clone()).required(true))
        .build()
        .with_context(|| format!("loading {}", default_config_file.display()))?;

    let config: Settings = settings
        .try_deserialize()
        .context("deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the full configuration: built-in defaults, the config file, `PECWAVE_*`
/// environment variables and finally the command line.
pub fn load_config() -> Result<Settings> {
    let mut builder = builder_with_defaults()?;

    match retrieve_project_root() {
        Ok(root) => {
            let config_file = pick_config_file(&root);
            tracing::info!("using configuration: {}", config_file.display());
            builder = builder.add_source(File::from(config_file).required(false));
        }
        Err(err) => {
            tracing::warn!("no project root found ({err:#}), using built-in defaults");
        }
    }

    let settings = builder
        .add_source(Environment::with_prefix("PECWAVE").try_parsing(true))
        .build()
        .context("loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("deserializing configuration")?;

    apply_overrides(&mut config, CliArgs::parse());

    validate_config(&config)?;

    tracing::debug!("{config}");

    Ok(config)
}

/// `config/local.toml` wins over `config/default.toml` when it exists.
fn pick_config_file(root: &Path) -> PathBuf {
    let local_config = root.join("config/local.toml");
    if local_config.exists() {
        local_config
    } else {
        root.join("config/default.toml")
    }
}

/// Overwrites every setting given on the command line.
pub fn apply_overrides(config: &mut Settings, args: CliArgs) {
    if let Some(angle) = args.angle {
        config.angle = angle;
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if args.paused {
        config.running = false;
    }
    if let Some(export) = args.export {
        config.export = Some(export);
    }
    if let Some(frames) = args.frames {
        config.frames = frames;
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the PECWAVE_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // When running through cargo (e.g. cargo run, cargo test)
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("PECWAVE_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("locating the executable")?;
    let start = exe_path
        .parent()
        .context("executable has no parent directory")?;
    start
        .ancestors()
        .find(|dir| dir.join("config").is_dir())
        .map(Path::to_path_buf)
        .with_context(|| {
            format!(
                "no config directory above {}; set PECWAVE_ROOT_DIR",
                start.display()
            )
        })
}

/// Rejects parameters outside the ranges the controls allow.
pub fn validate_config(config: &Settings) -> Result<()> {
    use crate::config::{MAX_ANGLE, MAX_SPEED, MIN_ANGLE, MIN_SPEED};

    if !(MIN_ANGLE..=MAX_ANGLE).contains(&config.angle) {
        bail!(
            "incidence angle must lie in [{MIN_ANGLE}, {MAX_ANGLE}] degrees, got {}",
            config.angle
        );
    }
    if !(MIN_SPEED..=MAX_SPEED).contains(&config.speed) {
        bail!(
            "speed factor must lie in [{MIN_SPEED}, {MAX_SPEED}], got {}",
            config.speed
        );
    }
    if config.export.is_some() && config.frames == 0 {
        bail!("an export needs at least one frame");
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "PECWAVE - Oblique plane wave reflection off a perfect electric conductor"
)]
pub struct CliArgs {
    /// Incidence angle in degrees, measured from the surface normal. Range [0, 89].
    #[arg(short, long)]
    angle: Option<f32>,

    /// Speed factor of the animation. The angular frequency per frame is twice this value.
    /// Range [0.01, 0.2].
    #[arg(short, long)]
    speed: Option<f32>,

    /// Field shown on the main raster.
    #[arg(short, long, value_enum)]
    mode: Option<DisplayMode>,

    /// Start with the animation paused.
    #[arg(long)]
    paused: bool,

    /// Write frames as PNG images into this directory instead of opening a window.
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Number of frames to write when exporting.
    #[arg(short, long)]
    frames: Option<u64>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Incidence Angle: {:.2}
  - Speed Factor: {:.2}
  - Display Mode: {}
  - Running: {}",
            self.angle, self.speed, self.mode, self.running,
        )?;
        if let Some(export) = &self.export {
            write!(
                f,
                "
  - Export: {} ({} frames)",
                export.display(),
                self.frames
            )?;
        }
        Ok(())
    }
}
