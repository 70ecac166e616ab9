use anyhow::Result;
use pecwave::export;
use pecwave::settings::{self};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = settings::load_config()?;

    if let Some(dir) = settings.export.clone() {
        export::export(&settings, &dir)?;
        return Ok(());
    }

    run_viewer(&settings)
}

#[cfg(feature = "macroquad")]
fn run_viewer(settings: &settings::Settings) -> Result<()> {
    pecwave::viewer::run(settings);
    Ok(())
}

#[cfg(not(feature = "macroquad"))]
fn run_viewer(_settings: &settings::Settings) -> Result<()> {
    anyhow::bail!("built without the viewer; pass --export DIR to write frames instead")
}
