pub mod canvas;
pub mod clock;
pub mod colormap;
pub mod config;
pub mod envelope;
pub mod export;
pub mod layout;
pub mod overlay;
pub mod plots;
pub mod raster;
pub mod sampler;
pub mod scene;
pub mod settings;
#[cfg(feature = "macroquad")]
pub mod viewer;
pub mod wave;
