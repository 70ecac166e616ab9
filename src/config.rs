/// Width of the 2D field raster in pixels (one pixel per length unit along x).
pub const SIMULATION_WIDTH: u32 = 420;
/// Width of the envelope panel drawn to the right of the field raster.
pub const ENVELOPE_WIDTH: u32 = 80;
/// Height of the main canvas and of the vertical plot (one pixel per length unit along z).
pub const CANVAS_HEIGHT: u32 = 400;
/// Thickness of the 1D side plots (width of the vertical plot, height of the horizontal one).
pub const PLOT_THICKNESS: u32 = 80;

/// Reference wavelength in units of the spatial grid.
pub const DEFAULT_WAVELENGTH: f32 = 80.0;
/// Default incidence angle in degrees.
pub const DEFAULT_ANGLE: f32 = 45.0;
/// Default speed factor. Angular frequency is twice this value.
pub const DEFAULT_SPEED: f32 = 0.05;

pub const MIN_ANGLE: f32 = 0.0;
pub const MAX_ANGLE: f32 = 89.0;
pub const MIN_SPEED: f32 = 0.01;
pub const MAX_SPEED: f32 = 0.2;
/// Slider resolution of the speed factor.
pub const SPEED_STEP: f32 = 0.01;

/// Visual gain applied to the closed-form total field before clamping.
pub const TOTAL_GAIN: f32 = 1.1;
/// Standing wave samples with `|sin(kz z)|` below this are marked as nodes.
pub const NODE_THRESHOLD: f32 = 0.05;
/// Smallest angle (degrees) used when displaying the tangential phase velocity.
pub const PHASE_VELOCITY_MIN_ANGLE: f32 = 0.1;
/// Peak deflection of the 1D side plots, in pixels.
pub const PLOT_AMPLITUDE: f32 = 25.0;
/// Gap between the envelope peak and the edge of the envelope panel.
pub const ENVELOPE_MARGIN: f32 = 5.0;
/// Height of the PEC boundary strip along the bottom of the main canvas.
pub const PEC_STRIP_HEIGHT: u32 = 12;

// diverging color scale
pub const COLOR_POSITIVE: [u8; 3] = [220, 38, 38];
pub const COLOR_NEGATIVE: [u8; 3] = [37, 99, 235];
pub const COLOR_ZERO: [u8; 3] = [255, 255, 255];

// overlay palette
pub const PANEL_BACKGROUND: [u8; 3] = [0xf8, 0xfa, 0xfc];
pub const PANEL_BORDER: [u8; 3] = [0xcb, 0xd5, 0xe1];
pub const PANEL_CENTERLINE: [u8; 3] = [0x94, 0xa3, 0xb8];
pub const ENVELOPE_CURVE: [u8; 3] = [0x47, 0x55, 0x69];
pub const ENVELOPE_FILL_ALPHA: f64 = 0.1;
pub const PEC_STRIP: [u8; 3] = [0x33, 0x41, 0x55];
pub const PLOT_AXIS: [u8; 3] = [0xe2, 0xe8, 0xf0];
pub const PLOT_LABEL: [u8; 3] = [0x64, 0x74, 0x8b];
pub const NODE_MARKER: [u8; 3] = [0x33, 0x41, 0x55];
pub const INDICATOR: [u8; 3] = [0x0f, 0x17, 0x2a];
pub const ARROW_INCIDENT: [u8; 3] = [0xc2, 0x41, 0x0c];
pub const ARROW_REFLECTED: [u8; 3] = [0x04, 0x78, 0x57];
pub const ARROW_PHASE: [u8; 3] = [0x43, 0x38, 0xca];
