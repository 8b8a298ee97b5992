// Motion tuning constants shared by the simulation step and the input coupler.

// Scroll coupling
pub const SCROLL_VELOCITY_DECAY: f32 = 0.9; // per-tick multiplicative decay of the fall boost signal
pub const SCROLL_NORM_PX: f32 = 60.0; // |delta| at which the boost saturates

// Continuous-fall mode
pub const WOBBLE_TIME_STEP: f32 = 0.01; // phase advance per tick is wobble_frequency * this
pub const WOBBLE_AMPLITUDE_SCALE: f32 = 0.2;
pub const BOOST_SCALE: f32 = 0.03;

// Surface
pub const MIN_DEVICE_PIXEL_RATIO: f64 = 1.0;

// Defaults for a freshly created field
pub const DEFAULT_COUNT: usize = 5;
pub const DEFAULT_COLOR_HEX: &str = "#ffffff";
pub const DEFAULT_SPEED: f32 = 0.5;
pub const DEFAULT_BOOST: f32 = 1.5;
