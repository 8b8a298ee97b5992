use crate::constants::*;
use crate::error::ConfigError;
use std::fmt;
use std::ops::Range;

/// Fill color shared by every particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    pub fn parse_hex(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 0x11);
                Ok(Color {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            6 => Ok(Color {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => Err(invalid()),
        }
    }

    /// CSS form accepted by `fillStyle`.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Multipliers for the continuous-fall policy.
///
/// - `speed` scales every particle's intrinsic fall rate
/// - `boost` scales the extra fall applied while the page scrolls down
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallTuning {
    pub speed: f32,
    pub boost: f32,
}

impl Default for FallTuning {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            boost: DEFAULT_BOOST,
        }
    }
}

/// How scroll input couples into particle motion. Fixed for a mounted field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionMode {
    /// Particles move only by the scroll displacement accumulated since the
    /// previous tick; no scroll means no motion.
    Discrete,
    /// Particles fall every tick; scrolling down briefly speeds the fall up.
    ContinuousFall(FallTuning),
}

impl Default for MotionMode {
    fn default() -> Self {
        MotionMode::ContinuousFall(FallTuning::default())
    }
}

impl MotionMode {
    pub fn parse(name: &str, tuning: FallTuning) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fall" | "continuous" => Ok(MotionMode::ContinuousFall(tuning)),
            "scroll" | "discrete" => Ok(MotionMode::Discrete),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Half-open generator ranges for the fixed per-particle parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleRanges {
    pub radius: Range<f32>,
    pub opacity: Range<f32>,
    pub fall_rate: Range<f32>,
    pub drift_x: Range<f32>,
    pub scroll_boost: Range<f32>,
    pub wobble_amplitude: Range<f32>,
    pub wobble_frequency: Range<f32>,
    pub wobble_phase: Range<f32>,
    /// Discrete mode: vertical share of the scroll displacement.
    pub scroll_factor: Range<f32>,
    /// Discrete mode: horizontal share of the vertical scroll displacement.
    pub x_parallax: Range<f32>,
}

impl Default for ParticleRanges {
    fn default() -> Self {
        Self {
            radius: 0.5..2.5,
            opacity: 0.3..1.0,
            fall_rate: 0.001..0.006,
            drift_x: -0.0005..0.0005,
            scroll_boost: 0.04..0.06,
            wobble_amplitude: 0.005..0.015,
            wobble_frequency: 0.025..0.05,
            wobble_phase: 0.0..std::f32::consts::FRAC_PI_2,
            scroll_factor: 0.05..0.35,
            x_parallax: -0.15..0.15,
        }
    }
}

impl ParticleRanges {
    fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("radius", &self.radius),
            ("opacity", &self.opacity),
            ("fall_rate", &self.fall_rate),
            ("drift_x", &self.drift_x),
            ("scroll_boost", &self.scroll_boost),
            ("wobble_amplitude", &self.wobble_amplitude),
            ("wobble_frequency", &self.wobble_frequency),
            ("wobble_phase", &self.wobble_phase),
            ("scroll_factor", &self.scroll_factor),
            ("x_parallax", &self.x_parallax),
        ];
        for (name, r) in named {
            if !(r.start.is_finite() && r.end.is_finite() && r.start < r.end) {
                return Err(invalid_range(name, r));
            }
        }
        if self.radius.start <= 0.0 {
            return Err(invalid_range("radius", &self.radius));
        }
        if self.opacity.start <= 0.0 || self.opacity.end > 1.0 {
            return Err(invalid_range("opacity", &self.opacity));
        }
        Ok(())
    }
}

fn invalid_range(name: &'static str, r: &Range<f32>) -> ConfigError {
    ConfigError::InvalidRange {
        name,
        start: r.start,
        end: r.end,
    }
}

/// Everything a field needs at creation. Immutable once mounted; a different
/// configuration means a remount with a fresh particle set.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub count: usize,
    pub color: Color,
    pub motion: MotionMode,
    pub ranges: ParticleRanges,
    /// Seed for the particle generator; `None` lets the host choose.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            color: Color::WHITE,
            motion: MotionMode::default(),
            ranges: ParticleRanges::default(),
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let MotionMode::ContinuousFall(t) = self.motion {
            for (name, value) in [("speed", t.speed), ("boost", t.boost)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidTuning { name, value });
                }
            }
        }
        self.ranges.validate()
    }

    /// Build a config from string attributes such as a canvas element's
    /// `data-*` set. Keys: `count`, `color`, `mode`, `speed`, `boost`, `seed`.
    /// Missing keys keep their defaults; malformed values are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = FieldConfig::default();
        if let Some(v) = lookup("count") {
            cfg.count = parse_number("count", &v)?;
        }
        if let Some(v) = lookup("color") {
            cfg.color = Color::parse_hex(&v)?;
        }
        let mut tuning = FallTuning::default();
        if let Some(v) = lookup("speed") {
            tuning.speed = parse_number("speed", &v)?;
        }
        if let Some(v) = lookup("boost") {
            tuning.boost = parse_number("boost", &v)?;
        }
        cfg.motion = match lookup("mode") {
            Some(name) => MotionMode::parse(&name, tuning)?,
            None => MotionMode::ContinuousFall(tuning),
        };
        if let Some(v) = lookup("seed") {
            cfg.seed = Some(parse_number("seed", &v)?);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}
