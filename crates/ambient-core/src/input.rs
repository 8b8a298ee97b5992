//! Input coupling: turns scroll and resize notifications into the scalars the
//! simulation step consumes.
//!
//! Hosts queue [`HostEvent`]s as they arrive; the coupler applies them at the
//! start of the next tick, geometry first, then scroll offsets in arrival
//! order, so every notification is seen exactly once.

use crate::config::MotionMode;
use crate::constants::{MIN_DEVICE_PIXEL_RATIO, SCROLL_NORM_PX, SCROLL_VELOCITY_DECAY};
use crate::sim::StepInput;

/// Logical (CSS pixel) size of the drawing surface plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Non-finite or negative sizes collapse to zero; the ratio never drops below 1.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        let sane = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let dpr = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.max(MIN_DEVICE_PIXEL_RATIO)
        } else {
            MIN_DEVICE_PIXEL_RATIO
        };
        Self {
            width: sane(width),
            height: sane(height),
            device_pixel_ratio: dpr,
        }
    }

    pub const fn empty() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            device_pixel_ratio: MIN_DEVICE_PIXEL_RATIO,
        }
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.device_pixel_ratio).floor() as u32,
            (self.height * self.device_pixel_ratio).floor() as u32,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::empty()
    }
}

/// Notifications a host delivers between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// New vertical scroll offset of the page, in CSS pixels.
    Scroll(f64),
    /// The viewport changed size or density.
    Resize(Viewport),
}

/// Scroll state owned by the coupler.
///
/// - `last_offset`: last observed scroll position
/// - `accumulated_delta`: displacement not yet consumed by a tick (discrete mode)
/// - `decayed_velocity`: latest delta, decaying every tick (continuous-fall mode)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSignal {
    pub last_offset: f64,
    pub accumulated_delta: f64,
    pub decayed_velocity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Policy {
    Discrete,
    ContinuousFall,
}

#[derive(Debug)]
pub struct InputCoupler {
    policy: Policy,
    signal: ScrollSignal,
    pending_resize: Option<Viewport>,
    pending_scroll: Vec<f64>,
}

impl InputCoupler {
    /// Start from the host's current scroll offset so mounting never reads as a scroll.
    pub fn new(mode: &MotionMode, scroll_offset: f64) -> Self {
        let policy = match mode {
            MotionMode::Discrete => Policy::Discrete,
            MotionMode::ContinuousFall(_) => Policy::ContinuousFall,
        };
        Self {
            policy,
            signal: ScrollSignal {
                last_offset: scroll_offset,
                ..ScrollSignal::default()
            },
            pending_resize: None,
            pending_scroll: Vec::new(),
        }
    }

    #[inline]
    pub fn signal(&self) -> &ScrollSignal {
        &self.signal
    }

    /// Queue a notification for the next tick.
    pub fn push(&mut self, event: HostEvent) {
        match event {
            // Only the latest geometry matters for the next draw.
            HostEvent::Resize(vp) => self.pending_resize = Some(vp),
            HostEvent::Scroll(offset) => self.pending_scroll.push(offset),
        }
    }

    /// Latest queued resize, if any arrived since the previous tick.
    pub fn take_resize(&mut self) -> Option<Viewport> {
        self.pending_resize.take()
    }

    /// Fold every queued scroll offset into the signal, in arrival order.
    pub fn apply_pending_scroll(&mut self) {
        let pending = std::mem::take(&mut self.pending_scroll);
        for offset in pending {
            self.observe_scroll(offset);
        }
    }

    /// Apply one scroll notification immediately.
    pub fn observe_scroll(&mut self, offset: f64) {
        if !offset.is_finite() {
            return;
        }
        let dy = offset - self.signal.last_offset;
        self.signal.last_offset = offset;
        match self.policy {
            Policy::Discrete => self.signal.accumulated_delta += dy,
            Policy::ContinuousFall => self.signal.decayed_velocity = dy as f32,
        }
    }

    /// Scalar consumed by this tick's simulation step. Drains the discrete
    /// displacement; the continuous signal is left for [`Self::end_tick`].
    pub fn begin_tick(&mut self, logical_height: f64) -> StepInput {
        match self.policy {
            Policy::Discrete => {
                let delta = std::mem::take(&mut self.signal.accumulated_delta);
                let displacement = if logical_height > 0.0 {
                    (delta / logical_height) as f32
                } else {
                    0.0
                };
                StepInput::Displacement(displacement)
            }
            Policy::ContinuousFall => StepInput::Boost(self.boost()),
        }
    }

    /// Decay the continuous-fall velocity toward zero; runs once per tick
    /// whether or not new scroll arrived.
    pub fn end_tick(&mut self) {
        if self.policy == Policy::ContinuousFall {
            self.signal.decayed_velocity *= SCROLL_VELOCITY_DECAY;
        }
    }

    /// Velocity normalized and clamped to [-1, 1].
    pub fn boost(&self) -> f32 {
        self.signal
            .decayed_velocity
            .clamp(-SCROLL_NORM_PX, SCROLL_NORM_PX)
            / SCROLL_NORM_PX
    }
}
