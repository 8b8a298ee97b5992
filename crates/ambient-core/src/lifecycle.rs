//! Mount-to-teardown ownership of the frame loop and event subscriptions.
//!
//! A [`Lifecycle`] is driven by its [`Host`]: the host calls
//! [`Lifecycle::frame`] when a requested frame fires and forwards scroll and
//! resize notifications through [`Lifecycle::on_event`]. Everything runs on
//! one thread and nothing is reentrant, so the lifecycle keeps plain state.
//! After [`Lifecycle::unmount`] begins, neither frames nor events do any work.

use crate::config::FieldConfig;
use crate::input::{HostEvent, InputCoupler, ScrollSignal, Viewport};
use crate::particle::ParticleStore;
use crate::raster::{self, Surface};
use crate::sim;
use instant::Instant;
use rand::Rng;
use std::fmt;

/// The environment a field runs in: drawing surface, frame scheduling and the
/// scroll/resize listeners.
pub trait Host {
    type Surface: Surface;
    type FrameHandle: Copy + fmt::Debug;

    /// Obtain the drawing surface; `None` when no 2D context is available.
    fn acquire_surface(&mut self) -> Option<Self::Surface>;
    /// Current logical size and device pixel ratio.
    fn viewport(&self) -> Viewport;
    fn scroll_offset(&self) -> f64;
    /// Schedule one call to [`Lifecycle::frame`].
    fn request_frame(&mut self) -> Option<Self::FrameHandle>;
    fn cancel_frame(&mut self, handle: Self::FrameHandle);
    /// Start delivering scroll and resize notifications. Returns false when
    /// the listeners could not be registered.
    fn attach_listeners(&mut self) -> bool;
    /// Stop delivering notifications. Must be a no-op when nothing is attached.
    fn detach_listeners(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Never mounted.
    Idle,
    /// Mounted without a usable surface or config; does nothing.
    Inert,
    Running,
    TornDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountOutcome {
    Running,
    Inert,
}

/// Per-mount state. Dropped on teardown so a remount never sees it.
struct Field<S> {
    config: FieldConfig,
    fill_css: String,
    store: ParticleStore,
    coupler: InputCoupler,
    viewport: Viewport,
    surface: S,
    ticks: u64,
    mounted_at: Instant,
}

impl<S: Surface> Field<S> {
    /// One tick: apply queued geometry, then queued scroll, advance, repaint.
    fn tick(&mut self) {
        if let Some(vp) = self.coupler.take_resize() {
            raster::configure_surface(&mut self.surface, &vp);
            self.viewport = vp;
        }
        self.coupler.apply_pending_scroll();
        let input = self.coupler.begin_tick(self.viewport.height);
        sim::step(&mut self.store, &self.config.motion, input);
        raster::present(&mut self.surface, &self.store, &self.viewport, &self.fill_css);
        self.coupler.end_tick();
        self.ticks += 1;
    }
}

pub struct Lifecycle<H: Host> {
    host: H,
    field: Option<Field<H::Surface>>,
    pending_frame: Option<H::FrameHandle>,
    listening: bool,
    phase: Phase,
}

impl<H: Host> Lifecycle<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            field: None,
            pending_frame: None,
            listening: false,
            phase: Phase::Idle,
        }
    }

    /// Build a fresh particle set, size the surface, draw once and start the
    /// frame loop. A previous mount is torn down first.
    pub fn mount<R: Rng>(&mut self, config: FieldConfig, rng: &mut R) -> MountOutcome {
        if matches!(self.phase, Phase::Running | Phase::Inert) {
            self.unmount();
        }
        if let Err(e) = config.validate() {
            log::warn!("[field] rejected config: {}", e);
            self.phase = Phase::Inert;
            return MountOutcome::Inert;
        }
        let Some(mut surface) = self.host.acquire_surface() else {
            log::warn!("[field] no drawing surface; staying inert");
            self.phase = Phase::Inert;
            return MountOutcome::Inert;
        };

        let viewport = self.host.viewport();
        raster::configure_surface(&mut surface, &viewport);
        let store = ParticleStore::generate(config.count, &config.ranges, rng);
        let coupler = InputCoupler::new(&config.motion, self.host.scroll_offset());
        log::debug!(
            "[field] mount count={} color={} motion={:?} viewport={:.0}x{:.0}@{}",
            config.count,
            config.color,
            config.motion,
            viewport.width,
            viewport.height,
            viewport.device_pixel_ratio
        );
        let mut field = Field {
            fill_css: config.color.to_css(),
            config,
            store,
            coupler,
            viewport,
            surface,
            ticks: 0,
            mounted_at: Instant::now(),
        };
        field.tick();
        self.field = Some(field);
        self.phase = Phase::Running;

        self.listening = self.host.attach_listeners();
        if !self.listening {
            log::warn!("[field] listeners unavailable; scroll and resize are ignored");
        }
        self.pending_frame = self.host.request_frame();
        MountOutcome::Running
    }

    /// Tear down and mount again with `config`; no particle state carries over.
    pub fn remount<R: Rng>(&mut self, config: FieldConfig, rng: &mut R) -> MountOutcome {
        self.unmount();
        self.mount(config, rng)
    }

    /// Queue a scroll or resize notification for the next tick.
    pub fn on_event(&mut self, event: HostEvent) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(field) = self.field.as_mut() {
            field.coupler.push(event);
        }
    }

    /// Run one tick and schedule the next. Called by the host when a
    /// requested frame fires.
    pub fn frame(&mut self) {
        self.pending_frame = None;
        if self.phase != Phase::Running {
            return;
        }
        if let Some(field) = self.field.as_mut() {
            field.tick();
        }
        self.pending_frame = self.host.request_frame();
    }

    /// Cancel the pending frame, remove listeners and drop the particle set.
    /// Safe to call in any phase, any number of times.
    pub fn unmount(&mut self) {
        if self.phase == Phase::Running || self.phase == Phase::Inert {
            self.phase = Phase::TornDown;
        }
        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
        if self.listening {
            self.host.detach_listeners();
            self.listening = false;
        }
        if let Some(field) = self.field.take() {
            log::info!(
                "[field] stopped after {} ticks ({:.1}s)",
                field.ticks,
                field.mounted_at.elapsed().as_secs_f32()
            );
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn ticks(&self) -> u64 {
        self.field.as_ref().map_or(0, |f| f.ticks)
    }

    pub fn store(&self) -> Option<&ParticleStore> {
        self.field.as_ref().map(|f| &f.store)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.field.as_ref().map(|f| f.viewport)
    }

    pub fn scroll_signal(&self) -> Option<&ScrollSignal> {
        self.field.as_ref().map(|f| f.coupler.signal())
    }

    pub fn config(&self) -> Option<&FieldConfig> {
        self.field.as_ref().map(|f| &f.config)
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: Host> Drop for Lifecycle<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
