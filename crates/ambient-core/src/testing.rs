//! Test doubles for driving a [`crate::Lifecycle`] without a browser.
//!
//! `RecordingSurface` logs every drawing call into a shared log, so clones
//! handed to a lifecycle stay observable after teardown. `ManualHost` hands
//! out frame handles and tracks listener attachment; tests fire frames by
//! calling [`crate::Lifecycle::frame`] themselves.

use crate::input::Viewport;
use crate::lifecycle::Host;
use crate::raster::Surface;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    SetBackingSize(u32, u32),
    ResetTransform,
    Scale(f64),
    Clear(f64, f64),
    SetFillColor(String),
    SetGlobalAlpha(f64),
    FillDisc { x: f64, y: f64, radius: f64 },
}

/// A disc as it would appear on screen, with the state active when drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Disc {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
    pub fill: String,
}

#[derive(Debug)]
struct SurfaceLog {
    calls: Vec<DrawCall>,
    discs: Vec<Disc>,
    backing: (u32, u32),
    scale: f64,
    alpha: f64,
    fill: String,
}

impl Default for SurfaceLog {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            discs: Vec::new(),
            backing: (0, 0),
            scale: 1.0,
            alpha: 1.0,
            fill: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<DrawCall> {
        self.log.borrow().calls.clone()
    }

    pub fn discs(&self) -> Vec<Disc> {
        self.log.borrow().discs.clone()
    }

    pub fn backing(&self) -> (u32, u32) {
        self.log.borrow().backing
    }

    /// Product of every scale applied since the last transform reset.
    pub fn effective_scale(&self) -> f64 {
        self.log.borrow().scale
    }

    pub fn current_alpha(&self) -> f64 {
        self.log.borrow().alpha
    }

    /// Forget recorded calls and discs; surface state is kept.
    pub fn clear_log(&self) {
        let mut log = self.log.borrow_mut();
        log.calls.clear();
        log.discs.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        let mut log = self.log.borrow_mut();
        log.backing = (width, height);
        // a real canvas resets its context state when resized
        log.scale = 1.0;
        log.alpha = 1.0;
        log.calls.push(DrawCall::SetBackingSize(width, height));
    }

    fn reset_transform(&mut self) {
        let mut log = self.log.borrow_mut();
        log.scale = 1.0;
        log.calls.push(DrawCall::ResetTransform);
    }

    fn scale(&mut self, factor: f64) {
        let mut log = self.log.borrow_mut();
        log.scale *= factor;
        log.calls.push(DrawCall::Scale(factor));
    }

    fn clear(&mut self, width: f64, height: f64) {
        let mut log = self.log.borrow_mut();
        log.discs.clear();
        log.calls.push(DrawCall::Clear(width, height));
    }

    fn set_fill_color(&mut self, css: &str) {
        let mut log = self.log.borrow_mut();
        log.fill = css.to_string();
        log.calls.push(DrawCall::SetFillColor(css.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        let mut log = self.log.borrow_mut();
        log.alpha = alpha;
        log.calls.push(DrawCall::SetGlobalAlpha(alpha));
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64) {
        let mut log = self.log.borrow_mut();
        let disc = Disc {
            x,
            y,
            radius,
            alpha: log.alpha,
            fill: log.fill.clone(),
        };
        log.discs.push(disc);
        log.calls.push(DrawCall::FillDisc { x, y, radius });
    }
}

/// Host whose frames and listeners are driven by the test.
#[derive(Debug)]
pub struct ManualHost {
    pub surface: RecordingSurface,
    /// When false, surface acquisition fails like a canvas without a 2D context.
    pub surface_available: bool,
    pub viewport: Viewport,
    pub scroll_offset: f64,
    pub requested: Vec<u32>,
    pub cancelled: Vec<u32>,
    pub attach_count: usize,
    pub detach_count: usize,
    listening: bool,
    next_handle: u32,
}

impl Default for ManualHost {
    fn default() -> Self {
        Self {
            surface: RecordingSurface::default(),
            surface_available: true,
            viewport: Viewport::empty(),
            scroll_offset: 0.0,
            requested: Vec::new(),
            cancelled: Vec::new(),
            attach_count: 0,
            detach_count: 0,
            listening: false,
            next_handle: 1,
        }
    }
}

impl ManualHost {
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// The most recent frame request, unless it was cancelled. Earlier
    /// requests are treated as already fired.
    pub fn pending_frame(&self) -> Option<u32> {
        self.requested
            .last()
            .copied()
            .filter(|h| !self.cancelled.contains(h))
    }
}

impl Host for ManualHost {
    type Surface = RecordingSurface;
    type FrameHandle = u32;

    fn acquire_surface(&mut self) -> Option<RecordingSurface> {
        self.surface_available.then(|| self.surface.clone())
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn request_frame(&mut self) -> Option<u32> {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.requested.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }

    fn attach_listeners(&mut self) -> bool {
        self.attach_count += 1;
        self.listening = true;
        true
    }

    fn detach_listeners(&mut self) {
        if self.listening {
            self.detach_count += 1;
            self.listening = false;
        }
    }
}
