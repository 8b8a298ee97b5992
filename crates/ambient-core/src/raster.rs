//! Raster presentation: the drawing-surface seam and the per-tick repaint.
//!
//! `Surface` mirrors the handful of 2D-context calls the field needs so the
//! same presenter drives a browser canvas or a recording test double.

use crate::input::Viewport;
use crate::particle::ParticleStore;

pub trait Surface {
    /// Set the backing store to `width` x `height` device pixels.
    fn set_backing_size(&mut self, width: u32, height: u32);
    /// Replace the current transform with identity.
    fn reset_transform(&mut self);
    /// Multiply the current transform by a uniform scale.
    fn scale(&mut self, factor: f64);
    fn clear(&mut self, width: f64, height: f64);
    fn set_fill_color(&mut self, css: &str);
    fn set_global_alpha(&mut self, alpha: f64);
    fn fill_disc(&mut self, x: f64, y: f64, radius: f64);
}

/// Size the backing store for `viewport` and install a transform mapping
/// logical pixels to device pixels. The transform is reset first so repeated
/// resizes never compound scale factors.
pub fn configure_surface<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport) {
    let (w, h) = viewport.backing_size();
    surface.set_backing_size(w, h);
    surface.reset_transform();
    surface.scale(viewport.device_pixel_ratio);
}

/// Clear the whole surface and draw every particle as a filled disc.
/// Global alpha is restored to 1 afterwards.
pub fn present<S: Surface + ?Sized>(
    surface: &mut S,
    store: &ParticleStore,
    viewport: &Viewport,
    fill_css: &str,
) {
    surface.clear(viewport.width, viewport.height);
    surface.set_fill_color(fill_css);
    for p in store {
        surface.set_global_alpha(p.opacity as f64);
        surface.fill_disc(
            p.position.x as f64 * viewport.width,
            p.position.y as f64 * viewport.height,
            p.radius as f64,
        );
    }
    surface.set_global_alpha(1.0);
}
