use crate::constants::*;
use ambient_core::{ConfigError, FieldConfig, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn find_canvas(element_id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let el = document
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", element_id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", element_id, e))
}

/// Pin the canvas behind all content and keep it out of hit-testing and the
/// accessibility tree.
pub fn claim_background(canvas: &web::HtmlCanvasElement) {
    let _ = canvas.set_attribute("style", BACKGROUND_STYLE);
    let _ = canvas.set_attribute("aria-hidden", "true");
}

/// Logical size of the canvas and the current device pixel ratio.
pub fn read_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let rect = canvas.get_bounding_client_rect();
    Viewport::new(rect.width(), rect.height(), dpr)
}

#[inline]
pub fn scroll_offset() -> f64 {
    web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Build a config from the canvas's `data-*` attributes.
pub fn config_from_attributes(canvas: &web::HtmlCanvasElement) -> Result<FieldConfig, ConfigError> {
    FieldConfig::from_lookup(|key| canvas.get_attribute(&config_attr(key)))
}
