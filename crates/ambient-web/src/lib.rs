#![cfg(target_arch = "wasm32")]
use ambient_core::{Color, FallTuning, FieldConfig, MotionMode, MountOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod host;
mod surface;

use host::{SharedField, WebHost};

thread_local! {
    // Field mounted by `start` on the default canvas; kept alive for the page.
    static AUTO_FIELD: RefCell<Option<AmbientField>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambient-web starting");

    match dom::find_canvas(constants::DEFAULT_CANVAS_ID) {
        Ok(canvas) => {
            let field = AmbientField::mount(canvas);
            AUTO_FIELD.with(|slot| *slot.borrow_mut() = Some(field));
        }
        Err(e) => log::info!("no background field: {:?}", e),
    }
    Ok(())
}

/// A mounted background field. Dropping or unmounting it stops the frame loop
/// and removes its listeners.
#[wasm_bindgen]
pub struct AmbientField {
    canvas: web::HtmlCanvasElement,
    inner: SharedField,
}

#[wasm_bindgen]
impl AmbientField {
    /// Mount on `canvas`, configured from its `data-*` attributes.
    pub fn mount(canvas: web::HtmlCanvasElement) -> AmbientField {
        let config = config_or_default(dom::config_from_attributes(&canvas));
        Self::mount_config(canvas, config)
    }

    /// Mount with explicit settings; `mode` is `"fall"` or `"scroll"`.
    pub fn mount_with(
        canvas: web::HtmlCanvasElement,
        count: u32,
        color: &str,
        mode: &str,
        speed: f32,
        boost: f32,
    ) -> AmbientField {
        let config = Color::parse_hex(color).and_then(|color| {
            let motion = MotionMode::parse(mode, FallTuning { speed, boost })?;
            let config = FieldConfig {
                count: count as usize,
                color,
                motion,
                ..FieldConfig::default()
            };
            config.validate()?;
            Ok(config)
        });
        Self::mount_config(canvas, config_or_default(config))
    }

    /// Stop the loop and remove listeners. Safe to call repeatedly.
    pub fn unmount(&self) {
        if let Ok(mut field) = self.inner.try_borrow_mut() {
            field.unmount();
        }
    }

    /// Re-read the canvas attributes and start over with a fresh particle set.
    pub fn remount(&self) {
        let config = config_or_default(dom::config_from_attributes(&self.canvas));
        let mut rng = rng_for(&config);
        if let Ok(mut field) = self.inner.try_borrow_mut() {
            field.remount(config, &mut rng);
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.try_borrow().map_or(false, |f| f.is_running())
    }

    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> f64 {
        self.inner.try_borrow().map_or(0.0, |f| f.ticks() as f64)
    }
}

impl AmbientField {
    fn mount_config(canvas: web::HtmlCanvasElement, config: FieldConfig) -> AmbientField {
        dom::claim_background(&canvas);
        let inner = WebHost::lifecycle(canvas.clone());
        let mut rng = rng_for(&config);
        let outcome = inner.borrow_mut().mount(config, &mut rng);
        if outcome == MountOutcome::Inert {
            log::warn!("ambient field is inert; nothing will be drawn");
        }
        AmbientField { canvas, inner }
    }
}

fn config_or_default(config: Result<FieldConfig, ambient_core::ConfigError>) -> FieldConfig {
    config.unwrap_or_else(|e| {
        log::warn!("invalid field config ({}); using defaults", e);
        FieldConfig::default()
    })
}

fn rng_for(config: &FieldConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
