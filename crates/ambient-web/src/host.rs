//! Browser host: requestAnimationFrame scheduling plus window `resize` and
//! `scroll` listeners, all routed back into the owning lifecycle.
//!
//! The closures only hold a `Weak` to the lifecycle, so dropping the handle
//! frees everything; the lifecycle's teardown cancels the pending frame and
//! removes both listeners before that happens.

use crate::constants::{RESIZE_EVENT, SCROLL_EVENT};
use crate::dom;
use crate::surface::Canvas2dSurface;
use ambient_core::{Host, HostEvent, Lifecycle, Viewport};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedField = Rc<RefCell<Lifecycle<WebHost>>>;

pub struct WebHost {
    canvas: web::HtmlCanvasElement,
    tick: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
    on_scroll: Closure<dyn FnMut()>,
    listening: bool,
}

impl WebHost {
    fn new(canvas: web::HtmlCanvasElement, field: Weak<RefCell<Lifecycle<WebHost>>>) -> Self {
        let weak_tick = field.clone();
        let tick = Closure::wrap(Box::new(move || {
            if let Some(f) = weak_tick.upgrade() {
                if let Ok(mut f) = f.try_borrow_mut() {
                    f.frame();
                }
            }
        }) as Box<dyn FnMut()>);

        let weak_resize = field.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            with_field(&weak_resize, |f| {
                let vp = f.host().viewport();
                f.on_event(HostEvent::Resize(vp));
            });
        }) as Box<dyn FnMut()>);

        let weak_scroll = field;
        let on_scroll = Closure::wrap(Box::new(move || {
            with_field(&weak_scroll, |f| {
                let offset = f.host().scroll_offset();
                f.on_event(HostEvent::Scroll(offset));
            });
        }) as Box<dyn FnMut()>);

        Self {
            canvas,
            tick,
            on_resize,
            on_scroll,
            listening: false,
        }
    }

    /// Create a lifecycle whose host calls back into it.
    pub fn lifecycle(canvas: web::HtmlCanvasElement) -> SharedField {
        Rc::new_cyclic(|weak| RefCell::new(Lifecycle::new(WebHost::new(canvas, weak.clone()))))
    }
}

fn with_field(weak: &Weak<RefCell<Lifecycle<WebHost>>>, f: impl FnOnce(&mut Lifecycle<WebHost>)) {
    let Some(field) = weak.upgrade() else {
        return;
    };
    // Events never arrive mid-tick; a failed borrow means teardown is underway.
    if let Ok(mut field) = field.try_borrow_mut() {
        f(&mut field);
    }
}

impl Host for WebHost {
    type Surface = Canvas2dSurface;
    type FrameHandle = i32;

    fn acquire_surface(&mut self) -> Option<Canvas2dSurface> {
        Canvas2dSurface::acquire(&self.canvas)
    }

    fn viewport(&self) -> Viewport {
        dom::read_viewport(&self.canvas)
    }

    fn scroll_offset(&self) -> f64 {
        dom::scroll_offset()
    }

    fn request_frame(&mut self) -> Option<i32> {
        let window = web::window()?;
        window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = web::window() {
            let _ = window.cancel_animation_frame(handle);
        }
    }

    fn attach_listeners(&mut self) -> bool {
        let Some(window) = web::window() else {
            return false;
        };
        let resize_ok = window
            .add_event_listener_with_callback(RESIZE_EVENT, self.on_resize.as_ref().unchecked_ref())
            .is_ok();
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        let scroll_ok = window
            .add_event_listener_with_callback_and_add_event_listener_options(
                SCROLL_EVENT,
                self.on_scroll.as_ref().unchecked_ref(),
                &opts,
            )
            .is_ok();
        self.listening = resize_ok || scroll_ok;
        if !(resize_ok && scroll_ok) {
            log::warn!("[host] listener registration incomplete (resize={resize_ok}, scroll={scroll_ok})");
        }
        self.listening
    }

    fn detach_listeners(&mut self) {
        if !self.listening {
            return;
        }
        self.listening = false;
        if let Some(window) = web::window() {
            // removing a listener that was never added is a no-op in the DOM
            let _ = window.remove_event_listener_with_callback(
                RESIZE_EVENT,
                self.on_resize.as_ref().unchecked_ref(),
            );
            let _ = window.remove_event_listener_with_callback(
                SCROLL_EVENT,
                self.on_scroll.as_ref().unchecked_ref(),
            );
        }
    }
}
