// DOM-facing constants for the background canvas.

// Canvas mounted automatically at startup, if present.
pub const DEFAULT_CANVAS_ID: &str = "ambient-field";

// Configuration is read from `data-<key>` attributes on the canvas.
pub const CONFIG_ATTR_PREFIX: &str = "data-";

// Full-viewport, behind content, never hit-tested.
pub const BACKGROUND_STYLE: &str =
    "position:fixed;inset:0;width:100%;height:100%;pointer-events:none;z-index:-40";

// Host event names
pub const RESIZE_EVENT: &str = "resize";
pub const SCROLL_EVENT: &str = "scroll";

#[inline]
pub fn config_attr(key: &str) -> String {
    format!("{CONFIG_ATTR_PREFIX}{key}")
}
