use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while acquiring or wiring a canvas render surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("canvas ref not attached to a canvas element")]
    CanvasDetached,
    #[error("2d rendering context unavailable")]
    NoContext,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        SurfaceError::Js(msg)
    }
}
