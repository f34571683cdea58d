// Console logging helpers shared by the views. Native test builds have no
// console binding and write to stderr instead.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    eprintln!("{}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    eprintln!("warning: {}", msg);
}

/// Formats a CSS hex colour (`#rrggbb`) from a packed `0xRRGGBB` value.
pub fn css_hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0x00ff_ffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_hex_pads_and_masks() {
        assert_eq!(css_hex(0xff0000), "#ff0000");
        assert_eq!(css_hex(0x00ff00), "#00ff00");
        assert_eq!(css_hex(0x0000ff), "#0000ff");
        assert_eq!(css_hex(0xabff_ffff), "#ffffff");
    }
}
