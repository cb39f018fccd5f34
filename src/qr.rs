//! Bindings to the QR helpers in qr_helpers.js.
//!
//! Rendering encodes the literal identifier; scanning hands decoded strings
//! to a Rust callback until `stop_scanner` is called.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(module = "/qr_helpers.js")]
extern "C" {
    /// Replaces the content of `element_id` with a QR symbol for `text`.
    #[wasm_bindgen(js_name = renderQr)]
    pub fn render_qr(element_id: &str, text: &str, size: u32);

    #[wasm_bindgen(js_name = startScanner, catch)]
    fn start_scanner_js(element_id: &str, on_decoded: &Closure<dyn FnMut(String)>) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = stopScanner)]
    pub fn stop_scanner(element_id: &str);
}

/// Drops a decode that repeats the previous one. The camera reports the same
/// code on every frame while it stays in view.
#[derive(Debug, Default)]
pub struct DecodeFilter {
    last: Option<String>,
}

impl DecodeFilter {
    pub fn accept(&mut self, text: &str) -> bool {
        if self.last.as_deref() == Some(text) {
            return false;
        }
        self.last = Some(text.to_string());
        true
    }
}

/// Keeps the decode callback alive for as long as the scanner runs.
pub struct Scanner {
    element_id: String,
    _on_decoded: Closure<dyn FnMut(String)>,
}

impl Scanner {
    pub fn start(element_id: &str, on_decoded: impl FnMut(String) + 'static) -> Result<Self, String> {
        let closure = Closure::wrap(Box::new(on_decoded) as Box<dyn FnMut(String)>);
        start_scanner_js(element_id, &closure)
            .map_err(|e| match e.dyn_ref::<js_sys::Error>() {
                Some(err) => String::from(err.message()),
                None => e.as_string().unwrap_or_else(|| "Câmera indisponível".to_string()),
            })?;
        Ok(Self {
            element_id: element_id.to_string(),
            _on_decoded: closure,
        })
    }
}

impl Drop for Scanner {
    fn drop(&mut self) {
        stop_scanner(&self.element_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_frames_pass_once() {
        let mut filter = DecodeFilter::default();
        let accepted: Vec<&str> = ["EK1", "EK1", "EK1", "EK2", "EK2", "EK1"]
            .into_iter()
            .filter(|text| filter.accept(text))
            .collect();
        assert_eq!(accepted, vec!["EK1", "EK2", "EK1"]);
    }
}
