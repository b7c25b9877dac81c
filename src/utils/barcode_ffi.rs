// ============================================================================
// BARCODE SCANNER FFI - Foreign Function Interface para QuaggaJS
// ============================================================================
// Bindings directos al global `Quagga` (quagga2 cargado via <script>) -
// Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    pub type Quagga;

    /// Sin callback quagga2 devuelve una Promise que rechaza con el error
    #[wasm_bindgen(static_method_of = Quagga, catch)]
    pub fn init(config: &JsValue) -> Result<js_sys::Promise, JsValue>;

    /// Devuelve Promise en quagga2 reciente, undefined en versiones antiguas
    #[wasm_bindgen(static_method_of = Quagga, catch)]
    pub fn start() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(static_method_of = Quagga, catch)]
    pub fn stop() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(static_method_of = Quagga, js_name = onDetected)]
    pub fn on_detected(handler: &js_sys::Function);

    #[wasm_bindgen(static_method_of = Quagga, js_name = offDetected)]
    pub fn off_detected(handler: &js_sys::Function);

    #[wasm_bindgen(static_method_of = Quagga, js_name = onProcessed)]
    pub fn on_processed(handler: &js_sys::Function);

    #[wasm_bindgen(static_method_of = Quagga, js_name = offProcessed)]
    pub fn off_processed(handler: &js_sys::Function);

    /// `Quagga.canvas` = { ctx: { image, overlay }, dom: { image, overlay } }
    #[wasm_bindgen(static_method_of = Quagga, getter)]
    pub fn canvas() -> JsValue;
}
