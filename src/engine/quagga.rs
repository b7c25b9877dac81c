// ============================================================================
// QUAGGA ENGINE - VisionEngine sobre el global `Quagga`
// ============================================================================
// ⚠️ quagga2 es un singleton a nivel de página: dos scanners montados a la vez
// comparten el mismo motor aunque cada uno tenga su propio QuaggaEngine.
// ============================================================================

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};
use yew::NodeRef;

use crate::config::{CameraSelection, DecoderKind, FacingMode, LocatorSettings, ScannerConfig};
use crate::engine::{DetectedHandler, EngineFactory, ProcessedHandler, VisionEngine};
use crate::error::ScannerError;
use crate::models::QuaggaResult;
use crate::overlay::CanvasOverlay;
use crate::utils::barcode_ffi::Quagga;

/// Configuración tal como la espera `Quagga.init` (sin `target`, que se
/// inyecta como elemento DOM después de serializar)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuaggaConfig<'a> {
    input_stream: InputStream<'a>,
    locator: &'a LocatorSettings,
    decoder: DecoderSection<'a>,
    locate: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InputStream<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    constraints: StreamConstraints<'a>,
    will_read_frequently: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamConstraints<'a> {
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facing_mode: Option<FacingMode>,
}

#[derive(Debug, Serialize)]
struct DecoderSection<'a> {
    readers: &'a [DecoderKind],
}

impl<'a> From<&'a ScannerConfig> for QuaggaConfig<'a> {
    fn from(config: &'a ScannerConfig) -> Self {
        let (device_id, facing_mode) = match config.camera() {
            CameraSelection::Device(id) => (Some(id), None),
            CameraSelection::Facing(mode) => (None, Some(mode)),
        };

        Self {
            input_stream: InputStream {
                kind: "LiveStream",
                constraints: StreamConstraints {
                    width: config.constraints.width,
                    height: config.constraints.height,
                    device_id,
                    facing_mode,
                },
                will_read_frequently: true,
            },
            locator: &config.locator,
            decoder: DecoderSection {
                readers: &config.decoders,
            },
            locate: config.locate,
        }
    }
}

/// Crea sesiones de Quagga ligadas al elemento referenciado por `target`
#[derive(Clone, PartialEq)]
pub struct QuaggaFactory {
    target: NodeRef,
}

impl QuaggaFactory {
    pub fn new(target: NodeRef) -> Self {
        Self { target }
    }
}

impl EngineFactory for QuaggaFactory {
    type Engine = QuaggaEngine;

    fn create(&self) -> Result<QuaggaEngine, ScannerError> {
        let target = self
            .target
            .cast::<Element>()
            .ok_or(ScannerError::TargetUnavailable)?;
        Ok(QuaggaEngine::new(target))
    }
}

pub struct QuaggaEngine {
    target: Element,
    // Funciones JS registradas, necesarias para el off*
    detected: RefCell<Option<js_sys::Function>>,
    processed: RefCell<Option<js_sys::Function>>,
}

impl QuaggaEngine {
    pub fn new(target: Element) -> Self {
        Self {
            target,
            detected: RefCell::new(None),
            processed: RefCell::new(None),
        }
    }

    fn build_config(&self, config: &ScannerConfig) -> Result<JsValue, ScannerError> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_config = QuaggaConfig::from(config)
            .serialize(&serializer)
            .map_err(|e| ScannerError::Config(e.to_string()))?;

        let input_stream = js_sys::Reflect::get(&js_config, &JsValue::from_str("inputStream"))
            .map_err(|e| ScannerError::Config(ScannerError::describe_js(&e)))?;
        js_sys::Reflect::set(&input_stream, &JsValue::from_str("target"), &self.target)
            .map_err(|e| ScannerError::Config(ScannerError::describe_js(&e)))?;

        Ok(js_config)
    }

    /// Envuelve un handler Rust en una función JS. La closure pasa a ser
    /// propiedad de JS: soltarla mientras Quagga la está llamando rompería.
    fn wrap<F>(on_result: F) -> js_sys::Function
    where
        F: Fn(QuaggaResult) + 'static,
    {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
            if raw.is_undefined() || raw.is_null() {
                return;
            }
            match serde_wasm_bindgen::from_value::<QuaggaResult>(raw) {
                Ok(result) => on_result(result),
                Err(e) => log::warn!("⚠️ [SCANNER] Resultado de Quagga ilegible: {}", e),
            }
        });
        closure.into_js_value().unchecked_into()
    }
}

impl VisionEngine for QuaggaEngine {
    type Overlay = CanvasOverlay;

    async fn initialize(&self, config: &ScannerConfig) -> Result<(), ScannerError> {
        config.validate()?;
        let js_config = self.build_config(config)?;

        let promise = Quagga::init(&js_config)
            .map_err(|e| ScannerError::Initialization(ScannerError::describe_js(&e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| ScannerError::Initialization(ScannerError::describe_js(&e)))?;
        Ok(())
    }

    async fn start(&self) -> Result<(), ScannerError> {
        let started =
            Quagga::start().map_err(|e| ScannerError::Start(ScannerError::describe_js(&e)))?;
        JsFuture::from(js_sys::Promise::resolve(&started))
            .await
            .map_err(|e| ScannerError::Start(ScannerError::describe_js(&e)))?;
        Ok(())
    }

    fn stop(&self) {
        if let Err(e) = Quagga::stop() {
            log::warn!("⚠️ [SCANNER] Quagga.stop falló: {}", ScannerError::describe_js(&e));
        }
    }

    fn on_detected(&self, handler: DetectedHandler) {
        self.off_detected();
        let function = Self::wrap(move |result| match result.into_attempt() {
            Ok(attempt) => handler(attempt),
            Err(e) => log::warn!("⚠️ [SCANNER] Lectura descartada: {}", e),
        });
        Quagga::on_detected(&function);
        *self.detected.borrow_mut() = Some(function);
    }

    fn off_detected(&self) {
        if let Some(function) = self.detected.borrow_mut().take() {
            Quagga::off_detected(&function);
        }
    }

    fn on_processed(&self, handler: ProcessedHandler) {
        self.off_processed();
        let function = Self::wrap(move |result| handler(result.into_frame()));
        Quagga::on_processed(&function);
        *self.processed.borrow_mut() = Some(function);
    }

    fn off_processed(&self) {
        if let Some(function) = self.processed.borrow_mut().take() {
            Quagga::off_processed(&function);
        }
    }

    fn is_target_mounted(&self) -> bool {
        self.target.is_connected()
    }

    fn overlay(&self) -> Option<CanvasOverlay> {
        let canvas = Quagga::canvas();
        let get = |parent: &JsValue, key: &str| {
            js_sys::Reflect::get(parent, &JsValue::from_str(key))
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
        };

        let ctx = get(&canvas, "ctx")
            .and_then(|ctx| get(&ctx, "overlay"))
            .and_then(|v| v.dyn_into::<CanvasRenderingContext2d>().ok())?;
        let dom = get(&canvas, "dom")
            .and_then(|dom| get(&dom, "overlay"))
            .and_then(|v| v.dyn_into::<HtmlCanvasElement>().ok())?;

        Some(CanvasOverlay::new(dom, ctx))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::{Constraints, PatchSize};

    #[test]
    fn default_config_matches_quagga_shape() {
        let config = ScannerConfig::default();
        let value = serde_json::to_value(QuaggaConfig::from(&config)).unwrap();

        assert_eq!(
            value,
            json!({
                "inputStream": {
                    "type": "LiveStream",
                    "constraints": {
                        "width": config.constraints.width,
                        "height": config.constraints.height,
                        "facingMode": "environment"
                    },
                    "willReadFrequently": true
                },
                "locator": {
                    "patchSize": "medium",
                    "halfSample": true,
                    "willReadFrequently": true
                },
                "decoder": { "readers": ["ean_reader"] },
                "locate": true
            })
        );
    }

    #[test]
    fn device_id_replaces_facing_mode() {
        let config = ScannerConfig {
            camera_id: Some("usb-cam".to_string()),
            constraints: Constraints {
                width: 1280,
                height: 720,
            },
            locator: LocatorSettings {
                patch_size: PatchSize::XLarge,
                half_sample: false,
                will_read_frequently: true,
            },
            decoders: vec![DecoderKind::Code128, DecoderKind::Ean8],
            locate: false,
            ..ScannerConfig::default()
        };
        let value = serde_json::to_value(QuaggaConfig::from(&config)).unwrap();

        assert_eq!(
            value["inputStream"]["constraints"],
            json!({ "width": 1280, "height": 720, "deviceId": "usb-cam" })
        );
        assert_eq!(value["locator"]["patchSize"], "x-large");
        assert_eq!(value["locator"]["halfSample"], false);
        assert_eq!(
            value["decoder"]["readers"],
            json!(["code_128_reader", "ean_8_reader"])
        );
        assert_eq!(value["locate"], false);
    }
}
