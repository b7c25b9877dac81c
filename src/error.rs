// ============================================================================
// ERRORES DEL SCANNER
// ============================================================================
// Nunca se lanzan hacia el árbol de UI: se loguean y se reportan por on_error
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScannerError {
    /// Quagga rechazó la configuración o no pudo abrir la cámara
    #[error("error inicializando Quagga: {0}")]
    Initialization(String),

    #[error("error arrancando Quagga: {0}")]
    Start(String),

    /// El elemento destino no existe o ya no está en el DOM
    #[error("elemento destino no disponible")]
    TargetUnavailable,

    #[error("resultado de Quagga mal formado: {0}")]
    MalformedResult(String),

    #[error("configuración inválida: {0}")]
    Config(String),
}

impl ScannerError {
    /// Convierte un error JS en texto legible (los JsValue no son Send ni Clone-friendly)
    pub fn describe_js(value: &JsValue) -> String {
        value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value))
    }
}
