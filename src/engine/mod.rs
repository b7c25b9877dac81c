// ============================================================================
// ENGINE - Capacidad del motor de visión externo
// ============================================================================
// El controlador solo habla con este trait. QuaggaEngine es la implementación
// real; los tests usan un motor falso.
// ============================================================================

pub mod quagga;

use std::rc::Rc;

use crate::config::ScannerConfig;
use crate::error::ScannerError;
use crate::models::{DecodeAttempt, ProcessedFrame};
use crate::overlay::OverlaySurface;

pub use quagga::{QuaggaEngine, QuaggaFactory};

pub type DetectedHandler = Rc<dyn Fn(DecodeAttempt)>;
pub type ProcessedHandler = Rc<dyn Fn(ProcessedFrame)>;

/// Una sesión del motor ligada a un elemento destino.
///
/// `stop` y los `off_*` deben ser idempotentes: el controlador los llama
/// aunque el motor nunca haya arrancado.
#[allow(async_fn_in_trait)]
pub trait VisionEngine {
    type Overlay: OverlaySurface + 'static;

    async fn initialize(&self, config: &ScannerConfig) -> Result<(), ScannerError>;
    async fn start(&self) -> Result<(), ScannerError>;
    fn stop(&self);

    fn on_detected(&self, handler: DetectedHandler);
    fn off_detected(&self);
    fn on_processed(&self, handler: ProcessedHandler);
    fn off_processed(&self);

    /// El elemento destino sigue en el DOM
    fn is_target_mounted(&self) -> bool;

    /// Superficie de debug, disponible después de `initialize`
    fn overlay(&self) -> Option<Self::Overlay>;
}

/// Crea una sesión de motor nueva por cada arranque
pub trait EngineFactory {
    type Engine: VisionEngine + 'static;

    fn create(&self) -> Result<Self::Engine, ScannerError>;
}
