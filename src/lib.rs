// ============================================================================
// QUAGGA SCANNER - Componente Yew sobre QuaggaJS (RUST PURO)
// ============================================================================
// - Components: Scanner (monta Quagga), ResultItem, App de demo
// - Hooks: use_scanner liga la sesión al ciclo de vida del componente
// - State: ScanSession + LifecycleController (una sesión por montaje)
// - Engine: trait VisionEngine + implementación sobre el global Quagga
// - Filter: filtro estadístico de lecturas (mediana de errores)
// ============================================================================

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod hooks;
pub mod models;
pub mod overlay;
pub mod services;
pub mod state;
mod utils;

pub use components::{ResultItem, Scanner, ScannerProps};
pub use config::{Constraints, DecoderKind, FacingMode, LocatorSettings, PatchSize, ScannerConfig};
pub use error::ScannerError;
pub use filter::{accept, median, DecodeFilter};
pub use models::{DecodeAttempt, ProcessedFrame, ScanResult};
