// ============================================================================
// STATE MODULE - Sesión de escaneo + controlador de ciclo de vida
// ============================================================================

pub mod scan_session;
pub mod lifecycle;

pub use scan_session::*;
pub use lifecycle::*;
