// ============================================================================
// LIFECYCLE CONTROLLER - Una sesión activa por componente montado
// ============================================================================
// Cualquier cambio en los parámetros (config o identidad de callbacks)
// detiene completamente la sesión anterior antes de programar la nueva.
// La nueva además espera a que la tarea de la anterior termine: con init
// pendiente, el stop de la anterior llega tarde y Quagga es uno solo.
// ============================================================================

use crate::config::ScannerConfig;
use crate::engine::EngineFactory;
use crate::services::{LocalFuture, Scheduler};
use crate::state::scan_session::{ScanSession, SessionCallbacks, SessionState};

/// Todo lo que el llamador controla; si cambia, se reinicia
#[derive(Clone, PartialEq)]
pub struct SessionParams {
    pub config: ScannerConfig,
    pub callbacks: SessionCallbacks,
}

pub struct LifecycleController<F, S>
where
    F: EngineFactory,
    S: Scheduler,
{
    factory: F,
    scheduler: S,
    current: Option<(SessionParams, ScanSession<F::Engine>)>,
    // Fin de la última sesión detenida, para encadenar la siguiente
    settling: Option<LocalFuture<()>>,
    torn_down: bool,
}

impl<F, S> LifecycleController<F, S>
where
    F: EngineFactory,
    S: Scheduler,
{
    pub fn new(factory: F, scheduler: S) -> Self {
        Self {
            factory,
            scheduler,
            current: None,
            settling: None,
            torn_down: false,
        }
    }

    /// Idle si nunca hubo sesión; Stopped después de un teardown
    pub fn state(&self) -> SessionState {
        match &self.current {
            Some((_, session)) => session.state(),
            None if self.torn_down => SessionState::Stopped,
            None => SessionState::Idle,
        }
    }

    /// Montaje o cambio de parámetros: no-op si nada cambió
    pub fn sync(&mut self, params: SessionParams) {
        if let Some((current, _)) = &self.current {
            if *current == params {
                return;
            }
            log::info!("🔄 [SCANNER] Parámetros cambiados, reiniciando sesión");
        }

        self.stop_current();

        match self.factory.create() {
            Ok(engine) => {
                let session =
                    ScanSession::new(engine, params.config.clone(), params.callbacks.clone());
                session.schedule(&self.scheduler, self.settling.take());
                self.current = Some((params, session));
                self.torn_down = false;
            }
            Err(e) => {
                log::error!("❌ [SCANNER] No se pudo crear la sesión: {}", e);
                if let Some(on_error) = &params.callbacks.on_error {
                    on_error.emit(e);
                }
            }
        }
    }

    pub fn unmount(&mut self) {
        self.stop_current();
    }

    fn stop_current(&mut self) {
        if let Some((_, session)) = self.current.take() {
            session.teardown();
            self.settling = Some(session.into_settled());
            self.torn_down = true;
        }
    }
}

impl<F, S> Drop for LifecycleController<F, S>
where
    F: EngineFactory,
    S: Scheduler,
{
    fn drop(&mut self) {
        self.stop_current();
    }
}
