// ============================================================================
// SCHEDULER - Spawner + espera diferida para el arranque del scanner
// ============================================================================

use std::future::Future;
use std::pin::Pin;

use gloo_timers::future::TimeoutFuture;

pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Retardo mínimo antes de inicializar: absorbe montajes/desmontajes inmediatos
pub const DEFAULT_DEFER_MS: u32 = 1;

pub trait Scheduler {
    /// Future que se completa después del retardo de arranque
    fn defer(&self) -> LocalFuture<()>;

    /// Lanza una tarea en el mismo hilo (sin Send)
    fn spawn(&self, task: LocalFuture<()>);
}

/// Scheduler del navegador: `spawn_local` + timer de gloo
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WasmScheduler {
    delay_ms: u32,
}

impl WasmScheduler {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl Default for WasmScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEFER_MS)
    }
}

impl Scheduler for WasmScheduler {
    fn defer(&self) -> LocalFuture<()> {
        Box::pin(TimeoutFuture::new(self.delay_ms))
    }

    fn spawn(&self, task: LocalFuture<()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
