// ============================================================================
// SCAN SESSION - Una sesión del motor ligada a un montaje del componente
// ============================================================================
// Idle → Scheduled → Initializing → Running → Stopped
//
// `cancelled` se revisa después de cada punto de espera (defer, sesión
// anterior, initialize, start): un teardown en cualquier momento nunca deja
// handlers registrados ni un motor corriendo.
//
// Quagga es global a la página: una sesión nueva espera a que la anterior
// haya terminado su tarea (`settled`) antes de llamar a init, para que un
// `stop` tardío de la anterior no apague a la nueva.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use yew::Callback;

use crate::config::ScannerConfig;
use crate::engine::{DetectedHandler, ProcessedHandler, VisionEngine};
use crate::error::ScannerError;
use crate::models::{DecodeAttempt, ProcessedFrame};
use crate::overlay::draw_frame;
use crate::services::{LocalFuture, Scheduler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scheduled,
    Initializing,
    Running,
    Stopped,
}

/// Callbacks del llamador. Se comparan por identidad (Rc) para decidir
/// si hay que reiniciar la sesión.
#[derive(Clone, PartialEq)]
pub struct SessionCallbacks {
    pub on_detected: Callback<String>,
    pub on_scanner_ready: Option<Callback<()>>,
    pub on_error: Option<Callback<ScannerError>>,
}

pub struct ScanSession<E: VisionEngine> {
    inner: Rc<SessionInner<E>>,
    settled: oneshot::Receiver<()>,
}

struct SessionInner<E: VisionEngine> {
    engine: E,
    config: ScannerConfig,
    callbacks: SessionCallbacks,
    state: Cell<SessionState>,
    cancelled: Cell<bool>,
    handlers_registered: Cell<bool>,
    // Se consume al programar; si se descarta sin enviar, el receptor
    // también lo toma como terminado
    settle: RefCell<Option<oneshot::Sender<()>>>,
}

impl<E: VisionEngine + 'static> ScanSession<E> {
    pub fn new(engine: E, config: ScannerConfig, callbacks: SessionCallbacks) -> Self {
        let (settle, settled) = oneshot::channel();
        Self {
            inner: Rc::new(SessionInner {
                engine,
                config,
                callbacks,
                state: Cell::new(SessionState::Idle),
                cancelled: Cell::new(false),
                handlers_registered: Cell::new(false),
                settle: RefCell::new(Some(settle)),
            }),
            settled,
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.get()
    }

    /// Programa la inicialización diferida. Solo tiene efecto desde Idle.
    /// Si hay `predecessor`, init no empieza hasta que termine.
    pub fn schedule<S: Scheduler + ?Sized>(
        &self,
        scheduler: &S,
        predecessor: Option<LocalFuture<()>>,
    ) {
        if self.inner.state.get() != SessionState::Idle || self.inner.cancelled.get() {
            return;
        }
        self.inner.state.set(SessionState::Scheduled);

        let inner = Rc::clone(&self.inner);
        let settle = self.inner.settle.borrow_mut().take();
        let defer = scheduler.defer();
        scheduler.spawn(Box::pin(async move {
            inner.run(defer, predecessor).await;
            if let Some(settle) = settle {
                let _ = settle.send(());
            }
        }));
    }

    /// Detiene el motor y quita los handlers. Idempotente; en Idle/Scheduled
    /// no toca el motor, y con init/start pendientes deja el `stop` a la
    /// tarea en curso.
    pub fn teardown(&self) {
        self.inner.teardown();
    }

    /// Se resuelve cuando la tarea de la sesión ya no va a tocar el motor
    pub fn into_settled(self) -> LocalFuture<()> {
        let settled = self.settled;
        Box::pin(async move {
            let _ = settled.await;
        })
    }
}

impl<E: VisionEngine + 'static> SessionInner<E> {
    async fn run(
        self: Rc<Self>,
        defer: LocalFuture<()>,
        predecessor: Option<LocalFuture<()>>,
    ) {
        defer.await;
        if let Some(predecessor) = predecessor {
            predecessor.await;
        }
        if self.cancelled.get() {
            log::debug!("🛑 [SCANNER] Desmontado antes de inicializar, no se toca Quagga");
            self.state.set(SessionState::Stopped);
            return;
        }

        self.state.set(SessionState::Initializing);
        log::info!("📷 [SCANNER] Inicializando Quagga...");

        let initialized = self.engine.initialize(&self.config).await;
        if self.cancelled.get() {
            // El teardown llegó durante el init: liberar la cámara que pudo abrirse
            log::debug!("🛑 [SCANNER] Desmontado durante la inicialización");
            self.engine.stop();
            return;
        }
        if let Err(e) = initialized {
            self.fail(e);
            return;
        }

        if !self.engine.is_target_mounted() {
            log::warn!("⚠️ [SCANNER] El elemento destino ya no está en el DOM");
            self.engine.stop();
            self.state.set(SessionState::Stopped);
            return;
        }

        self.register_handlers();

        // Sigue en Initializing hasta que start resuelva
        let started = self.engine.start().await;
        if self.cancelled.get() {
            log::debug!("🛑 [SCANNER] Desmontado durante el arranque");
            self.unregister_handlers();
            self.engine.stop();
            return;
        }
        if let Err(e) = started {
            self.unregister_handlers();
            self.engine.stop();
            self.fail(e);
            return;
        }

        self.state.set(SessionState::Running);
        log::info!("✅ [SCANNER] Quagga listo");
        if let Some(on_ready) = &self.callbacks.on_scanner_ready {
            on_ready.emit(());
        }
    }

    fn register_handlers(self: &Rc<Self>) {
        let overlay = self.engine.overlay();
        let weak = Rc::downgrade(self);
        let processed: ProcessedHandler = Rc::new(move |frame: ProcessedFrame| {
            let Some(session) = weak.upgrade() else {
                return;
            };
            if session.cancelled.get() {
                return;
            }
            if let Some(surface) = &overlay {
                draw_frame(surface, &frame);
            }
        });

        let weak = Rc::downgrade(self);
        let detected: DetectedHandler = Rc::new(move |attempt: DecodeAttempt| {
            if let Some(session) = weak.upgrade() {
                session.handle_detected(attempt);
            }
        });

        self.engine.on_processed(processed);
        self.engine.on_detected(detected);
        self.handlers_registered.set(true);
    }

    fn unregister_handlers(&self) {
        if self.handlers_registered.replace(false) {
            self.engine.off_detected();
            self.engine.off_processed();
        }
    }

    fn handle_detected(&self, attempt: DecodeAttempt) {
        if self.cancelled.get() {
            return;
        }

        if self
            .config
            .filter
            .accept(&attempt.errors, attempt.code_length())
        {
            log::info!("📱 [SCANNER] Código detectado: {} ({})", attempt.code, attempt.format);
            self.callbacks.on_detected.emit(attempt.code);
        } else {
            log::debug!("🔎 [SCANNER] Lectura descartada por el filtro: {}", attempt.code);
        }
    }

    fn fail(&self, error: ScannerError) {
        log::error!("❌ [SCANNER] {}", error);
        self.state.set(SessionState::Stopped);
        if let Some(on_error) = &self.callbacks.on_error {
            on_error.emit(error);
        }
    }

    fn teardown(&self) {
        if self.cancelled.replace(true) {
            return;
        }

        match self.state.replace(SessionState::Stopped) {
            SessionState::Running => {
                log::info!("🛑 [SCANNER] Deteniendo Quagga");
                self.engine.stop();
                self.unregister_handlers();
            }
            // init o start pendientes: `run` hace el único stop al reanudar
            SessionState::Initializing => {
                log::debug!("🛑 [SCANNER] Cancelando arranque en curso");
            }
            SessionState::Idle | SessionState::Scheduled | SessionState::Stopped => {}
        }
    }
}
