// ============================================================================
// USE SCANNER HOOK - Liga una sesión de Quagga al ciclo de vida del componente
// ============================================================================
// Hook nativo de Yew - Delega la lógica al LifecycleController
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::engine::QuaggaFactory;
use crate::services::WasmScheduler;
use crate::state::{LifecycleController, SessionParams, SessionState};

type QuaggaController = LifecycleController<QuaggaFactory, WasmScheduler>;

/// Handle del hook
#[derive(Clone)]
pub struct UseScannerHandle {
    controller: Rc<RefCell<QuaggaController>>,
}

impl UseScannerHandle {
    pub fn state(&self) -> SessionState {
        self.controller.borrow().state()
    }
}

#[hook]
pub fn use_scanner(target: NodeRef, params: SessionParams) -> UseScannerHandle {
    let controller = use_mut_ref(move || {
        LifecycleController::new(QuaggaFactory::new(target), WasmScheduler::default())
    });

    // Montaje + reinicio cuando cambia cualquier parámetro
    {
        let controller = controller.clone();
        use_effect_with(params, move |params| {
            controller.borrow_mut().sync(params.clone());
            || ()
        });
    }

    // Desmontaje: detener Quagga y quitar handlers
    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            move || {
                log::info!("🧹 [SCANNER] Componente desmontado");
                controller.borrow_mut().unmount();
            }
        });
    }

    UseScannerHandle { controller }
}
