// ============================================================================
// SCANNER COMPONENT
// ============================================================================
// No renderiza nada propio: Quagga inserta <video> y el canvas de overlay
// dentro del elemento referenciado por `scanner_ref`.
// ============================================================================

use yew::prelude::*;

use crate::config::{Constraints, DecoderKind, FacingMode, LocatorSettings, ScannerConfig, CONFIG};
use crate::error::ScannerError;
use crate::filter::DecodeFilter;
use crate::hooks::use_scanner;
use crate::state::{SessionCallbacks, SessionParams};

#[derive(Properties, PartialEq)]
pub struct ScannerProps {
    /// Contenedor donde Quagga monta la cámara
    pub scanner_ref: NodeRef,
    /// Recibe solo el texto del código, y solo si pasó el filtro
    pub on_detected: Callback<String>,
    #[prop_or_default]
    pub on_scanner_ready: Option<Callback<()>>,
    #[prop_or_default]
    pub on_error: Option<Callback<ScannerError>>,
    #[prop_or_default]
    pub camera_id: Option<String>,
    #[prop_or(CONFIG.facing_mode)]
    pub facing_mode: FacingMode,
    #[prop_or_default]
    pub constraints: Constraints,
    #[prop_or_default]
    pub locator: LocatorSettings,
    #[prop_or_else(default_decoders)]
    pub decoders: Vec<DecoderKind>,
    #[prop_or(true)]
    pub locate: bool,
    #[prop_or(CONFIG.filter)]
    pub filter: DecodeFilter,
}

fn default_decoders() -> Vec<DecoderKind> {
    vec![DecoderKind::Ean]
}

impl ScannerProps {
    fn session_params(&self) -> SessionParams {
        SessionParams {
            config: ScannerConfig {
                camera_id: self.camera_id.clone(),
                facing_mode: self.facing_mode,
                constraints: self.constraints,
                locator: self.locator.clone(),
                decoders: self.decoders.clone(),
                locate: self.locate,
                filter: self.filter,
            },
            callbacks: SessionCallbacks {
                on_detected: self.on_detected.clone(),
                on_scanner_ready: self.on_scanner_ready.clone(),
                on_error: self.on_error.clone(),
            },
        }
    }
}

#[function_component(Scanner)]
pub fn scanner(props: &ScannerProps) -> Html {
    use_scanner(props.scanner_ref.clone(), props.session_params());

    html! {}
}
