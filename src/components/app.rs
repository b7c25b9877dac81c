// ============================================================================
// APP - Demo: scanner + lista de resultados
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use super::{ResultItem, Scanner};
use crate::config::DecoderKind;
use crate::error::ScannerError;
use crate::models::ScanResult;

const DEMO_DECODER: DecoderKind = DecoderKind::Ean;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ScanStatus {
    #[default]
    Idle,
    Starting,
    Ready,
    Failed(String),
}

impl ScanStatus {
    pub fn label(&self) -> String {
        match self {
            ScanStatus::Idle => "Cámara apagada".to_string(),
            ScanStatus::Starting => "Iniciando cámara...".to_string(),
            ScanStatus::Ready => "Apunta a un código de barras".to_string(),
            ScanStatus::Failed(message) => format!("Error: {}", message),
        }
    }
}

/// Estado de la demo, más reciente primero
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanLog {
    pub results: Vec<ScanResult>,
    pub status: ScanStatus,
}

pub enum ScanAction {
    Started,
    Stopped,
    Ready,
    Failed(String),
    Detected(ScanResult),
}

impl Reducible for ScanLog {
    type Action = ScanAction;

    fn reduce(self: Rc<Self>, action: ScanAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ScanAction::Started => next.status = ScanStatus::Starting,
            ScanAction::Stopped => next.status = ScanStatus::Idle,
            ScanAction::Ready => next.status = ScanStatus::Ready,
            ScanAction::Failed(message) => next.status = ScanStatus::Failed(message),
            ScanAction::Detected(result) => {
                // Quagga repite la misma lectura varios frames seguidos
                if next.results.first() == Some(&result) {
                    return self;
                }
                next.results.insert(0, result);
            }
        }
        Rc::new(next)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let scanning = use_state(|| false);
    let scan_log = use_reducer(ScanLog::default);
    let scanner_ref = use_node_ref();

    // Callbacks memorizados: una identidad nueva reiniciaría Quagga en cada render
    let on_detected = use_callback(scan_log.dispatcher(), |code: String, dispatcher| {
        dispatcher.dispatch(ScanAction::Detected(ScanResult {
            code: Some(code),
            format: Some(DEMO_DECODER.format_name().to_string()),
        }));
    });
    let on_ready = use_callback(scan_log.dispatcher(), |_: (), dispatcher| {
        dispatcher.dispatch(ScanAction::Ready);
    });
    let on_error = use_callback(scan_log.dispatcher(), |error: ScannerError, dispatcher| {
        dispatcher.dispatch(ScanAction::Failed(error.to_string()));
    });

    let toggle = {
        let scanning = scanning.clone();
        let dispatcher = scan_log.dispatcher();
        Callback::from(move |_: MouseEvent| {
            let next = !*scanning;
            dispatcher.dispatch(if next {
                ScanAction::Started
            } else {
                ScanAction::Stopped
            });
            scanning.set(next);
        })
    };

    html! {
        <div class="scanner-app">
            <div class="scanner-header">
                <h2>{"Escanear Código de Barras"}</h2>
                <button class="btn-scan" onclick={toggle}>
                    { if *scanning { "Detener" } else { "Escanear" } }
                </button>
            </div>

            <p class="scanner-status">{ scan_log.status.label() }</p>

            <ul class="results">
                { for scan_log.results.iter().map(|result| html! {
                    <ResultItem result={result.clone()} />
                }) }
            </ul>

            <div ref={scanner_ref.clone()} id="scanner-viewport" class="scanner-viewport">
                <canvas class="drawingBuffer" width="640" height="300" />
                {
                    if *scanning {
                        html! {
                            <Scanner
                                scanner_ref={scanner_ref.clone()}
                                on_detected={on_detected}
                                on_scanner_ready={Some(on_ready)}
                                on_error={Some(on_error)}
                                decoders={vec![DEMO_DECODER]}
                            />
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(code: &str) -> ScanResult {
        ScanResult {
            code: Some(code.to_string()),
            format: Some("ean_13".to_string()),
        }
    }

    #[test]
    fn detections_are_newest_first_without_repeats() {
        let log = Rc::new(ScanLog::default());
        let log = log.reduce(ScanAction::Detected(result("4006381333931")));
        let log = log.reduce(ScanAction::Detected(result("4006381333931")));
        let log = log.reduce(ScanAction::Detected(result("5901234123457")));
        let log = log.reduce(ScanAction::Detected(result("4006381333931")));

        let codes: Vec<_> = log
            .results
            .iter()
            .filter_map(|r| r.code.as_deref())
            .collect();
        assert_eq!(codes, vec!["4006381333931", "5901234123457", "4006381333931"]);
    }

    #[test]
    fn status_follows_lifecycle() {
        let log = Rc::new(ScanLog::default());
        assert_eq!(log.status, ScanStatus::Idle);

        let log = log.reduce(ScanAction::Started);
        assert_eq!(log.status, ScanStatus::Starting);

        let log = log.reduce(ScanAction::Ready);
        assert_eq!(log.status, ScanStatus::Ready);

        let log = log.reduce(ScanAction::Failed("NotAllowedError".to_string()));
        assert_eq!(log.status.label(), "Error: NotAllowedError");

        let log = log.reduce(ScanAction::Stopped);
        assert_eq!(log.status, ScanStatus::Idle);
    }
}
