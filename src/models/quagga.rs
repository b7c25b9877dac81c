// ============================================================================
// RESULTADO CRUDO DE QUAGGA - Forma del objeto JS que llega a los handlers
// ============================================================================
// Solo se declaran los campos que usamos; el resto se ignora al deserializar.
// ============================================================================

use serde::Deserialize;

use crate::error::ScannerError;
use crate::models::decode::{DecodeAttempt, ProcessedFrame, Region};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuaggaResult {
    #[serde(default)]
    pub code_result: Option<CodeResult>,
    #[serde(default)]
    pub boxes: Option<Vec<Region>>,
    #[serde(default, rename = "box")]
    pub best_box: Option<Region>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeResult {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub decoded_codes: Vec<DecodedCode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecodedCode {
    /// Las entradas de guarda (start/stop) no traen error
    #[serde(default)]
    pub error: Option<f64>,
}

impl QuaggaResult {
    /// Convierte un evento "detected" en lectura candidata
    pub fn into_attempt(self) -> Result<DecodeAttempt, ScannerError> {
        let code_result = self
            .code_result
            .ok_or_else(|| ScannerError::MalformedResult("falta codeResult".to_string()))?;

        let code = code_result
            .code
            .ok_or_else(|| ScannerError::MalformedResult("falta codeResult.code".to_string()))?;

        let errors: Vec<f64> = code_result
            .decoded_codes
            .iter()
            .filter_map(|c| c.error)
            .collect();

        if errors.is_empty() {
            return Err(ScannerError::MalformedResult(format!(
                "'{}' sin errores por carácter",
                code
            )));
        }

        Ok(DecodeAttempt {
            code,
            format: code_result.format.unwrap_or_default(),
            errors,
        })
    }

    /// Convierte un evento "processed" en datos de overlay
    pub fn into_frame(self) -> ProcessedFrame {
        ProcessedFrame {
            boxes: self
                .boxes
                .unwrap_or_default()
                .into_iter()
                .filter(|region| !region.is_empty())
                .collect(),
            best: self.best_box.filter(|region| !region.is_empty()),
            code: self
                .code_result
                .and_then(|c| c.code)
                .filter(|code| !code.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> QuaggaResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn detected_payload_becomes_attempt() {
        let result = parse(
            r#"{
                "codeResult": {
                    "code": "4006381333931",
                    "format": "ean_13",
                    "decodedCodes": [
                        {"code": 1, "start": 0, "end": 10},
                        {"error": 0.12, "code": 4},
                        {"error": 0.08, "code": 0},
                        {"error": 0.2, "code": 0}
                    ]
                },
                "line": [{"x": 0, "y": 0}, {"x": 10, "y": 0}],
                "angle": 0.1
            }"#,
        );

        let attempt = result.into_attempt().unwrap();
        assert_eq!(attempt.code, "4006381333931");
        assert_eq!(attempt.format, "ean_13");
        assert_eq!(attempt.errors, vec![0.12, 0.08, 0.2]);
    }

    #[test]
    fn detected_without_errors_is_malformed() {
        let result = parse(r#"{"codeResult": {"code": "123", "decodedCodes": []}}"#);
        assert!(matches!(
            result.into_attempt(),
            Err(ScannerError::MalformedResult(_))
        ));
    }

    #[test]
    fn detected_without_code_result_is_malformed() {
        assert!(parse("{}").into_attempt().is_err());
        assert!(parse(r#"{"codeResult": {}}"#).into_attempt().is_err());
    }

    #[test]
    fn processed_payload_becomes_frame() {
        let result = parse(
            r#"{
                "boxes": [
                    [[0, 0], [10, 0], [10, 10], [0, 10]],
                    [[20, 20], [30, 20], [30, 30], [20, 30]],
                    []
                ],
                "box": [[20, 20], [30, 20], [30, 30], [20, 30]],
                "codeResult": {"code": "4006381333931"}
            }"#,
        );

        let frame = result.into_frame();
        assert_eq!(frame.boxes.len(), 2);
        assert_eq!(frame.best.as_ref().map(|r| r.points().len()), Some(4));
        assert_eq!(frame.candidates().count(), 1);
        assert_eq!(frame.code.as_deref(), Some("4006381333931"));
    }

    #[test]
    fn empty_processed_payload_is_blank_frame() {
        let frame = parse("{}").into_frame();
        assert_eq!(frame, ProcessedFrame::default());
    }
}
