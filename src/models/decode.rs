// ============================================================================
// MODELOS DE DECODIFICACIÓN - Lo que Quagga reporta por frame / por lectura
// ============================================================================

use serde::{Deserialize, Serialize};

/// Polígono en coordenadas de canvas, puntos `[x, y]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(pub Vec<[f64; 2]>);

impl Region {
    pub fn points(&self) -> &[[f64; 2]] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Una lectura candidata ("detected"). Efímera: la consume el filtro y se descarta.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeAttempt {
    pub code: String,
    pub format: String,
    /// Error por carácter, en el orden en que Quagga los reporta
    pub errors: Vec<f64>,
}

impl DecodeAttempt {
    /// Longitud en caracteres (no en bytes)
    pub fn code_length(&self) -> usize {
        self.code.chars().count()
    }
}

/// Análisis de un frame ("processed"). Solo alimenta el overlay de debug.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedFrame {
    pub boxes: Vec<Region>,
    pub best: Option<Region>,
    pub code: Option<String>,
}

impl ProcessedFrame {
    /// Candidatos distintos del mejor match
    pub fn candidates(&self) -> impl Iterator<Item = &Region> {
        self.boxes
            .iter()
            .filter(move |region| self.best.as_ref() != Some(*region))
    }
}

/// Par código/formato que muestra la lista de resultados
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub code: Option<String>,
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f64) -> Region {
        Region(vec![
            [offset, offset],
            [offset + 10.0, offset],
            [offset + 10.0, offset + 10.0],
            [offset, offset + 10.0],
        ])
    }

    #[test]
    fn candidates_skip_best_match() {
        let frame = ProcessedFrame {
            boxes: vec![square(0.0), square(20.0), square(40.0)],
            best: Some(square(20.0)),
            code: None,
        };
        let candidates: Vec<_> = frame.candidates().collect();
        assert_eq!(candidates, vec![&square(0.0), &square(40.0)]);
    }

    #[test]
    fn candidates_without_best_returns_all() {
        let frame = ProcessedFrame {
            boxes: vec![square(0.0), square(5.0)],
            ..ProcessedFrame::default()
        };
        assert_eq!(frame.candidates().count(), 2);
    }

    #[test]
    fn code_length_counts_chars() {
        let attempt = DecodeAttempt {
            code: "ñ12".to_string(),
            format: "code_128".to_string(),
            errors: vec![],
        };
        assert_eq!(attempt.code_length(), 3);
    }
}
