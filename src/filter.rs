// ============================================================================
// DECODE FILTER - Filtro estadístico de lecturas de Quagga
// ============================================================================
// Quagga reporta muchos falsos positivos: solo dejamos pasar lecturas cuya
// mediana de errores por carácter sea baja y cuya longitud sea la esperada.
// ============================================================================

/// Umbral de mediana de error (menor es mejor)
pub const DEFAULT_MAX_MEDIAN_ERROR: f64 = 0.25;

/// Longitud de un EAN-13
pub const DEFAULT_CODE_LENGTH: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeFilter {
    /// Se acepta solo si la mediana es estrictamente menor
    pub max_median_error: f64,
    /// `None` desactiva el chequeo de longitud
    pub expected_length: Option<usize>,
}

impl Default for DecodeFilter {
    fn default() -> Self {
        Self {
            max_median_error: DEFAULT_MAX_MEDIAN_ERROR,
            expected_length: Some(DEFAULT_CODE_LENGTH),
        }
    }
}

impl DecodeFilter {
    pub fn accept(&self, errors: &[f64], code_length: usize) -> bool {
        if let Some(expected) = self.expected_length {
            if code_length != expected {
                return false;
            }
        }

        match median(errors) {
            Some(m) => m < self.max_median_error,
            None => false,
        }
    }
}

/// Mediana de una secuencia. `None` si está vacía.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let half = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[half])
    } else {
        Some((sorted[half - 1] + sorted[half]) / 2.0)
    }
}

/// Filtro con los valores fijos del componente original (0.25 / 13)
pub fn accept(errors: &[f64], code_length: usize) -> bool {
    DecodeFilter::default().accept(errors, code_length)
}
