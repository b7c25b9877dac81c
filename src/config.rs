use serde::{Deserialize, Serialize};

use crate::filter::DecodeFilter;

/// Configuración de un scanner montado. Cualquier cambio aquí fuerza
/// un ciclo completo stop → restart de la sesión.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    pub camera_id: Option<String>,
    pub facing_mode: FacingMode,
    pub constraints: Constraints,
    pub locator: LocatorSettings,
    pub decoders: Vec<DecoderKind>,
    pub locate: bool,
    pub filter: DecodeFilter,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            camera_id: None,
            facing_mode: CONFIG.facing_mode,
            constraints: Constraints::default(),
            locator: LocatorSettings::default(),
            decoders: vec![DecoderKind::Ean],
            locate: true,
            filter: CONFIG.filter,
        }
    }
}

impl ScannerConfig {
    /// Selección de cámara: el device id explícito gana sobre el facing mode
    pub fn camera(&self) -> CameraSelection<'_> {
        match self.camera_id.as_deref() {
            Some(id) if !id.is_empty() => CameraSelection::Device(id),
            _ => CameraSelection::Facing(self.facing_mode),
        }
    }

    pub fn validate(&self) -> Result<(), crate::ScannerError> {
        if self.constraints.width == 0 || self.constraints.height == 0 {
            return Err(crate::ScannerError::Config(format!(
                "dimensiones de captura inválidas: {}x{}",
                self.constraints.width, self.constraints.height
            )));
        }
        if self.decoders.is_empty() {
            return Err(crate::ScannerError::Config("lista de decoders vacía".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSelection<'a> {
    Device(&'a str),
    Facing(FacingMode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Cámara frontal
    User,
    /// Cámara trasera
    Environment,
}

impl FacingMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Some(FacingMode::User),
            "environment" => Some(FacingMode::Environment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub width: u32,
    pub height: u32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            width: CONFIG.width,
            height: CONFIG.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorSettings {
    pub patch_size: PatchSize,
    pub half_sample: bool,
    pub will_read_frequently: bool,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            patch_size: PatchSize::Medium,
            half_sample: true,
            will_read_frequently: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchSize {
    #[serde(rename = "x-small")]
    XSmall,
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "large")]
    Large,
    #[serde(rename = "x-large")]
    XLarge,
}

/// Readers soportados por quagga2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecoderKind {
    #[serde(rename = "ean_reader")]
    Ean,
    #[serde(rename = "ean_8_reader")]
    Ean8,
    #[serde(rename = "upc_reader")]
    Upc,
    #[serde(rename = "upc_e_reader")]
    UpcE,
    #[serde(rename = "code_128_reader")]
    Code128,
    #[serde(rename = "code_39_reader")]
    Code39,
    #[serde(rename = "code_39_vin_reader")]
    Code39Vin,
    #[serde(rename = "code_93_reader")]
    Code93,
    #[serde(rename = "codabar_reader")]
    Codabar,
    #[serde(rename = "i2of5_reader")]
    I2of5,
    #[serde(rename = "2of5_reader")]
    TwoOfFive,
}

impl DecoderKind {
    /// Valor de `codeResult.format` que reporta Quagga para este reader
    pub fn format_name(&self) -> &'static str {
        match self {
            DecoderKind::Ean => "ean_13",
            DecoderKind::Ean8 => "ean_8",
            DecoderKind::Upc => "upc_a",
            DecoderKind::UpcE => "upc_e",
            DecoderKind::Code128 => "code_128",
            DecoderKind::Code39 => "code_39",
            DecoderKind::Code39Vin => "code_39_vin",
            DecoderKind::Code93 => "code_93",
            DecoderKind::Codabar => "codabar",
            DecoderKind::I2of5 => "i2of5",
            DecoderKind::TwoOfFive => "2of5",
        }
    }
}

/// Valores por defecto cargados en tiempo de compilación (ver build.rs y .env.example)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScannerDefaults {
    pub width: u32,
    pub height: u32,
    pub facing_mode: FacingMode,
    pub filter: DecodeFilter,
}

impl ScannerDefaults {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("SCANNER_WIDTH"),
            option_env!("SCANNER_HEIGHT"),
            option_env!("SCANNER_FACING_MODE"),
            option_env!("SCANNER_MAX_MEDIAN_ERROR"),
            option_env!("SCANNER_CODE_LENGTH"),
        )
    }

    /// Parseo tolerante: un valor inválido cae al default en lugar de fallar
    fn from_values(
        width: Option<&str>,
        height: Option<&str>,
        facing_mode: Option<&str>,
        max_median_error: Option<&str>,
        code_length: Option<&str>,
    ) -> Self {
        let base = DecodeFilter::default();
        let expected_length = match code_length.map(str::trim) {
            // "0" o "any" desactivan el chequeo de longitud
            Some("0") | Some("any") => None,
            Some(raw) => raw.parse().ok().or(base.expected_length),
            None => base.expected_length,
        };

        Self {
            width: width.and_then(|v| v.trim().parse().ok()).unwrap_or(640),
            height: height.and_then(|v| v.trim().parse().ok()).unwrap_or(300),
            facing_mode: facing_mode
                .and_then(FacingMode::parse)
                .unwrap_or(FacingMode::Environment),
            filter: DecodeFilter {
                max_median_error: max_median_error
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(base.max_median_error),
                expected_length,
            },
        }
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: ScannerDefaults = ScannerDefaults::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env_match_original_component() {
        let defaults = ScannerDefaults::from_values(None, None, None, None, None);
        assert_eq!(defaults.width, 640);
        assert_eq!(defaults.height, 300);
        assert_eq!(defaults.facing_mode, FacingMode::Environment);
        assert_eq!(defaults.filter, DecodeFilter::default());
    }

    #[test]
    fn invalid_env_values_fall_back() {
        let defaults = ScannerDefaults::from_values(
            Some("wide"),
            Some("1080"),
            Some("sideways"),
            Some("low"),
            Some("thirteen"),
        );
        assert_eq!(defaults.width, 640);
        assert_eq!(defaults.height, 1080);
        assert_eq!(defaults.facing_mode, FacingMode::Environment);
        assert_eq!(defaults.filter.max_median_error, 0.25);
        assert_eq!(defaults.filter.expected_length, Some(13));
    }

    #[test]
    fn code_length_zero_disables_length_check() {
        let defaults = ScannerDefaults::from_values(None, None, Some("User"), Some("0.1"), Some("0"));
        assert_eq!(defaults.facing_mode, FacingMode::User);
        assert_eq!(defaults.filter.max_median_error, 0.1);
        assert_eq!(defaults.filter.expected_length, None);
    }

    #[test]
    fn explicit_camera_wins_over_facing_mode() {
        let mut config = ScannerConfig::default();
        assert_eq!(config.camera(), CameraSelection::Facing(config.facing_mode));

        config.camera_id = Some("cam-2".to_string());
        assert_eq!(config.camera(), CameraSelection::Device("cam-2"));

        config.camera_id = Some(String::new());
        assert!(matches!(config.camera(), CameraSelection::Facing(_)));
    }

    #[test]
    fn validate_rejects_empty_decoders_and_zero_size() {
        let mut config = ScannerConfig::default();
        assert!(config.validate().is_ok());

        config.decoders.clear();
        assert!(config.validate().is_err());

        let mut config = ScannerConfig::default();
        config.constraints.width = 0;
        assert!(matches!(config.validate(), Err(crate::ScannerError::Config(_))));
    }
}
