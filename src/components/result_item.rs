// ============================================================================
// RESULT ITEM - Una línea de la lista de resultados (solo presentación)
// ============================================================================

use yew::prelude::*;

use crate::models::ScanResult;

#[derive(Properties, PartialEq)]
pub struct ResultItemProps {
    pub result: ScanResult,
}

/// "CÓDIGO [formato]"; los campos ausentes quedan vacíos
pub fn format_result(result: &ScanResult) -> String {
    format!(
        "{} [{}]",
        result.code.as_deref().unwrap_or_default(),
        result.format.as_deref().unwrap_or_default()
    )
}

#[function_component(ResultItem)]
pub fn result_item(props: &ResultItemProps) -> Html {
    html! {
        <li>{ format_result(&props.result) }</li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_code_and_format() {
        let result = ScanResult {
            code: Some("4006381333931".to_string()),
            format: Some("ean_13".to_string()),
        };
        assert_eq!(format_result(&result), "4006381333931 [ean_13]");
    }

    #[test]
    fn missing_fields_render_empty() {
        assert_eq!(format_result(&ScanResult::default()), " []");

        let only_code = ScanResult {
            code: Some("96385074".to_string()),
            format: None,
        };
        assert_eq!(format_result(&only_code), "96385074 []");
    }
}
