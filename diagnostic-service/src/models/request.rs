use serde::{Deserialize, Serialize};

/// Body of `POST /api/diagnostico`. Wire keys are Portuguese.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticRequest {
    #[serde(rename = "descricao")]
    pub description: String,

    /// Advisory locale tag (e.g. `pt-BR`).
    #[serde(rename = "idioma", default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl DiagnosticRequest {
    pub fn new(description: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            locale: Some(locale.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_portuguese_keys() {
        let body = serde_json::to_value(DiagnosticRequest::new("loja", "pt-BR")).unwrap();
        assert_eq!(body, serde_json::json!({"descricao": "loja", "idioma": "pt-BR"}));
    }

    #[test]
    fn locale_is_optional() {
        let request: DiagnosticRequest = serde_json::from_str(r#"{"descricao":""}"#).unwrap();
        assert_eq!(request.description, "");
        assert_eq!(request.locale, None);
    }

    #[test]
    fn description_is_required() {
        assert!(serde_json::from_str::<DiagnosticRequest>(r#"{"idioma":"pt-BR"}"#).is_err());
    }
}
