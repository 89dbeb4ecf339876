//! Loosely-typed diagnostic payload.
//!
//! The payload is free text produced by a model, so every field is optional
//! and extracted leniently: wrong types are dropped rather than rejected.

use serde::Serialize;
use serde_json::{Map, Value};

/// Shown when the response body cannot be read as a JSON object.
pub const PARSE_ERROR_MESSAGE: &str =
    "Não foi possível interpretar o diagnóstico. Tente novamente.";

pub const MIN_IMPACT_SCORE: u8 = 1;
pub const MAX_IMPACT_SCORE: u8 = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<Benefit>>,

    #[serde(rename = "impact_score_1a5", skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpis: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Benefit {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Architecture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    pub components: Vec<String>,
}

impl DiagnosticResult {
    /// Parse a response body. Never fails: text that is not a JSON object
    /// becomes an error-only result.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text.trim()) {
            Ok(Value::Object(map)) => Self::from_object(&map),
            Ok(other) => {
                tracing::debug!(kind = value_kind(&other), "Diagnostic body is not a JSON object");
                Self::from_error(PARSE_ERROR_MESSAGE)
            }
            Err(e) => {
                tracing::debug!(error = %e, body_len = text.len(), "Diagnostic body is not JSON");
                Self::from_error(PARSE_ERROR_MESSAGE)
            }
        }
    }

    /// Result carrying only an error message.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        Self {
            headline: map.get("headline").and_then(scalar_text),
            benefits: map.get("benefits").and_then(benefits),
            impact_score: map
                .get("impact_score_1a5")
                .or_else(|| map.get("impact_score"))
                .and_then(impact_score),
            architecture: map.get("architecture").and_then(architecture),
            kpis: map.get("kpis").and_then(text_list),
            error: map.get("error").and_then(scalar_text),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Strings as-is, numbers and booleans stringified, everything else absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()
        .map(|items| items.iter().filter_map(scalar_text).collect())
}

fn benefits(value: &Value) -> Option<Vec<Benefit>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::Object(obj) => {
                    let title = obj.get("title").and_then(scalar_text);
                    let value = obj.get("value").and_then(scalar_text);
                    if title.is_none() && value.is_none() {
                        return None;
                    }
                    Some(Benefit {
                        title: title.unwrap_or_default(),
                        value: value.unwrap_or_default(),
                    })
                }
                other => scalar_text(other).map(|title| Benefit {
                    title,
                    value: String::new(),
                }),
            })
            .collect(),
    )
}

fn impact_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    let rounded = raw.round();
    if !(f64::from(MIN_IMPACT_SCORE)..=f64::from(MAX_IMPACT_SCORE)).contains(&rounded) {
        return None;
    }
    Some(rounded as u8)
}

fn architecture(value: &Value) -> Option<Architecture> {
    match value {
        Value::Object(obj) => Some(Architecture {
            overview: obj.get("overview").and_then(scalar_text),
            components: obj.get("components").and_then(text_list).unwrap_or_default(),
        }),
        Value::String(s) => Some(Architecture {
            overview: Some(s.clone()),
            components: Vec::new(),
        }),
        _ => None,
    }
}
