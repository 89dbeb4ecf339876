//! `POST|OPTIONS /api/diagnostico`.

use crate::models::DiagnosticRequest;
use crate::services::diagnostic::{build_prompt, DiagnosticError};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub const DIAGNOSTIC_PATH: &str = "/api/diagnostico";

/// Body of every failed diagnostic response.
pub const FAILURE_MESSAGE: &str = "Erro ao gerar o diagnóstico. Tente novamente em instantes.";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

impl IntoResponse for DiagnosticError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            FAILURE_MESSAGE,
        )
            .into_response()
    }
}

/// Generate a diagnostic and pass the model's text through untouched.
///
/// A body that cannot be read (too large, cut short) fails like any other
/// request error.
pub async fn create_diagnostic(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, DiagnosticError> {
    let result = match body {
        Ok(body) => generate(&state, &body).await,
        Err(rejection) => Err(DiagnosticError::InvalidRequest(rejection.body_text())),
    };

    match &result {
        Ok((_, used_fallback)) => {
            metrics::record_request(if *used_fallback { "fallback" } else { "primary" })
        }
        Err(e) => {
            metrics::record_request("failed");
            tracing::error!(error = %e, "Diagnostic request failed");
        }
    }

    let (text, _) = result?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], text).into_response())
}

async fn generate(state: &AppState, body: &[u8]) -> Result<(String, bool), DiagnosticError> {
    let request: DiagnosticRequest = serde_json::from_slice(body)
        .map_err(|e| DiagnosticError::InvalidRequest(e.to_string()))?;

    tracing::info!(
        description_len = request.description.len(),
        locale = request.locale.as_deref().unwrap_or("-"),
        "Diagnostic requested"
    );

    let prompt = build_prompt(&request.description);
    let diagnostic = state.generator.generate(&prompt).await?;

    Ok((diagnostic.response.text, diagnostic.used_fallback))
}

/// CORS preflight: empty 200, headers added by the CORS middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
