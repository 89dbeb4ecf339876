//! Landing page and server-side fragment rendering.

use super::diagnostic::DIAGNOSTIC_PATH;
use crate::models::DiagnosticResult;
use crate::render::{self, IndexTemplate};
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub const RENDER_PATH: &str = "/render";

fn template_failure(e: askama::Error) -> Response {
    tracing::error!(error = %e, "Template rendering failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

pub async fn index() -> Response {
    let page = render::render_loading().and_then(|loading_html| {
        askama::Template::render(&IndexTemplate {
            api_path: DIAGNOSTIC_PATH,
            render_path: RENDER_PATH,
            loading_html,
        })
    });

    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) => template_failure(e),
    }
}

/// Render a raw diagnostic body as the resolved-state fragment.
pub async fn render_fragment(State(state): State<AppState>, body: String) -> Response {
    let result = DiagnosticResult::parse(&body);
    match render::render_result(&result, &state.config.landing.cta_url) {
        Ok(html) => Html(html).into_response(),
        Err(e) => template_failure(e),
    }
}
