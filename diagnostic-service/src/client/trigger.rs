use crate::handlers::diagnostic::DIAGNOSTIC_PATH;
use crate::models::{DiagnosticRequest, DiagnosticResult};
use futures::StreamExt;
use reqwest::Client;

/// Shown when the endpoint cannot be reached or the body read is cut short.
pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Não foi possível conectar ao serviço de diagnóstico. Tente novamente.";

const DEFAULT_LOCALE: &str = "pt-BR";

/// Sends one diagnostic request and decodes whatever comes back.
#[derive(Clone)]
pub struct DiagnosticClient {
    base_url: String,
    client: Client,
}

impl DiagnosticClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, DIAGNOSTIC_PATH)
    }

    /// POST the description and locale, read the streamed body to the end,
    /// and parse it. Failures become an error-only result; nothing is
    /// returned as `Err`.
    pub async fn request(&self, description: &str, locale: &str) -> DiagnosticResult {
        match self.fetch_body(description, locale).await {
            Ok(body) => DiagnosticResult::parse(&body),
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %self.endpoint(), "Diagnostic request failed");
                DiagnosticResult::from_error(TRANSPORT_ERROR_MESSAGE)
            }
        }
    }

    async fn fetch_body(&self, description: &str, locale: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .post(self.endpoint())
            .json(&DiagnosticRequest::new(description, locale))
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Diagnostic response received");

        let mut stream = response.bytes_stream();
        let mut buffer = Vec::new();
        while let Some(chunk) = stream.next().await {
            buffer.extend_from_slice(&chunk?);
        }

        // Decode once at the end so multi-byte characters split across
        // chunks survive.
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Locale of the current process as a BCP 47-ish tag (`pt_BR.UTF-8` → `pt-BR`).
pub fn default_locale() -> String {
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find_map(|raw| normalize_locale(&raw))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

fn normalize_locale(raw: &str) -> Option<String> {
    let tag = raw.split(['.', '@']).next()?.trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}
