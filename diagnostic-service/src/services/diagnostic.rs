//! Prompt construction and the primary → fallback model chain.

use super::metrics;
use super::providers::{ProviderError, ProviderResponse, TextProvider};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Fixed prompt template; `{descricao}` is replaced with the visitor's text.
const PROMPT_TEMPLATE: &str = r#"Você é um consultor sênior de transformação digital e inteligência artificial para pequenas e médias empresas brasileiras.

Analise o negócio descrito abaixo e produza um diagnóstico objetivo, em português do Brasil, contendo, nesta ordem:
1. Uma nota de impacto de 1 a 5 para a adoção de IA neste negócio.
2. Ganhos de negócio quantificados (economia de horas, aumento de receita, redução de custos, ROI estimado).
3. Riscos da implementação, cada um com a respectiva mitigação.
4. Um roadmap de implantação em três fases (30, 60 e 90 dias).
5. Uma referência real de mercado (benchmark) de empresa que obteve resultado semelhante.
6. Os diferenciais competitivos que o negócio passa a ter.
7. Uma chamada para ação convidando o cliente a agendar uma conversa.

Responda APENAS com um objeto JSON válido, sem markdown, usando exatamente estas chaves:
{
  "headline": "frase de impacto resumindo a oportunidade",
  "impact_score_1a5": 4,
  "benefits": [{"title": "nome do ganho", "value": "valor quantificado"}],
  "risks": [{"risk": "risco", "mitigation": "mitigação"}],
  "roadmap": [{"phase": "Fase 1 (30 dias)", "actions": ["ação"]}],
  "benchmark": "referência real de mercado",
  "differentiators": ["diferencial"],
  "architecture": {"overview": "visão geral da solução", "components": ["componente"]},
  "kpis": ["indicador para acompanhar"],
  "cta": "chamada para ação"
}

Descrição do negócio:
{descricao}"#;

/// Build the diagnostic prompt for a business description.
///
/// The description is interpolated as-is; an empty description still
/// yields a complete prompt.
pub fn build_prompt(description: &str) -> String {
    PROMPT_TEMPLATE.replace("{descricao}", description)
}

/// Errors surfaced by the diagnostic flow.
#[derive(Error, Debug)]
pub enum DiagnosticError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("All models failed; last error: {0}")]
    AllModelsFailed(#[source] ProviderError),
}

/// Successful generation together with the model that produced it.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub model: String,
    pub used_fallback: bool,
    pub response: ProviderResponse,
}

/// Tries the primary model, then the fallback model exactly once.
///
/// No backoff and no further retries: the first success wins, and the
/// fallback's error is returned when both fail.
#[derive(Clone)]
pub struct DiagnosticGenerator {
    primary: Arc<dyn TextProvider>,
    fallback: Arc<dyn TextProvider>,
}

impl DiagnosticGenerator {
    pub fn new(primary: Arc<dyn TextProvider>, fallback: Arc<dyn TextProvider>) -> Self {
        Self { primary, fallback }
    }

    /// Healthy when either model is reachable.
    pub async fn health_check(&self) -> Result<(), ProviderError> {
        match self.primary.health_check().await {
            Ok(()) => Ok(()),
            Err(_) => self.fallback.health_check().await,
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<Diagnostic, DiagnosticError> {
        let attempts = [(&self.primary, false), (&self.fallback, true)];
        let mut last_error = None;

        for (provider, is_fallback) in attempts {
            let model = provider.model();
            let start = Instant::now();
            let result = provider.generate(prompt).await;
            metrics::record_model_latency(model, start.elapsed().as_secs_f64());

            match result {
                Ok(response) => {
                    metrics::record_model_attempt(model, "success");
                    tracing::info!(
                        model = %model,
                        fallback = is_fallback,
                        input_tokens = response.input_tokens,
                        output_tokens = response.output_tokens,
                        finish_reason = response.finish_reason.as_str(),
                        "Diagnostic generated"
                    );
                    return Ok(Diagnostic {
                        model: model.to_string(),
                        used_fallback: is_fallback,
                        response,
                    });
                }
                Err(e) => {
                    metrics::record_model_attempt(model, e.kind());
                    tracing::warn!(
                        model = %model,
                        fallback = is_fallback,
                        error = %e,
                        "Model call failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(DiagnosticError::AllModelsFailed(last_error.unwrap_or_else(
            || ProviderError::NotConfigured("no model attempted".to_string()),
        )))
    }
}
