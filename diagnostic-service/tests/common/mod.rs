#![allow(dead_code)]

use diagnostic_service::config::{
    DiagnosticConfig, GoogleConfig, LandingConfig, ModelConfig, DEFAULT_CTA_URL,
};
use diagnostic_service::services::providers::TextProvider;
use diagnostic_service::startup::Application;
use service_core::config::Config;
use std::sync::Arc;
use std::time::Duration;

pub const PRIMARY_MODEL: &str = "gemini-2.0-flash";
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash";

pub fn test_config(api_key: &str, api_base: &str) -> DiagnosticConfig {
    DiagnosticConfig {
        common: Config {
            port: 0, // Random port
            log_level: "debug".to_string(),
        },
        models: ModelConfig {
            primary_model: PRIMARY_MODEL.to_string(),
            fallback_model: FALLBACK_MODEL.to_string(),
        },
        google: GoogleConfig {
            api_key: api_key.to_string(),
            api_base: api_base.to_string(),
        },
        landing: LandingConfig {
            cta_url: DEFAULT_CTA_URL.to_string(),
        },
    }
}

async fn spawn(app: Application) -> String {
    let address = format!("http://127.0.0.1:{}", app.port());

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    address
}

/// Spawn the application around scripted providers and return its base URL.
pub async fn spawn_app(primary: Arc<dyn TextProvider>, fallback: Arc<dyn TextProvider>) -> String {
    let config = test_config("unused", "http://127.0.0.1:9");
    let app = Application::build_with_providers(config, primary, fallback)
        .await
        .expect("Failed to build application");
    spawn(app).await
}

/// Spawn the application with real Gemini providers pointed at `api_base`.
pub async fn spawn_gemini_app(api_key: &str, api_base: &str) -> String {
    let app = Application::build(test_config(api_key, api_base))
        .await
        .expect("Failed to build application");
    spawn(app).await
}
