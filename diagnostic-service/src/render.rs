//! Rendering surface: HTML fragments for each view state.
//!
//! Every result field maps to its own block and is skipped when absent.

use crate::client::ViewState;
use crate::models::DiagnosticResult;
use askama::Template;

pub const STAR_GLYPH: char = '★';

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingTemplate {}

#[derive(Template)]
#[template(path = "result.html")]
struct ResultTemplate<'a> {
    result: &'a DiagnosticResult,
    stars: Option<String>,
    cta_url: &'a str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub api_path: &'a str,
    pub render_path: &'a str,
    pub loading_html: String,
}

/// Render the fragment for the current state. Idle renders nothing.
pub fn render_view(state: &ViewState, cta_url: &str) -> Result<String, askama::Error> {
    match state {
        ViewState::Idle => Ok(String::new()),
        ViewState::Loading => render_loading(),
        ViewState::Resolved(result) => render_result(result, cta_url),
    }
}

pub fn render_loading() -> Result<String, askama::Error> {
    LoadingTemplate {}.render()
}

pub fn render_result(result: &DiagnosticResult, cta_url: &str) -> Result<String, askama::Error> {
    ResultTemplate {
        result,
        stars: result.impact_score.map(stars),
        cta_url,
    }
    .render()
}

fn stars(score: u8) -> String {
    std::iter::repeat(STAR_GLYPH).take(score as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTA: &str = "/#contato";

    fn resolved(body: &str) -> String {
        render_view(&ViewState::Resolved(DiagnosticResult::parse(body)), CTA).unwrap()
    }

    fn list_items(html: &str) -> Vec<String> {
        html.split("<li>")
            .skip(1)
            .filter_map(|chunk| chunk.split("</li>").next())
            .map(|s| s.trim().to_string())
            .collect()
    }

    #[test]
    fn impact_score_renders_that_many_stars() {
        let html = resolved(r#"{"impact_score_1a5":3}"#);
        assert_eq!(html.matches(STAR_GLYPH).count(), 3);
    }

    #[test]
    fn out_of_range_score_renders_no_stars() {
        for body in [r#"{"impact_score_1a5":0}"#, r#"{"impact_score_1a5":7}"#] {
            let html = resolved(body);
            assert_eq!(html.matches(STAR_GLYPH).count(), 0);
            assert!(html.contains("diagnostic__cta"));
        }
    }

    #[test]
    fn kpis_render_in_order() {
        let html = resolved(r#"{"kpis":["A","B"]}"#);
        assert_eq!(list_items(&html), vec!["A", "B"]);
        assert_eq!(html.matches("<ul").count(), 1);
    }

    #[test]
    fn absent_fields_render_no_blocks() {
        let html = resolved("{}");
        assert!(!html.contains("<h2"));
        assert!(!html.contains("<ul"));
        assert!(!html.contains(STAR_GLYPH));
        assert!(html.contains("diagnostic__cta"));
    }

    #[test]
    fn parse_failure_renders_error_and_cta() {
        let html = resolved("not json");
        assert!(html.contains("diagnostic__error"));
        assert!(html.contains("diagnostic__cta"));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn full_result_renders_every_block() {
        let html = resolved(
            r#"{
                "headline": "Atendimento 24h",
                "benefits": [{"title": "Economia", "value": "R$ 5 mil por mês"}],
                "impact_score_1a5": 5,
                "architecture": {"overview": "Agente + CRM", "components": ["LLM", "CRM"]},
                "kpis": ["NPS"]
            }"#,
        );
        assert!(html.contains("<h2 class=\"diagnostic__headline\">Atendimento 24h</h2>"));
        assert!(html.contains("<strong>Economia</strong>: R$ 5 mil por mês"));
        assert_eq!(html.matches(STAR_GLYPH).count(), 5);
        assert!(html.contains("<p>Agente + CRM</p>"));
        assert_eq!(list_items(&html).len(), 4);
    }

    #[test]
    fn model_text_is_escaped() {
        let html = resolved(r#"{"headline":"<b>oi</b>"}"#);
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;oi"));
    }

    #[test]
    fn idle_and_loading_have_no_cta() {
        assert_eq!(render_view(&ViewState::Idle, CTA).unwrap(), "");
        let loading = render_view(&ViewState::Loading, CTA).unwrap();
        assert!(loading.contains("aria-busy"));
        assert!(!loading.contains("diagnostic__cta"));
    }
}
