use super::DiagnosticClient;
use crate::models::DiagnosticResult;
use tokio::sync::watch;

/// What the rendering surface should show. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Resolved(DiagnosticResult),
}

impl ViewState {
    pub fn result(&self) -> Option<&DiagnosticResult> {
        match self {
            ViewState::Resolved(result) => Some(result),
            _ => None,
        }
    }
}

/// One visitor's interaction: publishes state transitions to subscribers.
pub struct DiagnosticSession {
    client: DiagnosticClient,
    state: watch::Sender<ViewState>,
}

impl DiagnosticSession {
    pub fn new(client: DiagnosticClient) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self { client, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Run one request: `Loading` while in flight, then `Resolved`.
    pub async fn submit(&self, description: &str, locale: &str) -> DiagnosticResult {
        self.state.send_replace(ViewState::Loading);
        let result = self.client.request(description, locale).await;
        self.state.send_replace(ViewState::Resolved(result.clone()));
        result
    }
}
