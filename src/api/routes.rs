//! Shared application state for the HTTP API.
use tokio::sync::RwLock;

use crate::gemini::client::GeminiClient;
use crate::prompt::catalog::ModifierCatalog;
use crate::session::Session;

pub struct AppState {
    pub catalog: ModifierCatalog,
    pub gemini_client: GeminiClient,
    pub session: RwLock<Session>,
}
