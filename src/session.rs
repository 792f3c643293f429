//! Session state and request orchestration.
//!
//! The session owns the bounded history of generated artifacts and the two
//! in-flight flags. Orchestrator functions validate a request, run the
//! composer and the Gemini client, and record the result; no partial state
//! is ever stored on failure.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::gemini::client::GeminiClient;
use crate::prompt::catalog::ModifierCatalog;
use crate::prompt::composer::{compose, ModifierSelections};

/// History keeps this many artifacts, newest first; the oldest is evicted.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Generate,
    Edit,
}

/// One user submission. Ephemeral; fully determines the client call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub description: String,
    #[serde(flatten)]
    pub selections: ModifierSelections,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub reference_image: Option<String>,
}

fn default_aspect_ratio() -> String {
    crate::prompt::catalog::DEFAULT_ASPECT_RATIO.to_string()
}

fn default_mode() -> Mode {
    Mode::Generate
}

/// One generated image plus the metadata needed to redisplay or reproduce
/// it. Immutable once created. `final_prompt` is exactly the string that
/// was sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    pub id: Uuid,
    pub image_data: String,
    pub final_prompt: String,
    pub selections: ModifierSelections,
    pub aspect_ratio: String,
    pub created_at: DateTime<Utc>,
    pub mode: Mode,
}

/// Per-session mutable state: bounded history, current artifact pointer,
/// and the two independent in-flight flags.
#[derive(Debug, Default)]
pub struct Session {
    history: Vec<GeneratedArtifact>,
    current: Option<Uuid>,
    pub is_generating: bool,
    pub is_enhancing: bool,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Newest-first history, at most [`HISTORY_LIMIT`] entries.
    pub fn history(&self) -> &[GeneratedArtifact] {
        &self.history
    }

    pub fn current(&self) -> Option<&GeneratedArtifact> {
        self.current.and_then(|id| self.find(id))
    }

    pub fn find(&self, id: Uuid) -> Option<&GeneratedArtifact> {
        self.history.iter().find(|a| a.id == id)
    }

    /// Insert at the front and evict beyond the limit. The new artifact
    /// becomes the current one.
    pub fn push_artifact(&mut self, artifact: GeneratedArtifact) {
        self.current = Some(artifact.id);
        self.history.insert(0, artifact);
        self.history.truncate(HISTORY_LIMIT);
    }

    /// Make a past artifact current again (thumbnail click in the original
    /// UI). History order is untouched.
    pub fn restore(&mut self, id: Uuid) -> Option<&GeneratedArtifact> {
        if self.history.iter().any(|a| a.id == id) {
            self.current = Some(id);
            self.find(id)
        } else {
            None
        }
    }
}

/// Reject requests the original form would not submit: generate mode needs
/// a description, edit mode needs both a reference image and instructions.
pub fn validate_request(request: &GenerationRequest) -> AppResult<()> {
    match request.mode {
        Mode::Generate => {
            if request.description.trim().is_empty() {
                return Err(AppError::InvalidInput("Please enter a description for your image".to_string()));
            }
        }
        Mode::Edit => {
            if request.reference_image.is_none() {
                return Err(AppError::InvalidInput("Please provide an image to edit".to_string()));
            }
            if request.description.trim().is_empty() {
                return Err(AppError::InvalidInput("Please describe how to modify the image".to_string()));
            }
        }
    }
    Ok(())
}

/// Run one generation: validate, compose, dispatch, record.
///
/// The `is_generating` flag is set for the duration of the remote call and
/// cleared on every outcome. A second call while one is in flight is
/// rejected. On success the artifact is pushed to history and returned; on
/// failure nothing is stored.
pub async fn run_generation(
    client: &GeminiClient,
    catalog: &ModifierCatalog,
    session: &RwLock<Session>,
    request: GenerationRequest,
) -> AppResult<GeneratedArtifact> {
    validate_request(&request)?;

    {
        let mut session = session.write().await;
        if session.is_generating {
            return Err(AppError::InvalidInput("A generation is already in flight".to_string()));
        }
        session.is_generating = true;
    }

    let final_prompt = compose(&request.description, &request.selections, catalog);
    let aspect_ratio = catalog.aspect_ratio_value(&request.aspect_ratio).to_string();

    let result = client
        .generate_image(&final_prompt, request.reference_image.as_deref(), &aspect_ratio)
        .await;

    let mut session = session.write().await;
    session.is_generating = false;

    match result {
        Ok(image_data) => {
            let artifact = GeneratedArtifact {
                id: Uuid::new_v4(),
                image_data,
                final_prompt,
                selections: request.selections,
                aspect_ratio,
                created_at: Utc::now(),
                mode: request.mode,
            };
            session.push_artifact(artifact.clone());
            tracing::info!("Generated artifact {} ({} in history)", artifact.id, session.history().len());
            Ok(artifact)
        }
        Err(e) => {
            tracing::error!("Generation failed: {}", e);
            Err(e)
        }
    }
}

/// Run one enhancement. Rejects blank input and a duplicate in-flight
/// enhancement; the rewrite itself never fails (the client falls back to
/// the original text).
pub async fn run_enhancement(
    client: &GeminiClient,
    session: &RwLock<Session>,
    description: &str,
) -> AppResult<String> {
    if description.trim().is_empty() {
        return Err(AppError::InvalidInput("Write something first so it can be improved".to_string()));
    }

    {
        let mut session = session.write().await;
        if session.is_enhancing {
            return Err(AppError::InvalidInput("An enhancement is already in flight".to_string()));
        }
        session.is_enhancing = true;
    }

    let enhanced = client.enhance_prompt(description).await;

    session.write().await.is_enhancing = false;
    Ok(enhanced)
}
