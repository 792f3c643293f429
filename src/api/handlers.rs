//! Axum request handlers for the HTTP API.
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::prompt::catalog::{ModifierCatalog, ModifierCategory, ASPECT_RATIO_OPTIONS};
use crate::prompt::composer::compose;
use crate::session::{run_enhancement, run_generation, GenerationRequest};
use crate::utils::image_intake::decode_data_url;

pub async fn root() -> &'static str {
    "NanoFrame API"
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<Value>, String> {
    run_generation(&state.gemini_client, &state.catalog, &state.session, request)
        .await
        .map(|artifact| Json(json!(artifact)))
        .map_err(|e| {
            tracing::error!("Failed to generate image: {:?}", e);
            e.to_string()
        })
}

#[derive(Deserialize)]
pub struct EnhancePayload {
    pub description: String,
}

pub async fn enhance(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EnhancePayload>,
) -> Result<Json<Value>, String> {
    run_enhancement(&state.gemini_client, &state.session, &payload.description)
        .await
        .map(|enhanced| Json(json!({"enhanced": enhanced})))
        .map_err(|e| e.to_string())
}

// Dry-run composition: same payload as /generate, no dispatch.
pub async fn compose_prompt(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<Value>, String> {
    let final_prompt = compose(&request.description, &request.selections, &state.catalog);
    let aspect_ratio = state.catalog.aspect_ratio_value(&request.aspect_ratio);
    Ok(Json(json!({"final_prompt": final_prompt, "aspect_ratio": aspect_ratio})))
}

// Friendly history endpoint: defaults to human-readable lines; add ?json=true for raw JSON
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, String> {
    let json_flag = params.get("json").map(|v| v == "true" || v == "1").unwrap_or(false);
    let session = state.session.read().await;
    if json_flag {
        return Ok(Json(json!(session.history())).into_response());
    }
    let mut lines = String::new();
    for artifact in session.history() {
        lines.push_str(&format!("{}  {}\n", artifact.id, artifact.final_prompt));
    }
    Ok(lines.into_response())
}

#[derive(Deserialize)]
pub struct RestorePayload {
    pub id: Uuid,
}

pub async fn restore(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RestorePayload>,
) -> Result<Json<Value>, String> {
    let mut session = state.session.write().await;
    session
        .restore(payload.id)
        .map(|artifact| Json(json!(artifact)))
        .ok_or_else(|| format!("No artifact with id {}", payload.id))
}

/// Decoded image bytes of an artifact, by id or the current one.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Vec<u8>, String> {
    let session = state.session.read().await;
    let artifact = match params.get("id") {
        Some(id) => {
            let id = id.parse::<Uuid>().map_err(|e| format!("Invalid artifact id: {}", e))?;
            session.find(id).ok_or_else(|| format!("No artifact with id {}", id))?
        }
        None => session.current().ok_or("No image has been generated yet")?,
    };
    decode_data_url(&artifact.image_data).map_err(|e| e.to_string())
}

fn catalog_as_json() -> Value {
    let mut categories = serde_json::Map::new();
    for category in ModifierCategory::ORDERED {
        categories.insert(category.as_str().to_string(), json!(ModifierCatalog::table(category)));
    }
    json!({"categories": categories, "aspect_ratios": ASPECT_RATIO_OPTIONS})
}

// Options: list category names; ?json=true returns the whole catalog
pub async fn options_categories(
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, String> {
    let json_flag = params.get("json").map(|v| v == "true" || v == "1").unwrap_or(false);
    if json_flag {
        return Ok(Json(catalog_as_json()).into_response());
    }
    let mut lines = String::new();
    for category in ModifierCategory::ORDERED {
        lines.push_str(category.as_str());
        lines.push('\n');
    }
    lines.push_str("aspect-ratios\n");
    Ok(lines.into_response())
}

// Options: list entries for one category (e.g. style, lighting, aspect-ratios)
pub async fn options_in_category(
    Path(category): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, String> {
    let json_flag = params.get("json").map(|v| v == "true" || v == "1").unwrap_or(false);

    if category == "aspect-ratios" {
        if json_flag {
            return Ok(Json(json!(ASPECT_RATIO_OPTIONS)).into_response());
        }
        let mut lines = String::new();
        for ratio in ASPECT_RATIO_OPTIONS {
            lines.push_str(&format!("{}\t{}\n", ratio.id, ratio.label));
        }
        return Ok(lines.into_response());
    }

    let category = ModifierCategory::parse(&category)
        .ok_or_else(|| format!("Unknown modifier category '{}'", category))?;
    let table = ModifierCatalog::table(category);
    if json_flag {
        Ok(Json(json!(table)).into_response())
    } else {
        let mut lines = String::new();
        for option in table {
            lines.push_str(&format!("{}\t{}\n", option.id, option.label));
        }
        Ok(lines.into_response())
    }
}
