//! Resume API handlers — the tool-facing surface over the transcoder.
//!
//! Success payloads carry a `[Success] …` message and errors a `[Error] …`
//! one (via `AppError`), so an agent driving this API can pattern-match the
//! outcome without inspecting status codes.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::digest::summarize_resume;
use crate::errors::AppError;
use crate::latex::render_resume_latex;
use crate::state::AppState;
use crate::store::BASE_VERSION;
use crate::transcode::render::render_resume;
use crate::transcode::update::{
    load_section_markdown, update_section_from_markdown, SectionLocator, UpdateOutcome,
};

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    pub markdown: String,
}

#[derive(Debug, Deserialize)]
pub struct TailorSectionRequest {
    pub jd_analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateSectionResponse {
    pub message: String,
    pub outcome: UpdateOutcome,
}

/// GET /api/v1/resumes
pub async fn list_resumes(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let versions = state.store.list_versions()?;
    Ok(Json(json!({
        "versions": versions,
        "total": versions.len(),
    })))
}

/// POST /api/v1/resumes
pub async fn create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<Json<Value>, AppError> {
    state.store.create_version(&request.name)?;
    Ok(Json(json!({
        "message": format!(
            "[Success] Created new resume version '{}' from standard template.",
            request.name.trim()
        ),
    })))
}

/// DELETE /api/v1/resumes/:version
pub async fn delete_resume(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<Json<Value>, AppError> {
    if version == BASE_VERSION {
        return Err(AppError::Validation(format!(
            "Cannot delete the base resume version '{BASE_VERSION}'."
        )));
    }
    state.store.delete(&version)?;
    Ok(Json(json!({
        "message": format!("[Success] Resume version '{version}' has been deleted."),
    })))
}

/// GET /api/v1/resumes/:version — the whole resume as Markdown.
pub async fn get_resume_markdown(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resume = state.store.load(&version)?;
    Ok(Json(json!({ "markdown": render_resume(&resume) })))
}

/// GET /api/v1/resumes/:version/latex
pub async fn get_resume_latex(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resume = state.store.load(&version)?;
    Ok(Json(json!({ "latex": render_resume_latex(&resume) })))
}

/// GET /api/v1/resumes/:version/digest
pub async fn get_resume_digest(
    State(state): State<AppState>,
    Path(version): Path<String>,
) -> Result<Json<Value>, AppError> {
    let resume = state.store.load(&version)?;
    Ok(Json(json!({ "digest": summarize_resume(&resume) })))
}

/// GET /api/v1/resumes/:version/sections/:id — editable section Markdown.
pub async fn get_section(
    State(state): State<AppState>,
    Path((version, section_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let locator = SectionLocator {
        version,
        section_id,
    };
    let markdown = load_section_markdown(state.store.as_ref(), &locator)?;
    Ok(Json(json!({ "markdown": markdown })))
}

/// PUT /api/v1/resumes/:version/sections/:id — apply edited Markdown.
pub async fn update_section(
    State(state): State<AppState>,
    Path((version, section_id)): Path<(String, String)>,
    Json(request): Json<UpdateSectionRequest>,
) -> Result<Json<UpdateSectionResponse>, AppError> {
    let locator = SectionLocator {
        version,
        section_id,
    };
    let outcome = update_section_from_markdown(state.store.as_ref(), &locator, &request.markdown)?;
    let message = match &outcome {
        UpdateOutcome::Metadata { updated_keys } => format!(
            "[Success] Updated {}/{}. Merged metadata keys: {}",
            locator.version,
            locator.section_id,
            updated_keys.join(", ")
        ),
        UpdateOutcome::Section { .. } => {
            format!("[Success] Updated {}/{}.", locator.version, locator.section_id)
        }
    };
    Ok(Json(UpdateSectionResponse { message, outcome }))
}

/// POST /api/v1/resumes/:version/sections/:id/tailor — returns tailored
/// Markdown for the section; the caller applies it via the update endpoint.
pub async fn tailor_section(
    State(state): State<AppState>,
    Path((version, section_id)): Path<(String, String)>,
    Json(request): Json<TailorSectionRequest>,
) -> Result<Json<Value>, AppError> {
    let locator = SectionLocator {
        version,
        section_id,
    };
    let markdown = load_section_markdown(state.store.as_ref(), &locator)?;
    let tailored = state
        .tailor
        .tailor_section(&markdown, &request.jd_analysis)
        .await?;
    Ok(Json(json!({ "markdown": tailored })))
}

/// POST /api/v1/jd/analyze
pub async fn analyze_jd(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJdRequest>,
) -> Result<Json<Value>, AppError> {
    let analysis = state.tailor.analyze_jd(&request.jd_text).await?;
    Ok(Json(json!({ "analysis": analysis })))
}
