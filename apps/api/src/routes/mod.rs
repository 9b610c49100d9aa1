pub mod health;
pub mod resumes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            get(resumes::list_resumes).post(resumes::create_resume),
        )
        .route(
            "/api/v1/resumes/:version",
            get(resumes::get_resume_markdown).delete(resumes::delete_resume),
        )
        .route(
            "/api/v1/resumes/:version/latex",
            get(resumes::get_resume_latex),
        )
        .route(
            "/api/v1/resumes/:version/digest",
            get(resumes::get_resume_digest),
        )
        .route(
            "/api/v1/resumes/:version/sections/:id",
            get(resumes::get_section).put(resumes::update_section),
        )
        .route(
            "/api/v1/resumes/:version/sections/:id/tailor",
            post(resumes::tailor_section),
        )
        .route("/api/v1/jd/analyze", post(resumes::analyze_jd))
        .with_state(state)
}
