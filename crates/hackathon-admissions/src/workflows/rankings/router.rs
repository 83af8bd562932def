use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::allocation::QuotaOverrun;
use super::domain::{ApplicantRecord, RankedApplicant};
use super::export::ACCEPTED_EMAILS_FILENAME;
use super::parameters::{AllocationCounts, ParameterDraft, RankingParameters};
use super::repository::ApplicantRepository;
use super::search::filter_applicants;
use super::service::{RankingsService, RankingsServiceError};

/// Router builder exposing the rankings board over HTTP.
pub fn rankings_router<R>(service: Arc<RankingsService<R>>) -> Router
where
    R: ApplicantRepository + 'static,
{
    Router::new()
        .route("/api/v1/rankings", get(rankings_handler::<R>))
        .route(
            "/api/v1/rankings/parameters",
            get(parameters_handler::<R>).put(commit_handler::<R>),
        )
        .route("/api/v1/rankings/stats", get(stats_handler::<R>))
        .route(
            "/api/v1/rankings/export/accepted",
            get(export_handler::<R>),
        )
        .route("/api/v1/rankings/preview", post(preview_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RankingsQuery {
    #[serde(default)]
    search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatsQuery {
    #[serde(default)]
    window: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    roster: Vec<ApplicantRecord>,
    parameters: ParameterDraft,
}

/// Table payload for the rankings page.
#[derive(Debug, Serialize)]
pub struct RankingsView {
    pub generated_at: DateTime<Utc>,
    pub parameters: RankingParameters,
    pub counts: AllocationCounts,
    pub overruns: Vec<QuotaOverrun>,
    pub matched: usize,
    pub applicants: Vec<RankedApplicant>,
}

pub(crate) async fn rankings_handler<R>(
    State(service): State<Arc<RankingsService<R>>>,
    Query(query): Query<RankingsQuery>,
) -> Response
where
    R: ApplicantRepository + 'static,
{
    match service.snapshot() {
        Ok(snapshot) => {
            let ranked = snapshot.ranked();
            let applicants: Vec<RankedApplicant> =
                filter_applicants(&ranked, query.search.as_deref().unwrap_or(""))
                    .into_iter()
                    .cloned()
                    .collect();
            let view = RankingsView {
                generated_at: Utc::now(),
                parameters: snapshot.parameters,
                counts: snapshot.counts,
                overruns: snapshot.overruns,
                matched: applicants.len(),
                applicants,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn parameters_handler<R>(
    State(service): State<Arc<RankingsService<R>>>,
) -> Response
where
    R: ApplicantRepository + 'static,
{
    match service.parameters() {
        Ok(parameters) => (StatusCode::OK, Json(parameters)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn commit_handler<R>(
    State(service): State<Arc<RankingsService<R>>>,
    Json(draft): Json<ParameterDraft>,
) -> Response
where
    R: ApplicantRepository + 'static,
{
    match service.commit(draft) {
        Ok(parameters) => (StatusCode::OK, Json(parameters)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<RankingsService<R>>>,
    Query(query): Query<StatsQuery>,
) -> Response
where
    R: ApplicantRepository + 'static,
{
    match service.stats(query.window) {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R>(State(service): State<Arc<RankingsService<R>>>) -> Response
where
    R: ApplicantRepository + 'static,
{
    match service.accepted_emails() {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{ACCEPTED_EMAILS_FILENAME}\""),
                ),
            ],
            body,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<RankingsService<R>>>,
    Json(request): Json<PreviewRequest>,
) -> Response
where
    R: ApplicantRepository + 'static,
{
    match service.preview(&request.roster, request.parameters) {
        Ok(snapshot) => {
            let view = RankingsView {
                generated_at: Utc::now(),
                matched: request.roster.len(),
                applicants: snapshot.ranked(),
                parameters: snapshot.parameters,
                counts: snapshot.counts,
                overruns: snapshot.overruns,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: RankingsServiceError) -> Response {
    let status = match err {
        RankingsServiceError::Parameters(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RankingsServiceError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
        RankingsServiceError::StatePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
