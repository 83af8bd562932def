use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use hackathon_admissions::workflows::rankings::{
    rankings_router, ApplicantRepository, RankingsService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_rankings_routes<R>(service: Arc<RankingsService<R>>) -> axum::Router
where
    R: ApplicantRepository + 'static,
{
    rankings_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryApplicantRepository;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use hackathon_admissions::workflows::rankings::{
        ApplicantId, ApplicantRecord, RankingParameters,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn record(id: &str, school: &str, score: f64) -> ApplicantRecord {
        ApplicantRecord {
            id: ApplicantId(id.to_string()),
            name: format!("Applicant {id}"),
            email: format!("{id}@example.com"),
            school: Some(school.to_string()),
            major: None,
            avg_originality: score,
            avg_technicality: score,
            avg_passion: score,
            gender: None,
            referral: false,
        }
    }

    fn app(ready: bool) -> axum::Router {
        let repository = Arc::new(InMemoryApplicantRepository::seeded(vec![
            record("a", "Western", 5.0),
            record("b", "Western", 4.0),
            record("c", "Waterloo", 3.0),
        ]));
        let service = Arc::new(RankingsService::new(
            repository,
            RankingParameters::with_target_size(2),
            450,
        ));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_rankings_routes(service).layer(Extension(state))
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let (status, body) = get(app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get(app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn rankings_routes_serve_seeded_roster() {
        let (status, body) = get(app(true), "/api/v1/rankings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["counts"]["applicants"], 3);
        assert_eq!(body["counts"]["accepted"], 2);
        assert_eq!(body["applicants"][0]["id"], "a");
        assert!(body["generated_at"].is_string());
    }
}
