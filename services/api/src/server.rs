use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicantRepository};
use crate::routes::with_rankings_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hackathon_admissions::config::AppConfig;
use hackathon_admissions::error::AppError;
use hackathon_admissions::telemetry;
use hackathon_admissions::workflows::rankings::{RankingParameters, RankingsService};
use hackathon_admissions::workflows::roster::RosterImporter;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster = match &config.admissions.roster_path {
        Some(path) => {
            let roster = RosterImporter::from_path(path)?;
            info!(path = %path.display(), applicants = roster.len(), "seeded applicant roster");
            roster
        }
        None => Vec::new(),
    };
    let repository = Arc::new(InMemoryApplicantRepository::seeded(roster));
    let rankings_service = Arc::new(RankingsService::new(
        repository,
        RankingParameters::with_target_size(config.admissions.target_size),
        config.admissions.stats_window,
    ));

    let app = with_rankings_routes(rankings_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions rankings service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
