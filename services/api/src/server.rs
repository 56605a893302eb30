use crate::cli::ServeArgs;
use crate::demo::demo_catalog;
use crate::infra::{AppState, InMemoryCatalogRepository, InMemoryResultRepository};
use crate::routes::with_quiz_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use major_match::config::AppConfig;
use major_match::error::AppError;
use major_match::quiz::{QuizService, ScoringConfig};
use major_match::telemetry;
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

    let catalog = if args.demo_catalog {
        InMemoryCatalogRepository::with_snapshot(demo_catalog())
    } else {
        InMemoryCatalogRepository::default()
    };
    let results = InMemoryResultRepository::default();
    let quiz_service = Arc::new(
        QuizService::new(Arc::new(catalog), Arc::new(results), ScoringConfig::default())
            .with_default_language(config.quiz.default_language),
    );

    let app = with_quiz_routes(quiz_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_language = %config.quiz.default_language,
        demo_catalog = args.demo_catalog,
        "major matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
