use crate::cli::ServeArgs;
use crate::infra::{AppState, DryRunGateway};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use taxplanner::config::AppConfig;
use taxplanner::error::AppError;
use taxplanner::notification::{EmailGateway, NotificationRelay, ResendClient};
use taxplanner::telemetry;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let gateway: Arc<dyn EmailGateway> = if args.dry_run {
        warn!("dry run enabled, notifications will be logged instead of sent");
        Arc::new(DryRunGateway::default())
    } else {
        let api_key = config.notification.require_api_key()?;
        let client = ResendClient::new(&config.notification.provider_url, api_key)?;
        info!(endpoint = client.endpoint(), "email provider configured");
        Arc::new(client)
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let relay = Arc::new(NotificationRelay::new(
        gateway,
        config.notification.relay_settings(),
    ));

    let app = with_service_routes(relay.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        recipient = %relay.settings().recipient,
        dry_run = args.dry_run,
        "notification relay ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
