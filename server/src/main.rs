use crate::config::AppConfig;
use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::{
    CustomerRouter, LedgerRouter, NotificationRouter, PortalRouter, ReportRouter,
    ReservationRouter, VehicleRouter,
};
use crate::worker::spawn_return_alert_worker;
use error_stack::ResultExt;
use kernel::KernelError;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

mod config;
mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;
mod worker;

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info"
                            .into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let config = AppConfig::load()?;
    let port = *config.port();
    let app = AppModule::new(config).await?;

    let _worker = spawn_return_alert_worker(app.clone());

    let router = axum::Router::new()
        .route_vehicle()
        .route_customer()
        .route_reservation()
        .route_portal()
        .route_ledger()
        .route_notification()
        .route_report()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(app);

    let bind = SocketAddr::from(([0, 0, 0, 0], port));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to listen tcp on {bind}"))?;
    tracing::info!("Listening on {bind}");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
