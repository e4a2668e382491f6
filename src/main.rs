use attendance_dashboard::{
    AppConfig, AppState, load_book, recognition::SimulatedRecognizer, router,
};
use chrono::Local;
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let book = load_book(&config.data_path, Local::now().date_naive()).await;
    let recognizer = SimulatedRecognizer::new(
        config.recognition_latency,
        book.employees.iter().map(|employee| employee.id.clone()),
    )
    .with_confidence(config.recognition_confidence);
    info!(
        employees = book.employees.len(),
        latency_ms = config.recognition_latency.as_millis() as u64,
        "attendance book loaded"
    );

    let state = AppState::new(
        config.data_path.clone(),
        book,
        Arc::new(recognizer),
        config.check_in,
    );
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
