mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let state = state::AppState::new(config.data_file.clone());
    let app = routes::app(state, &config);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, port = config.port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        data_file = %config.data_file.display(),
        static_dir = ?config.static_dir,
        "wallboard listening"
    );
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
