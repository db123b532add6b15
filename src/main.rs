use dotenvy::dotenv;
use schoolboard::logging::{init_tracing, shutdown_tracer};
use schoolboard::metrics::{init_metrics, metrics_app};
use schoolboard::router::init_router;
use schoolboard::state::init_app_state;
use schoolboard_config::ServerConfig;
use schoolboard_db::run_migrations;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    match init_metrics() {
        Ok(Some(handle)) => {
            let addr = format!("0.0.0.0:{}", server_config.metrics_port);
            match tokio::net::TcpListener::bind(&addr).await {
                Ok(listener) => {
                    info!(%addr, "Metrics listener started");
                    tokio::spawn(async move {
                        if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                            error!(error = %e, "Metrics server stopped");
                        }
                    });
                }
                Err(e) => warn!(%addr, error = %e, "Cannot bind metrics listener"),
            }
        }
        Ok(None) => info!("Observability disabled, metrics not exported"),
        Err(e) => warn!(error = %e, "Failed to install metrics recorder"),
    }

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            shutdown_tracer().await;
            std::process::exit(1);
        }
    };

    if std::env::var("RUN_MIGRATIONS").is_ok_and(|v| v == "true" || v == "1") {
        if let Err(e) = run_migrations(&state.db).await {
            error!(error = %e, "Migrations failed");
            shutdown_tracer().await;
            std::process::exit(1);
        }
        info!("Migrations applied");
    }

    let app = init_router(state);

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Cannot bind server listener");
            shutdown_tracer().await;
            std::process::exit(1);
        }
    };

    println!("🚀 Server running on http://localhost:{}", server_config.port);
    println!("📚 Swagger UI available at http://localhost:{}/swagger-ui", server_config.port);
    println!("📖 Scalar UI available at http://localhost:{}/scalar", server_config.port);

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server error");
    }

    shutdown_tracer().await;
}
