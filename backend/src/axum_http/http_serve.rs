use crate::{
    axum_http::{default_routers, routers},
    config::config_model::DotEnvyConfig,
};
use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use crates::{
    infra::db::postgres::postgres_connection::PgPoolSquad, llm::gemini_client::GeminiClient,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let gemini_client = Arc::new(GeminiClient::new(
        config.gemini.api_key.clone(),
        config.gemini.base_url.clone(),
        config.gemini.model.clone(),
        Duration::from_secs(config.gemini.timeout),
    )?);
    info!(model = %config.gemini.model, "Gemini client has been configured");

    let app = Router::new()
        .fallback(default_routers::not_found)
        .merge(liveness_routes())
        .nest("/api", api_routes(&config, db_pool, gemini_client))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.backend_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn liveness_routes() -> Router {
    Router::new()
        .route("/api", get(default_routers::root))
        .route("/api/", get(default_routers::root))
        .route("/api/health-check", get(default_routers::health_check))
}

fn api_routes(
    config: &DotEnvyConfig,
    db_pool: Arc<PgPoolSquad>,
    gemini_client: Arc<GeminiClient>,
) -> Router {
    let max_tokens = config.gemini.max_tokens;

    Router::new()
        .merge(routers::users::routes(Arc::clone(&db_pool)))
        .merge(routers::content_ideas::routes(
            Arc::clone(&db_pool),
            Arc::clone(&gemini_client),
            max_tokens,
        ))
        .merge(routers::profile_analyses::routes(
            Arc::clone(&db_pool),
            gemini_client,
            max_tokens,
        ))
        .merge(routers::payments::routes(Arc::clone(&db_pool)))
        .nest(
            "/admin",
            routers::admin::routes(db_pool, config.admin.clone()),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = ?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = ?err, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn status_of(path: &str) -> StatusCode {
        let app = Router::new()
            .fallback(default_routers::not_found)
            .merge(liveness_routes());
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn api_root_answers_with_and_without_trailing_slash() {
        assert_eq!(status_of("/api").await, StatusCode::OK);
        assert_eq!(status_of("/api/").await, StatusCode::OK);
        assert_eq!(status_of("/api/health-check").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_path_falls_through_to_not_found() {
        assert_eq!(status_of("/api/nope").await, StatusCode::NOT_FOUND);
    }
}
