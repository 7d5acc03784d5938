pub mod auth;
mod db;
pub mod errors;
mod http;
mod middleware;
pub mod models;
pub mod ratings;
pub mod score;
mod state;

use axum::{Router, middleware as axum_middleware};
use middleware::{
    cors_layer, create_global_rate_limiter, create_mutation_rate_limiter, rate_limit_middleware,
};
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::{net::SocketAddr, time::Duration};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub async fn start_server() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let postgres = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&postgres)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        postgres,
        rating_guards: Default::default(),
        mutation_limiter: create_mutation_rate_limiter(),
    };

    let global_rate_limiter = create_global_rate_limiter();

    let app = Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors_layer())
        .fallback(|| async { "404 Not Found" });

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3001);

    tracing::info!("Travel Buddy rating service running on port {port}");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
