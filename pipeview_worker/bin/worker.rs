use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pipeview_worker::env::{get_bind_address, get_pipelines_dir, get_repository_name};
use pipeview_worker::repository::RepositoryIndex;
use pipeview_worker::routes::{get_pipelines, ping, resolve_subset};
use pipeview_worker::yaml::load_repository;
use pipeview_worker::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let bind_address = get_bind_address();
    let pipelines_dir = get_pipelines_dir();
    let repository_name = get_repository_name();

    let repository = load_repository(&repository_name, Path::new(&pipelines_dir))?;
    info!(
        "loaded {} pipeline(s) into repository {repository_name} from {pipelines_dir}",
        repository.len()
    );

    let mut index = RepositoryIndex::new();
    index.add_repository(repository);

    let state = Arc::new(AppState {
        index,
        location_ref: bind_address.clone(),
    });

    let app = Router::new()
        .route("/ping", get(ping))
        .route("/pipelines", get(get_pipelines))
        .route("/pipeline/subset", post(resolve_subset))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    println!("Running pipeview worker on {bind_address}");

    let listener = TcpListener::bind(&bind_address).await?;

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
