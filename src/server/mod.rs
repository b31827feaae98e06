//! Local preview server
//!
//! Serves the listing at `/`, treats every other path as a post identity
//! lookup, and exposes the dismissible error banner for failed post fetches.

mod pages;

use anyhow::Result;
use axum::{
    extract::State,
    http::Uri,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::catalog::AssetCatalog;
use crate::config::BlogConfig;
use crate::content::{MarkdownRenderer, PostLoader, PostStore};
use crate::matcher::PostMatcher;
use crate::view::ViewController;
use crate::Blog;

/// Server state
struct ServerState {
    config: BlogConfig,
    catalog: Arc<AssetCatalog>,
    store: PostStore,
    controller: ViewController,
    /// Title side channel target, written by the view controller's sink
    current_title: Arc<RwLock<String>>,
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let catalog = Arc::new(blog.catalog.clone());
    let store = PostStore::new();

    // Kick off the post fetch fan-out; requests race with it and show the
    // loading state until everything settles.
    let loader = PostLoader::new(blog.assets_dir.clone(), store.clone());
    loader.spawn_load_all(blog.catalog.posts.clone());

    let current_title = Arc::new(RwLock::new(blog.config.title.clone()));
    let sink_target = current_title.clone();

    let controller = ViewController::new(
        catalog.clone(),
        store.clone(),
        PostMatcher::new(blog.config.search.max_suggestions),
        MarkdownRenderer::with_options(
            &blog.config.highlight.theme,
            blog.config.highlight.line_number,
        ),
        Arc::new(move |title: &str| {
            *sink_target.write().unwrap() = title.to_string();
        }),
    );

    let state = Arc::new(ServerState {
        config: blog.config.clone(),
        catalog,
        store,
        controller,
        current_title,
    });

    let app = Router::new()
        .route("/", get(home_handler))
        .route("/__error/dismiss", post(dismiss_handler))
        .nest_service("/assets", ServeDir::new(&blog.assets_dir))
        .fallback(get(post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The listing view
async fn home_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    *state.current_title.write().unwrap() = state.config.title.clone();

    let today = chrono::Local::now().date_naive();
    let body = pages::home(&state.config, &state.catalog.ordered(), today);
    let title = state.current_title.read().unwrap().clone();
    Html(pages::layout(
        &state.config,
        &title,
        state.store.latest_error().as_deref(),
        &body,
    ))
}

/// Every non-root path is interpreted as a post identity lookup
async fn post_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> impl IntoResponse {
    let view = state.controller.navigate(uri.path());

    let body = pages::post(&view);
    let title = state.current_title.read().unwrap().clone();
    Html(pages::layout(
        &state.config,
        &title,
        state.store.latest_error().as_deref(),
        &body,
    ))
}

/// Clear the error banner without retrying anything
async fn dismiss_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    state.store.dismiss_error();
    Redirect::to("/")
}
