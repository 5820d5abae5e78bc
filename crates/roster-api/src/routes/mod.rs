//! Route definitions
//!
//! All API routes, mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{config, days, health, recognition, snapshots, views};
use crate::state::AppState;

/// API router (health routes are separate so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(snapshot_routes())
        .merge(day_routes())
        .merge(view_routes())
        .merge(config_routes())
        .route("/recognize-name", post(recognition::recognize_name))
}

fn snapshot_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snapshots",
            get(snapshots::list_snapshots).post(snapshots::create_snapshot),
        )
        .route("/snapshots/copy", post(snapshots::copy_selection))
        .route("/snapshots/bulk", patch(snapshots::bulk_update))
        .route(
            "/snapshots/:id",
            get(snapshots::get_snapshot)
                .put(snapshots::update_snapshot)
                .delete(snapshots::delete_snapshot),
        )
}

fn day_routes() -> Router<AppState> {
    Router::new()
        .route("/days/:date/stats", get(days::day_stats))
        .route("/days/:date/copy-previous", post(days::copy_previous_day))
        .route("/days/:date/reset-duel", post(days::reset_duel))
        .route("/days/:date/dedupe", post(days::deduplicate))
}

fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/views/roster", get(views::roster))
        .route("/views/power", get(views::power_ranking))
        .route("/views/duel", get(views::duel_ranking))
        .route("/views/duel/weekly", get(views::weekly_duel))
        .route("/views/progress/power", get(views::power_progress))
        .route("/views/progress/duel", get(views::duel_progress))
}

fn config_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(config::get_config).patch(config::update_config))
        .route("/config/logo", put(config::set_logo))
}
