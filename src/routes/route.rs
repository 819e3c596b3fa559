use axum::{extract::State, routing::get, Json, Router};

use crate::state::AppState;
use crate::types::route::RouteSummary;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/route", get(route_summary))
}

async fn route_summary(State(state): State<AppState>) -> Json<RouteSummary> {
    Json(state.route().summary())
}
