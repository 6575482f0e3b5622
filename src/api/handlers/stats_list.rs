//! Handler for the short link listing.

use axum::{Json, extract::State};

use crate::api::dto::stats_list::LinkSummaryItem;
use crate::state::AppState;

/// Lists every short link with its click count, oldest first.
///
/// # Endpoint
///
/// `GET /shorturls`
pub async fn stats_list_handler(State(state): State<AppState>) -> Json<Vec<LinkSummaryItem>> {
    let items = state
        .statistics
        .list_all()
        .into_iter()
        .map(LinkSummaryItem::from)
        .collect();

    Json(items)
}
