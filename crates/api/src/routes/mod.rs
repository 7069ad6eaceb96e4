pub mod health;
pub mod rugs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /rugs                  paginated sellable listing
/// /rugs/filter           filtered full listing
/// /rugs/names            distinct names for the name picker
/// /rugs/{rug_number}     get, partial update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/rugs", rugs::router())
}
