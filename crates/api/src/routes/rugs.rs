//! Route definitions for the `/rugs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::rugs;
use crate::state::AppState;

/// Routes mounted at `/rugs`.
///
/// ```text
/// GET    /                 -> list
/// GET    /filter           -> filter
/// GET    /names            -> names
/// GET    /{rug_number}     -> get_by_rug_number
/// PUT    /{rug_number}     -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rugs::list))
        .route("/filter", get(rugs::filter))
        .route("/names", get(rugs::names))
        .route(
            "/{rug_number}",
            get(rugs::get_by_rug_number).put(rugs::update),
        )
}
