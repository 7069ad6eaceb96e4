//! Handlers for the `/rugs` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use rugcat_core::error::CoreError;
use rugcat_core::filter::{distinct_names, FilterInput, RugFilter};
use rugcat_core::pagination::Page;
use rugcat_db::models::rug::{Rug, UpdateRug};
use rugcat_db::repositories::RugRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::ListParams;
use crate::state::AppState;

/// Filtered catalog response.
#[derive(Debug, Serialize)]
pub struct FilteredRugs {
    pub items: Vec<Rug>,
    pub total: usize,
}

fn not_found(rug_number: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Rug",
        key: rug_number,
    })
}

/// GET /api/rugs
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Rug>>> {
    let request = params.page_request();
    let items =
        RugRepo::list_sellable(&state.pool, request.offset(), request.limit()).await?;
    let total = RugRepo::count_sellable(&state.pool).await?;
    Ok(Json(Page::new(items, total, request)))
}

/// GET /api/rugs/{rug_number}
pub async fn get_by_rug_number(
    State(state): State<AppState>,
    Path(rug_number): Path<String>,
) -> AppResult<Json<Rug>> {
    let rug = RugRepo::find_by_rug_number(&state.pool, &rug_number)
        .await?
        .ok_or_else(|| not_found(rug_number))?;
    Ok(Json(rug))
}

/// PUT /api/rugs/{rug_number}
pub async fn update(
    State(state): State<AppState>,
    Path(rug_number): Path<String>,
    AppJson(input): AppJson<UpdateRug>,
) -> AppResult<Json<Rug>> {
    let input = validate_update(input)?;
    let rug = RugRepo::update_partial(&state.pool, &rug_number, &input)
        .await?
        .ok_or_else(|| not_found(rug_number))?;
    tracing::info!(rug_number = %rug.rug_number, "Rug updated");
    Ok(Json(rug))
}

/// GET /api/rugs/filter
pub async fn filter(
    State(state): State<AppState>,
    Query(input): Query<FilterInput>,
) -> AppResult<Json<FilteredRugs>> {
    let filter = RugFilter::from_input(&input);
    let rugs = RugRepo::list_all_sellable(&state.pool).await?;
    let items: Vec<Rug> = rugs.into_iter().filter(|rug| filter.matches(rug)).collect();
    Ok(Json(FilteredRugs {
        total: items.len(),
        items,
    }))
}

/// GET /api/rugs/names
pub async fn names(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let rugs = RugRepo::list_all_sellable(&state.pool).await?;
    Ok(Json(distinct_names(rugs.iter().map(|r| r.name.as_deref()))))
}

/// Reject values the catalog cannot hold and trim text fields. An explicit
/// `null` passes through and clears the field; blank text does not.
fn validate_update(mut input: UpdateRug) -> Result<UpdateRug, CoreError> {
    if input.price_cents.is_some_and(|p| p <= 0) {
        return Err(CoreError::Validation("priceCents must be greater than 0".into()));
    }
    if input.length_cm.is_some_and(|l| l <= 0) {
        return Err(CoreError::Validation("lengthCm must be greater than 0".into()));
    }
    if input.width_cm.is_some_and(|w| w <= 0) {
        return Err(CoreError::Validation("widthCm must be greater than 0".into()));
    }

    for (field, value) in [
        ("name", &mut input.name),
        ("color", &mut input.color),
        ("imagePath", &mut input.image_path),
    ] {
        if let Some(Some(text)) = value {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(CoreError::Validation(format!(
                    "{field} must not be blank, send null to clear it"
                )));
            }
            *text = trimmed.to_string();
        }
    }
    Ok(input)
}
