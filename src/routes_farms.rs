// --------------------------------------------------
// Handles API endpoints for farm CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete farms
// --------------------------------------------------

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::Farm;
use crate::state::AppState;
use crate::temporal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmInput {
    pub name: String,
    pub location: String,
    pub total_area: f64,
    pub soil_type: String,
}

impl FarmInput {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name required".to_string()));
        }
        if !(self.total_area > 0.0) {
            return Err(AppError::Validation(
                "totalArea must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn into_record(self) -> Farm {
        Farm {
            id: 0,
            name: self.name,
            location: self.location,
            total_area: self.total_area,
            soil_type: self.soil_type,
            created_at: None,
            updated_at: None,
        }
    }
}

// -----------------------------
// GET /api/farms
// -----------------------------
pub async fn list_farms(State(state): State<AppState>) -> Json<Vec<Farm>> {
    Json(state.db().farms.all())
}

// -----------------------------
// GET /api/farms/:id
// -----------------------------
pub async fn get_farm(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Farm>> {
    Ok(Json(state.db().farms.get(id)?))
}

// -----------------------------
// POST /api/farms
// -----------------------------
pub async fn create_farm(
    State(state): State<AppState>,
    Json(input): Json<FarmInput>,
) -> AppResult<Json<Farm>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let farm = db.farms.create(input.into_record(), now);
    state.persist(&db)?;

    Ok(Json(farm))
}

// -----------------------------
// PUT /api/farms/:id
// -----------------------------
pub async fn update_farm(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<FarmInput>,
) -> AppResult<Json<Farm>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let farm = db.farms.update(id, input.into_record(), now)?;
    state.persist(&db)?;

    Ok(Json(farm))
}

// -----------------------------
// DELETE /api/farms/:id
// -----------------------------
pub async fn delete_farm(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Value>> {
    let mut db = state.db_mut();
    db.farms.delete(id)?;
    state.persist(&db)?;

    Ok(Json(json!({ "ok": true })))
}
