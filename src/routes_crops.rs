// --------------------------------------------------
// Handles API endpoints for crop CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete crops
// - Filter crops by parent field
// - Report the computed growth stage for a crop
// --------------------------------------------------

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::growth;
use crate::models::{Crop, CropStatus};
use crate::state::AppState;
use crate::temporal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropsQuery {
    pub field_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropInput {
    pub name: String,
    pub variety: Option<String>,
    pub field_id: u32,
    pub planting_date: DateTime<FixedOffset>,
    pub expected_harvest_date: DateTime<FixedOffset>,
    pub status: CropStatus,
    pub notes: Option<String>,
}

impl CropInput {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name required".to_string()));
        }
        Ok(())
    }

    fn into_record(self) -> Crop {
        Crop {
            id: 0,
            name: self.name,
            variety: self.variety,
            field_id: self.field_id,
            planting_date: self.planting_date,
            expected_harvest_date: self.expected_harvest_date,
            status: self.status,
            notes: self.notes,
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropGrowthResponse {
    #[serde(rename = "Id")]
    pub id: u32,
    pub stage: String,
    pub progress: u8,
    pub days_until_harvest: Option<i64>,
}

// -----------------------------
// GET /api/crops?fieldId=N
// -----------------------------
pub async fn list_crops(
    State(state): State<AppState>,
    Query(q): Query<CropsQuery>,
) -> Json<Vec<Crop>> {
    let db = state.db();
    let crops = match q.field_id {
        Some(field_id) => db.crops.filter(|c| c.field_id == field_id),
        None => db.crops.all(),
    };
    Json(crops)
}

// -----------------------------
// GET /api/crops/:id
// -----------------------------
pub async fn get_crop(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Crop>> {
    Ok(Json(state.db().crops.get(id)?))
}

// -----------------------------
// GET /api/crops/:id/growth
// Computed stage and progress for the crop's planting window.
// An explicit harvested status overrides the computed stage.
// -----------------------------
pub async fn get_crop_growth(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<CropGrowthResponse>> {
    let now = temporal::now_fixed_offset();
    let crop = state.db().crops.get(id)?;

    let estimated = growth::growth_stage(
        Some(crop.planting_date),
        Some(crop.expected_harvest_date),
        now,
    );
    let stage = if crop.status == CropStatus::Harvested {
        "harvested".to_string()
    } else {
        estimated.stage.as_str().to_string()
    };

    Ok(Json(CropGrowthResponse {
        id: crop.id,
        stage,
        progress: estimated.progress,
        days_until_harvest: growth::days_until_harvest(
            Some(crop.planting_date),
            Some(crop.expected_harvest_date),
            now,
        ),
    }))
}

// -----------------------------
// POST /api/crops
// -----------------------------
pub async fn create_crop(
    State(state): State<AppState>,
    Json(input): Json<CropInput>,
) -> AppResult<Json<Crop>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let crop = db.crops.create(input.into_record(), now);
    state.persist(&db)?;

    Ok(Json(crop))
}

// -----------------------------
// PUT /api/crops/:id
// -----------------------------
pub async fn update_crop(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<CropInput>,
) -> AppResult<Json<Crop>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let crop = db.crops.update(id, input.into_record(), now)?;
    state.persist(&db)?;

    Ok(Json(crop))
}

// -----------------------------
// DELETE /api/crops/:id
// -----------------------------
pub async fn delete_crop(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Value>> {
    let mut db = state.db_mut();
    db.crops.delete(id)?;
    state.persist(&db)?;

    Ok(Json(json!({ "ok": true })))
}
