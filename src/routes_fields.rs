// --------------------------------------------------
// Handles API endpoints for field CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete fields
// - Filter fields by parent farm
// --------------------------------------------------

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::Field;
use crate::state::AppState;
use crate::temporal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldsQuery {
    pub farm_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInput {
    pub name: String,
    pub size: f64,
    pub coordinates: String,
    pub farm_id: u32,
}

impl FieldInput {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name required".to_string()));
        }
        if !(self.size > 0.0) {
            return Err(AppError::Validation("size must be positive".to_string()));
        }
        Ok(())
    }

    fn into_record(self) -> Field {
        Field {
            id: 0,
            name: self.name,
            size: self.size,
            coordinates: self.coordinates,
            farm_id: self.farm_id,
            created_at: None,
            updated_at: None,
        }
    }
}

// -----------------------------
// GET /api/fields?farmId=N
// -----------------------------
pub async fn list_fields(
    State(state): State<AppState>,
    Query(q): Query<FieldsQuery>,
) -> Json<Vec<Field>> {
    let db = state.db();
    let fields = match q.farm_id {
        Some(farm_id) => db.fields.filter(|f| f.farm_id == farm_id),
        None => db.fields.all(),
    };
    Json(fields)
}

// -----------------------------
// GET /api/fields/:id
// -----------------------------
pub async fn get_field(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Field>> {
    Ok(Json(state.db().fields.get(id)?))
}

// -----------------------------
// POST /api/fields
// -----------------------------
pub async fn create_field(
    State(state): State<AppState>,
    Json(input): Json<FieldInput>,
) -> AppResult<Json<Field>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let field = db.fields.create(input.into_record(), now);
    state.persist(&db)?;

    Ok(Json(field))
}

// -----------------------------
// PUT /api/fields/:id
// -----------------------------
pub async fn update_field(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<FieldInput>,
) -> AppResult<Json<Field>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let field = db.fields.update(id, input.into_record(), now)?;
    state.persist(&db)?;

    Ok(Json(field))
}

// -----------------------------
// DELETE /api/fields/:id
// -----------------------------
pub async fn delete_field(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Value>> {
    let mut db = state.db_mut();
    db.fields.delete(id)?;
    state.persist(&db)?;

    Ok(Json(json!({ "ok": true })))
}
