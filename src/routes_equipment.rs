// --------------------------------------------------
// Handles API endpoints for equipment CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete equipment
// - Filter equipment by status
// - List equipment due for maintenance within the next 30 days
// --------------------------------------------------

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Equipment, EquipmentStatus};
use crate::state::AppState;
use crate::temporal;

// Maintenance lookahead window, in days.
const MAINTENANCE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
pub struct EquipmentQuery {
    pub status: Option<EquipmentStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub status: Option<EquipmentStatus>,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: Option<NaiveDate>,
    pub cost: f64,
    pub notes: Option<String>,
}

impl EquipmentInput {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name required".to_string()));
        }
        if self.cost < 0.0 {
            return Err(AppError::Validation(
                "cost must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn into_record(self) -> Equipment {
        Equipment {
            id: 0,
            name: self.name,
            kind: self.kind,
            brand: self.brand,
            model: self.model,
            purchase_date: self.purchase_date,
            status: self.status.unwrap_or(EquipmentStatus::Operational),
            last_maintenance: self.last_maintenance,
            next_maintenance: self.next_maintenance,
            cost: self.cost,
            notes: self.notes,
            created_at: None,
            updated_at: None,
        }
    }
}

// -----------------------------
// GET /api/equipment?status=operational
// -----------------------------
pub async fn list_equipment(
    State(state): State<AppState>,
    Query(q): Query<EquipmentQuery>,
) -> Json<Vec<Equipment>> {
    let db = state.db();
    let equipment = match q.status {
        Some(status) => db.equipment.filter(|e| e.status == status),
        None => db.equipment.all(),
    };
    Json(equipment)
}

// -----------------------------
// GET /api/equipment/maintenance/due
// Anything whose next maintenance date falls inside the lookahead
// window, including dates already past.
// -----------------------------
pub async fn list_due_for_maintenance(State(state): State<AppState>) -> Json<Vec<Equipment>> {
    let now = temporal::now_fixed_offset();
    let cutoff = now.date_naive() + Duration::days(MAINTENANCE_WINDOW_DAYS);

    let due = state
        .db()
        .equipment
        .filter(|e| e.next_maintenance.is_some_and(|d| d <= cutoff));
    Json(due)
}

// -----------------------------
// GET /api/equipment/:id
// -----------------------------
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Equipment>> {
    Ok(Json(state.db().equipment.get(id)?))
}

// -----------------------------
// POST /api/equipment
// -----------------------------
pub async fn create_equipment(
    State(state): State<AppState>,
    Json(input): Json<EquipmentInput>,
) -> AppResult<Json<Equipment>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let equipment = db.equipment.create(input.into_record(), now);
    state.persist(&db)?;

    Ok(Json(equipment))
}

// -----------------------------
// PUT /api/equipment/:id
// -----------------------------
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<EquipmentInput>,
) -> AppResult<Json<Equipment>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let equipment = db.equipment.update(id, input.into_record(), now)?;
    state.persist(&db)?;

    Ok(Json(equipment))
}

// -----------------------------
// DELETE /api/equipment/:id
// -----------------------------
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Value>> {
    let mut db = state.db_mut();
    db.equipment.delete(id)?;
    state.persist(&db)?;

    Ok(Json(json!({ "ok": true })))
}
