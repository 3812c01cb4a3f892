// --------------------------------------------------
// Handles API endpoints for labor (worker) CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete workers
// - Filter workers by role (substring match)
// - List workers currently available for assignment
// --------------------------------------------------

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{EmergencyContact, Labor, LaborStatus};
use crate::state::AppState;
use crate::temporal;

#[derive(Debug, Deserialize)]
pub struct LaborsQuery {
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborInput {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub hourly_rate: f64,
    pub status: Option<LaborStatus>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub hire_date: NaiveDate,
    #[serde(default)]
    pub total_hours_worked: f64,
    #[serde(default)]
    pub current_tasks: Vec<u32>,
    pub emergency_contact: EmergencyContact,
}

impl LaborInput {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name required".to_string()));
        }
        if self.role.trim().is_empty() {
            return Err(AppError::Validation("role required".to_string()));
        }
        if self.hourly_rate < 0.0 {
            return Err(AppError::Validation(
                "hourlyRate must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn into_record(self) -> Labor {
        Labor {
            id: 0,
            name: self.name,
            role: self.role,
            email: self.email,
            phone: self.phone,
            hourly_rate: self.hourly_rate,
            status: self.status.unwrap_or(LaborStatus::Available),
            skills: self.skills,
            certifications: self.certifications,
            hire_date: self.hire_date,
            total_hours_worked: self.total_hours_worked,
            current_tasks: self.current_tasks,
            emergency_contact: self.emergency_contact,
            created_at: None,
            updated_at: None,
        }
    }
}

// -----------------------------
// GET /api/labors?role=harvest
// -----------------------------
pub async fn list_labors(
    State(state): State<AppState>,
    Query(q): Query<LaborsQuery>,
) -> Json<Vec<Labor>> {
    let db = state.db();
    let labors = match q.role {
        Some(role) => {
            let needle = role.to_lowercase();
            db.labors
                .filter(|l| l.role.to_lowercase().contains(&needle))
        }
        None => db.labors.all(),
    };
    Json(labors)
}

// -----------------------------
// GET /api/labors/available
// -----------------------------
pub async fn list_available_labors(State(state): State<AppState>) -> Json<Vec<Labor>> {
    Json(
        state
            .db()
            .labors
            .filter(|l| l.status == LaborStatus::Available),
    )
}

// -----------------------------
// GET /api/labors/:id
// -----------------------------
pub async fn get_labor(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Labor>> {
    Ok(Json(state.db().labors.get(id)?))
}

// -----------------------------
// POST /api/labors
// -----------------------------
pub async fn create_labor(
    State(state): State<AppState>,
    Json(input): Json<LaborInput>,
) -> AppResult<Json<Labor>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let labor = db.labors.create(input.into_record(), now);
    state.persist(&db)?;

    Ok(Json(labor))
}

// -----------------------------
// PUT /api/labors/:id
// -----------------------------
pub async fn update_labor(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<LaborInput>,
) -> AppResult<Json<Labor>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let labor = db.labors.update(id, input.into_record(), now)?;
    state.persist(&db)?;

    Ok(Json(labor))
}

// -----------------------------
// DELETE /api/labors/:id
// -----------------------------
pub async fn delete_labor(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Value>> {
    let mut db = state.db_mut();
    db.labors.delete(id)?;
    state.persist(&db)?;

    Ok(Json(json!({ "ok": true })))
}
