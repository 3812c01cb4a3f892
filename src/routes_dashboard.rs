// --------------------------------------------------
// Handles the dashboard overview endpoint.
//
// The one place that reads across repositories: headline counts, the
// finance summary, and per-farm aggregates (field count / active crops),
// which are always computed here rather than stored on the farm record.
// --------------------------------------------------

use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::finance::{self, FinanceSummary};
use crate::models::{CropStatus, Farm};
use crate::state::AppState;
use crate::temporal;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmOverview {
    #[serde(flatten)]
    pub farm: Farm,
    pub field_count: usize,
    pub active_crops: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub now: String,
    pub total_farms: usize,
    pub total_fields: usize,
    pub active_crops: usize,
    pub pending_tasks: usize,
    pub overdue_tasks: usize,
    pub due_soon_tasks: usize,
    pub finance: FinanceSummary,
    pub farms: Vec<FarmOverview>,
}

// -----------------------------
// GET /api/dashboard
// -----------------------------
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let now = temporal::now_fixed_offset();
    let db = state.db();

    let active_crops = db.crops.filter(|c| c.status != CropStatus::Harvested);

    let pending = db.tasks.filter(|t| !t.completed);
    let overdue_tasks = pending
        .iter()
        .filter(|t| temporal::is_overdue(Some(t.due_date), now))
        .count();
    let due_soon_tasks = pending
        .iter()
        .filter(|t| temporal::is_due_soon(Some(t.due_date), now, temporal::DUE_SOON_DAYS))
        .count();

    let farms = db
        .farms
        .all()
        .into_iter()
        .map(|farm| {
            let field_ids: HashSet<u32> = db
                .fields
                .filter(|f| f.farm_id == farm.id)
                .into_iter()
                .map(|f| f.id)
                .collect();

            FarmOverview {
                field_count: field_ids.len(),
                active_crops: active_crops
                    .iter()
                    .filter(|c| field_ids.contains(&c.field_id))
                    .count(),
                farm,
            }
        })
        .collect();

    Json(DashboardResponse {
        now: now.to_rfc3339(),
        total_farms: db.farms.len(),
        total_fields: db.fields.len(),
        active_crops: active_crops.len(),
        pending_tasks: pending.len(),
        overdue_tasks,
        due_soon_tasks,
        finance: finance::summary(&db.transactions.all(), now),
        farms,
    })
}
