// --------------------------------------------------
// Handles API endpoints for task CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete tasks
// - Filter tasks by parent crop
// - Complete a task (the only status transition)
// - Attach urgency flags and a relative due label to list views
// --------------------------------------------------

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Task, TaskPriority};
use crate::state::AppState;
use crate::temporal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    pub crop_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub crop_id: u32,
    pub due_date: DateTime<FixedOffset>,
    pub priority: TaskPriority,
}

impl TaskInput {
    fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("title required".to_string()));
        }
        Ok(())
    }

    // completed / completed_at never come from the caller: a new task
    // starts pending and only the complete endpoint moves it.
    fn into_record(self) -> Task {
        Task {
            id: 0,
            title: self.title,
            description: self.description,
            crop_id: self.crop_id,
            due_date: self.due_date,
            priority: self.priority,
            completed: false,
            completed_at: None,
            created_at: None,
            updated_at: None,
        }
    }
}

// A task plus the urgency semantics the dashboard renders directly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub is_overdue: bool,
    pub is_due_soon: bool,
    pub due_label: String,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub now: String,
    pub tasks: Vec<TaskView>,
}

fn task_view(task: Task, now: DateTime<FixedOffset>) -> TaskView {
    let due = Some(task.due_date);
    TaskView {
        is_overdue: !task.completed && temporal::is_overdue(due, now),
        is_due_soon: !task.completed && temporal::is_due_soon(due, now, temporal::DUE_SOON_DAYS),
        due_label: temporal::format_relative(due, now),
        task,
    }
}

// -----------------------------
// GET /api/tasks?cropId=N
// -----------------------------
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(q): Query<TasksQuery>,
) -> Json<TasksResponse> {
    let now = temporal::now_fixed_offset();
    let db = state.db();

    let tasks = match q.crop_id {
        Some(crop_id) => db.tasks.filter(|t| t.crop_id == crop_id),
        None => db.tasks.all(),
    };

    Json(TasksResponse {
        now: now.to_rfc3339(),
        tasks: tasks.into_iter().map(|t| task_view(t, now)).collect(),
    })
}

// -----------------------------
// GET /api/tasks/:id
// -----------------------------
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Task>> {
    Ok(Json(state.db().tasks.get(id)?))
}

// -----------------------------
// POST /api/tasks
// -----------------------------
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<TaskInput>,
) -> AppResult<Json<Task>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let task = db.tasks.create(input.into_record(), now);
    state.persist(&db)?;

    Ok(Json(task))
}

// -----------------------------
// PUT /api/tasks/:id
// Full-record replace; completion state is owned by the complete
// endpoint and carried over from the stored record.
// -----------------------------
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<TaskInput>,
) -> AppResult<Json<Task>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let existing = db.tasks.get(id)?;

    let mut record = input.into_record();
    record.completed = existing.completed;
    record.completed_at = existing.completed_at;

    let task = db.tasks.update(id, record, now)?;
    state.persist(&db)?;

    Ok(Json(task))
}

// -----------------------------
// POST /api/tasks/:id/complete
// pending -> completed, the only transition. Completing an already
// completed task returns it unchanged.
// -----------------------------
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Task>> {
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let task = db.tasks.modify(id, |t| {
        if !t.completed {
            t.completed = true;
            t.completed_at = Some(now);
        }
    })?;
    state.persist(&db)?;

    Ok(Json(task))
}

// -----------------------------
// DELETE /api/tasks/:id
// -----------------------------
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Value>> {
    let mut db = state.db_mut();
    db.tasks.delete(id)?;
    state.persist(&db)?;

    Ok(Json(json!({ "ok": true })))
}
