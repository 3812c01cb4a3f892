// --------------------------------------------------
// Handles API endpoints for finance records and reports.
//
// Responsibilities:
// - Create / read / update / delete transactions
// - Dashboard summary (monthly + all-time totals)
// - Per-category breakdown and trailing monthly trend
// --------------------------------------------------

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::finance::{self, CategoryTotal, FinanceSummary, TrendPoint};
use crate::models::{Transaction, TransactionKind};
use crate::state::AppState;
use crate::temporal;

const DEFAULT_TREND_MONTHS: u32 = 6;

#[derive(Debug, Deserialize)]
pub struct TransactionInput {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category: String,
    // defaults to today when omitted
    pub date: Option<NaiveDate>,
}

impl TransactionInput {
    fn validate(&self) -> AppResult<()> {
        if !(self.amount > 0.0) || !self.amount.is_finite() {
            return Err(AppError::Validation(
                "amount must be a positive number".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::Validation("description required".to_string()));
        }
        if !finance::valid_category(self.kind, &self.category) {
            return Err(AppError::Validation(format!(
                "unknown category \"{}\"",
                self.category
            )));
        }
        Ok(())
    }

    fn into_record(self, today: NaiveDate) -> Transaction {
        Transaction {
            id: 0,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date.unwrap_or(today),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub months: Option<u32>,
}

// -----------------------------
// GET /api/finance/transactions
// Newest first: date descending, then id descending.
// -----------------------------
pub async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    let mut transactions = state.db().transactions.all();
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    Json(transactions)
}

// -----------------------------
// GET /api/finance/transactions/:id
// -----------------------------
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Transaction>> {
    Ok(Json(state.db().transactions.get(id)?))
}

// -----------------------------
// POST /api/finance/transactions
// -----------------------------
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(input): Json<TransactionInput>,
) -> AppResult<Json<Transaction>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let transaction = db
        .transactions
        .create(input.into_record(now.date_naive()), now);
    state.persist(&db)?;

    tracing::info!(
        "transaction {} recorded: {} ({})",
        transaction.id,
        finance::format_currency(transaction.amount),
        transaction.category
    );

    Ok(Json(transaction))
}

// -----------------------------
// PUT /api/finance/transactions/:id
// -----------------------------
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(input): Json<TransactionInput>,
) -> AppResult<Json<Transaction>> {
    input.validate()?;
    let now = temporal::now_fixed_offset();

    let mut db = state.db_mut();
    let transaction = db
        .transactions
        .update(id, input.into_record(now.date_naive()), now)?;
    state.persist(&db)?;

    Ok(Json(transaction))
}

// -----------------------------
// DELETE /api/finance/transactions/:id
// -----------------------------
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<Value>> {
    let mut db = state.db_mut();
    db.transactions.delete(id)?;
    state.persist(&db)?;

    Ok(Json(json!({ "ok": true })))
}

// -----------------------------
// GET /api/finance/summary
// -----------------------------
pub async fn get_summary(State(state): State<AppState>) -> Json<FinanceSummary> {
    let now = temporal::now_fixed_offset();
    Json(finance::summary(&state.db().transactions.all(), now))
}

// -----------------------------
// GET /api/finance/categories?type=expense
// -----------------------------
pub async fn get_categories(
    State(state): State<AppState>,
    Query(q): Query<CategoriesQuery>,
) -> Json<Vec<CategoryTotal>> {
    Json(finance::by_category(
        &state.db().transactions.all(),
        q.kind,
    ))
}

// -----------------------------
// GET /api/finance/trends?months=6
// -----------------------------
pub async fn get_trends(
    State(state): State<AppState>,
    Query(q): Query<TrendsQuery>,
) -> Json<Vec<TrendPoint>> {
    let now = temporal::now_fixed_offset();
    let months = q.months.unwrap_or(DEFAULT_TREND_MONTHS).max(1);
    Json(finance::monthly_trend(
        &state.db().transactions.all(),
        months,
        now,
    ))
}
