// --------------------------------------------------
// Handles API endpoints for weather data.
//
// Weather is read-only: seeded with the database and served as-is.
// --------------------------------------------------

use axum::{extract::State, Json};

use crate::models::{ForecastDay, WeatherAlert, WeatherSnapshot};
use crate::state::AppState;

// -----------------------------
// GET /api/weather
// -----------------------------
pub async fn get_current_weather(State(state): State<AppState>) -> Json<WeatherSnapshot> {
    Json(state.db().weather.current.clone())
}

// -----------------------------
// GET /api/weather/forecast
// -----------------------------
pub async fn get_forecast(State(state): State<AppState>) -> Json<Vec<ForecastDay>> {
    Json(state.db().weather.forecast.clone())
}

// -----------------------------
// GET /api/weather/alerts
// -----------------------------
pub async fn get_alerts(State(state): State<AppState>) -> Json<Vec<WeatherAlert>> {
    Json(state.db().weather.alerts.clone())
}
