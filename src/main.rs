// Define data modules
mod error; // Central error type (NotFound / Validation / Store)
mod models; // Data structures (entities, enums, Db)
mod repo; // Generic record collections (CRUD facade)
mod state; // Shared application state
mod store; // Persistent storage (load/save db.json)

// Derived-state modules, independent from HTTP
mod finance; // Financial aggregation
mod growth; // Growth-stage estimation
mod temporal; // Relative-time and urgency classification

// HTTP handlers, one module per resource
mod routes_crops;
mod routes_dashboard;
mod routes_equipment;
mod routes_farms;
mod routes_fields;
mod routes_finance;
mod routes_labors;
mod routes_tasks;
mod routes_weather;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("info")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path =
        std::env::var("FARM_DB").unwrap_or_else(|_| store::DEFAULT_DB_PATH.to_string());

    // A broken or missing database file never blocks startup: reads fall
    // back to the seed, writes will recreate the file.
    let db = match store::load_db(&db_path) {
        Ok(db) => db,
        Err(e) => {
            tracing::warn!("could not load {db_path}: {e}; starting from seed data");
            models::Db::seed()
        }
    };

    let state = AppState::new(db, db_path);

    let api = Router::new()
        // dashboard
        .route("/dashboard", get(routes_dashboard::get_dashboard))
        // farms
        .route(
            "/farms",
            get(routes_farms::list_farms).post(routes_farms::create_farm),
        )
        .route(
            "/farms/:id",
            get(routes_farms::get_farm)
                .put(routes_farms::update_farm)
                .delete(routes_farms::delete_farm),
        )
        // fields
        .route(
            "/fields",
            get(routes_fields::list_fields).post(routes_fields::create_field),
        )
        .route(
            "/fields/:id",
            get(routes_fields::get_field)
                .put(routes_fields::update_field)
                .delete(routes_fields::delete_field),
        )
        // crops
        .route(
            "/crops",
            get(routes_crops::list_crops).post(routes_crops::create_crop),
        )
        .route(
            "/crops/:id",
            get(routes_crops::get_crop)
                .put(routes_crops::update_crop)
                .delete(routes_crops::delete_crop),
        )
        .route("/crops/:id/growth", get(routes_crops::get_crop_growth))
        // tasks
        .route(
            "/tasks",
            get(routes_tasks::list_tasks).post(routes_tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes_tasks::get_task)
                .put(routes_tasks::update_task)
                .delete(routes_tasks::delete_task),
        )
        .route("/tasks/:id/complete", post(routes_tasks::complete_task))
        // equipment
        .route(
            "/equipment",
            get(routes_equipment::list_equipment).post(routes_equipment::create_equipment),
        )
        .route(
            "/equipment/maintenance/due",
            get(routes_equipment::list_due_for_maintenance),
        )
        .route(
            "/equipment/:id",
            get(routes_equipment::get_equipment)
                .put(routes_equipment::update_equipment)
                .delete(routes_equipment::delete_equipment),
        )
        // labors
        .route(
            "/labors",
            get(routes_labors::list_labors).post(routes_labors::create_labor),
        )
        .route(
            "/labors/available",
            get(routes_labors::list_available_labors),
        )
        .route(
            "/labors/:id",
            get(routes_labors::get_labor)
                .put(routes_labors::update_labor)
                .delete(routes_labors::delete_labor),
        )
        // finance
        .route(
            "/finance/transactions",
            get(routes_finance::list_transactions).post(routes_finance::create_transaction),
        )
        .route(
            "/finance/transactions/:id",
            get(routes_finance::get_transaction)
                .put(routes_finance::update_transaction)
                .delete(routes_finance::delete_transaction),
        )
        .route("/finance/summary", get(routes_finance::get_summary))
        .route("/finance/categories", get(routes_finance::get_categories))
        .route("/finance/trends", get(routes_finance::get_trends))
        // weather
        .route("/weather", get(routes_weather::get_current_weather))
        .route("/weather/forecast", get(routes_weather::get_forecast))
        .route("/weather/alerts", get(routes_weather::get_alerts));

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/", ServeDir::new("static"))
        .with_state(state);

    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();

    tracing::info!("server running at http://{addr}");
    tracing::info!("API base: http://{addr}/api");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server error");
}
