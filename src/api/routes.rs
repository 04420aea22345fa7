//! API Route Configuration

use axum::{
    extract::State,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use super::handlers::{self, AppState};
use super::middleware::logging_middleware;
use super::types::ApiError;
use crate::models::{AcCommand, AcMode, AcTempControl, AcTimerControl, LightMode};

/// Fixed light route, reachable by GET and POST
fn light(mode: LightMode) -> MethodRouter<Arc<AppState>> {
    let handler =
        move |State(state): State<Arc<AppState>>| handlers::set_light_mode(state, mode);
    get(handler).post(handler)
}

/// Fixed AC route, reachable by GET and POST
fn ac(command: AcCommand) -> MethodRouter<Arc<AppState>> {
    let handler =
        move |State(state): State<Arc<AppState>>| handlers::run_ac_command(state, command);
    get(handler).post(handler)
}

fn light_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/modes", get(handlers::light_modes))
        .route("/on", light(LightMode::On))
        .route("/off", light(LightMode::Off))
        .route("/bright", light(LightMode::Bright))
        .route("/dark", light(LightMode::Dark))
        .route("/all-bright", light(LightMode::AllBright))
        .route(
            "/mode/:mode",
            get(handlers::set_light_mode_by_name).post(handlers::set_light_mode_by_name),
        )
}

fn ac_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(handlers::ac_status))
        // Mode
        .route("/aircon/on", ac(AcCommand::Mode(AcMode::AirconOn)))
        .route("/heater/on", ac(AcCommand::Mode(AcMode::HeaterOn)))
        .route("/off", ac(AcCommand::Mode(AcMode::Off)))
        // Temperature
        .route(
            "/aircon/temp/up",
            ac(AcCommand::Temp(AcTempControl::AirconTempUp)),
        )
        .route(
            "/heater/temp/up",
            ac(AcCommand::Temp(AcTempControl::HeaterTempUp)),
        )
        .route(
            "/heater/temp/down",
            ac(AcCommand::Temp(AcTempControl::HeaterTempDown)),
        )
        // Timer
        .route("/timer/on", ac(AcCommand::Timer(AcTimerControl::TimerOn)))
        .route("/timer/up", ac(AcCommand::Timer(AcTimerControl::TimerUp)))
        .route("/timer/down", ac(AcCommand::Timer(AcTimerControl::TimerDown)))
        .route(
            "/command/:command",
            get(handlers::ac_command_by_name).post(handlers::ac_command_by_name),
        )
}

/// Panics inside a handler become a JSON 500 instead of a dropped connection
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    error!(detail = %detail, "Handler panicked");

    ApiError::internal(detail).into_response()
}

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::get_stats))
        .nest("/light", light_routes())
        .nest("/ac", ac_routes())
        .fallback(handlers::not_found)
        .with_state(state)
        // Outermost first
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
}
