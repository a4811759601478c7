//! HTTP API for the attendance and liquidation engine.
//!
//! A thin axum surface over the library: one endpoint to reconcile
//! punches into jornadas, one to run a liquidation.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{LiquidateRequest, ReconcileRequest};
pub use response::{ApiError, ReconcileResponse};
pub use state::AppState;
