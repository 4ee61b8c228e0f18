//! HTTP control surface
//!
//! Exposes the interview session to a front end:
//! - GET /health - Health check
//! - GET /session - Current session snapshot
//! - POST /affordances/:id - Press a control (start, record, next, end)
//! - DELETE /status/:id - Dismiss a status entry
//! - GET /report - Report left in the handoff slot

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
