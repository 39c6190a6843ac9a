//! Web layer for the transit router.
//!
//! Answers stat requests against a preloaded network, or whole documents
//! against a throwaway one.

mod routes;
mod state;

pub use routes::{AppError, ErrorResponse, create_router};
pub use state::AppState;
