//! Web layer for the route resolver.
//!
//! Provides HTTP endpoints for structured and free-text queries, landmark
//! browsing, and the step-by-step conversation.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
