//! Step-by-step conversation flow.
//!
//! Browsing goes neighborhood → category → landmark, first for the start and
//! then for the destination. Free-text mode takes typed questions instead.
//! The machine knows nothing about the transport carrying the messages.

mod machine;
mod state;

pub use machine::{advance, step};
pub use state::{ConversationState, Input, Step, TransitionError};
