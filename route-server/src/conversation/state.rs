//! Conversation states, inputs and steps.

use serde::{Deserialize, Serialize};

use crate::planner::ResolutionResult;

/// Where a conversation currently is.
///
/// Serializable so a front end can keep it client-side and send it back with
/// the next input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    MainMenu,
    StartNeighborhood,
    StartCategory {
        neighborhood: String,
    },
    StartLandmark {
        neighborhood: String,
        category: String,
    },
    EndNeighborhood {
        start: String,
    },
    EndCategory {
        start: String,
        neighborhood: String,
    },
    EndLandmark {
        start: String,
        neighborhood: String,
        category: String,
    },
    TextSearch,
}

impl ConversationState {
    /// Short identifier, as used in the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            ConversationState::MainMenu => "main_menu",
            ConversationState::StartNeighborhood => "start_neighborhood",
            ConversationState::StartCategory { .. } => "start_category",
            ConversationState::StartLandmark { .. } => "start_landmark",
            ConversationState::EndNeighborhood { .. } => "end_neighborhood",
            ConversationState::EndCategory { .. } => "end_category",
            ConversationState::EndLandmark { .. } => "end_landmark",
            ConversationState::TextSearch => "text_search",
        }
    }
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Input {
    /// Start over.
    Begin,
    /// Choose step-by-step browsing.
    Structured,
    /// Choose free-text search.
    FreeText,
    /// Pick one of the offered options.
    Select(String),
    /// Typed text.
    Text(String),
    Back,
    Cancel,
}

impl Input {
    pub fn name(&self) -> &'static str {
        match self {
            Input::Begin => "begin",
            Input::Structured => "structured",
            Input::FreeText => "free_text",
            Input::Select(_) => "select",
            Input::Text(_) => "text",
            Input::Back => "back",
            Input::Cancel => "cancel",
        }
    }
}

/// The machine's answer to one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub state: ConversationState,
    /// Arabic text to show.
    pub prompt: String,
    /// Values accepted by `Input::Select` in `state`.
    pub options: Vec<String>,
    /// Set when the input completed a query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResolutionResult>,
}

/// An input the current state cannot take.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("unknown option {option:?} in state {state}")]
    UnknownOption { state: &'static str, option: String },

    #[error("input {input} is not accepted in state {state}")]
    Unexpected {
        state: &'static str,
        input: &'static str,
    },
}
