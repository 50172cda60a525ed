//! The transition function.

use tracing::debug;

use crate::domain::normalize;
use crate::planner::{ResolutionResult, Resolver, render_text};

use super::state::{ConversationState, Input, Step, TransitionError};

/// Apply one input to a state.
///
/// Choosing the end landmark resolves the route and returns to the main
/// menu; text in free-text mode resolves and stays there.
pub fn advance(
    state: &ConversationState,
    input: Input,
    resolver: &Resolver<'_>,
) -> Result<Step, TransitionError> {
    use ConversationState as S;

    debug!(state = state.name(), input = input.name(), "conversation input");

    let next = match (state, input) {
        (_, Input::Cancel | Input::Begin) => S::MainMenu,

        (S::MainMenu, Input::Structured) => S::StartNeighborhood,
        (S::MainMenu, Input::FreeText) => S::TextSearch,
        (S::MainMenu | S::TextSearch, Input::Text(text)) => {
            let result = resolver.resolve_from_text(&text);
            return Ok(with_result(S::TextSearch, result, resolver));
        }

        (S::StartNeighborhood, Input::Select(value)) => S::StartCategory {
            neighborhood: pick(state, &value, neighborhoods(resolver))?,
        },
        (S::StartCategory { neighborhood }, Input::Select(value)) => S::StartLandmark {
            neighborhood: neighborhood.clone(),
            category: pick(state, &value, categories(resolver, neighborhood))?,
        },
        (S::StartLandmark { neighborhood, category }, Input::Select(value)) => S::EndNeighborhood {
            start: pick(state, &value, landmarks(resolver, neighborhood, category))?,
        },
        (S::EndNeighborhood { start }, Input::Select(value)) => S::EndCategory {
            start: start.clone(),
            neighborhood: pick(state, &value, neighborhoods(resolver))?,
        },
        (S::EndCategory { start, neighborhood }, Input::Select(value)) => S::EndLandmark {
            start: start.clone(),
            neighborhood: neighborhood.clone(),
            category: pick(state, &value, categories(resolver, neighborhood))?,
        },
        (
            S::EndLandmark {
                start,
                neighborhood,
                category,
            },
            Input::Select(value),
        ) => {
            let end = pick(state, &value, landmarks(resolver, neighborhood, category))?;
            let result = resolver.resolve(start, &end);
            return Ok(with_result(S::MainMenu, result, resolver));
        }

        (_, Input::Back) => back(state, resolver),

        (state, input) => {
            return Err(TransitionError::Unexpected {
                state: state.name(),
                input: input.name(),
            });
        }
    };

    Ok(step(next, resolver))
}

/// The step shown on entering `state`.
pub fn step(state: ConversationState, resolver: &Resolver<'_>) -> Step {
    use ConversationState as S;

    let (prompt, options) = match &state {
        S::MainMenu => (
            "أهلاً بك! 🚌 اختر طريقة البحث:\n• البحث خطوة بخطوة: اختيار الحي والمعالم\n• البحث الذكي: اكتب سؤالك مباشرة".to_string(),
            Vec::new(),
        ),
        S::StartNeighborhood => (
            "اختر **حي البداية**:".to_string(),
            neighborhoods(resolver),
        ),
        S::StartCategory { neighborhood } => (
            format!("📍 حي البداية: {neighborhood}\n\nاختر **التصنيف**:"),
            categories(resolver, neighborhood),
        ),
        S::StartLandmark {
            neighborhood,
            category,
        } => (
            format!(
                "📍 حي البداية: {neighborhood}\n🏷️ التصنيف: {category}\n\nالآن اختر **المعلم / المكان المحدد** الذي ستبدأ منه:"
            ),
            landmarks(resolver, neighborhood, category),
        ),
        S::EndNeighborhood { start } => (
            format!("📍 نقطة البداية: {start}\n\nاختر **حي الوجهة**:"),
            neighborhoods(resolver),
        ),
        S::EndCategory {
            start,
            neighborhood,
        } => (
            format!("📍 نقطة البداية: {start}\n🏁 حي الوجهة: {neighborhood}\n\nاختر **تصنيف الوجهة**:"),
            categories(resolver, neighborhood),
        ),
        S::EndLandmark {
            start,
            neighborhood,
            category,
        } => (
            format!(
                "📍 نقطة البداية: {start}\n🏁 حي الوجهة: {neighborhood}\n🏷️ تصنيف الوجهة: {category}\n\nالآن اختر **المعلم / المكان المحدد** للوجهة:"
            ),
            landmarks(resolver, neighborhood, category),
        ),
        S::TextSearch => (
            "🔍 اكتب سؤالك، مثلاً: إزاي أروح من المستشفى العام لـ الجامعة؟".to_string(),
            Vec::new(),
        ),
    };

    Step {
        state,
        prompt,
        options,
        result: None,
    }
}

fn with_result(state: ConversationState, result: ResolutionResult, resolver: &Resolver<'_>) -> Step {
    let prompt = render_text(&result, resolver.config().transfer_points_shown);
    Step {
        result: Some(result),
        prompt,
        ..step(state, resolver)
    }
}

fn back(state: &ConversationState, resolver: &Resolver<'_>) -> ConversationState {
    use ConversationState as S;

    match state {
        S::MainMenu | S::StartNeighborhood | S::TextSearch => S::MainMenu,
        S::StartCategory { .. } => S::StartNeighborhood,
        S::StartLandmark { neighborhood, .. } => S::StartCategory {
            neighborhood: neighborhood.clone(),
        },
        S::EndNeighborhood { start } => match resolver.snapshot().index.lookup(start) {
            Some(landmark) => S::StartLandmark {
                neighborhood: landmark.neighborhood.clone(),
                category: landmark.category.clone(),
            },
            None => S::StartNeighborhood,
        },
        S::EndCategory { start, .. } => S::EndNeighborhood {
            start: start.clone(),
        },
        S::EndLandmark {
            start,
            neighborhood,
            ..
        } => S::EndCategory {
            start: start.clone(),
            neighborhood: neighborhood.clone(),
        },
    }
}

/// Match a selection against the offered options, ignoring case and spacing.
fn pick(
    state: &ConversationState,
    value: &str,
    options: Vec<String>,
) -> Result<String, TransitionError> {
    let wanted = normalize(value);
    options
        .into_iter()
        .find(|o| normalize(o) == wanted)
        .ok_or_else(|| TransitionError::UnknownOption {
            state: state.name(),
            option: value.to_string(),
        })
}

fn neighborhoods(resolver: &Resolver<'_>) -> Vec<String> {
    resolver
        .snapshot()
        .index
        .neighborhoods()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn categories(resolver: &Resolver<'_>, neighborhood: &str) -> Vec<String> {
    resolver
        .snapshot()
        .index
        .categories(neighborhood)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn landmarks(resolver: &Resolver<'_>, neighborhood: &str, category: &str) -> Vec<String> {
    resolver
        .snapshot()
        .index
        .landmarks_in(neighborhood, category)
        .into_iter()
        .map(|l| l.name.clone())
        .collect()
}
