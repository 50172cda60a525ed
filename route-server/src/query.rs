//! Free-text query parsing.
//!
//! Pulls a start phrase and an end phrase out of questions such as
//! "إزاي أروح من المستشفى العام لـ الجامعة؟". Three patterns are tried in
//! order and the first one that matches decides the result:
//!
//! 1. from/to: `من X إلى Y`
//! 2. how-do-I-get-to: `إزاي أروح Y` (destination only)
//! 3. generic split on the first connector keyword found
//!
//! The phrases are not resolved here; see [`crate::landmarks::FuzzyMatcher`].

use regex::Regex;
use tracing::{debug, warn};

/// Connector keyword sets used by the parser.
#[derive(Debug, Clone)]
pub struct Keywords {
    /// Keywords introducing the start phrase.
    pub from: Vec<String>,
    /// Keywords introducing the end phrase.
    pub to: Vec<String>,
    /// Question words ("how").
    pub question: Vec<String>,
    /// Motion verbs ("go", "get to").
    pub motion: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            from: words(&["من", "من عند", "بدءاً من", "انطلاقاً من", "ابتداءً من"]),
            to: words(&["إلى", "الى", "لـ", "ل", "حتى", "وصولاً إلى", "باتجاه"]),
            question: words(&["إزاي", "ازاي", "كيف", "طريقة"]),
            motion: words(&["أروح", "اروح", "أوصل", "اوصل"]),
        }
    }
}

/// Which pattern produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPattern {
    FromTo,
    HowToGet,
    Split,
}

/// Extracts `(start, end)` phrases from free text.
#[derive(Debug, Clone)]
pub struct QueryParser {
    from_to: Regex,
    how_to: Regex,
    /// Connector keywords in split precedence order (from, then to).
    connectors: Vec<Regex>,
    /// Question and motion words dropped from split candidates.
    filler: Vec<String>,
}

impl QueryParser {
    /// Compile the patterns for a keyword set.
    pub fn new(keywords: Keywords) -> Result<Self, regex::Error> {
        let from = alternation(&keywords.from);
        let to = alternation(&keywords.to);
        let question = alternation(&keywords.question);
        let motion = alternation(&keywords.motion);

        let from_to = Regex::new(&format!(
            r"(?:^|\s)(?:{from})\s+(.+?)\s+(?:{to})\s+(.+)$"
        ))?;
        let how_to = Regex::new(&format!(
            r"(?:^|\s)(?:{question})\s+(?:{motion})\s+(?:(?:{to})\s+)?(.+)$"
        ))?;

        let connectors = keywords
            .from
            .iter()
            .chain(keywords.to.iter())
            .map(|kw| Regex::new(&format!(r"(?:^|\s){}(?:\s|$)", keyword_pattern(kw))))
            .collect::<Result<Vec<_>, _>>()?;

        let filler = keywords
            .question
            .iter()
            .chain(keywords.motion.iter())
            .cloned()
            .collect();

        Ok(Self {
            from_to,
            how_to,
            connectors,
            filler,
        })
    }

    /// Extract the start and end phrases.
    ///
    /// Returns `(None, None)` when no pattern matches.
    pub fn extract(&self, text: &str) -> (Option<String>, Option<String>) {
        match self.extract_with_pattern(text) {
            Some((_, start, end)) => (start, end),
            None => (None, None),
        }
    }

    /// Like [`extract`](Self::extract), also reporting the pattern that matched.
    ///
    /// The connector split matches connectors as whole words only, so `ل`
    /// inside `الجامعة` never splits. A connector that is itself a word of a
    /// landmark name still mis-segments; that case is logged, not corrected.
    pub fn extract_with_pattern(
        &self,
        text: &str,
    ) -> Option<(QueryPattern, Option<String>, Option<String>)> {
        let text = text.trim().trim_end_matches(['?', '؟']).trim();
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = self.from_to.captures(text) {
            let start = caps.get(1).map(|m| m.as_str()).and_then(phrase);
            let end = caps.get(2).map(|m| m.as_str()).and_then(phrase);
            debug!(?start, ?end, "matched from/to pattern");
            return Some((QueryPattern::FromTo, start, end));
        }

        if let Some(caps) = self.how_to.captures(text) {
            let end = caps.get(1).map(|m| m.as_str()).and_then(phrase);
            debug!(?end, "matched how-to-get pattern");
            return Some((QueryPattern::HowToGet, None, end));
        }

        let connector = self.connectors.iter().find(|re| re.is_match(text))?;
        let mut parts = connector.splitn(text, 2);
        let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
            return None;
        };
        if self.connectors.iter().any(|re| re.is_match(first) || re.is_match(second)) {
            // A landmark name may itself contain a connector; keep the first split
            warn!(text, "connector appears more than once, split may be wrong");
        }
        let start = phrase(&self.strip_filler(first));
        let end = phrase(&self.strip_filler(second));
        debug!(?start, ?end, "matched connector split");
        Some((QueryPattern::Split, start, end))
    }

    fn strip_filler(&self, s: &str) -> String {
        s.split_whitespace()
            .filter(|word| !self.filler.iter().any(|f| f == word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Regex alternation of keywords, longest first so that `من عند` wins over `من`.
fn alternation(keywords: &[String]) -> String {
    let mut sorted: Vec<&String> = keywords.iter().filter(|k| !k.trim().is_empty()).collect();
    sorted.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    sorted
        .into_iter()
        .map(|k| keyword_pattern(k))
        .collect::<Vec<_>>()
        .join("|")
}

/// A keyword as a regex fragment; inner spaces match any whitespace run.
fn keyword_pattern(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

fn phrase(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
