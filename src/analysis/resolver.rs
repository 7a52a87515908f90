//! Binds labeled fragments to concrete ranges of the sentence.
//!
//! Offsets are byte offsets into the UTF-8 sentence and always fall on
//! character boundaries, so `&sentence[start..end]` is the matched text.

use super::role::{GrammaticalRole, MatchRule, RoleStyle};
use crate::types::analysis_data::LabeledFragment;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LocatedComponent {
    /// The tag exactly as the model wrote it.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip)]
    pub role: Option<GrammaticalRole>,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl LocatedComponent {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn match_rule(&self) -> MatchRule {
        self.role.map_or(MatchRule::Tolerant, GrammaticalRole::match_rule)
    }

    pub fn style(&self) -> RoleStyle {
        RoleStyle::for_tag(self.role, &self.kind)
    }
}

/// Word-boundary pattern for `text`. A `\b` is only placed on an edge whose
/// character is a word character; `\b` next to punctuation would demand a
/// word character on the other side and never match at the end of a sentence.
fn boundary_pattern(text: &str, rule: MatchRule) -> Option<Regex> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = text.chars().next().map_or(false, is_word);
    let trailing = text.chars().next_back().map_or(false, is_word);

    let pattern = format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        regex::escape(text),
        if trailing { r"\b" } else { "" },
    );
    match RegexBuilder::new(&pattern)
        .case_insensitive(rule == MatchRule::Tolerant)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            log::debug!("Could not build matcher for {:?}: {}", text, e);
            None
        }
    }
}

/// First match of `text` in `sentence` under `rule`.
pub fn find_span(sentence: &str, text: &str, rule: MatchRule) -> Option<(usize, usize)> {
    let re = boundary_pattern(text, rule)?;
    re.find(sentence).map(|m| (m.start(), m.end()))
}

/// Locates every fragment and returns the components sorted by `start`.
///
/// Fragments that cannot be found are dropped, and a fragment whose resolved
/// `(start, text)` was already produced is ignored. Neither case is an error.
pub fn locate_components(sentence: &str, fragments: &[LabeledFragment]) -> Vec<LocatedComponent> {
    let mut components: Vec<LocatedComponent> = Vec::new();

    for fragment in fragments {
        let text = fragment.text.trim();
        if text.is_empty() {
            log::debug!("Dropping {:?} fragment with empty text", fragment.kind);
            continue;
        }

        let role = GrammaticalRole::parse(&fragment.kind);
        let rule = role.map_or(MatchRule::Tolerant, GrammaticalRole::match_rule);

        let Some((start, end)) = find_span(sentence, text, rule) else {
            log::debug!(
                "Dropping {:?} fragment {:?}: not found in sentence",
                fragment.kind,
                text
            );
            continue;
        };

        if components.iter().any(|c| c.start == start && c.text == text) {
            log::debug!(
                "Ignoring duplicate {:?} fragment {:?} at {}",
                fragment.kind,
                text,
                start
            );
            continue;
        }

        components.push(LocatedComponent {
            kind: fragment.kind.clone(),
            role,
            text: text.to_string(),
            start,
            end,
        });
    }

    // Stable, so equal starts keep input order.
    components.sort_by_key(|c| c.start);
    components
}
