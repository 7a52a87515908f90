pub mod grouping;
pub mod renderer;
pub mod resolver;
pub mod role;

pub use grouping::{group_by_type, FragmentGroup};
pub use renderer::{partition, AnnotatedUnit, Overlap, RenderSegment};
pub use resolver::{locate_components, LocatedComponent};
pub use role::{GrammaticalRole, MatchRule, RoleStyle};

use crate::types::analysis_data::{AnalysisResponse, LabeledFragment};
use serde::Serialize;

/// Everything the presentation layer shows for one analyzed sentence.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub sentence: String,
    pub components: Vec<LocatedComponent>,
    pub segments: Vec<RenderSegment>,
    pub groups: Vec<FragmentGroup>,
}

/// Runs the resolver and renderer. Pure: equal inputs give equal output.
pub fn analyze(sentence: &str, fragments: &[LabeledFragment]) -> Analysis {
    let components = locate_components(sentence, fragments);
    let segments = partition(sentence, &components);
    Analysis {
        sentence: sentence.to_string(),
        components,
        segments,
        groups: group_by_type(fragments),
    }
}

impl From<&AnalysisResponse> for Analysis {
    fn from(response: &AnalysisResponse) -> Self {
        analyze(&response.sentence, response.fragments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_components_renders_plain_sentence() {
        let response = AnalysisResponse {
            sentence: "He is happy.".to_string(),
            components: None,
            raw_response: Some("I could not produce JSON.".to_string()),
        };
        let analysis = Analysis::from(&response);
        assert!(analysis.components.is_empty());
        assert!(analysis.groups.is_empty());
        assert_eq!(analysis.segments.len(), 1);
        assert!(analysis.segments[0].is_plain());
    }

    #[test]
    fn dropped_fragments_still_appear_in_groups() {
        let analysis = analyze(
            "He is happy.",
            &[
                LabeledFragment::new("subject", "He"),
                LabeledFragment::new("object", "the moon"),
            ],
        );
        assert_eq!(analysis.components.len(), 1);
        assert_eq!(analysis.groups.len(), 2);
        assert_eq!(analysis.groups[1].entries[0].text, "the moon");
    }
}
