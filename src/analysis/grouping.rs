use crate::types::analysis_data::LabeledFragment;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FragmentGroup {
    /// The tag as first written by the model.
    #[serde(rename = "type")]
    pub kind: String,
    pub entries: Vec<LabeledFragment>,
}

/// Groups raw fragments by tag in order of first appearance.
///
/// Tags are compared exactly as written, so the listing mirrors the model
/// output. Fragments the resolver could not place are listed too.
pub fn group_by_type(fragments: &[LabeledFragment]) -> Vec<FragmentGroup> {
    let mut groups: Vec<FragmentGroup> = Vec::new();
    for fragment in fragments {
        match groups.iter_mut().find(|g| g.kind == fragment.kind) {
            Some(group) => group.entries.push(fragment.clone()),
            None => groups.push(FragmentGroup {
                kind: fragment.kind.clone(),
                entries: vec![fragment.clone()],
            }),
        }
    }
    groups
}
