//! Plain-text painter for an [`Analysis`].
//!
//! ```text
//! He is happy.
//!    ╰── SC
//!       ╰───╯ SC
//!       ────╯ SC
//! ```
//!
//! One line per component share of a unit. Underlined roles use `╰─╯`,
//! phrases `(─)`, clauses `[─]`; an edge glyph is only drawn where the
//! component really starts or ends, otherwise the line just continues.

use crate::analysis::role::Decoration;
use crate::analysis::{Analysis, FragmentGroup, Overlap, RenderSegment};
use unicode_width::UnicodeWidthStr;

fn edge_glyphs(decoration: Decoration) -> (char, char) {
    match decoration {
        Decoration::Underline => ('╰', '╯'),
        Decoration::Brackets(shape) => shape.glyphs(),
        Decoration::LabelOnly => ('^', '─'),
    }
}

fn marker(overlap: &Overlap, width: usize) -> String {
    let style = overlap.component.style();
    let (open, close) = edge_glyphs(style.decoration);
    let open = if overlap.opens { open } else { '─' };
    let close = if overlap.closes && style.decoration != Decoration::LabelOnly {
        close
    } else {
        '─'
    };

    let mut line = String::new();
    if width <= 1 {
        line.push(if overlap.opens || !overlap.closes { open } else { close });
    } else {
        line.push(open);
        line.extend(std::iter::repeat('─').take(width - 2));
        line.push(close);
    }
    line
}

/// The sentence followed by one marker line per component share.
pub fn render_text(analysis: &Analysis) -> String {
    let mut out = analysis.sentence.clone();
    for segment in &analysis.segments {
        let RenderSegment::Annotated(unit) = segment else {
            continue;
        };
        let column = UnicodeWidthStr::width(&analysis.sentence[..unit.start]);
        let width = UnicodeWidthStr::width(unit.text.as_str());
        for overlap in &unit.overlaps {
            out.push('\n');
            out.push_str(&" ".repeat(column));
            out.push_str(&marker(overlap, width));
            out.push(' ');
            out.push_str(&overlap.component.style().label);
        }
    }
    out
}

/// The fragments grouped by tag, with role descriptions when present.
pub fn render_groups(groups: &[FragmentGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&group.kind);
        for entry in &group.entries {
            out.push_str("\n  ");
            out.push_str(&entry.text);
            if let Some(role) = &entry.role {
                out.push_str(": ");
                out.push_str(role);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::types::analysis_data::LabeledFragment;

    fn fragments(pairs: &[(&str, &str)]) -> Vec<LabeledFragment> {
        pairs
            .iter()
            .map(|(kind, text)| LabeledFragment::new(*kind, *text))
            .collect()
    }

    #[test]
    fn simple_sentence() {
        let analysis = analyze(
            "He is happy.",
            &fragments(&[("subject", "He"), ("verb", "is"), ("subject complement", "happy")]),
        );
        insta::assert_snapshot!(render_text(&analysis), @r###"
He is happy.
╰╯ S
   ╰╯ V
      ╰───╯ SC
"###);
    }

    #[test]
    fn nested_complement_continues_across_units() {
        let analysis = analyze(
            "He is happy.",
            &fragments(&[("subject complement", "is happy"), ("subject complement", "happy")]),
        );
        insta::assert_snapshot!(render_text(&analysis), @r###"
He is happy.
   ╰── SC
      ╰───╯ SC
      ────╯ SC
"###);
    }

    #[test]
    fn phrases_and_modifiers() {
        let analysis = analyze(
            "She really likes the red car",
            &fragments(&[("adverb", "really"), ("noun phrase", "the red car")]),
        );
        insta::assert_snapshot!(render_text(&analysis), @r###"
She really likes the red car
    ^───── adverb
                 (─────────) noun phrase
"###);
    }

    #[test]
    fn no_components_is_just_the_sentence() {
        let analysis = analyze("Nothing to see.", &[]);
        assert_eq!(render_text(&analysis), "Nothing to see.");
    }

    #[test]
    fn grouped_listing() {
        let analysis = analyze(
            "He is happy.",
            &[
                LabeledFragment::new("subject", "He"),
                LabeledFragment::new("verb", "is").with_role("linking verb"),
                LabeledFragment::new("subject", "happy"),
            ],
        );
        insta::assert_snapshot!(render_groups(&analysis.groups), @r###"
subject
  He
  happy
verb
  is: linking verb
"###);
    }
}
