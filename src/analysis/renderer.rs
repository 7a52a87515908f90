//! Partitions the sentence into plain runs and annotated units.
//!
//! The scan keeps a cursor and two flags per component: `started` (it has
//! contributed to a unit) and `consumed` (a unit reached its end). A component
//! is finished once consumed and never reconsidered.

use super::resolver::LocatedComponent;
use super::role::MatchRule;
use serde::Serialize;

/// One component's share of an annotated unit.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub component: LocatedComponent,
    /// The unit begins at the component's start.
    pub opens: bool,
    /// The unit ends at the component's end.
    pub closes: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedUnit {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Components covering this unit, shortest first.
    pub overlaps: Vec<Overlap>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderSegment {
    Plain { text: String, start: usize, end: usize },
    Annotated(AnnotatedUnit),
}

impl RenderSegment {
    pub fn text(&self) -> &str {
        match self {
            RenderSegment::Plain { text, .. } => text,
            RenderSegment::Annotated(unit) => &unit.text,
        }
    }

    pub fn range(&self) -> (usize, usize) {
        match self {
            RenderSegment::Plain { start, end, .. } => (*start, *end),
            RenderSegment::Annotated(unit) => (unit.start, unit.end),
        }
    }

    pub fn overlaps(&self) -> &[Overlap] {
        match self {
            RenderSegment::Plain { .. } => &[],
            RenderSegment::Annotated(unit) => &unit.overlaps,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, RenderSegment::Plain { .. })
    }
}

struct Scan<'a> {
    sentence: &'a str,
    components: &'a [LocatedComponent],
    started: Vec<bool>,
    consumed: Vec<bool>,
    segments: Vec<RenderSegment>,
}

impl<'a> Scan<'a> {
    fn new(sentence: &'a str, components: &'a [LocatedComponent]) -> Self {
        Scan {
            sentence,
            components,
            started: vec![false; components.len()],
            consumed: vec![false; components.len()],
            segments: Vec::new(),
        }
    }

    fn live(&self) -> impl Iterator<Item = (usize, &'a LocatedComponent)> + '_ {
        self.components
            .iter()
            .enumerate()
            .filter(move |(i, _)| !self.consumed[*i])
    }

    /// Strict components only join at their own start; once started they
    /// behave like any other component until their end.
    fn covers(&self, idx: usize, cursor: usize) -> bool {
        let c = &self.components[idx];
        match c.match_rule() {
            MatchRule::Strict if !self.started[idx] => c.start == cursor && c.end > cursor,
            _ => c.start <= cursor && cursor < c.end,
        }
    }

    /// Earliest start of a live component strictly inside `(cursor, limit)`.
    fn next_start(&self, cursor: usize, limit: usize) -> Option<usize> {
        self.live()
            .map(|(_, c)| c.start)
            .filter(|&start| start > cursor && start < limit)
            .min()
    }

    fn push_plain(&mut self, start: usize, end: usize) {
        if start < end {
            self.segments.push(RenderSegment::Plain {
                text: self.sentence[start..end].to_string(),
                start,
                end,
            });
        }
    }

    fn run(mut self) -> Vec<RenderSegment> {
        let len = self.sentence.len();
        let mut cursor = 0;

        while cursor < len {
            let covering: Vec<usize> = self
                .live()
                .map(|(i, _)| i)
                .filter(|&i| self.covers(i, cursor))
                .collect();

            // Shortest span wins; `min_by_key` keeps the first of equals.
            let frame = covering
                .iter()
                .copied()
                .min_by_key(|&i| self.components[i].len());

            let Some(frame) = frame else {
                match self.next_start(cursor, len) {
                    Some(next) => {
                        self.push_plain(cursor, next);
                        cursor = next;
                    }
                    None => {
                        self.push_plain(cursor, len);
                        cursor = len;
                    }
                }
                continue;
            };

            // A crossing component that ends inside the frame closes the unit
            // there, so every overlap contains the unit.
            let frame_end = covering
                .iter()
                .map(|&i| self.components[i].end)
                .min()
                .unwrap_or(self.components[frame].end)
                .min(len);
            // A nested component starting inside the frame anchors its own unit.
            let end = self.next_start(cursor, frame_end).unwrap_or(frame_end);

            if end <= cursor {
                let step = self.sentence[cursor..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.push_plain(cursor, cursor + step);
                cursor += step;
                continue;
            }

            let mut overlaps: Vec<Overlap> = covering
                .iter()
                .map(|&i| {
                    let component = &self.components[i];
                    Overlap {
                        component: component.clone(),
                        opens: component.start == cursor,
                        closes: component.end == end,
                    }
                })
                .collect();
            overlaps.sort_by_key(|o| o.component.len());

            for &i in &covering {
                self.started[i] = true;
                if self.components[i].end <= end {
                    self.consumed[i] = true;
                }
            }

            self.segments.push(RenderSegment::Annotated(AnnotatedUnit {
                text: self.sentence[cursor..end].to_string(),
                start: cursor,
                end,
                overlaps,
            }));
            cursor = end;
        }

        self.segments
    }
}

fn is_valid_range(sentence: &str, component: &LocatedComponent) -> bool {
    component.start < component.end
        && component.end <= sentence.len()
        && sentence.is_char_boundary(component.start)
        && sentence.is_char_boundary(component.end)
}

/// Splits `sentence` into segments that together reproduce it exactly.
///
/// `components` should be sorted by `start` (as returned by
/// [`locate_components`](super::resolver::locate_components)). Components
/// whose range is empty, past the end or off a character boundary are
/// skipped.
pub fn partition(sentence: &str, components: &[LocatedComponent]) -> Vec<RenderSegment> {
    let valid: Vec<LocatedComponent> = components
        .iter()
        .filter(|c| {
            let ok = is_valid_range(sentence, c);
            if !ok {
                log::debug!("Skipping {:?} with invalid range {}..{}", c.text, c.start, c.end);
            }
            ok
        })
        .cloned()
        .collect();
    Scan::new(sentence, &valid).run()
}
