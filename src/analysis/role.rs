//! Closed vocabulary of grammatical roles and their decoration policy.
//!
//! Every role is described once in [`ROLE_TABLE`]; tag parsing, matching
//! strictness, labels and colors are all looked up there.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammaticalRole {
    Subject,
    ExpletiveSubject,
    RealSubject,
    LogicalSubject,
    Verb,
    Object,
    IndirectObject,
    DirectObject,
    SubjectComplement,
    ObjectComplement,
    NounPhrase,
    GerundPhrase,
    InfinitiveNounPhrase,
    WhInfinitivePhrase,
    PresentParticiplePhrase,
    PastParticiplePhrase,
    PrepositionalAdjectivePhrase,
    InfinitiveAdjectivePhrase,
    AdverbPhrase,
    PrepositionalAdverbPhrase,
    InfinitiveAdverbPhrase,
    PrepositionalPhrase,
    ParticipialConstruction,
    ThatClause,
    WhClause,
    IfWhetherClause,
    WhatClause,
    SubjectRelativeClause,
    ObjectRelativeClause,
    PossessiveRelativeClause,
    RelativeAdverbClause,
    AdverbClause,
    CoordinateClause,
    ParentheticalClause,
    Adverb,
    Conjunction,
}

/// How a fragment is located in the sentence and joined during partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Case-insensitive word-boundary search; joins any unit it contains.
    Tolerant,
    /// Case-sensitive word-boundary search; joins only at its own start.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketShape {
    Round,
    Square,
}

impl BracketShape {
    pub fn glyphs(self) -> (char, char) {
        match self {
            BracketShape::Round => ('(', ')'),
            BracketShape::Square => ('[', ']'),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Underline plus a short abbreviation below the text.
    Underline,
    /// Bracket nesting plus a label above the text.
    Brackets(BracketShape),
    /// Label above the text, nothing else.
    LabelOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Blue,
    Red,
    Green,
    Indigo,
    Purple,
    Yellow,
    Amber,
    Gray,
}

impl Palette {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Palette::Blue => (0x25, 0x63, 0xeb),
            Palette::Red => (0xdc, 0x26, 0x26),
            Palette::Green => (0x16, 0xa3, 0x4a),
            Palette::Indigo => (0x4f, 0x46, 0xe5),
            Palette::Purple => (0x93, 0x33, 0xea),
            Palette::Yellow => (0xea, 0xb3, 0x08),
            Palette::Amber => (0x92, 0x40, 0x0e),
            Palette::Gray => (0x6b, 0x72, 0x80),
        }
    }
}

pub struct RoleSpec {
    pub role: GrammaticalRole,
    /// Canonical tag, already normalized.
    pub name: &'static str,
    /// Extra accepted tags, already normalized.
    pub aliases: &'static [&'static str],
    pub label: &'static str,
    pub decoration: Decoration,
    pub palette: Palette,
}

const ROUND: Decoration = Decoration::Brackets(BracketShape::Round);
const SQUARE: Decoration = Decoration::Brackets(BracketShape::Square);

macro_rules! role {
    ($role:ident, $name:literal, [$($alias:literal),*], $label:literal, $decoration:expr, $palette:ident) => {
        RoleSpec {
            role: GrammaticalRole::$role,
            name: $name,
            aliases: &[$($alias),*],
            label: $label,
            decoration: $decoration,
            palette: Palette::$palette,
        }
    };
}

pub static ROLE_TABLE: &[RoleSpec] = &[
    role!(Subject, "subject", ["s"], "S", Decoration::Underline, Blue),
    role!(ExpletiveSubject, "expletive subject", ["dummy subject", "(e)s"], "(E)S", Decoration::Underline, Blue),
    role!(RealSubject, "real subject", ["true subject", "(r)s"], "(R)S", Decoration::Underline, Blue),
    role!(LogicalSubject, "logical subject", ["semantic subject", "(l)s"], "(L)S", Decoration::Underline, Blue),
    role!(Verb, "verb", ["v"], "V", Decoration::Underline, Red),
    role!(Object, "object", ["o"], "O", Decoration::Underline, Green),
    role!(IndirectObject, "indirect object", ["io"], "IO", Decoration::Underline, Green),
    role!(DirectObject, "direct object", ["do"], "DO", Decoration::Underline, Green),
    role!(SubjectComplement, "subject complement", ["sc"], "SC", Decoration::Underline, Indigo),
    role!(ObjectComplement, "object complement", ["oc"], "OC", Decoration::Underline, Indigo),
    role!(NounPhrase, "noun phrase", ["np"], "noun phrase", ROUND, Purple),
    role!(GerundPhrase, "gerund phrase", ["gerund"], "gerund", ROUND, Purple),
    role!(InfinitiveNounPhrase, "infinitive phrase (noun)", ["to infinitive phrase (noun)"], "to-inf (n)", ROUND, Purple),
    role!(WhInfinitivePhrase, "wh infinitive phrase", ["wh infinitive", "wh word + infinitive"], "wh + to-inf", ROUND, Purple),
    role!(PresentParticiplePhrase, "present participle phrase", ["present participle"], "present participle", ROUND, Yellow),
    role!(PastParticiplePhrase, "past participle phrase", ["past participle"], "past participle", ROUND, Yellow),
    role!(PrepositionalAdjectivePhrase, "prepositional phrase (adjective)", ["adjectival prepositional phrase"], "prep phrase (adj)", ROUND, Yellow),
    role!(InfinitiveAdjectivePhrase, "infinitive phrase (adjective)", ["to infinitive phrase (adjective)"], "to-inf (adj)", ROUND, Yellow),
    role!(AdverbPhrase, "adverb phrase", ["adverbial phrase"], "adverb phrase", ROUND, Amber),
    role!(PrepositionalAdverbPhrase, "prepositional phrase (adverb)", ["adverbial prepositional phrase"], "prep phrase (adv)", ROUND, Amber),
    role!(InfinitiveAdverbPhrase, "infinitive phrase (adverb)", ["to infinitive phrase (adverb)"], "to-inf (adv)", ROUND, Amber),
    role!(PrepositionalPhrase, "prepositional phrase", ["pp"], "prep phrase", ROUND, Amber),
    role!(ParticipialConstruction, "participial construction", ["participle clause"], "participial", ROUND, Amber),
    role!(ThatClause, "that clause", ["noun that clause"], "that clause", SQUARE, Green),
    role!(WhClause, "wh clause", ["interrogative clause"], "wh clause", SQUARE, Green),
    role!(IfWhetherClause, "if/whether clause", ["whether clause", "if clause"], "if/whether clause", SQUARE, Green),
    role!(WhatClause, "what clause", ["relative what clause"], "what clause", SQUARE, Green),
    role!(SubjectRelativeClause, "subject relative clause", ["relative clause"], "relative clause", SQUARE, Purple),
    role!(ObjectRelativeClause, "object relative clause", [], "relative clause", SQUARE, Purple),
    role!(PossessiveRelativeClause, "possessive relative clause", [], "relative clause", SQUARE, Purple),
    role!(RelativeAdverbClause, "relative adverb clause", [], "relative adverb clause", SQUARE, Purple),
    role!(AdverbClause, "adverb clause", ["adverbial clause"], "adverb clause", SQUARE, Red),
    role!(CoordinateClause, "coordinate clause", [], "coordinate clause", SQUARE, Red),
    role!(ParentheticalClause, "parenthetical clause", [], "parenthetical", SQUARE, Red),
    role!(Adverb, "adverb", ["adv"], "adverb", Decoration::LabelOnly, Amber),
    role!(Conjunction, "conjunction", ["conj"], "conjunction", Decoration::LabelOnly, Purple),
];

/// Trims, lower-cases and collapses internal whitespace. `-` and `_` count as
/// whitespace so `object-complement` and `object_complement` match too.
pub fn normalize_tag(tag: &str) -> String {
    tag.to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl GrammaticalRole {
    pub fn parse(tag: &str) -> Option<Self> {
        let key = normalize_tag(tag);
        ROLE_TABLE
            .iter()
            .find(|spec| spec.name == key || spec.aliases.contains(&key.as_str()))
            .map(|spec| spec.role)
    }

    pub fn spec(self) -> &'static RoleSpec {
        ROLE_TABLE
            .iter()
            .find(|spec| spec.role == self)
            .unwrap_or(&ROLE_TABLE[0])
    }

    pub fn match_rule(self) -> MatchRule {
        match self {
            GrammaticalRole::ObjectComplement | GrammaticalRole::PrepositionalPhrase => {
                MatchRule::Strict
            }
            _ => MatchRule::Tolerant,
        }
    }
}

/// Everything a presentation adapter needs to decorate one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleStyle {
    pub label: Cow<'static, str>,
    pub decoration: Decoration,
    pub palette: Palette,
}

impl RoleStyle {
    /// Style for a tag. Tags outside the vocabulary are shown label-only
    /// with their own text.
    pub fn for_tag(role: Option<GrammaticalRole>, raw_tag: &str) -> Self {
        match role {
            Some(role) => {
                let spec = role.spec();
                RoleStyle {
                    label: Cow::Borrowed(spec.label),
                    decoration: spec.decoration,
                    palette: spec.palette,
                }
            }
            None => RoleStyle {
                label: Cow::Owned(raw_tag.trim().to_string()),
                decoration: Decoration::LabelOnly,
                palette: Palette::Gray,
            },
        }
    }
}

pub struct LegendEntry {
    pub palette: Palette,
    pub glyph: Option<char>,
    pub caption: &'static str,
}

pub static LEGEND: &[LegendEntry] = &[
    LegendEntry { palette: Palette::Blue, glyph: None, caption: "subject (S, (E)S, (R)S, (L)S)" },
    LegendEntry { palette: Palette::Red, glyph: None, caption: "verb (V)" },
    LegendEntry { palette: Palette::Green, glyph: None, caption: "object (O, IO, DO)" },
    LegendEntry { palette: Palette::Indigo, glyph: None, caption: "complement (SC, OC)" },
    LegendEntry { palette: Palette::Purple, glyph: Some('('), caption: "noun phrase" },
    LegendEntry { palette: Palette::Yellow, glyph: Some('('), caption: "adjective phrase" },
    LegendEntry { palette: Palette::Amber, glyph: Some('('), caption: "adverb phrase" },
    LegendEntry { palette: Palette::Green, glyph: Some('['), caption: "noun clause" },
    LegendEntry { palette: Palette::Purple, glyph: Some('['), caption: "adjective clause" },
    LegendEntry { palette: Palette::Red, glyph: Some('['), caption: "adverb clause" },
    LegendEntry { palette: Palette::Amber, glyph: None, caption: "adverb" },
    LegendEntry { palette: Palette::Purple, glyph: None, caption: "conjunction" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_case_and_whitespace_insensitively() {
        assert_eq!(
            GrammaticalRole::parse("  Object   Complement "),
            Some(GrammaticalRole::ObjectComplement)
        );
        assert_eq!(
            GrammaticalRole::parse("OBJECT_COMPLEMENT"),
            Some(GrammaticalRole::ObjectComplement)
        );
        assert_eq!(GrammaticalRole::parse("IO"), Some(GrammaticalRole::IndirectObject));
        assert_eq!(
            GrammaticalRole::parse("Prepositional Phrase (Adverb)"),
            Some(GrammaticalRole::PrepositionalAdverbPhrase)
        );
        assert_eq!(GrammaticalRole::parse("interjection"), None);
    }

    #[test]
    fn only_object_complement_and_prepositional_phrase_are_strict() {
        let strict: Vec<_> = ROLE_TABLE
            .iter()
            .filter(|spec| spec.role.match_rule() == MatchRule::Strict)
            .map(|spec| spec.role)
            .collect();
        assert_eq!(
            strict,
            vec![
                GrammaticalRole::ObjectComplement,
                GrammaticalRole::PrepositionalPhrase
            ]
        );
    }

    #[test]
    fn table_names_are_normalized_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for spec in ROLE_TABLE {
            for key in std::iter::once(&spec.name).chain(spec.aliases.iter()) {
                assert_eq!(normalize_tag(key), *key, "{key} is not normalized");
                assert!(seen.insert(*key), "{key} appears twice");
            }
            assert_eq!(spec.role.spec().name, spec.name);
        }
    }

    #[test]
    fn decoration_groups() {
        let style = |role: GrammaticalRole| RoleStyle::for_tag(Some(role), "");
        assert_eq!(style(GrammaticalRole::Verb).decoration, Decoration::Underline);
        assert_eq!(style(GrammaticalRole::Verb).label, "V");
        assert_eq!(
            style(GrammaticalRole::GerundPhrase).decoration,
            Decoration::Brackets(BracketShape::Round)
        );
        assert_eq!(
            style(GrammaticalRole::AdverbClause).decoration,
            Decoration::Brackets(BracketShape::Square)
        );
        assert_eq!(style(GrammaticalRole::Conjunction).decoration, Decoration::LabelOnly);

        let unknown = RoleStyle::for_tag(None, " Interjection ");
        assert_eq!(unknown.label, "Interjection");
        assert_eq!(unknown.decoration, Decoration::LabelOnly);
    }
}
