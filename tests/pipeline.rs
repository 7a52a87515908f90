use sentence_lens::analysis::{analyze, RenderSegment};
use sentence_lens::completion::{Analyzer, CompletionClient};
use sentence_lens::presentation::render_text;
use sentence_lens::types::analysis_data::{LabeledFragment, PromptConfig};
use sentence_lens::Result;

struct FixedReply(&'static str);

impl CompletionClient for FixedReply {
    fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

fn assert_partition(sentence: &str, segments: &[RenderSegment]) {
    let mut cursor = 0;
    for segment in segments {
        let (start, end) = segment.range();
        assert_eq!(start, cursor, "segments must be contiguous: {:?}", segment);
        assert!(end > start, "segments must not be empty: {:?}", segment);
        cursor = end;
    }
    assert_eq!(cursor, sentence.len());
    assert_eq!(segments.iter().map(RenderSegment::text).collect::<String>(), sentence);
}

#[test]
fn model_reply_to_annotated_segments() {
    let reply = "```json\n{\n  \"components\": [\n    {\"type\": \"Subject\", \"text\": \"He\"},\n    {\"type\": \"verb\", \"text\": \"is\"},\n    {\"type\": \"subject complement\", \"text\": \"happy\"}\n  ]\n}\n```";
    let analyzer = Analyzer::new(FixedReply(reply), PromptConfig::default());
    let response = analyzer.analyze("He is happy.").unwrap();
    let analysis = analyze(&response.sentence, response.fragments());

    assert_partition("He is happy.", &analysis.segments);
    let texts: Vec<(&str, usize)> = analysis
        .segments
        .iter()
        .map(|s| (s.text(), s.overlaps().len()))
        .collect();
    assert_eq!(
        texts,
        vec![("He", 1), (" ", 0), ("is", 1), (" ", 0), ("happy", 1), (".", 0)]
    );
}

#[test]
fn raw_reply_still_renders_the_plain_sentence() {
    let analyzer = Analyzer::new(FixedReply("Sorry, I can't help."), PromptConfig::default());
    let response = analyzer.analyze("He is happy.").unwrap();
    assert!(response.is_raw_only());

    let analysis = analyze(&response.sentence, response.fragments());
    assert_eq!(analysis.segments.len(), 1);
    assert_eq!(render_text(&analysis), "He is happy.");
}

/// Small deterministic generator so the property checks need no extra crates.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

const TAGS: &[&str] = &[
    "subject",
    "verb",
    "object",
    "object complement",
    "prepositional phrase",
    "noun phrase",
    "adverb clause",
    "adverb",
    "made-up tag",
];

#[test]
fn arbitrary_fragments_always_partition_the_sentence() {
    let sentences = [
        "They made him captain and he became captain too",
        "The cat that I saw yesterday was sleeping on the warm mat.",
        "If it rains, we will stay at home, won't we?",
        "Zoë said \"naïve\" twice: naïve, naïve.",
    ];
    let mut rng = Lcg(42);

    for sentence in sentences {
        let words: Vec<&str> = sentence.split(' ').collect();
        for _ in 0..200 {
            let count = rng.next(8);
            let fragments: Vec<LabeledFragment> = (0..count)
                .map(|_| {
                    let from = rng.next(words.len());
                    let to = (from + 1 + rng.next(4)).min(words.len());
                    let tag = TAGS[rng.next(TAGS.len())];
                    let text = if rng.next(10) == 0 {
                        "not in the sentence".to_string()
                    } else {
                        words[from..to].join(" ")
                    };
                    LabeledFragment::new(tag, text)
                })
                .collect();

            let first = analyze(sentence, &fragments);
            assert_partition(sentence, &first.segments);
            for component in &first.components {
                assert!(component.start < component.end);
                assert!(component.end <= sentence.len());
            }
            for pair in first.components.windows(2) {
                assert!(pair[0].start <= pair[1].start);
                assert!(!(pair[0].start == pair[1].start && pair[0].text == pair[1].text));
            }
            for segment in &first.segments {
                let (start, end) = segment.range();
                for overlap in segment.overlaps() {
                    assert!(overlap.component.start <= start && overlap.component.end >= end);
                }
            }

            let second = analyze(sentence, &fragments);
            assert_eq!(first, second);
        }
    }
}
