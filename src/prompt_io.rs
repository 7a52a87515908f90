use crate::error::{Error, Result};
use crate::types::analysis_data::PromptConfig;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub const SENTENCE_PLACEHOLDER: &str = "{sentence}";

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are an expert in English grammar. You break English sentences down into their grammatical components precisely.";

pub const DEFAULT_USER_PROMPT: &str = r#"Analyze the grammatical components of the English sentence below.

# Sentence components
Label each of these when present:
- subject, expletive subject ("It" in "It is important to study"), real subject, logical subject
- verb (include auxiliaries: "have been studying")
- object, indirect object, direct object
- subject complement, object complement ("president" in "They elected him president")

# Phrases and clauses (only mark groups of two or more words)
- noun phrase, gerund phrase, infinitive phrase (noun), wh infinitive phrase
- present participle phrase, past participle phrase, prepositional phrase (adjective), infinitive phrase (adjective)
- adverb phrase, prepositional phrase (adverb), infinitive phrase (adverb), participial construction
- that clause, wh clause, if/whether clause, what clause
- subject relative clause, object relative clause, possessive relative clause, relative adverb clause
- adverb clause, coordinate clause, parenthetical clause
- adverb, conjunction

# Rules
- "text" must be copied exactly from the sentence, with the same spelling and capitalization.
- A word may belong to several components; list each of them.
- Omit components that do not occur.

Example for "He is happy.":
{
  "components": [
    { "type": "subject", "text": "He" },
    { "type": "verb", "text": "is" },
    { "type": "subject complement", "text": "happy" }
  ]
}

Return only JSON in that format.

Sentence: "{sentence}"
"#;

impl Default for PromptConfig {
    fn default() -> Self {
        PromptConfig {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            user_prompt: DEFAULT_USER_PROMPT.to_string(),
        }
    }
}

impl PromptConfig {
    pub fn validate(&self) -> Result<()> {
        if self.system_prompt.trim().is_empty() || self.user_prompt.trim().is_empty() {
            return Err(Error::invalid_input(
                "both the system prompt and the user prompt are required",
            ));
        }
        Ok(())
    }

    pub fn render_user_prompt(&self, sentence: &str) -> String {
        render_user_prompt(&self.user_prompt, sentence)
    }
}

/// Substitutes every `{sentence}` placeholder in `template`.
pub fn render_user_prompt(template: &str, sentence: &str) -> String {
    template.replace(SENTENCE_PLACEHOLDER, sentence)
}

/// Saves the prompt pair as pretty JSON.
pub fn save_prompts(prompts: &PromptConfig, file_path: &Path) -> Result<()> {
    prompts.validate()?;
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(file_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, prompts)?;
    log::info!("Saved prompts to {}", file_path.display());
    Ok(())
}

/// Loads the prompt pair. A missing file is created with the defaults.
pub fn load_prompts(file_path: &Path) -> Result<PromptConfig> {
    if !file_path.exists() {
        let defaults = PromptConfig::default();
        save_prompts(&defaults, file_path)?;
        log::info!(
            "No prompt file at {}; wrote the built-in defaults.",
            file_path.display()
        );
        return Ok(defaults);
    }

    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let prompts: PromptConfig = serde_json::from_reader(reader)?;
    Ok(prompts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompts").join("custom_prompts.json");

        let prompts = load_prompts(&path).unwrap();
        assert_eq!(prompts, PromptConfig::default());
        assert!(path.exists());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"systemPrompt\""));
        assert!(written.contains("\"userPrompt\""));
    }

    #[test]
    fn saved_prompts_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom_prompts.json");
        let prompts = PromptConfig {
            system_prompt: "Be terse.".to_string(),
            user_prompt: "Label {sentence} please".to_string(),
        };

        save_prompts(&prompts, &path).unwrap();
        assert_eq!(load_prompts(&path).unwrap(), prompts);
    }

    #[test]
    fn empty_prompts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom_prompts.json");
        let prompts = PromptConfig {
            system_prompt: "  ".to_string(),
            user_prompt: "Label {sentence}".to_string(),
        };

        assert!(matches!(save_prompts(&prompts, &path), Err(Error::InvalidInput(_))));
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom_prompts.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_prompts(&path), Err(Error::Json(_))));
    }

    #[test]
    fn every_placeholder_is_substituted() {
        let rendered = render_user_prompt("A: {sentence}\nB: \"{sentence}\"", "He is happy.");
        assert_eq!(rendered, "A: He is happy.\nB: \"He is happy.\"");
        assert!(PromptConfig::default()
            .render_user_prompt("Dogs bark.")
            .contains("Sentence: \"Dogs bark.\""));
    }
}
