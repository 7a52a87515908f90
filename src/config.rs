use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of an OpenAI-compatible API, without the trailing `/chat/completions`.
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub prompt_file: PathBuf,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.2,
            api_key_env: "OPENAI_API_KEY".to_string(),
            prompt_file: PathBuf::from("custom_prompts.json"),
            timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.api_base.trim().is_empty() {
            return Err(Error::config("api_base must not be empty"));
        }
        if self.model.trim().is_empty() {
            return Err(Error::config("model must not be empty"));
        }
        Ok(())
    }
}

/// Loads `file_path`, falling back to defaults when the file does not exist.
pub fn load_config_from_file(file_path: &Path) -> Result<Config> {
    let contents = match fs::read_to_string(file_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!(
                "No config file at {}; using built-in defaults.",
                file_path.display()
            );
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(Error::config(format!(
                "Failed to read {}: {}",
                file_path.display(),
                e
            )))
        }
    };

    let loaded_config = toml::from_str::<Config>(&contents)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", file_path.display(), e)))?;
    loaded_config.validate()?;
    log::info!(
        "Loaded config from {} (model {}).",
        file_path.display(),
        loaded_config.model
    );
    Ok(loaded_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gpt-4o-mini\"\ntemperature = 0.0").unwrap();

        let config = load_config_from_file(file.path()).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.prompt_file, PathBuf::from("custom_prompts.json"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = [unterminated").unwrap();

        let err = load_config_from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "temperature = 3.5").unwrap();

        let err = load_config_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }
}
