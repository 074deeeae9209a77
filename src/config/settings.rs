//! Configuration settings for yt-article.

use crate::error::{ArticleError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub credentials: CredentialSettings,
    pub transcript: TranscriptSettings,
    pub model: ModelSettings,
    pub http: HttpSettings,
    pub export: ExportSettings,
}

/// API keys for the external services.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct CredentialSettings {
    /// Supadata transcript API key.
    pub transcript_api_key: String,
    /// Google AI Studio key (gemini backend).
    pub gemini_api_key: String,
    /// OpenRouter key (openrouter backend).
    pub openrouter_api_key: String,
}

/// Which service supplies transcripts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TranscriptProvider {
    /// Supadata hosted API (needs `transcript_api_key`).
    #[default]
    Supadata,
    /// Keyless endpoint deployed alongside the app (`GET ?v=<id>`).
    SelfHosted,
}

impl std::str::FromStr for TranscriptProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supadata" => Ok(TranscriptProvider::Supadata),
            "self-hosted" | "selfhosted" => Ok(TranscriptProvider::SelfHosted),
            _ => Err(format!(
                "Unknown transcript provider: {}. Use supadata or self-hosted.",
                s
            )),
        }
    }
}

impl std::fmt::Display for TranscriptProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptProvider::Supadata => write!(f, "supadata"),
            TranscriptProvider::SelfHosted => write!(f, "self-hosted"),
        }
    }
}

/// Transcript provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Provider used for conversions (supadata, self-hosted).
    pub provider: TranscriptProvider,
    /// Endpoint of the self-hosted transcript service.
    pub self_hosted_url: String,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptProvider::Supadata,
            self_hosted_url: "http://localhost:8000/api/transcript".to_string(),
        }
    }
}

/// Model backend type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Google Gemini generateContent endpoint.
    #[default]
    Gemini,
    /// OpenRouter chat completions endpoint.
    OpenRouter,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(BackendKind::Gemini),
            "openrouter" => Ok(BackendKind::OpenRouter),
            _ => Err(format!("Unknown backend: {}. Use gemini or openrouter.", s)),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Gemini => write!(f, "gemini"),
            BackendKind::OpenRouter => write!(f, "openrouter"),
        }
    }
}

/// How the transcript is turned into an article.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStrategy {
    /// One model call straight from transcript to article.
    SinglePass,
    /// Outline extraction followed by article writing.
    #[default]
    TwoPass,
}

impl std::str::FromStr for PipelineStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single-pass" | "single" => Ok(PipelineStrategy::SinglePass),
            "two-pass" | "two" => Ok(PipelineStrategy::TwoPass),
            _ => Err(format!(
                "Unknown strategy: {}. Use single-pass or two-pass.",
                s
            )),
        }
    }
}

impl std::fmt::Display for PipelineStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStrategy::SinglePass => write!(f, "single-pass"),
            PipelineStrategy::TwoPass => write!(f, "two-pass"),
        }
    }
}

/// Model selection and generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Which backend handles generation (gemini, openrouter).
    pub backend: BackendKind,
    /// Pipeline strategy (single-pass, two-pass).
    pub strategy: PipelineStrategy,
    /// Model used by the gemini backend.
    pub gemini_model: String,
    /// Model used by the openrouter backend.
    pub openrouter_model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens per call.
    pub max_output_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Gemini,
            strategy: PipelineStrategy::TwoPass,
            gemini_model: "gemini-2.5-flash".to_string(),
            openrouter_model: "google/gemma-3-27b-it:free".to_string(),
            temperature: 0.4,
            max_output_tokens: 8192,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Referer sent to OpenRouter to identify the client.
    pub referer: String,
    /// Application title sent to OpenRouter.
    pub app_title: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            referer: "https://github.com/smebbs/yt-article".to_string(),
            app_title: "YouTube to Article".to_string(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory that `convert --save` writes documents into.
    pub output_dir: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: "~/yt-article".to_string(),
        }
    }
}

/// Environment variables that override stored credentials.
const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("SUPADATA_API_KEY", "credentials.transcript_api_key"),
    ("GEMINI_API_KEY", "credentials.gemini_api_key"),
    ("OPENROUTER_API_KEY", "credentials.openrouter_api_key"),
];

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// Credential environment variables take precedence over the file.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = Self::read_file(&config_path)?;
        settings.apply_env_overrides()?;
        Ok(settings)
    }

    /// Load only what is stored in the file (defaults if it does not exist).
    pub fn read_file(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Settings::default())
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        for (var, key) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                if !value.trim().is_empty() {
                    self.set(key, value.trim())?;
                }
            }
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ArticleError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yt-article")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded export directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.export.output_dir)
    }

    /// Set a value by its dotted key (e.g. "model.backend").
    ///
    /// Changes live in memory until `save_to` is called.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "credentials.transcript_api_key" => {
                self.credentials.transcript_api_key = value.to_string()
            }
            "credentials.gemini_api_key" => self.credentials.gemini_api_key = value.to_string(),
            "credentials.openrouter_api_key" => {
                self.credentials.openrouter_api_key = value.to_string()
            }
            "transcript.provider" => {
                self.transcript.provider = value.parse().map_err(ArticleError::Config)?
            }
            "transcript.self_hosted_url" => self.transcript.self_hosted_url = value.to_string(),
            "model.backend" => self.model.backend = value.parse().map_err(ArticleError::Config)?,
            "model.strategy" => {
                self.model.strategy = value.parse().map_err(ArticleError::Config)?
            }
            "model.gemini_model" => self.model.gemini_model = value.to_string(),
            "model.openrouter_model" => self.model.openrouter_model = value.to_string(),
            "model.temperature" => {
                self.model.temperature = value
                    .parse()
                    .map_err(|_| ArticleError::Config(format!("Invalid temperature: {}", value)))?
            }
            "model.max_output_tokens" => {
                self.model.max_output_tokens = value.parse().map_err(|_| {
                    ArticleError::Config(format!("Invalid max_output_tokens: {}", value))
                })?
            }
            "http.timeout_secs" => {
                self.http.timeout_secs = value
                    .parse()
                    .map_err(|_| ArticleError::Config(format!("Invalid timeout: {}", value)))?
            }
            "http.referer" => self.http.referer = value.to_string(),
            "http.app_title" => self.http.app_title = value.to_string(),
            "export.output_dir" => self.export.output_dir = value.to_string(),
            _ => return Err(ArticleError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// API key for the currently selected backend.
    pub fn backend_api_key(&self) -> &str {
        match self.model.backend {
            BackendKind::Gemini => &self.credentials.gemini_api_key,
            BackendKind::OpenRouter => &self.credentials.openrouter_api_key,
        }
    }

    /// Verify that every key needed for a conversion is present.
    pub fn check_credentials(&self) -> Result<()> {
        if self.transcript.provider == TranscriptProvider::Supadata
            && self.credentials.transcript_api_key.trim().is_empty()
        {
            return Err(ArticleError::MissingCredential(
                "transcript API key (set credentials.transcript_api_key or SUPADATA_API_KEY)"
                    .to_string(),
            ));
        }

        if self.backend_api_key().trim().is_empty() {
            let hint = match self.model.backend {
                BackendKind::Gemini => "credentials.gemini_api_key or GEMINI_API_KEY",
                BackendKind::OpenRouter => "credentials.openrouter_api_key or OPENROUTER_API_KEY",
            };
            return Err(ArticleError::MissingCredential(format!(
                "{} API key (set {})",
                self.model.backend, hint
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Settings {
        let mut settings = Settings::default();
        settings.credentials.transcript_api_key = "sd_test".to_string();
        settings.credentials.gemini_api_key = "gm_test".to_string();
        settings
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model.backend, BackendKind::Gemini);
        assert_eq!(settings.model.strategy, PipelineStrategy::TwoPass);
        assert_eq!(settings.model.max_output_tokens, 8192);
        assert!(settings.credentials.transcript_api_key.is_empty());
    }

    #[test]
    fn test_missing_transcript_key() {
        let mut settings = configured();
        settings.credentials.transcript_api_key.clear();
        let err = settings.check_credentials().unwrap_err();
        assert!(matches!(err, ArticleError::MissingCredential(_)));
    }

    #[test]
    fn test_missing_key_for_selected_backend() {
        let mut settings = configured();
        assert!(settings.check_credentials().is_ok());

        settings.model.backend = BackendKind::OpenRouter;
        let err = settings.check_credentials().unwrap_err();
        assert!(err.to_string().contains("openrouter"));

        settings.credentials.openrouter_api_key = "or_test".to_string();
        assert!(settings.check_credentials().is_ok());
    }

    #[test]
    fn test_self_hosted_provider_needs_no_transcript_key() {
        let mut settings = configured();
        settings.credentials.transcript_api_key.clear();
        assert!(settings.check_credentials().is_err());

        settings
            .set("transcript.provider", "self-hosted")
            .unwrap();
        assert_eq!(settings.transcript.provider, TranscriptProvider::SelfHosted);
        assert!(settings.check_credentials().is_ok());

        assert!(settings.set("transcript.provider", "whisper").is_err());
    }

    #[test]
    fn test_set_known_and_unknown_keys() {
        let mut settings = Settings::default();
        settings.set("model.backend", "openrouter").unwrap();
        settings.set("model.strategy", "single-pass").unwrap();
        settings.set("model.temperature", "0.7").unwrap();
        assert_eq!(settings.model.backend, BackendKind::OpenRouter);
        assert_eq!(settings.model.strategy, PipelineStrategy::SinglePass);
        assert!((settings.model.temperature - 0.7).abs() < f32::EPSILON);

        assert!(settings.set("model.backend", "bard").is_err());
        assert!(settings.set("nope.key", "x").is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = configured();
        settings.set("model.strategy", "single-pass").unwrap();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.model.strategy, PipelineStrategy::SinglePass);
        assert_eq!(loaded.model.gemini_model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[model]\nbackend = \"openrouter\"\n").unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.model.backend, BackendKind::OpenRouter);
        assert_eq!(loaded.model.gemini_model, "gemini-2.5-flash");
        assert_eq!(loaded.http.timeout_secs, 300);
        assert_eq!(loaded.transcript.provider, TranscriptProvider::Supadata);
    }
}
