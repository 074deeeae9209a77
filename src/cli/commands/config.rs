//! Config command implementation.

use crate::cli::{mask_secret, ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Copy of the settings that is safe to print.
fn masked(settings: &Settings) -> Settings {
    let mut shown = settings.clone();
    let creds = &mut shown.credentials;
    creds.transcript_api_key = mask_secret(&creds.transcript_api_key);
    creds.gemini_api_key = mask_secret(&creds.gemini_api_key);
    creds.openrouter_api_key = mask_secret(&creds.openrouter_api_key);
    shown
}

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: PathBuf) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&masked(&settings))
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            // Start from the file alone so environment keys are never written out.
            let mut stored = Settings::read_file(&config_path)?;
            stored.set(key, value)?;
            stored.save_to(&config_path)?;

            let shown = if key.starts_with("credentials.") {
                mask_secret(value)
            } else {
                value.clone()
            };
            Output::success(&format!("Set {} = {}", key, shown));
        }

        ConfigAction::Edit => {
            // Create default config if it doesn't exist
            if !config_path.exists() {
                Settings::default().save_to(&config_path)?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            // Try to open in editor
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;

    #[test]
    fn test_masked_hides_keys() {
        let mut settings = Settings::default();
        settings.credentials.gemini_api_key = "AIzaSyVerySecretValue".to_string();
        let shown = masked(&settings);
        assert_eq!(shown.credentials.gemini_api_key, "AIza...alue");
        assert_eq!(shown.credentials.openrouter_api_key, "(not set)");
    }

    #[test]
    fn test_set_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let action = ConfigAction::Set {
            key: "model.backend".to_string(),
            value: "openrouter".to_string(),
        };
        run_config(&action, Settings::default(), path.clone()).unwrap();

        let stored = Settings::read_file(&path).unwrap();
        assert_eq!(stored.model.backend, BackendKind::OpenRouter);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let action = ConfigAction::Set {
            key: "model.colour".to_string(),
            value: "blue".to_string(),
        };
        assert!(run_config(&action, Settings::default(), path.clone()).is_err());
        assert!(!path.exists());
    }
}
