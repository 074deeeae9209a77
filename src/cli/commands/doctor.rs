//! Doctor command - verify credentials and configuration.

use crate::cli::{mask_secret, Output};
use crate::config::{BackendKind, Settings, TranscriptProvider};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("yt-article Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("Credentials").bold());
    let credential_checks = check_credentials(settings);
    for check in &credential_checks {
        check.print();
    }
    checks.extend(credential_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![
        check_config_file(config_path),
        check_transcript_provider(settings),
        CheckResult::ok(
            "Pipeline",
            &format!(
                "{} via {}",
                settings.model.strategy, settings.model.backend
            ),
        ),
        check_output_dir(settings),
    ];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    // Summary
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Conversions will fail until they are fixed.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Ready to convert.");
    }

    Ok(())
}

/// Check every key; only the ones the current setup needs are errors.
fn check_credentials(settings: &Settings) -> Vec<CheckResult> {
    let creds = &settings.credentials;
    let selected = settings.model.backend;

    vec![
        check_key(
            "Transcript API key",
            &creds.transcript_api_key,
            settings.transcript.provider == TranscriptProvider::Supadata,
            "yt-article config set credentials.transcript_api_key <key> (or SUPADATA_API_KEY)",
        ),
        check_key(
            "Gemini API key",
            &creds.gemini_api_key,
            selected == BackendKind::Gemini,
            "yt-article config set credentials.gemini_api_key <key> (or GEMINI_API_KEY)",
        ),
        check_key(
            "OpenRouter API key",
            &creds.openrouter_api_key,
            selected == BackendKind::OpenRouter,
            "yt-article config set credentials.openrouter_api_key <key> (or OPENROUTER_API_KEY)",
        ),
    ]
}

fn check_key(name: &str, key: &str, required: bool, hint: &str) -> CheckResult {
    match (key.trim().is_empty(), required) {
        (false, _) => CheckResult::ok(name, &format!("configured ({})", mask_secret(key))),
        (true, true) => CheckResult::error(name, "not set", hint),
        (true, false) => CheckResult::warning(name, "not set (not needed with current settings)", hint),
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: yt-article config edit",
        )
    }
}

fn check_transcript_provider(settings: &Settings) -> CheckResult {
    match settings.transcript.provider {
        TranscriptProvider::Supadata => CheckResult::ok("Transcripts", "supadata"),
        TranscriptProvider::SelfHosted => CheckResult::ok(
            "Transcripts",
            &format!("self-hosted at {}", settings.transcript.self_hosted_url),
        ),
    }
}

fn check_output_dir(settings: &Settings) -> CheckResult {
    let dir = settings.output_dir();
    if dir.is_dir() {
        CheckResult::ok("Export directory", &format!("{}", dir.display()))
    } else {
        CheckResult::warning(
            "Export directory",
            &format!("{} (will be created)", dir.display()),
            "Directory will be created by the first 'convert --save'",
        )
    }
}
