//! Settings for the optional summarization step.

use crate::error::DumperError;
use secrecy::{SecretBox, SecretString};
use std::env;
use std::fmt;
use tracing::info;

/// Environment variable consulted when no key is passed on the command line.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "OPENAI_BASE_URL";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Where the API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Flag,
    Environment,
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Flag => write!(f, "command line"),
            KeySource::Environment => write!(f, "environment ({})", API_KEY_ENV),
        }
    }
}

/// Picks the explicit key first, then the environment value.
///
/// Blank values count as missing. Fails with a configuration error when
/// neither is set.
pub fn resolve_api_key(
    flag: Option<String>,
    from_env: Option<String>,
) -> Result<(SecretString, KeySource), DumperError> {
    let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    if let Some(key) = non_blank(flag) {
        return Ok((secret(key), KeySource::Flag));
    }
    if let Some(key) = non_blank(from_env) {
        return Ok((secret(key), KeySource::Environment));
    }
    Err(DumperError::config(format!(
        "summarizing files needs an OpenAI API key; pass --openai-api-key or set {}",
        API_KEY_ENV
    )))
}

fn secret(key: String) -> SecretString {
    SecretBox::new(key.into_boxed_str())
}

/// Everything the summarizer needs, fixed for the whole run.
#[derive(Debug)]
pub struct SummaryConfig {
    pub model: String,
    pub api_key: SecretString,
    pub api_base: String,
}

impl SummaryConfig {
    /// Resolves the key and base URL from the given flags, falling back to
    /// the process environment.
    pub fn resolve(
        model: impl Into<String>,
        api_key: Option<String>,
        api_base: Option<String>,
    ) -> Result<Self, DumperError> {
        let (api_key, source) = resolve_api_key(api_key, env::var(API_KEY_ENV).ok())?;
        info!("Using OpenAI API key from {}", source);
        let api_base = api_base
            .or_else(|| env::var(API_BASE_ENV).ok())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let model = model.into();
        if model.trim().is_empty() {
            return Err(DumperError::config("model name must not be empty"));
        }
        Ok(Self {
            model,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn flag_wins_over_environment() {
        let (key, source) =
            resolve_api_key(Some("sk-flag".into()), Some("sk-env".into())).unwrap();
        assert_eq!(key.expose_secret(), "sk-flag");
        assert_eq!(source, KeySource::Flag);
    }

    #[test]
    fn environment_is_the_fallback() {
        let (key, source) = resolve_api_key(None, Some("sk-env".into())).unwrap();
        assert_eq!(key.expose_secret(), "sk-env");
        assert_eq!(source, KeySource::Environment);
    }

    #[test]
    fn blank_flag_falls_through() {
        let (_, source) = resolve_api_key(Some("  ".into()), Some("sk-env".into())).unwrap();
        assert_eq!(source, KeySource::Environment);
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = resolve_api_key(None, None).unwrap_err();
        assert!(matches!(err, DumperError::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn key_is_redacted_in_debug_output() {
        let (key, _) = resolve_api_key(Some("sk-very-secret".into()), None).unwrap();
        assert!(!format!("{:?}", key).contains("sk-very-secret"));
    }
}
