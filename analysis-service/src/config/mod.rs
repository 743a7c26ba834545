use crate::services::prompt::PromptVariant;
use crate::services::providers::openai::{OpenAiConfig, OPENAI_API_BASE};
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub analysis: AnalysisSettings,
}

/// Fixed parameters of every completion call.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub prompt_variant: PromptVariant,
}

impl AnalysisConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service settings from `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").as_deref() == Some("prod");

        let api_key = match lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None if is_prod => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "OPENAI_API_KEY is required in production but not set"
                )))
            }
            None => String::new(),
        };

        let temperature: f32 = parse_env(&lookup, "ANALYSIS_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "ANALYSIS_TEMPERATURE must be between 0 and 2, got {}",
                temperature
            )));
        }

        let max_tokens: u32 = parse_env(&lookup, "ANALYSIS_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        if max_tokens == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "ANALYSIS_MAX_TOKENS must be greater than 0"
            )));
        }

        let timeout_secs: u64 = parse_env(&lookup, "ANALYSIS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "ANALYSIS_TIMEOUT_SECS must be greater than 0"
            )));
        }

        Ok(AnalysisConfig {
            common,
            openai: OpenAiConfig {
                api_key: Secret::new(api_key),
                base_url: get_env(&lookup, "OPENAI_BASE_URL", OPENAI_API_BASE),
                timeout: Duration::from_secs(timeout_secs),
            },
            analysis: AnalysisSettings {
                model: get_env(&lookup, "ANALYSIS_MODEL", DEFAULT_MODEL),
                temperature,
                max_tokens,
                prompt_variant: parse_env(
                    &lookup,
                    "ANALYSIS_PROMPT_VARIANT",
                    PromptVariant::default(),
                )?,
            },
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "{} has invalid value '{}': {}",
                key,
                raw,
                e
            ))
        }),
    }
}
