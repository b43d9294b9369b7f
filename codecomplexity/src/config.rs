use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MAX_CODE_LENGTH: usize = 20_000;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

/// The provider credential. `GROQ_API_KEY` wins over the generic `LLM_API_KEY`.
fn api_key_from_env() -> Option<String> {
    ["GROQ_API_KEY", "LLM_API_KEY"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// Which response contract a deployment uses.
///
/// A deployment serves exactly one of these; the two result shapes are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisFormat {
    /// Five fixed Markdown sections, one stricter retry, pass-through on failure.
    #[default]
    Markdown,
    /// JSON object with four required fields, constant fallback on failure.
    Json,
}

impl AnalysisFormat {
    pub fn from_env() -> Self {
        parse_env_or("ANALYSIS_FORMAT", Self::default())
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Markdown => "llama-3.3-70b-versatile",
            Self::Json => "mixtral-8x7b-32768",
        }
    }

    pub fn default_temperature(&self) -> f32 {
        match self {
            Self::Markdown => 0.0,
            Self::Json => 0.2,
        }
    }

    pub fn default_max_tokens(&self) -> Option<u32> {
        match self {
            Self::Markdown => None,
            Self::Json => Some(1000),
        }
    }

    pub fn default_timeout_secs(&self) -> u64 {
        match self {
            Self::Markdown => 25,
            Self::Json => 30,
        }
    }

    pub fn default_min_code_length(&self) -> usize {
        match self {
            Self::Markdown => 50,
            Self::Json => 1,
        }
    }

    /// Route the analysis endpoint is mounted on.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Markdown => "/analyze-code",
            Self::Json => "/analyze",
        }
    }
}

impl fmt::Display for AnalysisFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for AnalysisFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown analysis format '{other}', expected 'markdown' or 'json'"
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub analysis: AnalysisConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on the raw request body, enforced before JSON parsing.
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub format: AnalysisFormat,
    /// Minimum trimmed snippet length, in characters.
    pub min_code_length: usize,
    /// Maximum trimmed snippet length, in characters.
    pub max_code_length: usize,
}

/// Upstream chat completion settings.
#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
}

// Hand-written so the credential never ends up in logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmConfig {
    /// Defaults for `format` with no environment overrides and no credential.
    pub fn for_format(format: AnalysisFormat) -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: format.default_model().to_string(),
            temperature: format.default_temperature(),
            max_tokens: format.default_max_tokens(),
            timeout_secs: format.default_timeout_secs(),
        }
    }
}

impl AnalysisConfig {
    pub fn for_format(format: AnalysisFormat) -> Self {
        Self {
            format,
            min_code_length: format.default_min_code_length(),
            max_code_length: DEFAULT_MAX_CODE_LENGTH,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_format(AnalysisFormat::from_env())
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Read the environment, taking variant-dependent defaults from `format`.
    pub fn for_format(format: AnalysisFormat) -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_env_or("PORT", 5000),
                max_body_bytes: parse_env_or("MAX_BODY_BYTES", 1024 * 1024),
            },
            analysis: AnalysisConfig {
                format,
                min_code_length: parse_env_or(
                    "MIN_CODE_LENGTH",
                    format.default_min_code_length(),
                )
                .max(1),
                max_code_length: parse_env_or("MAX_CODE_LENGTH", DEFAULT_MAX_CODE_LENGTH),
            },
            llm: LlmConfig {
                api_key: api_key_from_env(),
                base_url: env::var("LLM_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string()),
                model: env::var("LLM_MODEL")
                    .unwrap_or_else(|_| format.default_model().to_string()),
                temperature: parse_env_or("LLM_TEMPERATURE", format.default_temperature()),
                max_tokens: parse_env_opt("LLM_MAX_TOKENS").or(format.default_max_tokens()),
                timeout_secs: parse_env_or("LLM_TIMEOUT", format.default_timeout_secs()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "ANALYSIS_FORMAT",
        "HOST",
        "PORT",
        "MAX_BODY_BYTES",
        "MIN_CODE_LENGTH",
        "MAX_CODE_LENGTH",
        "GROQ_API_KEY",
        "LLM_API_KEY",
        "LLM_BASE_URL",
        "LLM_MODEL",
        "LLM_TEMPERATURE",
        "LLM_MAX_TOKENS",
        "LLM_TIMEOUT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_markdown_defaults() {
        clear_env();

        let config = Config::default();
        assert_eq!(config.analysis.format, AnalysisFormat::Markdown);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.analysis.min_code_length, 50);
        assert_eq!(config.analysis.max_code_length, 20_000);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.temperature, 0.0);
        assert!(config.llm.max_tokens.is_none());
        assert_eq!(config.llm.timeout_secs, 25);
        assert_eq!(config.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    #[serial]
    fn test_json_defaults() {
        clear_env();
        std::env::set_var("ANALYSIS_FORMAT", "json");

        let config = Config::from_env();
        assert_eq!(config.analysis.format, AnalysisFormat::Json);
        assert_eq!(config.analysis.min_code_length, 1);
        assert_eq!(config.llm.model, "mixtral-8x7b-32768");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.llm.max_tokens, Some(1000));
        assert_eq!(config.llm.timeout_secs, 30);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_llm_overrides_from_env() {
        clear_env();
        std::env::set_var("LLM_MODEL", "llama-3.1-8b-instant");
        std::env::set_var("LLM_TIMEOUT", "5");
        std::env::set_var("LLM_MAX_TOKENS", "256");
        std::env::set_var("LLM_BASE_URL", "http://localhost:9999/v1");

        let config = Config::for_format(AnalysisFormat::Markdown);
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.timeout_secs, 5);
        assert_eq!(config.llm.max_tokens, Some(256));
        assert_eq!(config.llm.base_url, "http://localhost:9999/v1");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_groq_key_preferred_over_generic_key() {
        clear_env();
        std::env::set_var("LLM_API_KEY", "generic");
        std::env::set_var("GROQ_API_KEY", "groq");

        let config = Config::from_env();
        assert_eq!(config.llm.api_key.as_deref(), Some("groq"));

        std::env::set_var("GROQ_API_KEY", "   ");
        let config = Config::from_env();
        assert_eq!(config.llm.api_key.as_deref(), Some("generic"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back_to_defaults() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("ANALYSIS_FORMAT", "yaml");
        std::env::set_var("MIN_CODE_LENGTH", "0");

        let config = Config::from_env();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.analysis.format, AnalysisFormat::Markdown);
        assert_eq!(config.analysis.min_code_length, 1);

        clear_env();
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<AnalysisFormat>(), Ok(AnalysisFormat::Json));
        assert_eq!(" md ".parse::<AnalysisFormat>(), Ok(AnalysisFormat::Markdown));
        assert!("xml".parse::<AnalysisFormat>().is_err());
        assert_eq!(AnalysisFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_endpoint_per_format() {
        assert_eq!(AnalysisFormat::Markdown.endpoint(), "/analyze-code");
        assert_eq!(AnalysisFormat::Json.endpoint(), "/analyze");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut llm = LlmConfig::for_format(AnalysisFormat::Markdown);
        llm.api_key = Some("gsk_secret".to_string());
        let rendered = format!("{llm:?}");
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
