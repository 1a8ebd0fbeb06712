use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::workflows::tracker::{
    TrackerSettings, DEFAULT_LOOKBACK_DAYS, DEFAULT_SHEET_NAME, DEFAULT_SIMILARITY_THRESHOLD,
};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub tracker: TrackerConfig,
    pub scorer: ScorerConfig,
    pub telemetry: TelemetryConfig,
}

/// Rotation order for Gemini keys: numbered keys high to low, then the base key.
pub const GEMINI_KEY_VARS: [&str; 9] = [
    "GEMINI_API_KEY_8",
    "GEMINI_API_KEY_7",
    "GEMINI_API_KEY_6",
    "GEMINI_API_KEY_5",
    "GEMINI_API_KEY_4",
    "GEMINI_API_KEY_3",
    "GEMINI_API_KEY_2",
    "GEMINI_API_KEY_1",
    "GEMINI_API_KEY",
];

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let directory = PathBuf::from(
            env::var("JOB_TRACKER_DIR").unwrap_or_else(|_| "tracker".to_string()),
        );
        let sheet_name =
            env::var("JOB_TRACKER_SHEET").unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string());
        let lookback_days = parse_var("JOB_TRACKER_LOOKBACK_DAYS", DEFAULT_LOOKBACK_DAYS)?;
        let similarity_threshold = parse_var(
            "JOB_TRACKER_SIMILARITY_THRESHOLD",
            DEFAULT_SIMILARITY_THRESHOLD,
        )?;
        if similarity_threshold > 100 {
            return Err(ConfigError::ThresholdOutOfRange(similarity_threshold));
        }

        let template_dir = PathBuf::from(
            env::var("RESUME_TEMPLATE_DIR").unwrap_or_else(|_| "resume_templates".to_string()),
        );
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
        let api_keys = GEMINI_KEY_VARS
            .iter()
            .filter_map(|name| env::var(name).ok())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            tracker: TrackerConfig {
                directory,
                settings: TrackerSettings {
                    sheet_name,
                    lookback_days,
                    similarity_threshold,
                },
            },
            scorer: ScorerConfig {
                model,
                api_keys,
                template_dir,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Location of the job tracker workbook and the duplicate-check window.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub directory: PathBuf,
    pub settings: TrackerSettings,
}

/// Gemini model selection, key rotation list and resume template location.
#[derive(Clone)]
pub struct ScorerConfig {
    pub model: String,
    pub api_keys: Vec<String>,
    pub template_dir: PathBuf,
}

impl fmt::Debug for ScorerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScorerConfig")
            .field("model", &self.model)
            .field("api_keys", &format_args!("<{} redacted>", self.api_keys.len()))
            .field("template_dir", &self.template_dir)
            .finish()
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { name: &'static str, value: String },
    ThresholdOutOfRange(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer (got '{value}')")
            }
            ConfigError::ThresholdOutOfRange(value) => write!(
                f,
                "JOB_TRACKER_SIMILARITY_THRESHOLD must be between 0 and 100 (got {value})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
