use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub translator: TranslatorConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Gemini `generateContent` settings. The API key is never read from the
/// config file, only from `GOOGLE_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub temperature: f32,
    pub api_base: String,
    /// Request timeout in seconds, 0 keeps the HTTP client default (none)
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout: u64,
}

/// Azure Translator settings. Key and endpoint come from the environment
/// at call time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub api_version: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of most recent turns embedded in each prompt
    pub context_turns: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// What [`Config::load`] did. Loading runs before the subscriber exists,
/// so `main` logs this once logging is up.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Config file that was read, `None` when defaults were used
    pub source: Option<String>,
    pub overrides: Vec<String>,
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn log(&self) {
        match &self.source {
            Some(path) => tracing::info!("Loaded configuration from {}", path),
            None => tracing::warn!("Configuration file not found, using defaults"),
        }
        for line in &self.overrides {
            tracing::info!("{}", line);
        }
        for line in &self.warnings {
            tracing::warn!("{}", line);
        }
    }
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the explicit path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_)
    ///
    /// Callers apply any remaining overrides and then call [`Config::validate`].
    pub fn load(explicit_path: Option<&str>) -> Result<(Self, LoadReport), anyhow::Error> {
        let source = match explicit_path {
            Some(path) => Some(path.to_string()),
            None => Self::find_config_file(),
        };
        let mut config = match &source {
            Some(path) => Self::from_toml(path)?,
            None => Config::default(),
        };

        let mut report = config.apply_env_overrides(|key| std::env::var(key).ok());
        report.source = source;

        Ok((config, report))
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 127.0.0.1)
    /// - APP_SERVER_PORT: Server port (default: 5000)
    /// - APP_LLM_MODEL: Gemini model name (default: gemini-1.5-pro)
    /// - APP_LLM_TEMPERATURE: Sampling temperature (default: 0.7)
    /// - APP_LLM_API_BASE: Gemini API base URL
    /// - APP_LLM_TIMEOUT: LLM request timeout (accepts "30s", "5m", 0 = none)
    /// - APP_TRANSLATOR_REGION: Azure resource region (default: centralindia)
    /// - APP_HISTORY_CONTEXT_TURNS: Turns of history per prompt (default: 10)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,sacred_verse_chat=debug")
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> LoadReport
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut report = LoadReport::default();

        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            report.overrides.push(format!("Override server.host from env: {}", self.server.host));
        }

        if let Some(port) = lookup("APP_SERVER_PORT") {
            match port.parse() {
                Ok(val) => {
                    self.server.port = val;
                    report
                        .overrides
                        .push(format!("Override server.port from env: {}", self.server.port));
                },
                Err(e) => report.warnings.push(format!(
                    "Invalid APP_SERVER_PORT '{}': {} (keep {})",
                    port, e, self.server.port
                )),
            }
        }

        if let Some(model) = lookup("APP_LLM_MODEL") {
            self.llm.model = model;
            report.overrides.push(format!("Override llm.model from env: {}", self.llm.model));
        }

        if let Some(temperature) = lookup("APP_LLM_TEMPERATURE") {
            match temperature.parse() {
                Ok(val) => {
                    self.llm.temperature = val;
                    report.overrides.push(format!(
                        "Override llm.temperature from env: {}",
                        self.llm.temperature
                    ));
                },
                Err(e) => report.warnings.push(format!(
                    "Invalid APP_LLM_TEMPERATURE '{}': {} (keep {})",
                    temperature, e, self.llm.temperature
                )),
            }
        }

        if let Some(api_base) = lookup("APP_LLM_API_BASE") {
            self.llm.api_base = api_base;
            report
                .overrides
                .push(format!("Override llm.api_base from env: {}", self.llm.api_base));
        }

        if let Some(timeout) = lookup("APP_LLM_TIMEOUT") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.llm.timeout = val;
                    report
                        .overrides
                        .push(format!("Override llm.timeout from env: {}", self.llm.timeout));
                },
                Err(e) => report.warnings.push(format!(
                    "Invalid APP_LLM_TIMEOUT '{}': {} (keep {})",
                    timeout, e, self.llm.timeout
                )),
            }
        }

        if let Some(region) = lookup("APP_TRANSLATOR_REGION") {
            self.translator.region = region;
            report
                .overrides
                .push(format!("Override translator.region from env: {}", self.translator.region));
        }

        if let Some(turns) = lookup("APP_HISTORY_CONTEXT_TURNS") {
            match turns.parse() {
                Ok(val) => {
                    self.history.context_turns = val;
                    report.overrides.push(format!(
                        "Override history.context_turns from env: {}",
                        self.history.context_turns
                    ));
                },
                Err(e) => report.warnings.push(format!(
                    "Invalid APP_HISTORY_CONTEXT_TURNS '{}': {} (keep {})",
                    turns, e, self.history.context_turns
                )),
            }
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            report
                .overrides
                .push(format!("Override logging.level from env: {}", self.logging.level));
        }

        report
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model cannot be empty");
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be within 0.0..=2.0");
        }

        if self.history.context_turns == 0 {
            anyhow::bail!("history.context_turns must be > 0");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 5000 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_string(),
            temperature: 0.7,
            api_base: "https://generativelanguage.googleapis.com".to_string(),
            timeout: 0,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self { api_version: "3.0".to_string(), region: "centralindia".to_string() }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { context_turns: 10 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,sacred_verse_chat=debug".to_string(),
            file: Some("logs/sacred-verse-chat.log".to_string()),
        }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        "h" | "hr" | "hour" | "hours" => Ok(n * 60 * 60),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Accepts either a number of seconds or a human-friendly string
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '5m', '1h'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}
