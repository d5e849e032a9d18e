use std::path::PathBuf;

use serde::Deserialize;

/// Application-level constants
pub const APP_NAME: &str = "NutriCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment prefix for settings overrides (`NUTRICARE__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "NUTRICARE";

/// Legacy variable name for the chat provider key.
pub const CHAT_API_KEY_ENV: &str = "GROQ_API_KEY";

pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_CHAT_BASE_URL: &str = "https://api.groq.com";

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "nutricare_lib=info,nutricare=info,tower_http=info"
}

/// Get the application data directory
/// ~/NutriCare/ on all platforms, falling back to the working directory.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default location of the user database
pub fn default_database_path() -> PathBuf {
    app_data_dir().join("nutricare.db")
}

// ═══════════════════════════════════════════════════════════
// Runtime settings
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub knowledge: KnowledgeSettings,
    pub database: DatabaseSettings,
    pub chat: ChatSettings,
    #[serde(default)]
    pub ocr: OcrSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
    /// `*` allows any origin.
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KnowledgeSettings {
    /// JSON disease list. `None` uses the list bundled with the binary.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: PathBuf,
    /// PBKDF2 rounds for new password hashes.
    pub hash_iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    pub tessdata_dir: Option<PathBuf>,
    pub languages: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tessdata_dir: None,
            languages: "eng".to_string(),
        }
    }
}

impl Settings {
    /// Settings with every default applied and no file/env sources.
    pub fn defaults() -> Self {
        Self {
            server: ServerSettings {
                bind: "0.0.0.0".to_string(),
                port: 8000,
                cors_allowed_origins: vec!["*".to_string()],
                max_upload_bytes: 20 * 1024 * 1024,
            },
            knowledge: KnowledgeSettings::default(),
            database: DatabaseSettings {
                path: default_database_path(),
                hash_iterations: crate::accounts::DEFAULT_HASH_ITERATIONS,
            },
            chat: ChatSettings {
                api_key: None,
                base_url: DEFAULT_CHAT_BASE_URL.to_string(),
                model: DEFAULT_CHAT_MODEL.to_string(),
                timeout_secs: 30,
            },
            ocr: OcrSettings::default(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

/// Load settings from `nutricare.toml` (optional) and `NUTRICARE__*` env vars.
pub fn load() -> anyhow::Result<Settings> {
    let defaults = Settings::defaults();
    let cfg = config::Config::builder()
        .set_default("server.bind", defaults.server.bind)?
        .set_default("server.port", defaults.server.port as i64)?
        .set_default("server.cors_allowed_origins", defaults.server.cors_allowed_origins)?
        .set_default("server.max_upload_bytes", defaults.server.max_upload_bytes as i64)?
        .set_default(
            "database.path",
            defaults.database.path.to_string_lossy().to_string(),
        )?
        .set_default(
            "database.hash_iterations",
            defaults.database.hash_iterations as i64,
        )?
        .set_default("chat.base_url", defaults.chat.base_url)?
        .set_default("chat.model", defaults.chat.model)?
        .set_default("chat.timeout_secs", defaults.chat.timeout_secs as i64)?
        .set_default("ocr.languages", defaults.ocr.languages)?
        .add_source(config::File::with_name("nutricare").required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_allowed_origins")
                .try_parsing(true),
        )
        .build()?;

    let mut settings: Settings = cfg.try_deserialize()?;

    if settings.chat.api_key.as_deref().map_or(true, str::is_empty) {
        settings.chat.api_key = std::env::var(CHAT_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }

    validate(&settings)?;
    Ok(settings)
}

pub fn validate(settings: &Settings) -> anyhow::Result<()> {
    if settings.server.port == 0 {
        anyhow::bail!("CONFIG ERROR: server.port must be non-zero");
    }
    if settings.server.max_upload_bytes == 0 {
        anyhow::bail!("CONFIG ERROR: server.max_upload_bytes must be non-zero");
    }
    if settings.database.hash_iterations == 0 {
        anyhow::bail!("CONFIG ERROR: database.hash_iterations must be non-zero");
    }
    if settings.chat.timeout_secs == 0 {
        anyhow::bail!("CONFIG ERROR: chat.timeout_secs must be non-zero");
    }
    if settings.chat.api_key.is_none() {
        tracing::warn!(
            "{CHAT_API_KEY_ENV} not set; the chat endpoint will answer with a configuration notice"
        );
    }
    Ok(())
}
