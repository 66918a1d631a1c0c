//! Application configuration: config/default.toml plus environment variables
//!
//! Load order: the TOML file first, then `QUILL__*` environment overrides
//! (double underscore nests keys, e.g. `QUILL__LLM__MODEL=...`).

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration root (mirrors the top level of config/default.toml).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub task: TaskSection,
}

/// [app] section: optional default target file when none is given on the
/// command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSection {
    pub target_file: Option<PathBuf>,
}

/// [llm] section: model selection and request limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub model: String,
    pub max_tokens: u32,
    /// Whole-request timeout (seconds) for one agent call.
    pub request_timeout_secs: u64,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            model: "claude-3-7-sonnet-20250219".to_string(),
            max_tokens: 4096,
            request_timeout_secs: 120,
        }
    }
}

/// [task] section: dispatch-loop limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TaskSection {
    /// Hard cap on conversation rounds; the loop terminates with a distinct
    /// state when it is reached instead of running unbounded.
    pub max_rounds: usize,
}

impl Default for TaskSection {
    fn default() -> Self {
        Self { max_rounds: 50 }
    }
}

/// Load configuration from the config directory; `QUILL__*` env vars override.
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{name}.toml");
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("QUILL")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
