use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once, OnceLock};

use parking_lot::ReentrantMutex;
use thiserror::Error;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

mod diagnostics;

pub use diagnostics::{ConfigDiagnostics, ConfigWarning};

/// Environment variable overriding config discovery.
pub const GRAVEL_CONFIG_ENV_VAR: &str = "GRAVEL_CONFIG_PATH";

/// Top-level `gravel.toml`.
///
/// ```toml
/// [logging]
/// level = "info"
/// json = false
/// stderr = true
/// file = "/tmp/gravel.log"
///
/// [intentions]
/// convert_lambda_to_closure = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravelConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub intentions: IntentionsConfig,
}

#[allow(clippy::derivable_impls)]
impl Default for GravelConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            intentions: IntentionsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Simple level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs in JSON format.
    #[serde(default)]
    pub json: bool,

    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to the given file path. If the file cannot be opened, file
    /// logging is disabled while stderr stays active.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// Bare levels are trimmed and lowercased; anything else is an `EnvFilter`
    /// directive string and passes through trimmed.
    pub(crate) fn level_directives(&self) -> String {
        let level = self.level.trim();
        if level.is_empty() {
            return Self::default_level();
        }
        let lower = level.to_ascii_lowercase();
        match lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => lower,
            _ => level.to_owned(),
        }
    }

    /// Effective filter: the configured directives followed by `RUST_LOG`.
    ///
    /// If the combination does not parse, `RUST_LOG` alone is tried, then `info`.
    pub fn env_filter(&self) -> EnvFilter {
        let config = self.level_directives();
        let candidates = match std::env::var("RUST_LOG") {
            Ok(env) if !env.trim().is_empty() => {
                vec![format!("{config},{}", env.trim()), env.trim().to_owned()]
            }
            _ => vec![config],
        };
        candidates
            .iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentionsConfig {
    /// Offer "Convert lambda to closure".
    #[serde(default = "IntentionsConfig::default_enabled")]
    pub convert_lambda_to_closure: bool,
}

impl IntentionsConfig {
    fn default_enabled() -> bool {
        true
    }
}

impl Default for IntentionsConfig {
    fn default() -> Self {
        Self {
            convert_lambda_to_closure: Self::default_enabled(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a source snippet; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

impl GravelConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = read_config(path.as_ref())?;
        Self::load_from_str(&text)
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config file and report unknown keys and suspicious values.
    pub fn load_from_path_with_diagnostics(
        path: impl AsRef<Path>,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let text = read_config(path.as_ref())?;
        Self::load_from_str_with_diagnostics(&text)
    }

    pub fn load_from_str_with_diagnostics(
        text: &str,
    ) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, unknown_keys) =
            diagnostics::deserialize_toml_with_unknown_keys::<GravelConfig>(text)?;
        let diagnostics = ConfigDiagnostics {
            unknown_keys,
            warnings: config.validate(),
        };
        Ok((config, diagnostics))
    }

    #[must_use]
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut out = Vec::new();

        let normalized = self.logging.level_directives();
        if EnvFilter::try_new(&normalized).is_err() {
            out.push(ConfigWarning::LoggingLevelInvalid {
                value: self.logging.level.clone(),
                normalized,
            });
        }

        if let Some(file) = &self.logging.file {
            let dir = file.parent().filter(|dir| !dir.as_os_str().is_empty());
            if dir.is_some_and(|dir| !dir.is_dir()) {
                out.push(ConfigWarning::LoggingFileDirMissing { path: file.clone() });
            }
        }

        out
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

static CONFIG_ENV_LOCK: OnceLock<ReentrantMutex<()>> = OnceLock::new();

fn config_env_lock() -> &'static ReentrantMutex<()> {
    CONFIG_ENV_LOCK.get_or_init(|| ReentrantMutex::new(()))
}

/// Run `f` while holding the lock that guards [`GRAVEL_CONFIG_ENV_VAR`] reads.
///
/// Tests that set the variable should do so inside this closure so parallel
/// discovery calls do not observe it.
pub fn with_config_env_lock<R>(f: impl FnOnce() -> R) -> R {
    let _guard = config_env_lock().lock();
    f()
}

/// Locate the config for a workspace root.
///
/// Resolution order:
/// 1) `GRAVEL_CONFIG_PATH` (absolute or relative to `workspace_root`)
/// 2) `gravel.toml` in `workspace_root`
/// 3) `.gravel.toml` in `workspace_root`
pub fn discover_config_path(workspace_root: &Path) -> Option<PathBuf> {
    let _guard = config_env_lock().lock();
    if let Some(value) = std::env::var_os(GRAVEL_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        let path = if candidate.is_absolute() {
            candidate
        } else {
            workspace_root.join(candidate)
        };
        return Some(path.canonicalize().unwrap_or(path));
    }

    ["gravel.toml", ".gravel.toml"]
        .into_iter()
        .map(|name| workspace_root.join(name))
        .find(|path| path.is_file())
        .map(|path| path.canonicalize().unwrap_or(path))
}

/// Load the config for a workspace root; defaults and `None` when there is none.
pub fn load_for_workspace(
    workspace_root: &Path,
) -> Result<(GravelConfig, Option<PathBuf>), ConfigError> {
    let (config, path, _diagnostics) = load_for_workspace_with_diagnostics(workspace_root)?;
    Ok((config, path))
}

/// [`load_for_workspace`] that also reports unknown keys and suspicious values.
pub fn load_for_workspace_with_diagnostics(
    workspace_root: &Path,
) -> Result<(GravelConfig, Option<PathBuf>, ConfigDiagnostics), ConfigError> {
    let Some(path) = discover_config_path(workspace_root) else {
        return Ok((GravelConfig::default(), None, ConfigDiagnostics::default()));
    };

    let (config, diagnostics) = GravelConfig::load_from_path_with_diagnostics(&path)?;
    Ok((config, Some(path), diagnostics))
}

static TRACING_INIT: Once = Once::new();

/// Initializes structured `tracing` logging.
///
/// Safe to call multiple times; only the first call installs a global subscriber.
pub fn init_tracing(config: &LoggingConfig) {
    TRACING_INIT.call_once(|| {
        let filter = config.env_filter();

        let file_path = config.file.clone();
        let file = file_path
            .as_ref()
            .and_then(|path| {
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .ok()
            })
            .map(Mutex::new);
        let file_open_failed = file_path.is_some() && file.is_none();

        let mut make_writer = BoxMakeWriter::new(io::sink);
        if config.stderr {
            // Test output capture only sees `eprint!`; `TestWriter` routes through it.
            if cfg!(debug_assertions) {
                make_writer = BoxMakeWriter::new(
                    make_writer.and(tracing_subscriber::fmt::writer::TestWriter::with_stderr),
                );
            } else {
                make_writer = BoxMakeWriter::new(make_writer.and(io::stderr));
            }
        }
        if let Some(file) = file {
            make_writer = BoxMakeWriter::new(make_writer.and(file));
        }

        let layer: Box<dyn tracing_subscriber::Layer<_> + Send + Sync> = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(make_writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(filter).with(layer);
        if tracing::subscriber::set_global_default(subscriber).is_ok() && file_open_failed {
            if let Some(path) = file_path.as_ref() {
                tracing::warn!(
                    target: "gravel.config",
                    path = %path.display(),
                    "failed to open log file; file logging is disabled"
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_uses_defaults() {
        let config = GravelConfig::load_from_str("").unwrap();
        assert_eq!(config, GravelConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.stderr);
        assert!(config.intentions.convert_lambda_to_closure);
    }

    #[test]
    fn parses_all_sections() {
        let config = GravelConfig::load_from_str(
            r#"
[logging]
level = "gravel.intentions=debug"
json = true
stderr = false
file = "gravel.log"

[intentions]
convert_lambda_to_closure = false
"#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "gravel.intentions=debug");
        assert!(config.logging.json);
        assert!(!config.logging.stderr);
        assert_eq!(config.logging.file, Some(PathBuf::from("gravel.log")));
        assert!(!config.intentions.convert_lambda_to_closure);
    }

    #[test]
    fn toml_errors_do_not_echo_input() {
        let err = GravelConfig::load_from_str("[logging]\njson = \"secret-value\"\n").unwrap_err();
        let ConfigError::Toml(message) = err else {
            panic!("expected a toml error");
        };
        assert!(!message.contains("json = "), "{message}");
    }

    #[test]
    fn level_directives_normalize_bare_levels_only() {
        let level = |level: &str| LoggingConfig {
            level: level.to_owned(),
            ..LoggingConfig::default()
        };
        assert_eq!(level(" WARN ").level_directives(), "warn");
        assert_eq!(level("").level_directives(), "info");
        assert_eq!(level(" gravel=Trace ").level_directives(), "gravel=Trace");
    }

    #[test]
    fn diagnostics_report_unknown_keys_and_bad_level() {
        let (config, diagnostics) = GravelConfig::load_from_str_with_diagnostics(
            "[logging]\nlevel = \"gravel=loud\"\nlevle = \"debug\"\n[intentions]\nconvert_lamda = true\n",
        )
        .unwrap();
        assert_eq!(config.logging.level, "gravel=loud");
        assert_eq!(
            diagnostics.unknown_keys,
            vec!["intentions.convert_lamda", "logging.levle"]
        );
        assert_eq!(
            diagnostics.warnings,
            vec![ConfigWarning::LoggingLevelInvalid {
                value: "gravel=loud".into(),
                normalized: "gravel=loud".into(),
            }]
        );
    }
}
