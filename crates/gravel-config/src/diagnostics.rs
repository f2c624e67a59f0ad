use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;

/// Non-fatal findings produced while loading a `gravel.toml`.
///
/// Loading is best effort: a config is returned whenever deserialization succeeds,
/// and these diagnostics describe anything that was ignored or looks wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Keys present in the TOML that no config field consumes, as dotted paths
    /// (`logging.levle`).
    pub unknown_keys: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

impl ConfigDiagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown_keys.is_empty() && self.warnings.is_empty()
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    LoggingLevelInvalid { value: String, normalized: String },
    LoggingFileDirMissing { path: PathBuf },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::LoggingLevelInvalid { value, normalized } => write!(
                f,
                "logging.level {value:?} is not a valid filter ({normalized:?}); falling back to info"
            ),
            ConfigWarning::LoggingFileDirMissing { path } => write!(
                f,
                "logging.file {} is in a directory that does not exist; file logging is disabled",
                path.display()
            ),
        }
    }
}

pub(crate) fn deserialize_toml_with_unknown_keys<T: DeserializeOwned>(
    text: &str,
) -> Result<(T, Vec<String>), toml::de::Error> {
    let mut unknown = Vec::<String>::new();
    let deserializer = toml::de::Deserializer::new(text);
    let value = serde_ignored::deserialize(deserializer, |path| {
        unknown.push(path.to_string().trim_start_matches('.').to_string());
    })?;
    unknown.sort();
    unknown.dedup();
    Ok((value, unknown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn unknown_keys_use_dotted_paths() {
        #[derive(Debug, Deserialize)]
        struct Root {
            #[allow(dead_code)]
            #[serde(default)]
            section: Section,
        }

        #[derive(Debug, Default, Deserialize)]
        struct Section {
            #[allow(dead_code)]
            #[serde(default)]
            known: bool,
        }

        let text = "top = 1\n[section]\nknown = true\ntypo = 1\n";
        let (_value, unknown) = deserialize_toml_with_unknown_keys::<Root>(text).expect("parse");
        assert_eq!(unknown, vec!["section.typo", "top"]);
    }
}
