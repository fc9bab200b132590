use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub knowledge_base: KnowledgeBaseConfig,

    /// File the config was read from, `None` for defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    pub path: PathBuf,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/kb.json"),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Runs before logging is set up, so skipped files are reported on stderr.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: failed to load config from {}: {:#}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    eprintln!("Warning: failed to load config from {}: {:#}", fallback_config.display(), e);
                }
            }
        }

        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Directory the log file goes in
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(env!("CARGO_PKG_NAME"))
                .join("logs")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.log_level.is_none());
        assert!(config.source.is_none());
        assert_eq!(config.knowledge_base.path, PathBuf::from("data/kb.json"));
        assert!(config.log_dir().ends_with("logs"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dispatchr.yml");
        fs::write(
            &path,
            "log_level: debug\nlog_dir: /tmp/dispatchr-logs\nknowledge_base:\n  path: /tmp/kb.json\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/dispatchr-logs"));
        assert_eq!(config.knowledge_base.path, PathBuf::from("/tmp/kb.json"));
        assert_eq!(config.source.as_ref(), Some(&path));
    }

    #[test]
    fn test_source_is_not_serialized() {
        let config = Config {
            source: Some(PathBuf::from("/etc/dispatchr.yml")),
            ..Config::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("source"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dispatchr.yml");
        fs::write(&path, "log_level: warn\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert_eq!(config.knowledge_base.path, PathBuf::from("data/kb.json"));
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_yaml_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dispatchr.yml");
        fs::write(&path, "knowledge_base: [unclosed").unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }
}
