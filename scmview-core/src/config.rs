use crate::error::{Error, Result};
use crate::format::{Formatter, DEFAULT_TIMESTAMP_FORMAT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the REST backend, ending in `/`.
    pub backend_url: String,
    pub timeout_secs: u64,
    pub timestamp_format: String,
    pub listen: String,
    pub page_size: usize,
    pub icons: IconSet,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080/scm/api/rest/".to_string(),
            timeout_secs: 30,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            listen: "127.0.0.1:3040".to_string(),
            page_size: 20,
            icons: IconSet::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    pub folder: String,
    pub document: String,
    pub added: String,
    pub modified: String,
    pub removed: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            folder: "resources/images/folder.gif".to_string(),
            document: "resources/images/document.gif".to_string(),
            added: "resources/images/add.gif".to_string(),
            modified: "resources/images/modify.gif".to_string(),
            removed: "resources/images/delete.gif".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Reads `path` when given; an explicit path that does not exist is an
    /// error. Without a path the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                Self::parse(&raw)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut config: ConsoleConfig = toml::from_str(raw)?;
        if !config.backend_url.ends_with('/') {
            config.backend_url.push('/');
        }
        if config.page_size == 0 {
            return Err(Error::InvalidConfig("page_size must be positive".to_string()));
        }
        Ok(config)
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        if !self.backend_url.ends_with('/') {
            self.backend_url.push('/');
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.timestamp_format.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = ConsoleConfig::load(None).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
backend_url = "http://scm.example.org/api/rest"
timeout_secs = 5

[icons]
folder = "img/dir.png"
"#
        )
        .unwrap();

        let config = ConsoleConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.backend_url, "http://scm.example.org/api/rest/");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.icons.folder, "img/dir.png");
        assert_eq!(config.icons.document, IconSet::default().document);
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConsoleConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            ConsoleConfig::parse("timeout_secs = \"soon\""),
            Err(Error::Config(_))
        ));
    }
}
