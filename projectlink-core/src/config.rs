//! Configuration management for Projectlink
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (`INPUT_PROJECTID`, `GITHUB_GRAPHQL_URL`)
//! 3. Config file (~/.config/projectlink/config.toml)
//! 4. Default values
//!
//! The access token is not part of this file; see [`crate::Secrets`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, ProjectId, Result};

/// Default GitHub GraphQL endpoint
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GraphQL endpoint, override for GitHub Enterprise Server
    pub graphql_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
        }
    }
}

/// Target project configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Node id of the project every pull request gets attached to
    pub project_id: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub API configuration
    pub github: GitHubConfig,

    /// Target project configuration
    pub project: ProjectConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/projectlink/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("projectlink").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - INPUT_PROJECTID: the `projectId` action input
    /// - GITHUB_GRAPHQL_URL: set by the Actions runner
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(project_id) = std::env::var("INPUT_PROJECTID") {
            if !project_id.trim().is_empty() {
                self.project.project_id = Some(project_id);
            }
        }

        if let Ok(url) = std::env::var("GITHUB_GRAPHQL_URL") {
            if !url.trim().is_empty() {
                self.github.graphql_url = url;
            }
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        project_id: Option<String>,
        graphql_url: Option<String>,
    ) -> Self {
        if let Some(id) = project_id {
            self.project.project_id = Some(id);
        }

        if let Some(url) = graphql_url {
            self.github.graphql_url = url;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults. An explicit `config_path`
    /// must exist; the default location is optional.
    pub fn load_with_overrides(
        config_path: Option<&Path>,
        project_id: Option<String>,
        graphql_url: Option<String>,
    ) -> Result<Self> {
        let base = match config_path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };

        Ok(base
            .with_env_overrides()
            .with_cli_overrides(project_id, graphql_url))
    }

    /// The project every pull request is attached to
    pub fn target_project(&self) -> Result<ProjectId> {
        match self.project.project_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(ProjectId::new(id)),
            _ => Err(Error::Config(
                "Project id not set. Pass --project-id or set the projectId input".to_string(),
            )),
        }
    }

    /// The parsed GraphQL endpoint
    pub fn graphql_endpoint(&self) -> Result<Url> {
        Url::parse(&self.github.graphql_url).map_err(|e| {
            Error::Config(format!(
                "Invalid GraphQL URL {}: {}",
                self.github.graphql_url, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.graphql_url, DEFAULT_GRAPHQL_URL);
        assert!(config.project.project_id.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(
            Some("PROJ_A".to_string()),
            Some("https://ghe.example.com/api/graphql".to_string()),
        );

        assert_eq!(config.target_project().unwrap().as_str(), "PROJ_A");
        assert_eq!(
            config.graphql_endpoint().unwrap().host_str(),
            Some("ghe.example.com")
        );
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[github]
graphql_url = "https://ghe.example.com/api/graphql"

[project]
project_id = "MDc6UHJvamVjdDE="
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.github.graphql_url, "https://ghe.example.com/api/graphql");
        assert_eq!(
            config.project.project_id,
            Some("MDc6UHJvamVjdDE=".to_string())
        );
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[project]
project_id = "PROJ_A"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // graphql_url should use default
        assert_eq!(config.github.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(config.target_project().unwrap().as_str(), "PROJ_A");
    }

    #[test]
    fn test_missing_project_id() {
        let config = Config::default();
        assert!(matches!(config.target_project(), Err(Error::Config(_))));

        let blank = Config::default().with_cli_overrides(Some("  ".to_string()), None);
        assert!(matches!(blank.target_project(), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_graphql_url() {
        let config = Config::default().with_cli_overrides(None, Some("not a url".to_string()));
        assert!(matches!(config.graphql_endpoint(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[project]\nproject_id = \"PROJ_FILE\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.target_project().unwrap().as_str(), "PROJ_FILE");
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let result =
            Config::load_with_overrides(Some(Path::new("/nonexistent/config.toml")), None, None);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
