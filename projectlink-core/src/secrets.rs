//! Access token resolution
//!
//! Inside a workflow the token arrives as the `githubToken` action input. For
//! local runs it can come from `GITHUB_TOKEN` or from a secrets file at
//! `~/.config/projectlink/secrets.toml`, which must have restrictive
//! permissions (0600 on Unix).
//!
//! Loading priority:
//! 1. Explicit value (CLI flag)
//! 2. INPUT_GITHUBTOKEN (action input)
//! 3. GITHUB_TOKEN
//! 4. Secrets file

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

/// Environment variables checked for a token, in priority order
pub const TOKEN_ENV_VARS: &[&str] = &["INPUT_GITHUBTOKEN", "GITHUB_TOKEN"];

/// Secrets structure
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Secrets {
    /// GitHub configuration
    pub github: GitHubSecrets,
}

/// GitHub-related secrets
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitHubSecrets {
    /// GitHub access token
    pub token: Option<String>,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("github", &self.github)
            .finish()
    }
}

impl fmt::Debug for GitHubSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubSecrets")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Secrets {
    /// Load secrets from the default location
    ///
    /// Returns default (empty) secrets if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_secrets_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load secrets from a specific file with permission checking
    pub fn load_from_file(path: &Path) -> Result<Self> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let metadata = std::fs::metadata(path).map_err(Error::Io)?;
            let mode = metadata.permissions().mode();

            if mode & 0o077 != 0 {
                return Err(Error::Config(format!(
                    "Secrets file {} has insecure permissions {:o}. \
                     Please run: chmod 600 {}",
                    path.display(),
                    mode & 0o777,
                    path.display()
                )));
            }
        }

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;

        if let Some(ref mut token) = secrets.github.token {
            *token = token.trim().to_string();
        }

        Ok(secrets)
    }

    /// Get the default secrets file path
    ///
    /// Returns `~/.config/projectlink/secrets.toml` on Unix
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("projectlink").join("secrets.toml"))
    }

    /// Resolve the GitHub token from the process environment
    ///
    /// The secrets file is only read when no higher-priority source is set.
    pub fn resolve_github_token(explicit: Option<&str>) -> Result<String> {
        Self::resolve_github_token_with(explicit, |name| std::env::var(name).ok(), Self::load)
    }

    /// Resolve the GitHub token using `lookup` for environment variables and
    /// `load` for the secrets file
    pub fn resolve_github_token_with<F, L>(
        explicit: Option<&str>,
        lookup: F,
        load: L,
    ) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
        L: FnOnce() -> Result<Secrets>,
    {
        if let Some(token) = non_empty(explicit.map(str::to_string)) {
            debug!("Using GitHub token from command line");
            return Ok(token);
        }

        for name in TOKEN_ENV_VARS {
            if let Some(token) = non_empty(lookup(name)) {
                debug!(source = name, "Using GitHub token from environment");
                return Ok(token);
            }
        }

        if let Some(token) = non_empty(load()?.github.token) {
            debug!("Using GitHub token from secrets file");
            return Ok(token);
        }

        Err(Error::Config(
            "GitHub token not found. Set the githubToken input, GITHUB_TOKEN, \
             or add a token to ~/.config/projectlink/secrets.toml"
                .to_string(),
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
