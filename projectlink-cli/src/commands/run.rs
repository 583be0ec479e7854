//! Run command - attach the triggering pull request to the project

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use projectlink_core::{event::EVENT_PATH_ENV, sync_pull_request, Config, EventPayload, Secrets};
use projectlink_github::GitHubClient;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the workflow event payload
    #[arg(long, global = true, env = EVENT_PATH_ENV)]
    pub event_path: Option<PathBuf>,

    /// GitHub token (overrides INPUT_GITHUBTOKEN, GITHUB_TOKEN and secrets file)
    #[arg(long, global = true)]
    pub github_token: Option<String>,
}

impl RunArgs {
    /// Execute the run command
    ///
    /// `load_config` is only called once the event is known to be a pull
    /// request event.
    pub async fn execute<F>(&self, load_config: F) -> anyhow::Result<()>
    where
        F: FnOnce() -> projectlink_core::Result<Config>,
    {
        let event_path = self.event_path.clone().with_context(|| {
            format!("No event payload: pass --event-path or set {}", EVENT_PATH_ENV)
        })?;
        let event = EventPayload::load(&event_path)?;

        // A non-PR event fails before config, credentials or network are touched
        event.pull_request_ref()?;

        let config = load_config()?;
        let target = config.target_project()?;
        let token = Secrets::resolve_github_token(self.github_token.as_deref())?;
        let client = GitHubClient::new(&token, config.graphql_endpoint()?)?;

        tracing::info!(
            event_path = %event_path.display(),
            project = %target,
            "Starting projectlink run"
        );

        let report = sync_pull_request(&client, &event, &target).await?;

        if report.newly_attached() {
            tracing::info!(
                pull_request = %report.pull_request,
                project = %target,
                "Attached pull request to project"
            );
        } else {
            tracing::info!(
                pull_request = %report.pull_request,
                project = %target,
                "Pull request was already attached to project"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;

    fn event_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    #[tokio::test]
    async fn test_non_pr_event_reported_before_config() {
        let file = event_file(r#"{ "ref": "refs/heads/main" }"#);
        let args = RunArgs {
            event_path: Some(file.path().to_path_buf()),
            github_token: None,
        };
        let config_loaded = Cell::new(false);

        let err = args
            .execute(|| {
                config_loaded.set(true);
                Err(projectlink_core::Error::Config("Failed to parse config".to_string()))
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "This is not a PR");
        assert!(!config_loaded.get());
    }

    #[tokio::test]
    async fn test_config_error_surfaces_for_pr_event() {
        let file = event_file(r#"{ "pull_request": { "node_id": "PR_1" } }"#);
        let args = RunArgs {
            event_path: Some(file.path().to_path_buf()),
            github_token: Some("ghp_test".to_string()),
        };

        let err = args
            .execute(|| Err(projectlink_core::Error::Config("Failed to parse config".to_string())))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Configuration error: Failed to parse config");
    }

    #[tokio::test]
    async fn test_missing_event_path() {
        let args = RunArgs {
            event_path: None,
            github_token: None,
        };

        let err = args.execute(|| Ok(Config::default())).await.unwrap_err();
        assert!(err.to_string().contains("No event payload"));
    }
}
