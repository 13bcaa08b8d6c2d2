use std::path::PathBuf;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
    program: String,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self {
            workspace_root,
            program: "git".to_string(),
        }
    }

    /// Spawn failures (missing binary, permissions) are errors; the exit
    /// status is left to the caller.
    async fn output(&self, args: &[&str]) -> AppResult<Output> {
        debug!(?args, root = %self.workspace_root.display(), "running git");
        Command::new(&self.program)
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| {
                AppError::VersionControl(format!(
                    "failed to run {} {}: {err}",
                    self.program,
                    args.join(" ")
                ))
            })
    }

    async fn run(&self, args: &[&str]) -> AppResult<String> {
        let output = self.output(args).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn is_repository(&self) -> AppResult<bool> {
        let output = self.output(&["rev-parse", "--git-dir"]).await?;
        Ok(output.status.success())
    }

    async fn staged_diff(&self) -> AppResult<String> {
        self.run(&["diff", "--cached"]).await
    }

    async fn unstaged_diff(&self) -> AppResult<String> {
        self.run(&["diff"]).await
    }

    async fn untracked_files(&self) -> AppResult<Vec<String>> {
        let listing = self
            .run(&["ls-files", "--others", "--exclude-standard"])
            .await?;
        Ok(listing
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn status(&self) -> AppResult<String> {
        self.run(&["status", "--porcelain"]).await
    }
}
