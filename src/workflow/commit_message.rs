use tracing::debug;

use crate::context::AppContext;
use crate::domain::change::{ChangeKind, ChangeSet, untracked_listing};
use crate::domain::commit::CommitMessage;
use crate::domain::prompt::build_prompt;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Checks that must pass before any change collection or network work.
pub async fn preflight(ctx: &AppContext) -> AppResult<()> {
    if !ctx.version_control.is_repository().await? {
        return Err(AppError::NotARepository);
    }
    ctx.config.require_api_key()?;
    Ok(())
}

/// Picks the first non-empty source among staged, unstaged and untracked
/// changes. Status is only queried once something was found.
pub async fn collect_changes(vcs: &dyn VersionControlService) -> AppResult<Option<ChangeSet>> {
    let Some((diff, kind)) = detect_diff(vcs).await? else {
        return Ok(None);
    };
    debug!(%kind, diff_len = diff.len(), "collected changes");

    let status = vcs.status().await?;
    Ok(Some(ChangeSet { diff, status, kind }))
}

async fn detect_diff(vcs: &dyn VersionControlService) -> AppResult<Option<(String, ChangeKind)>> {
    let staged = vcs.staged_diff().await?;
    if !staged.trim().is_empty() {
        return Ok(Some((staged.trim().to_string(), ChangeKind::Staged)));
    }

    let unstaged = vcs.unstaged_diff().await?;
    if !unstaged.trim().is_empty() {
        return Ok(Some((unstaged.trim().to_string(), ChangeKind::Unstaged)));
    }

    let untracked = vcs.untracked_files().await?;
    if untracked.iter().any(|path| !path.is_empty()) {
        let listing = untracked_listing(untracked.iter().map(String::as_str));
        return Ok(Some((listing, ChangeKind::Untracked)));
    }

    Ok(None)
}

pub async fn draft_message(
    ctx: &AppContext,
    changes: &ChangeSet,
    context: Option<&str>,
) -> AppResult<CommitMessage> {
    let prompt = build_prompt(changes, context);
    ctx.language_model.complete_commit_message(&prompt).await
}
