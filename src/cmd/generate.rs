use std::io::Write;

use tracing::warn;

use crate::context::AppContext;
use crate::domain::change::ChangeKind;
use crate::domain::commit::CommitMessage;
use crate::error::AppResult;
use crate::workflow::commit_message::{collect_changes, draft_message, preflight};

const FRAME_RULE: &str = "─────────────────────────────────────────────────────────────────";

#[derive(Debug, Clone, Default)]
pub struct GenerateCommandArgs {
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    NothingToCommit,
    Generated {
        message: CommitMessage,
        copied: bool,
    },
}

pub async fn run<W: Write>(
    ctx: &AppContext,
    args: GenerateCommandArgs,
    out: &mut W,
) -> AppResult<GenerateOutcome> {
    preflight(ctx).await?;

    let context = args.context.as_deref().filter(|c| !c.trim().is_empty());
    if let Some(context) = context {
        writeln!(out, "📝 Context: \"{context}\"")?;
    }

    let Some(changes) = collect_changes(ctx.version_control.as_ref()).await? else {
        writeln!(out, "✨ No changes detected. Nothing to commit!")?;
        return Ok(GenerateOutcome::NothingToCommit);
    };

    write_kind_hint(out, changes.kind)?;

    let message = draft_message(ctx, &changes, context).await?;
    present(ctx, message, out).await
}

fn write_kind_hint<W: Write>(out: &mut W, kind: ChangeKind) -> AppResult<()> {
    match kind {
        ChangeKind::Staged => writeln!(out, "Analyzing staged changes...")?,
        ChangeKind::Unstaged => {
            writeln!(out, "No staged changes, analyzing unstaged changes...")?;
            writeln!(out, "💡 Tip: Run 'git add .' to stage changes first")?;
        }
        ChangeKind::Untracked => {
            writeln!(out, "Analyzing untracked files...")?;
            writeln!(out, "💡 Tip: Run 'git add .' to stage files first")?;
        }
    }
    Ok(())
}

/// Prints the framed message and tries the clipboard. A clipboard failure
/// only changes what gets printed.
async fn present<W: Write>(
    ctx: &AppContext,
    message: CommitMessage,
    out: &mut W,
) -> AppResult<GenerateOutcome> {
    writeln!(out)?;
    writeln!(out, "✨ Generated commit message:")?;
    writeln!(out, "┌{FRAME_RULE}")?;
    for line in message.as_str().lines() {
        writeln!(out, "│ {line}")?;
    }
    writeln!(out, "└{FRAME_RULE}")?;

    let copied = match ctx.clipboard.copy(message.as_str()).await {
        Ok(()) => {
            writeln!(out, "📋 Copied to clipboard")?;
            true
        }
        Err(err) => {
            warn!(error = %err, "clipboard copy failed");
            writeln!(out, "📋 Could not copy to clipboard: {err}")?;
            writeln!(out, "Copy the message manually:")?;
            writeln!(out, "{message}")?;
            false
        }
    };

    Ok(GenerateOutcome::Generated { message, copied })
}
