use std::env::consts::OS;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::ClipboardService;

/// A clipboard utility that reads the text to copy from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

const PBCOPY: ClipboardCommand = ClipboardCommand {
    program: "pbcopy",
    args: &[],
};

const CLIP: ClipboardCommand = ClipboardCommand {
    program: "cmd",
    args: &["/c", "clip"],
};

/// Probed in order; the first one installed wins.
const LINUX_COMMANDS: &[ClipboardCommand] = &[
    ClipboardCommand {
        program: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardCommand {
        program: "xsel",
        args: &["--clipboard", "--input"],
    },
    ClipboardCommand {
        program: "wl-copy",
        args: &[],
    },
];

pub fn select_command<F>(os: &str, is_installed: F) -> AppResult<ClipboardCommand>
where
    F: Fn(&str) -> bool,
{
    match os {
        "macos" => Ok(PBCOPY),
        "windows" => Ok(CLIP),
        "linux" => LINUX_COMMANDS
            .iter()
            .copied()
            .find(|command| is_installed(command.program))
            .ok_or_else(|| {
                AppError::Clipboard(
                    "no clipboard utility found (install xclip, xsel, or wl-copy)".to_string(),
                )
            }),
        other => Err(AppError::Clipboard(format!(
            "unsupported operating system: {other}"
        ))),
    }
}

pub struct SystemClipboard {
    os: &'static str,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { os: OS }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardService for SystemClipboard {
    async fn copy(&self, text: &str) -> AppResult<()> {
        let command = select_command(self.os, |program| which::which(program).is_ok())?;
        debug!(program = command.program, "copying to clipboard");

        let mut child = Command::new(command.program)
            .args(command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| {
                AppError::Clipboard(format!("failed to spawn {}: {err}", command.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(|err| {
                AppError::Clipboard(format!("failed to write to {}: {err}", command.program))
            })?;
        }

        let status = child.wait().await.map_err(|err| {
            AppError::Clipboard(format!("failed to wait for {}: {err}", command.program))
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(AppError::Clipboard(format!(
                "{} exited with {status}",
                command.program
            )))
        }
    }
}
