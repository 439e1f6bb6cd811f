use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ClientError;

/// Destination for copied configuration text
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClientError>;
}

/// Clipboard helpers tried in order; the first one that runs wins
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

/// System clipboard, reached through the platform's clipboard command
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    async fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            // Closing stdin lets the helper finish
            drop(stdin);
        }
        Ok(child.wait().await?.success())
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClientError> {
        let mut failures = Vec::new();
        for (program, args) in CLIPBOARD_COMMANDS {
            match Self::pipe_to(program, args, text).await {
                Ok(true) => {
                    tracing::debug!("Copied {} bytes via {}", text.len(), program);
                    return Ok(());
                }
                Ok(false) => failures.push(format!("{} exited with an error", program)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => failures.push(format!("{}: {}", program, e)),
            }
        }
        if failures.is_empty() {
            Err(ClientError::Clipboard("no clipboard command available".into()))
        } else {
            Err(ClientError::Clipboard(failures.join("; ")))
        }
    }
}
