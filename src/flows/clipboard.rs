//! Clipboard capability
//!
//! One [`ClipboardProvider`] is chosen at startup by [`select_clipboard`]:
//! the platform clipboard when it is reachable, otherwise a legacy copy
//! command fed through a scoped scratch file. Flows only see the trait.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ClipboardConfig;
use crate::errors::{ClientError, Result};

/// Scratch files created by [`CommandClipboard`] start with this prefix
pub const SCRATCH_PREFIX: &str = ".shortlink-clip-";

pub trait ClipboardProvider: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Platform clipboard via arboard
#[cfg(feature = "native-clipboard")]
pub struct NativeClipboard;

#[cfg(feature = "native-clipboard")]
impl NativeClipboard {
    /// Succeeds only when the platform clipboard can be opened right now
    pub fn probe() -> Result<Self> {
        arboard::Clipboard::new()
            .map(|_| Self)
            .map_err(|e| ClientError::capability(format!("platform clipboard unavailable: {}", e)))
    }
}

#[cfg(feature = "native-clipboard")]
impl ClipboardProvider for NativeClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ClientError::capability(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClientError::capability(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

/// Fallback: pipe the value into an external copy command (`pbcopy`,
/// `xclip -selection clipboard`, `clip`, ...).
///
/// The value is staged in a temporary scratch file that is removed when the
/// write finishes, whether the command succeeded, failed or never started.
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    scratch_dir: PathBuf,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Parse a whitespace-separated command line such as `xclip -selection clipboard`
    pub fn from_command_line(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| ClientError::capability("no fallback copy command configured"))?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ClipboardProvider for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let capability = |e: std::io::Error| ClientError::capability(e.to_string());

        // Dropping `scratch` deletes the file on every exit path below.
        let mut scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempfile_in(&self.scratch_dir)
            .map_err(capability)?;
        scratch.write_all(text.as_bytes()).map_err(capability)?;
        scratch.flush().map_err(capability)?;
        let input = scratch.reopen().map_err(capability)?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::from(input))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        if let Err(e) = scratch.close() {
            warn!("Failed to remove clipboard scratch file: {}", e);
        }

        match status {
            Ok(s) if s.success() => Ok(()),
            Ok(s) => Err(ClientError::capability(format!(
                "`{}` exited with {}",
                self.program, s
            ))),
            Err(e) => Err(ClientError::capability(format!(
                "cannot run `{}`: {}",
                self.program, e
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

/// Selected when neither provider can be constructed; every write fails.
pub struct UnavailableClipboard;

impl ClipboardProvider for UnavailableClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(ClientError::capability("no clipboard available"))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

/// Choose the clipboard provider once, at startup
pub fn select_clipboard(config: &ClipboardConfig) -> Arc<dyn ClipboardProvider> {
    #[cfg(feature = "native-clipboard")]
    if config.prefer_native {
        match NativeClipboard::probe() {
            Ok(native) => {
                info!("Using native clipboard");
                return Arc::new(native);
            }
            Err(e) => debug!("{}, falling back to copy command", e),
        }
    }

    match CommandClipboard::from_command_line(&config.fallback_command) {
        Ok(command) => {
            info!("Using copy command `{}`", command.program());
            Arc::new(command)
        }
        Err(e) => {
            warn!("{}", e);
            Arc::new(UnavailableClipboard)
        }
    }
}

/// Transient "copied" flag that reverts on its own after a fixed window.
#[derive(Debug, Clone)]
pub struct CopyIndicator {
    window: Duration,
    copied_until: Option<Instant>,
}

impl CopyIndicator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            copied_until: None,
        }
    }

    pub fn mark(&mut self) {
        self.copied_until = Some(Instant::now() + self.window);
    }

    pub fn reset(&mut self) {
        self.copied_until = None;
    }

    pub fn is_copied(&self) -> bool {
        self.copied_until.is_some_and(|until| Instant::now() < until)
    }
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch_entries(dir: &TempDir) -> Vec<PathBuf> {
        std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[cfg(unix)]
    #[test]
    fn test_command_success_leaves_no_scratch_file() {
        let dir = TempDir::new().unwrap();
        let clip = CommandClipboard::new("cat", vec![]).with_scratch_dir(dir.path());
        clip.write_text("https://x/abc").unwrap();
        assert!(scratch_entries(&dir).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_failure_leaves_no_scratch_file() {
        let dir = TempDir::new().unwrap();
        let clip = CommandClipboard::new("false", vec![]).with_scratch_dir(dir.path());
        assert!(matches!(
            clip.write_text("https://x/abc"),
            Err(ClientError::Capability(_))
        ));
        assert!(scratch_entries(&dir).is_empty());
    }

    #[test]
    fn test_missing_command_leaves_no_scratch_file() {
        let dir = TempDir::new().unwrap();
        let clip = CommandClipboard::new("shortlink-no-such-copy-tool", vec![])
            .with_scratch_dir(dir.path());
        assert!(matches!(
            clip.write_text("https://x/abc"),
            Err(ClientError::Capability(_))
        ));
        assert!(scratch_entries(&dir).is_empty());
    }

    #[test]
    fn test_from_command_line() {
        let clip = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clip.program(), "xclip");
        assert_eq!(clip.args, vec!["-selection", "clipboard"]);
        assert!(CommandClipboard::from_command_line("   ").is_err());
    }

    #[test]
    fn test_select_without_any_provider() {
        let config = ClipboardConfig {
            prefer_native: false,
            fallback_command: String::new(),
            copied_reset_ms: 2000,
        };
        let provider = select_clipboard(&config);
        assert_eq!(provider.name(), "unavailable");
        assert!(provider.write_text("x").is_err());
    }

    #[test]
    fn test_select_command_when_native_not_preferred() {
        let config = ClipboardConfig {
            prefer_native: false,
            fallback_command: "pbcopy".to_string(),
            copied_reset_ms: 2000,
        };
        assert_eq!(select_clipboard(&config).name(), "command");
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_indicator_reverts_after_window() {
        let mut indicator = CopyIndicator::new(Duration::from_millis(2000));
        assert!(!indicator.is_copied());

        indicator.mark();
        assert!(indicator.is_copied());

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(indicator.is_copied());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!indicator.is_copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_indicator_reset() {
        let mut indicator = CopyIndicator::default();
        indicator.mark();
        indicator.reset();
        assert!(!indicator.is_copied());
    }
}
