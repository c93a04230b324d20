//! Command runner capability
//!
//! Executes a program with timeout enforcement and output size limits.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::ReportError;

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Zero exit status and non-blank stdout
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0) && !self.stdout.trim().is_empty()
    }
}

/// Trait for running external programs
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Resolve a program name on the execution path
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Run `argv[0]` with the remaining arguments, bounded by `timeout`
    async fn run(&self, argv: &[String], timeout: Duration) -> Result<CommandOutput, ReportError>;
}

/// Runs real processes through tokio
#[derive(Debug, Clone)]
pub struct SystemRunner {
    max_output_bytes: usize,
}

impl SystemRunner {
    pub fn new(max_output_bytes: usize) -> Self {
        Self { max_output_bytes }
    }
}

/// Truncate output to max bytes without splitting a multi-byte character
///
/// Invalid bytes before the cut are replaced, not used as the cut point.
fn truncate_output(output: &[u8], max_bytes: usize) -> (String, bool) {
    if output.len() <= max_bytes {
        return (String::from_utf8_lossy(output).into_owned(), false);
    }

    let mut end = max_bytes;
    while end > 0 && (output[end] & 0xC0) == 0x80 {
        end -= 1;
    }
    (String::from_utf8_lossy(&output[..end]).into_owned(), true)
}

#[async_trait]
impl CommandRunner for SystemRunner {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    async fn run(&self, argv: &[String], timeout: Duration) -> Result<CommandOutput, ReportError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| ReportError::Config("empty command line".to_string()))?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(command = %argv.join(" "), "Spawning");

        match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => {
                let (stdout, stdout_truncated) =
                    truncate_output(&output.stdout, self.max_output_bytes);
                let (stderr, _) = truncate_output(&output.stderr, self.max_output_bytes);
                if stdout_truncated {
                    tracing::warn!(
                        program = %program,
                        limit = self.max_output_bytes,
                        "Output truncated"
                    );
                }

                Ok(CommandOutput {
                    exit_code: output.status.code(),
                    stdout,
                    stderr,
                })
            }
            Ok(Err(source)) => Err(ReportError::Spawn {
                program: program.clone(),
                source,
            }),
            // The child is killed when the output future is dropped
            Err(_elapsed) => Err(ReportError::Timeout {
                program: program.clone(),
                secs: timeout.as_secs(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_succeeded_requires_zero_and_output() {
        let ok = CommandOutput {
            exit_code: Some(0),
            stdout: "pkg\n".into(),
            stderr: String::new(),
        };
        assert!(ok.succeeded());

        let blank = CommandOutput {
            exit_code: Some(0),
            stdout: "  \n\t".into(),
            stderr: String::new(),
        };
        assert!(!blank.succeeded());

        let failed = CommandOutput {
            exit_code: Some(1),
            stdout: "pkg\n".into(),
            stderr: String::new(),
        };
        assert!(!failed.succeeded());

        let signalled = CommandOutput {
            exit_code: None,
            stdout: "pkg\n".into(),
            stderr: String::new(),
        };
        assert!(!signalled.succeeded());
    }

    #[test]
    fn test_truncate_output_respects_utf8() {
        let (text, truncated) = truncate_output("héllo".as_bytes(), 2);
        assert!(truncated);
        assert_eq!(text, "h");

        let (text, truncated) = truncate_output(b"abc", 10);
        assert!(!truncated);
        assert_eq!(text, "abc");
    }

    #[test]
    fn test_truncate_keeps_lines_after_invalid_byte() {
        let mut output = b"Installed Packages\ncaf\xe9.noarch 1 repo\n".to_vec();
        for i in 0..200 {
            output.extend_from_slice(format!("pkg{} 1.0 repo\n", i).as_bytes());
        }
        let limit = output.len() - 10;

        let (text, truncated) = truncate_output(&output, limit);
        assert!(truncated);
        assert_eq!(text.len(), limit + 2);
        assert!(text.contains("caf\u{FFFD}.noarch"));
        assert!(text.contains("pkg198 1.0 repo"));
    }

    #[tokio::test]
    async fn test_runs_real_process() {
        let runner = SystemRunner::new(1024);
        let output = runner
            .run(&argv(&["sh", "-c", "echo hello"]), Duration::from_secs(10))
            .await
            .unwrap();
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let runner = SystemRunner::new(1024);
        let result = runner
            .run(&argv(&["sleep", "5"]), Duration::from_millis(100))
            .await;
        assert!(matches!(result, Err(ReportError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_reported() {
        let runner = SystemRunner::new(1024);
        let result = runner
            .run(
                &argv(&["/nonexistent/sysreport-test-binary"]),
                Duration::from_secs(1),
            )
            .await;
        assert!(matches!(result, Err(ReportError::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_empty_argv_rejected() {
        let runner = SystemRunner::new(1024);
        let result = runner.run(&[], Duration::from_secs(1)).await;
        assert!(matches!(result, Err(ReportError::Config(_))));
    }

    #[test]
    fn test_locate_missing_program() {
        let runner = SystemRunner::new(1024);
        assert!(runner.locate("sysreport-no-such-program-xyz").is_none());
        assert!(runner.locate("sh").is_some());
    }
}
