//! External tool invocation

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished tool run
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Short failure description: exit status plus the end of stderr
    pub fn failure_summary(&self, program: &str) -> String {
        let tail = stderr_tail(&self.stderr, 5);
        if tail.is_empty() {
            format!("{} exited with {}", program, self.status)
        } else {
            format!("{} exited with {}: {}", program, self.status, tail)
        }
    }
}

/// Run `program` with `args` and wait for it to exit
pub async fn run_tool(program: &str, args: &[String]) -> std::io::Result<ToolOutput> {
    debug!(program, args = ?args, "Running external tool");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await?;

    Ok(ToolOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Last `lines` non-empty lines of a tool's stderr, joined with " | "
pub fn stderr_tail(stderr: &str, lines: usize) -> String {
    let kept: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let start = kept.len().saturating_sub(lines);
    kept[start..].join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = "a\n\nb\nc\n  d  \n";
        assert_eq!(stderr_tail(stderr, 2), "c | d");
        assert_eq!(stderr_tail(stderr, 10), "a | b | c | d");
        assert_eq!(stderr_tail("", 3), "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_tool_reports_exit_status() {
        let ok = run_tool("true", &[]).await.unwrap();
        assert!(ok.success());

        let failed = run_tool("false", &[]).await.unwrap();
        assert!(!failed.success());
        assert!(failed.failure_summary("false").starts_with("false exited with"));
    }

    #[tokio::test]
    async fn test_run_tool_missing_binary() {
        assert!(run_tool("reelx-definitely-not-installed", &[]).await.is_err());
    }
}
