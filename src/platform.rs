//! Platform detection utilities

use std::fs;
use std::process::Stdio;
use tokio::process::Command;

/// Detect if running in WSL (Windows Subsystem for Linux)
///
/// Checks for WSL-specific indicators in /proc/version and environment variables.
pub fn is_wsl() -> bool {
    if let Ok(contents) = fs::read_to_string("/proc/version") {
        let lower = contents.to_lowercase();
        if lower.contains("microsoft") || lower.contains("wsl") {
            return true;
        }
    }

    std::env::var("WSL_DISTRO_NAME").is_ok()
}

/// Return the first candidate program that runs successfully with `probe_args`
///
/// Used to locate espeak-ng, PowerShell and the command-line audio players.
/// Probes run as async children killed on drop, so a caller's timeout also
/// bounds a probe that hangs.
pub async fn find_program(candidates: &[&str], probe_args: &[&str]) -> Option<String> {
    for path in candidates {
        let status = Command::new(path)
            .args(probe_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;
        if matches!(status, Ok(status) if status.success()) {
            return Some(path.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wsl() {
        // Result depends on the host, only check it doesn't panic
        let _ = is_wsl();
    }

    #[tokio::test]
    async fn test_find_program_missing() {
        assert_eq!(
            find_program(&["wordrill-no-such-program"], &["--version"]).await,
            None
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_find_program_skips_failing_candidates() {
        assert_eq!(
            find_program(&["wordrill-no-such-program", "false", "true"], &[]).await,
            Some("true".to_string())
        );
    }
}
