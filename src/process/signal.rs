use super::KillTarget;
use std::process::Command;

/// Send SIGTERM through `kill(1)` and describe the outcome for the status line.
pub fn terminate(target: &KillTarget) -> String {
    match Command::new("kill")
        .arg("-TERM")
        .arg(target.pid.to_string())
        .status()
    {
        Ok(status) if status.success() => {
            tracing::info!(pid = target.pid, name = %target.name, "sent SIGTERM");
            format!("SIGTERM sent to {} ({})", target.name, target.pid)
        }
        Ok(status) => {
            tracing::warn!(pid = target.pid, %status, "kill exited unsuccessfully");
            format!("Failed to terminate PID {} (exit {})", target.pid, status)
        }
        Err(err) => {
            tracing::warn!(pid = target.pid, error = %err, "could not run kill");
            format!("Failed to run kill for PID {}: {}", target.pid, err)
        }
    }
}
