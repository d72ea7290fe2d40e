// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Running the smartctl binary.
//
// - Every invocation carries a timeout
// - stdout/stderr are decoded as lossy UTF-8
// - Non-zero exit statuses are returned to the caller, not raised

use crate::common::config::AppConfig;
use crate::utils::run_command_with_timeout;
use std::fmt;
use std::io;
use std::time::Duration;

/// Errors raised while running an external program.
#[derive(Debug)]
pub enum ExecError {
    Io(io::Error),
    Timeout(String),
}

pub type ExecResult<T> = Result<T, ExecError>;

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Io(e) => write!(f, "IO error: {e}"),
            ExecError::Timeout(msg) => write!(f, "Timeout: {msg}"),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::Io(e) => Some(e),
            ExecError::Timeout(_) => None,
        }
    }
}

impl From<io::Error> for ExecError {
    fn from(value: io::Error) -> Self {
        if value.kind() == io::ErrorKind::TimedOut {
            ExecError::Timeout(value.to_string())
        } else {
            ExecError::Io(value)
        }
    }
}

/// Options to control command execution behavior.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    pub timeout: Duration,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(AppConfig::COMMAND_TIMEOUT_SECS),
        }
    }
}

/// Normalized command output.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code (or -1 if unavailable, e.g. killed by a signal)
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Execute `program args...` with the provided options.
pub fn execute_command(
    program: &str,
    args: &[&str],
    options: &CommandOptions,
) -> ExecResult<CommandOutput> {
    let output = run_command_with_timeout(program, args, options.timeout)?;

    Ok(CommandOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_execute_command_success() {
        let out = execute_command("echo", &["hello"], &CommandOptions::default())
            .expect("echo should succeed");
        assert!(out.success());
        assert!(out.stdout.contains("hello"));
    }

    #[test]
    fn test_non_zero_status_is_returned() {
        let out = execute_command("false", &[], &CommandOptions::default()).unwrap();
        assert!(!out.success());
        assert_eq!(out.status, 1);
    }

    #[test]
    fn test_timeout_maps_to_timeout_variant() {
        let opts = CommandOptions {
            timeout: Duration::from_millis(100),
        };
        let err = execute_command("sleep", &["5"], &opts).unwrap_err();
        assert!(matches!(err, ExecError::Timeout(_)));
    }
}
