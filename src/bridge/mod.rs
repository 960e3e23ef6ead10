// src/bridge/mod.rs
//! Runs the external CLI for one prompt and reduces whatever happens to a
//! [`SubprocessResult`].

pub mod completion;
pub mod process;

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::config::BridgeConfig;
use crate::errors::RelayError;
use crate::models::ApiResponse;

pub use completion::Completion;
pub use process::{ChildProcess, ExitOutcome, LaunchSpec, Launcher, OutputStream, TokioLauncher};

/// Reported when the child exits non-zero without writing to stderr.
pub const EXECUTION_FAILED: &str = "command execution failed";

const READ_CHUNK_BYTES: usize = 8 * 1024;

/// Outcome of one bridge invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "ApiResponse")]
pub enum SubprocessResult {
    Success { output: String },
    Failure { error: String },
}

impl SubprocessResult {
    pub fn success(output: impl Into<String>) -> Self {
        SubprocessResult::Success { output: output.into() }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        SubprocessResult::Failure { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubprocessResult::Success { .. })
    }
}

impl From<RelayError> for SubprocessResult {
    fn from(err: RelayError) -> Self {
        SubprocessResult::failure(err.to_string())
    }
}

/// Map a normal exit to a result.
fn exit_result(outcome: ExitOutcome, stdout: String, stderr: String) -> SubprocessResult {
    if outcome.success() {
        return SubprocessResult::success(stdout);
    }
    let message = if stderr.is_empty() {
        EXECUTION_FAILED.to_string()
    } else {
        stderr
    };
    RelayError::Subprocess(message).into()
}

/// Drain a child stream chunk by chunk until EOF.
fn spawn_reader(stream: Option<OutputStream>) -> JoinHandle<String> {
    tokio::spawn(async move {
        let mut collected = Vec::new();
        if let Some(mut stream) = stream {
            let mut chunk = [0u8; READ_CHUNK_BYTES];
            loop {
                match stream.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => collected.extend_from_slice(&chunk[..n]),
                    Err(e) => {
                        log::warn!("Failed to read child output: {}", e);
                        break;
                    }
                }
            }
        }
        String::from_utf8_lossy(&collected).into_owned()
    })
}

pub struct Bridge {
    config: BridgeConfig,
    launcher: Arc<dyn Launcher>,
    limiter: Option<Semaphore>,
}

impl Bridge {
    pub fn new(config: BridgeConfig, launcher: Arc<dyn Launcher>) -> Self {
        let limiter = config.max_concurrent.map(Semaphore::new);
        Self { config, launcher, limiter }
    }

    /// Build the exact command line and environment for `prompt`.
    pub fn launch_spec(&self, prompt: &str, api_key: &str) -> LaunchSpec {
        let mut args = self.config.leading_args.clone();
        args.push("--print".to_string());
        args.push(prompt.to_string());

        LaunchSpec {
            program: self.config.command.clone(),
            args,
            env: vec![
                (
                    "CLAUDE_CONFIG_DIR".to_string(),
                    self.config.config_dir.display().to_string(),
                ),
                ("HOME".to_string(), self.config.home_dir.display().to_string()),
                ("ANTHROPIC_API_KEY".to_string(), api_key.to_string()),
            ],
            current_dir: self.config.working_dir.clone(),
        }
    }

    /// Run the CLI once for `prompt`. Never fails: every problem is folded
    /// into a `SubprocessResult::Failure`.
    pub async fn run(&self, prompt: &str, api_key: &str) -> SubprocessResult {
        // The semaphore is never closed, so a failed acquire cannot happen.
        let _permit = match &self.limiter {
            Some(limiter) => limiter.acquire().await.ok(),
            None => None,
        };

        let spec = self.launch_spec(prompt, api_key);
        let completion = Completion::new();
        let started = Instant::now();

        match self.launcher.launch(&spec) {
            Ok(child) => self.supervise(child, &completion, started).await,
            Err(e) => {
                log::error!("Failed to start '{}': {}", spec.program, e);
                completion.resolve(RelayError::Launch(e).into());
            }
        }

        completion
            .into_result()
            .unwrap_or_else(|| SubprocessResult::failure(EXECUTION_FAILED))
    }

    async fn supervise(
        &self,
        mut child: Box<dyn ChildProcess>,
        completion: &Completion,
        started: Instant,
    ) {
        log::info!("Started '{}' (pid {:?})", self.config.command, child.id());

        let stdout_reader = spawn_reader(child.take_stdout());
        let stderr_reader = spawn_reader(child.take_stderr());
        let abort_stdout = stdout_reader.abort_handle();
        let abort_stderr = stderr_reader.abort_handle();

        // The deadline covers both the exit and draining the pipes.
        let finished = tokio::time::timeout(self.config.timeout, async {
            let status = child.wait().await;
            let (stdout, stderr) = futures::future::join(stdout_reader, stderr_reader).await;
            (status, stdout.unwrap_or_default(), stderr.unwrap_or_default())
        })
        .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;

        match finished {
            Ok((Ok(outcome), stdout, stderr)) => {
                if outcome.success() {
                    log::info!("Command succeeded in {}ms", elapsed_ms);
                } else {
                    log::error!(
                        "Command failed with exit code {:?} after {}ms: {}",
                        outcome.code,
                        elapsed_ms,
                        stderr
                    );
                }
                completion.resolve(exit_result(outcome, stdout, stderr));
            }
            Ok((Err(e), _, _)) => {
                log::error!("Failed waiting for child: {}", e);
                completion.resolve(RelayError::Launch(e).into());
            }
            Err(_) => {
                let secs = self.config.timeout.as_secs();
                log::warn!("Command timed out after {}ms, terminating", elapsed_ms);
                completion.resolve(RelayError::Timeout(secs).into());

                abort_stdout.abort();
                abort_stderr.abort();
                if let Err(e) = child.terminate().await {
                    log::warn!("Failed to terminate timed out child: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use std::path::PathBuf;

    #[test]
    fn test_exit_result_mapping() {
        assert_eq!(
            exit_result(ExitOutcome { code: Some(0) }, "hello\n".into(), "warning".into()),
            SubprocessResult::success("hello\n")
        );
        assert_eq!(
            exit_result(ExitOutcome { code: Some(1) }, "partial".into(), "boom".into()),
            SubprocessResult::failure("boom")
        );
        assert_eq!(
            exit_result(ExitOutcome { code: Some(2) }, String::new(), String::new()),
            SubprocessResult::failure(EXECUTION_FAILED)
        );
        // killed by a signal is treated like any other failure
        assert_eq!(
            exit_result(ExitOutcome { code: None }, String::new(), String::new()),
            SubprocessResult::failure(EXECUTION_FAILED)
        );
    }

    #[test]
    fn test_launch_spec_composition() {
        let config = BridgeConfig {
            leading_args: vec!["--verbose".to_string()],
            working_dir: Some(PathBuf::from("/tmp/work")),
            ..BridgeConfig::default()
        };
        let bridge = Bridge::new(config, Arc::new(TokioLauncher));

        let spec = bridge.launch_spec("what is 2+2?", "sk-test");

        assert_eq!(spec.program, "claude");
        assert_eq!(spec.args, vec!["--verbose", "--print", "what is 2+2?"]);
        assert!(spec.env.contains(&("CLAUDE_CONFIG_DIR".to_string(), "/root/.claude".to_string())));
        assert!(spec.env.contains(&("HOME".to_string(), "/root".to_string())));
        assert!(spec.env.contains(&("ANTHROPIC_API_KEY".to_string(), "sk-test".to_string())));
        assert_eq!(spec.current_dir, Some(PathBuf::from("/tmp/work")));
    }

    #[test]
    fn test_result_serialization() {
        let ok = serde_json::to_value(SubprocessResult::success("4")).unwrap();
        assert_eq!(ok, serde_json::json!({ "success": true, "output": "4" }));

        let err = serde_json::to_value(SubprocessResult::failure("boom")).unwrap();
        assert_eq!(err, serde_json::json!({ "success": false, "error": "boom" }));
    }
}
