//! Process Executor - runs rendered scripts through `osascript`.
//!
//! This is the only place the bridge spawns a process. One call, one child,
//! no retry.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::ExecutionError;
use crate::script::{DEFAULT_APPLICATION, Script};

/// OSA language flag passed to the interpreter.
const SCRIPT_LANGUAGE: &str = "JavaScript";

/// Configuration for the automation bridge.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Interpreter binary.
    pub interpreter: String,
    /// Arguments placed before the language flag (wrappers such as `env`).
    pub interpreter_args: Vec<String>,
    /// Scripting name of the host application.
    pub application: String,
    /// Upper bound on one interpreter run; `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            interpreter: "osascript".to_string(),
            interpreter_args: vec![],
            application: DEFAULT_APPLICATION.to_string(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Runs a [`Script`] and returns its trimmed standard output.
pub trait ScriptExecutor {
    /// Execute `script` once.
    ///
    /// # Errors
    /// Returns [`ExecutionError`] when the process cannot be spawned, exits
    /// non-zero, or outlives its time bound.
    fn execute(&self, script: &Script) -> Result<String, ExecutionError>;
}

/// [`ScriptExecutor`] backed by an out-of-process OSA interpreter.
#[derive(Debug, Clone)]
pub struct OsaScriptExecutor {
    interpreter: String,
    interpreter_args: Vec<String>,
    timeout: Option<Duration>,
}

impl Default for OsaScriptExecutor {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

impl OsaScriptExecutor {
    /// Build from the process-related part of `config`.
    #[must_use]
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            interpreter_args: config.interpreter_args.clone(),
            timeout: config.timeout,
        }
    }

    /// Configured time bound.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn command(&self, script: &Script) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.args(&self.interpreter_args)
            .args(["-l", SCRIPT_LANGUAGE, "-e"])
            .arg(&script.source)
            .args(&script.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus, ExecutionError> {
        let Some(limit) = self.timeout else {
            return Ok(child.wait()?);
        };
        if let Some(status) = child.wait_timeout(limit)? {
            return Ok(status);
        }
        let _ = child.kill();
        let _ = child.wait();
        warn!(
            interpreter = %self.interpreter,
            timeout_ms = limit.as_millis(),
            "interpreter timed out and was killed"
        );
        Err(ExecutionError::TimedOut(limit))
    }
}

impl ScriptExecutor for OsaScriptExecutor {
    fn execute(&self, script: &Script) -> Result<String, ExecutionError> {
        debug!(
            interpreter = %self.interpreter,
            source_bytes = script.source.len(),
            args = script.args.len(),
            "running script"
        );
        let started = Instant::now();

        let mut child = self
            .command(script)
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                program: self.interpreter.clone(),
                source,
            })?;

        // Drain both pipes while waiting so a large result cannot block the child.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child)?;
        let stdout = collect(stdout)?;
        let stderr = collect(stderr)?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            warn!(
                interpreter = %self.interpreter,
                code = ?status.code(),
                stderr = %stderr,
                "script failed"
            );
            return Err(ExecutionError::Failed {
                code: status.code(),
                stderr,
            });
        }

        let output = String::from_utf8_lossy(&stdout).trim().to_string();
        debug!(
            elapsed_ms = started.elapsed().as_millis(),
            output_bytes = output.len(),
            "script finished"
        );
        Ok(output)
    }
}

type Drain = JoinHandle<io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> Drain {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut stream) = stream {
            stream.read_to_end(&mut buffer)?;
        }
        Ok(buffer)
    })
}

fn collect(handle: Drain) -> Result<Vec<u8>, ExecutionError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::other("pipe reader panicked")))
        .map_err(ExecutionError::from)
}
