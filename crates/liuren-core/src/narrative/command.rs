//! Interpreter backed by an external program.
//!
//! The program receives the prompt from [`build_prompt`] on stdin and must
//! print the analysis JSON on stdout. This is how a hosted language model
//! is plugged in without linking a vendor SDK.

use std::io::{ErrorKind, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use super::{Analysis, Interpreter, NarrativeError, NarrativeResult, build_prompt};
use crate::chain::Reading;

/// Program and arguments for a [`CommandInterpreter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    /// Executable to run.
    pub program: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
    /// How long to wait for the program before killing it.
    pub timeout: Duration,
}

/// Default time limit for an external interpreter.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

impl CommandConfig {
    /// Run `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Append one argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Pipes the prompt through an external program.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    config: CommandConfig,
}

impl CommandInterpreter {
    /// Create an interpreter for the configured program.
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }
}

impl Interpreter for CommandInterpreter {
    fn name(&self) -> &str {
        &self.config.program
    }

    fn interpret(&self, reading: &Reading) -> NarrativeResult<Analysis> {
        let prompt = build_prompt(reading);
        info!(
            "running interpreter `{}` ({} prompt bytes)",
            self.config.program,
            prompt.len()
        );

        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| NarrativeError::Spawn {
                program: self.config.program.clone(),
                source,
            })?;

        let deadline = Instant::now() + self.config.timeout;

        // Pipes are serviced on their own threads so a child that floods
        // stdout or never reads stdin cannot stall the deadline check.
        let writer = child.stdin.take().map(|stdin| {
            let bytes = prompt.into_bytes();
            on_thread(move || write_prompt(stdin, &bytes))
        });
        let stdout = child.stdout.take().map(|pipe| on_thread(move || drain(pipe)));
        let stderr = child.stderr.take().map(|pipe| on_thread(move || drain(pipe)));

        let status = self.wait_until(&mut child, deadline)?;

        if let Some(rx) = writer {
            self.collect(rx, deadline)??;
        }
        let stdout = match stdout {
            Some(rx) => self.collect(rx, deadline)??,
            None => Vec::new(),
        };
        let stderr = match stderr {
            Some(rx) => self.collect(rx, deadline)??,
            None => Vec::new(),
        };

        if !status.success() {
            return Err(NarrativeError::ProcessFailed {
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        Analysis::from_json(&String::from_utf8_lossy(&stdout))
    }
}

impl CommandInterpreter {
    /// Poll the child until it exits, killing it once `deadline` passes.
    fn wait_until(&self, child: &mut Child, deadline: Instant) -> NarrativeResult<ExitStatus> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                warn!(
                    "interpreter `{}` exceeded {:?}, killing it",
                    self.config.program, self.config.timeout
                );
                if let Err(e) = child.kill() {
                    debug!("kill failed: {e}");
                }
                child.wait()?;
                return Err(NarrativeError::Timeout(self.config.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Wait for a pipe thread's result within what is left of the deadline.
    fn collect<T>(&self, rx: Receiver<T>, deadline: Instant) -> NarrativeResult<T> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(value) => Ok(value),
            // a background process can keep the pipe open after the child exits
            Err(RecvTimeoutError::Timeout) => Err(NarrativeError::Timeout(self.config.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(NarrativeError::Io(std::io::Error::other(
                "interpreter pipe thread stopped unexpectedly",
            ))),
        }
    }
}

fn on_thread<T, F>(f: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        // the receiver is gone if the deadline already passed
        let _ = tx.send(f());
    });
    rx
}

fn write_prompt(mut stdin: impl Write, bytes: &[u8]) -> std::io::Result<()> {
    // a program that ignores the prompt may close stdin early
    match stdin.write_all(bytes) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("interpreter closed stdin before reading the prompt");
            Ok(())
        }
        other => other,
    }
}

fn drain(mut pipe: impl Read) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}
