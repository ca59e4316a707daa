//! External command execution utilities.
//!
//! Provides a Builder-based API for running external commands with
//! captured output and an optional bounded timeout.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Simple command, fails on non-zero exit
//! Cmd::new("git").args(["status", "-s"]).run()?;
//!
//! // Long-running download with a deadline; exit status left to the caller
//! let output = Cmd::new("wget")
//!     .arg(url)
//!     .timeout(Some(Duration::from_secs(600)))
//!     .run_unchecked()?;
//! ```

use anyhow::{Context, Result};
use std::{
    ffi::{OsStr, OsString},
    io::Read,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    thread,
    time::{Duration, Instant},
};

/// Poll interval while waiting on a child with a deadline.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Command builder for external process execution.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    /// Set working directory.
    #[allow(dead_code)]
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set an execution deadline. `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute the command, failing on a non-zero exit status.
    #[allow(dead_code)]
    pub fn run(self) -> Result<Output> {
        let name = self.program_name();
        let output = self.run_unchecked()?;
        if !output.status.success() {
            anyhow::bail!(format_error(&name, &output));
        }
        Ok(output)
    }

    /// Execute the command and return its output regardless of exit status.
    ///
    /// Errors only on spawn failure or deadline expiry.
    pub fn run_unchecked(self) -> Result<Output> {
        match self.timeout {
            Some(limit) => self.run_with_deadline(limit),
            None => self.run_simple(),
        }
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Blocking execution without a deadline.
    fn run_simple(self) -> Result<Output> {
        let name = self.program_name();
        self.command()
            .output()
            .with_context(|| format!("Failed to execute `{name}`"))
    }

    /// Poll-based execution that kills the child once the deadline passes.
    fn run_with_deadline(self, limit: Duration) -> Result<Output> {
        let name = self.program_name();
        let mut child = self
            .command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn `{name}`"))?;

        // Drain pipes on separate threads so the child never blocks on a
        // full pipe while we poll for exit
        let stdout_handle = spawn_reader(child.stdout.take());
        let stderr_handle = spawn_reader(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            if let Some(status) = child
                .try_wait()
                .with_context(|| format!("Failed to wait for `{name}`"))?
            {
                break status;
            }
            if start.elapsed() >= limit {
                child.kill().ok();
                child.wait().ok();
                anyhow::bail!(
                    "Command `{name}` timed out after {}s",
                    limit.as_secs()
                );
            }
            thread::sleep(WAIT_POLL);
        };

        Ok(Output {
            status,
            stdout: stdout_handle.join().unwrap_or_default(),
            stderr: stderr_handle.join().unwrap_or_default(),
        })
    }
}

/// Collect a pipe's contents on a background thread.
fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut source) = source {
            source.read_to_end(&mut buffer).ok();
        }
        buffer
    })
}

/// Format error message for a failed command.
fn format_error(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut msg = format!("Command `{name}` failed with {}\n", output.status);
    let stderr_trimmed = stderr.trim();
    if !stderr_trimmed.is_empty() {
        msg.push_str(stderr_trimmed);
    }
    msg
}
