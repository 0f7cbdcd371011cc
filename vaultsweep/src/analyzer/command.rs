// src/analyzer/command.rs
use crate::analyzer::{AnalysisError, AnalysisRequest, ContentAnalyzer};
use std::io::{self, Write as _};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs an external program per note: the request goes to its stdin as JSON
/// and the YAML answer is read from its stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAnalyzer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAnalyzer {
    /// Builds an analyzer from `[program, args...]`; `None` when empty.
    #[inline]
    #[must_use]
    pub fn from_argv(argv: &[String], timeout: Duration) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    /// Splits a command line on whitespace: `"llm --yaml"`.
    #[inline]
    #[must_use]
    pub fn from_command_line(line: &str, timeout: Duration) -> Option<Self> {
        let argv: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        Self::from_argv(&argv, timeout)
    }

    fn wait(&self, child: &mut Child) -> Result<std::process::ExitStatus, AnalysisError> {
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= self.timeout {
                // The process may exit between the check and the kill.
                let _ = child.kill();
                let _ = child.wait();
                return Err(AnalysisError::Timeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl ContentAnalyzer for CommandAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        let payload = serde_json::to_vec(request)?;
        debug!(program = %self.program, file = %request.path, "running analyzer");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AnalysisError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed and drain the pipes on helper threads so a full pipe buffer
        // cannot block the child while we wait for it.
        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&payload)?;
            }
            Ok(())
        });
        let stdout = child.stdout.take();
        let out_reader = thread::spawn(move || read_all(stdout));
        let stderr = child.stderr.take();
        let err_reader = thread::spawn(move || read_all(stderr));

        let status = self.wait(&mut child)?;

        let write_result = writer.join().unwrap_or(Ok(()));
        let output = out_reader.join().unwrap_or_default();
        let errors = err_reader.join().unwrap_or_default();

        if !status.success() {
            return Err(AnalysisError::Failed {
                status: status.to_string(),
                stderr: errors.trim().to_owned(),
            });
        }
        // A program may answer without reading all of stdin.
        if let Err(err) = write_result {
            if err.kind() != io::ErrorKind::BrokenPipe {
                return Err(err.into());
            }
        }

        if output.trim().is_empty() {
            return Err(AnalysisError::Empty);
        }
        Ok(output)
    }
}

fn read_all<R: io::Read>(source: Option<R>) -> String {
    let mut text = String::new();
    if let Some(mut source) = source {
        let mut bytes = Vec::new();
        if source.read_to_end(&mut bytes).is_ok() {
            text = String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    text
}
