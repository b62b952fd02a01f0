use crate::{PruneError, Result};
use fixup_store::ActId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Result of one verifier run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stdout: Vec<u8>,
}

impl VerifierOutcome {
    pub fn passed(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(0),
            success: true,
            stdout: stdout.into(),
        }
    }

    pub fn failed(exit_code: i32, stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            exit_code: Some(exit_code),
            success: false,
            stdout: stdout.into(),
        }
    }

    /// A run reproduces the baseline only if it succeeded and printed the
    /// exact same bytes.
    pub fn reproduces(&self, baseline: &VerifierOutcome) -> bool {
        self.success && self.stdout == baseline.stdout
    }

    pub fn status_description(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

impl From<Output> for VerifierOutcome {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            success: output.status.success(),
            stdout: output.stdout,
        }
    }
}

/// Runs the verifier for an act against whatever record is currently persisted.
pub trait Verifier {
    fn run(&mut self, act: &ActId) -> Result<VerifierOutcome>;
}

impl<F> Verifier for F
where
    F: FnMut(&ActId) -> Result<VerifierOutcome>,
{
    fn run(&mut self, act: &ActId) -> Result<VerifierOutcome> {
        self(act)
    }
}

/// Where the verifier's stderr goes. It is never part of the compared output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StderrMode {
    #[default]
    Inherit,
    Null,
}

impl StderrMode {
    fn stdio(self) -> Stdio {
        match self {
            StderrMode::Inherit => Stdio::inherit(),
            StderrMode::Null => Stdio::null(),
        }
    }
}

pub const DEFAULT_VERIFIER_PROGRAM: &str = "cargo";
pub const DEFAULT_VERIFIER_ARGS: &[&str] = &["run", "--release"];

/// External process verifier: `<program> <args>... <act>`.
#[derive(Debug, Clone)]
pub struct CommandVerifier {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    stderr: StderrMode,
}

impl CommandVerifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            stderr: StderrMode::default(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn stderr(mut self, mode: StderrMode) -> Self {
        self.stderr = mode;
        self
    }

    fn command(&self, act: &ActId) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(act.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(self.stderr.stdio());
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl Default for CommandVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_VERIFIER_PROGRAM).args(DEFAULT_VERIFIER_ARGS.iter().copied())
    }
}

impl Verifier for CommandVerifier {
    fn run(&mut self, act: &ActId) -> Result<VerifierOutcome> {
        let output = self
            .command(act)
            .output()
            .map_err(|source| PruneError::VerifierLaunch {
                program: self.program.clone(),
                source,
            })?;
        let outcome = VerifierOutcome::from(output);
        log::debug!(
            "Verifier for {act}: {} ({} bytes of output)",
            outcome.status_description(),
            outcome.stdout.len()
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn act() -> ActId {
        ActId::new("2020.1").unwrap()
    }

    #[test]
    fn reproduces_requires_success_and_identical_bytes() {
        let baseline = VerifierOutcome::passed("OK\n");
        assert!(VerifierOutcome::passed("OK\n").reproduces(&baseline));
        assert!(!VerifierOutcome::passed("OK").reproduces(&baseline));
        assert!(!VerifierOutcome::failed(1, "OK\n").reproduces(&baseline));
    }

    #[test]
    fn default_runs_cargo_release() {
        let verifier = CommandVerifier::default();
        let cmd = verifier.command(&act());
        assert_eq!(cmd.get_program(), "cargo");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["run", "--release", "2020.1"]);
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_but_not_stderr() {
        let mut verifier = CommandVerifier::new("sh")
            .args(["-c", "echo \"out $1\"; echo noise >&2", "verifier"])
            .stderr(StderrMode::Null);

        let outcome = verifier.run(&act()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.stdout, b"out 2020.1\n");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_an_outcome_not_an_error() {
        let mut verifier = CommandVerifier::new("sh").args(["-c", "echo partial; exit 3"]);

        let outcome = verifier.run(&act()).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(3));
        assert_eq!(outcome.stdout, b"partial\n");
    }

    #[test]
    fn missing_program_is_a_launch_failure() {
        let mut verifier = CommandVerifier::new("fixup-verifier-that-does-not-exist");
        let err = verifier.run(&act()).unwrap_err();
        assert!(matches!(err, PruneError::VerifierLaunch { .. }), "{err:?}");
    }
}
