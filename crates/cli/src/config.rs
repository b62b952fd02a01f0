use anyhow::{Context, Result};
use fixup_pruner::{CommandVerifier, StderrMode, DEFAULT_VERIFIER_ARGS, DEFAULT_VERIFIER_PROGRAM};
use fixup_store::{FixupStore, DEFAULT_FIXUPS_DIR};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const ENV_FIXUPS_DIR: &str = "FIXUP_PRUNE_DIR";
pub(crate) const ENV_VERIFIER: &str = "FIXUP_PRUNE_VERIFIER";
pub(crate) const ENV_CONFIG: &str = "FIXUP_PRUNE_CONFIG";

/// Settings given on the command line. `None`/empty means "not set here".
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub fixups_dir: Option<PathBuf>,
    pub verifier: Option<String>,
    pub verifier_args: Vec<String>,
    pub verifier_cwd: Option<PathBuf>,
    pub verifier_stderr: Option<StderrMode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    fixups_dir: Option<PathBuf>,
    #[serde(default)]
    verifier: VerifierSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct VerifierSection {
    program: Option<String>,
    args: Option<Vec<String>>,
    current_dir: Option<PathBuf>,
    stderr: Option<StderrMode>,
}

/// Effective settings: flag, then environment, then config file, then default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PruneConfig {
    pub fixups_dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub stderr: StderrMode,
}

impl PruneConfig {
    pub(crate) fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = overrides
            .config
            .or_else(|| env(ENV_CONFIG).map(PathBuf::from));
        let file = match &config_path {
            Some(path) => load_config_file(path)?,
            None => ConfigFile::default(),
        };

        let fixups_dir = overrides
            .fixups_dir
            .or_else(|| env(ENV_FIXUPS_DIR).map(PathBuf::from))
            .or(file.fixups_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXUPS_DIR));

        let program = overrides
            .verifier
            .or_else(|| env(ENV_VERIFIER))
            .or(file.verifier.program);
        // The default arguments only make sense for the default program.
        let args = if !overrides.verifier_args.is_empty() {
            overrides.verifier_args
        } else if let Some(args) = file.verifier.args {
            args
        } else if program.is_none() {
            DEFAULT_VERIFIER_ARGS.iter().map(|a| a.to_string()).collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            fixups_dir,
            program: program.unwrap_or_else(|| DEFAULT_VERIFIER_PROGRAM.to_string()),
            args,
            current_dir: overrides.verifier_cwd.or(file.verifier.current_dir),
            stderr: overrides
                .verifier_stderr
                .or(file.verifier.stderr)
                .unwrap_or_default(),
        })
    }

    pub(crate) fn store(&self) -> FixupStore {
        FixupStore::new(&self.fixups_dir)
    }

    pub(crate) fn verifier(&self) -> CommandVerifier {
        let verifier = CommandVerifier::new(&self.program)
            .args(self.args.iter().cloned())
            .stderr(self.stderr);
        match &self.current_dir {
            Some(dir) => verifier.current_dir(dir),
            None => verifier,
        }
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}
