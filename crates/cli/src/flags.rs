use clap::ValueEnum;
use fixup_pruner::StderrMode;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum StderrFlag {
    Inherit,
    Null,
}

impl StderrFlag {
    pub(crate) const fn as_domain(self) -> StderrMode {
        match self {
            StderrFlag::Inherit => StderrMode::Inherit,
            StderrFlag::Null => StderrMode::Null,
        }
    }
}
