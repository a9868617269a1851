//! Error type for assembly generation.
//!
//! The assembly generator trusts its input: by the time a [`crate::Instr`]
//! stream reaches here it has already passed identifier and type checking.
//! The only way [`GenError`] fires is a genuine invariant violation in the
//! generator itself (a bug here, not in the user's program).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// An instruction referenced a local that was never declared in the
    /// current frame — IRGen guarantees every `Name` operand it emits was
    /// declared first, so seeing this means the frame's scope bookkeeping
    /// has drifted from the instruction stream.
    #[error("nieznana zmienna w ramce stosu: '{0}'")]
    UnknownLocal(String),

    /// An `assign`/`array_allocate` carried an identifier operand that was
    /// neither a temporary nor a name (i.e. a bare constant).
    #[error("niepoprawny operand docelowy: {0}")]
    InvalidTarget(String),

    /// `nasm` or `ld` could not be spawned at all.
    #[error("nie udało się uruchomić '{tool}': {source}")]
    ToolUnavailable { tool: String, source: std::io::Error },

    /// `nasm` or `ld` ran but exited non-zero; `code` is its exit status
    /// (`None` if it was killed by a signal), for the driver to propagate.
    #[error("'{tool}' zakończył działanie z błędem:\n{stderr}")]
    ExternalToolFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl GenError {
    /// The process exit code this error should surface as, for stages that
    /// wrap an external tool's own failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenError::ExternalToolFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
