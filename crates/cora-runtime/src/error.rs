//! Error types for the cora runtime.

use derive_more::Display;

pub type CoraResult<T> = Result<T, CoraError>;

/// Script error code reported when `run` is called with no evaluator installed.
pub const NO_EVALUATOR: i32 = -1;

/// Script error code reported when a non-callable handle is invoked.
pub const NOT_CALLABLE: i32 = -2;

/// Errors reported by the object store and the run seam.
///
/// Two kinds suffice: the host refused a required growth of the backing
/// region, or the evaluator reported a nonzero outcome for a script.
/// A failed growth never partially corrupts existing objects.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoraError {
    #[display("out of memory: the host could not resize the backing region")]
    NoMemory,

    #[display("script error: code {code}")]
    Script { code: i32 },
}

impl CoraError {
    pub fn script(code: i32) -> Self {
        CoraError::Script { code }
    }
}

impl std::error::Error for CoraError {}
