//! Per-embedding runtime state.
//!
//! One `CoraState` per embedding, never implicit or global: every operation
//! takes it explicitly, so independent instances stay isolated. The state
//! owns the backing region, the handle table, the global bindings, and the
//! registered natives; a single logical thread of control drives it.

use std::fmt;

use crate::bindings::BindingTable;
use crate::error::{CoraError, CoraResult, NO_EVALUATOR};
use crate::handle::HandleTable;
use crate::memory::{Arena, HeapHost, MemoryHost};
use crate::native::NativeTable;

/// The script front end, supplied by the embedding. Parsing and evaluation
/// semantics live entirely on the other side of this seam; the evaluator
/// consumes the object store and the global bindings for name resolution.
pub trait Evaluator {
    fn eval(&mut self, state: &mut CoraState, source: &[u8]) -> CoraResult<()>;
}

/// Runtime state for one embedding of the cora language.
pub struct CoraState {
    pub(crate) arena: Arena,
    pub(crate) objects: HandleTable,
    pub(crate) globals: BindingTable,
    pub(crate) natives: NativeTable,
    evaluator: Option<Box<dyn Evaluator>>,
}

impl CoraState {
    /// State backed by the process heap.
    pub fn new() -> Self {
        Self::with_host(Box::new(HeapHost))
    }

    /// State whose backing region is managed by `host`. Creation allocates
    /// nothing; the region stays empty until the first constructor call.
    pub fn with_host(host: Box<dyn MemoryHost>) -> Self {
        Self {
            arena: Arena::new(host),
            objects: HandleTable::new(),
            globals: BindingTable::default(),
            natives: NativeTable::default(),
            evaluator: None,
        }
    }

    /// Current byte length of the backing region.
    pub fn memory_len(&self) -> usize {
        self.arena.len()
    }

    /// Return all memory to the host. Every non-interned handle goes dead
    /// and further allocation reports `NoMemory`; the interned singletons
    /// keep working.
    pub fn release(&mut self) {
        self.arena.release();
    }

    /// Install the evaluator that `run` dispatches to.
    pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    /// Execute script source through the installed evaluator. Running with
    /// no evaluator installed is a script error.
    pub fn run(&mut self, source: &[u8]) -> CoraResult<()> {
        // Taken out for the duration of the call so the evaluator gets the
        // state exclusively.
        let Some(mut evaluator) = self.evaluator.take() else {
            return Err(CoraError::script(NO_EVALUATOR));
        };
        let outcome = evaluator.eval(self, source);
        self.evaluator = Some(evaluator);
        outcome
    }
}

impl Default for CoraState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CoraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoraState")
            .field("memory_len", &self.arena.len())
            .field("evaluator", &self.evaluator.is_some())
            .finish_non_exhaustive()
    }
}
