//! cora — an embeddable object store for a small scripting language.
//!
//! This crate is the embedding surface over [`cora_runtime`]: the host
//! creates a [`CoraState`], injects values through the typed constructors,
//! extends the language with native functions and modules, and plugs a
//! script front end in through the [`Evaluator`] seam.
//!
//! ```
//! use cora::{CoraState, Value};
//!
//! let mut state = CoraState::new();
//! let list = state.make_list()?;
//! for x in [1, 2, 3] {
//!     let h = state.make_int(x)?;
//!     state.list_append(list, h)?;
//! }
//! assert_eq!(state.value(list).to_string(), "[1, 2, 3]");
//!
//! let config = state.make_map()?;
//! let greeting = state.make_string("hello")?;
//! state.map_insert(config, "greeting", greeting)?;
//! assert!(matches!(state.value(greeting), Value::Str("hello")));
//! # Ok::<(), cora::CoraError>(())
//! ```

pub use cora_runtime::{
    CoraError, CoraResult, CoraState, Evaluator, Globals, Handle, HeapHost, ListItems, MapPairs,
    MemoryHost, NO_EVALUATOR, NOT_CALLABLE, NativeFn, NativeId, NoGrowth, QuotaHost, Tag, Value,
};
