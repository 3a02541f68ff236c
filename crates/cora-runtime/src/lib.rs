//! Object store and container engine for the cora scripting language.
//!
//! Hosts embed the runtime by creating a [`CoraState`] around a
//! [`MemoryHost`], the reallocation seam through which the single backing
//! region grows and shrinks. Every script-visible value — nil, int, float,
//! char, string, bool, list, map — is encoded at a byte offset inside that
//! region, and callers only ever hold [`Handle`]s: stable identities that
//! survive the physical relocation of both the region and the individual
//! container blocks inside it.
//!
//! On top of the store sit the list and map containers, the global binding
//! table the evaluator resolves names against, and native function/module
//! registration for extending the language from the host. The evaluator
//! itself is external, plugged in through the [`Evaluator`] seam consumed
//! by [`CoraState::run`].
//!
//! There is no garbage collector: objects live until the embedding releases
//! the whole region, and a single logical thread of control drives each
//! state.

pub mod bindings;
pub mod error;
pub mod handle;
pub mod list;
pub mod map;
pub mod memory;
pub mod native;
pub mod state;
pub mod value;

pub use bindings::Globals;
pub use error::{CoraError, CoraResult, NO_EVALUATOR, NOT_CALLABLE};
pub use handle::Handle;
pub use list::ListItems;
pub use map::MapPairs;
pub use memory::{HeapHost, MemoryHost, NoGrowth, QuotaHost};
pub use native::{NativeFn, NativeId};
pub use state::{CoraState, Evaluator};
pub use value::{Tag, Value};
