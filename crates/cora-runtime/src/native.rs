//! Native function registration.
//!
//! Host functions become tagged callable values: the payload is an index
//! into the state's native-function table, and a global binding makes the
//! value reachable from script code. Module definitions are plain bindings
//! under `module.function` names.

use crate::error::{CoraError, CoraResult, NOT_CALLABLE};
use crate::handle::Handle;
use crate::state::CoraState;
use crate::value::{Tag, Value};

/// A host function callable from script code. Receives the runtime state
/// and returns the handle of its result; [`Handle::NIL`] means "no value".
pub type NativeFn = fn(&mut CoraState) -> CoraResult<Handle>;

/// Index of a registered native in the state's native table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeId(pub(crate) u32);

#[derive(Debug, Default)]
pub(crate) struct NativeTable {
    funcs: Vec<NativeFn>,
}

impl CoraState {
    /// Wrap `func` as a callable value and bind it under `name` in the
    /// global scope, overwriting any prior binding of that name.
    pub fn define_function(&mut self, name: &str, func: NativeFn) -> CoraResult<()> {
        let handle = self.make_native(func)?;
        self.define_global(name, handle)
    }

    /// Register every `(fn_name, func)` under `name.fn_name`. A failure
    /// mid-list leaves the entries registered so far in place; redefinition
    /// of a module simply overwrites per entry.
    pub fn define_module(&mut self, name: &str, defs: &[(&str, NativeFn)]) -> CoraResult<()> {
        for (fn_name, func) in defs {
            let qualified = format!("{name}.{fn_name}");
            self.define_function(&qualified, *func)?;
        }
        Ok(())
    }

    /// Invoke the native function behind `handle` — the evaluator's uniform
    /// call path for bound callables.
    pub fn call_native(&mut self, handle: Handle) -> CoraResult<Handle> {
        let func = match self.value(handle) {
            Value::Native(id) => self.natives.funcs.get(id.0 as usize).copied(),
            _ => None,
        };
        match func {
            Some(func) => func(self),
            None => Err(CoraError::script(NOT_CALLABLE)),
        }
    }

    fn make_native(&mut self, func: NativeFn) -> CoraResult<Handle> {
        let offset = self.arena.alloc(1 + 4)?;
        let id = self.natives.funcs.len() as u32;
        self.arena.write_u8(offset, Tag::Native as u8);
        self.arena.write_u32(offset + 1, id);
        self.natives.funcs.push(func);
        Ok(self.objects.register(offset))
    }
}
