//! Global name bindings.
//!
//! Parallel rows of (name object, bound value), the global scope the
//! evaluator resolves names against. Row order is definition order and a
//! redefinition overwrites in place. Names are string objects in the
//! region; the rows themselves live beside the handle table, outside it.

use crate::error::CoraResult;
use crate::handle::Handle;
use crate::state::CoraState;

#[derive(Debug, Default)]
pub(crate) struct BindingTable {
    pub(crate) names: Vec<Handle>,
    pub(crate) values: Vec<Handle>,
}

impl CoraState {
    /// Bind `name` in the global scope, overwriting any prior binding.
    pub fn define_global(&mut self, name: &str, value: Handle) -> CoraResult<()> {
        if let Some(index) = self.global_index(name) {
            self.globals.values[index] = value;
            return Ok(());
        }
        let name_handle = self.make_string(name)?;
        self.globals.names.push(name_handle);
        self.globals.values.push(value);
        Ok(())
    }

    /// Handle bound to `name` in the global scope, if any.
    pub fn global(&self, name: &str) -> Option<Handle> {
        self.global_index(name).map(|i| self.globals.values[i])
    }

    /// Read-only view of all bindings in definition order.
    pub fn globals(&self) -> Globals<'_> {
        Globals {
            state: self,
            index: 0,
        }
    }

    fn global_index(&self, name: &str) -> Option<usize> {
        (0..self.globals.names.len())
            .find(|&i| self.string_at(self.globals.names[i]) == Some(name))
    }
}

/// Iterator over the global (name, value) rows.
#[derive(Clone)]
pub struct Globals<'a> {
    state: &'a CoraState,
    index: usize,
}

impl<'a> Iterator for Globals<'a> {
    type Item = (&'a str, Handle);

    fn next(&mut self) -> Option<Self::Item> {
        let names = &self.state.globals.names;
        if self.index >= names.len() {
            return None;
        }
        let i = self.index;
        self.index += 1;
        Some((
            self.state.string_at(names[i]).unwrap_or_default(),
            self.state.globals.values[i],
        ))
    }
}
