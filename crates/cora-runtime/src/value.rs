//! Tagged value encoding and typed constructors.
//!
//! Every payload starts with a one-byte [`Tag`] followed by type-specific
//! data, little-endian and unaligned:
//!
//! - int: 8-byte `i64`; float: 8-byte `f64` bits; char: 4-byte scalar value;
//!   bool: 1 byte (only reachable through the interned handles)
//! - string: `u64` length, then that many UTF-8 bytes
//! - list: `u64` length, `u64` capacity, then capacity 8-byte handle slots
//! - map: `u64` length, `u64` capacity, then capacity
//!   (name handle, value handle) slot pairs
//! - native: 4-byte index into the state's native-function table
//!
//! Container slots hold handles, never offsets, so container contents stay
//! valid when the objects they reference are relocated.

use std::fmt;

use crate::error::CoraResult;
use crate::handle::Handle;
use crate::list::ListItems;
use crate::map::MapPairs;
use crate::native::NativeId;
use crate::state::CoraState;

/// Type discriminator stored as the first byte of every payload.
///
/// The script-visible tags keep the numbering of the embedding ABI; `Native`
/// is internal and never produced by a script-value constructor.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Nil = 0,
    Int = 1,
    Float = 2,
    Char = 3,
    String = 4,
    List = 5,
    Map = 6,
    Bool = 7,
    Native = 8,
}

impl Tag {
    pub(crate) fn from_byte(byte: u8) -> Tag {
        match byte {
            1 => Tag::Int,
            2 => Tag::Float,
            3 => Tag::Char,
            4 => Tag::String,
            5 => Tag::List,
            6 => Tag::Map,
            7 => Tag::Bool,
            8 => Tag::Native,
            _ => Tag::Nil,
        }
    }
}

/// A decoded, read-only view of a stored value.
///
/// Scalars are copied out; strings and containers borrow the state, so the
/// view cannot outlive the next mutation.
#[derive(Clone)]
pub enum Value<'a> {
    Nil,
    Int(i64),
    Float(f64),
    Char(char),
    Str(&'a str),
    Bool(bool),
    List(ListItems<'a>),
    Map(MapPairs<'a>),
    Native(NativeId),
}

impl CoraState {
    /// Allocate an int value.
    pub fn make_int(&mut self, x: i64) -> CoraResult<Handle> {
        let offset = self.arena.alloc(1 + 8)?;
        self.arena.write_u8(offset, Tag::Int as u8);
        self.arena.write_u64(offset + 1, x as u64);
        Ok(self.objects.register(offset))
    }

    /// Allocate a float value.
    pub fn make_float(&mut self, x: f64) -> CoraResult<Handle> {
        let offset = self.arena.alloc(1 + 8)?;
        self.arena.write_u8(offset, Tag::Float as u8);
        self.arena.write_u64(offset + 1, x.to_bits());
        Ok(self.objects.register(offset))
    }

    /// Allocate a character value.
    pub fn make_char(&mut self, x: char) -> CoraResult<Handle> {
        let offset = self.arena.alloc(1 + 4)?;
        self.arena.write_u8(offset, Tag::Char as u8);
        self.arena.write_u32(offset + 1, x as u32);
        Ok(self.objects.register(offset))
    }

    /// Allocate a string value, copying `x` into the region.
    pub fn make_string(&mut self, x: &str) -> CoraResult<Handle> {
        let bytes = x.as_bytes();
        let offset = self.arena.alloc(1 + 8 + bytes.len())?;
        self.arena.write_u8(offset, Tag::String as u8);
        self.arena.write_u64(offset + 1, bytes.len() as u64);
        self.arena.write_bytes(offset + 9, bytes);
        Ok(self.objects.register(offset))
    }

    /// Booleans are interned; this never allocates. The `Result` keeps the
    /// constructor surface uniform for hosts.
    pub fn make_bool(&mut self, x: bool) -> CoraResult<Handle> {
        Ok(if x { Handle::TRUE } else { Handle::FALSE })
    }

    /// The interned nil singleton.
    pub fn nil(&self) -> Handle {
        Handle::NIL
    }

    /// Type tag of the value behind `handle`. Unknown handles read as nil.
    pub fn tag(&self, handle: Handle) -> Tag {
        match handle {
            Handle::NIL => Tag::Nil,
            Handle::TRUE | Handle::FALSE => Tag::Bool,
            _ => match self.objects.offset(handle) {
                Some(offset) => Tag::from_byte(self.arena.read_u8(offset)),
                None => Tag::Nil,
            },
        }
    }

    /// Decode the value behind `handle` at its current offset.
    pub fn value(&self, handle: Handle) -> Value<'_> {
        match handle {
            Handle::NIL => return Value::Nil,
            Handle::TRUE => return Value::Bool(true),
            Handle::FALSE => return Value::Bool(false),
            _ => {}
        }
        let Some(offset) = self.objects.offset(handle) else {
            return Value::Nil;
        };
        match Tag::from_byte(self.arena.read_u8(offset)) {
            Tag::Nil => Value::Nil,
            Tag::Int => Value::Int(self.arena.read_u64(offset + 1) as i64),
            Tag::Float => Value::Float(f64::from_bits(self.arena.read_u64(offset + 1))),
            Tag::Char => Value::Char(
                char::from_u32(self.arena.read_u32(offset + 1))
                    .unwrap_or(char::REPLACEMENT_CHARACTER),
            ),
            Tag::Bool => Value::Bool(self.arena.read_u8(offset + 1) != 0),
            Tag::String => Value::Str(self.string_at(handle).unwrap_or_default()),
            Tag::List => Value::List(self.list_items(handle)),
            Tag::Map => Value::Map(self.map_pairs(handle)),
            Tag::Native => Value::Native(NativeId(self.arena.read_u32(offset + 1))),
        }
    }

    /// Borrow the string payload behind `handle`, if it is a string.
    pub(crate) fn string_at(&self, handle: Handle) -> Option<&str> {
        let offset = self.objects.offset(handle)?;
        if self.arena.read_u8(offset) != Tag::String as u8 {
            return None;
        }
        let len = self.arena.read_u64(offset + 1) as usize;
        let bytes = self.arena.slice(offset + 9, len);
        // SAFETY: string payloads are written only from `&str` and are never
        // mutated in place, so the bytes are valid UTF-8.
        Some(unsafe { std::str::from_utf8_unchecked(bytes) })
    }
}

// Containers can reference themselves; cap the printed depth instead of
// chasing the cycle.
const MAX_DISPLAY_DEPTH: usize = 8;

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value<'_>, depth: usize) -> fmt::Result {
    match value {
        Value::Nil => f.write_str("nil"),
        Value::Int(n) => write!(f, "{n}"),
        Value::Float(x) => write!(f, "{x}"),
        Value::Char(c) => write!(f, "'{c}'"),
        Value::Str(s) => write!(f, "{s:?}"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Native(id) => write!(f, "<native #{}>", id.0),
        Value::List(items) => {
            if depth >= MAX_DISPLAY_DEPTH {
                return f.write_str("[...]");
            }
            f.write_str("[")?;
            for (i, element) in items.clone().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, &items.state().value(element), depth + 1)?;
            }
            f.write_str("]")
        }
        Value::Map(pairs) => {
            if depth >= MAX_DISPLAY_DEPTH {
                return f.write_str("{...}");
            }
            f.write_str("{")?;
            for (i, (name, bound)) in pairs.clone().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{name}: ")?;
                write_value(f, &pairs.state().value(bound), depth + 1)?;
            }
            f.write_str("}")
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, 0)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::List(items) => write!(f, "List(len={})", items.len()),
            Value::Map(pairs) => write!(f, "Map(len={})", pairs.len()),
            Value::Native(id) => write!(f, "Native({})", id.0),
        }
    }
}
