//! Exercises the `run` seam with a miniature line-command evaluator.
//!
//! The front end here is deliberately trivial — one command per line — but
//! it drives the store exactly the way a real evaluator would: resolving
//! globals, constructing values, mutating containers, and invoking bound
//! natives.

use cora::{CoraError, CoraResult, CoraState, Evaluator, Handle, Value};

const ERR_PARSE: i32 = 10;
const ERR_UNKNOWN_NAME: i32 = 11;

/// Commands: `int <name> <value>`, `append <list> <name>`, `call <name>`.
struct LineEvaluator;

impl Evaluator for LineEvaluator {
    fn eval(&mut self, state: &mut CoraState, source: &[u8]) -> CoraResult<()> {
        let text = std::str::from_utf8(source).map_err(|_| CoraError::script(ERR_PARSE))?;
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                ["int", name, value] => {
                    let value: i64 = value.parse().map_err(|_| CoraError::script(ERR_PARSE))?;
                    let h = state.make_int(value)?;
                    state.define_global(name, h)?;
                }
                ["append", list, name] => {
                    let list = resolve(state, list)?;
                    let value = resolve(state, name)?;
                    state.list_append(list, value)?;
                }
                ["call", name] => {
                    let f = resolve(state, name)?;
                    state.call_native(f)?;
                }
                _ => return Err(CoraError::script(ERR_PARSE)),
            }
        }
        Ok(())
    }
}

fn resolve(state: &CoraState, name: &str) -> CoraResult<Handle> {
    state
        .global(name)
        .ok_or(CoraError::script(ERR_UNKNOWN_NAME))
}

fn sum_acc(state: &mut CoraState) -> CoraResult<Handle> {
    let acc = resolve(state, "acc")?;
    let elements: Vec<_> = state.list_items(acc).collect();
    let mut total = 0;
    for h in elements {
        if let Value::Int(n) = state.value(h) {
            total += n;
        }
    }
    let result = state.make_int(total)?;
    state.define_global("total", result)?;
    Ok(result)
}

fn fresh_state() -> CoraState {
    let mut state = CoraState::new();
    state.set_evaluator(Box::new(LineEvaluator));
    let acc = state.make_list().unwrap();
    state.define_global("acc", acc).unwrap();
    state.define_function("sum", sum_acc).unwrap();
    state
}

#[test]
fn scripts_drive_the_store_through_run() {
    let mut state = fresh_state();
    state
        .run(b"int a 10\nint b 32\nappend acc a\nappend acc b\ncall sum")
        .unwrap();

    let total = state.global("total").unwrap();
    assert!(matches!(state.value(total), Value::Int(42)));

    let acc = state.global("acc").unwrap();
    assert_eq!(state.list_length(acc), 2);
}

#[test]
fn script_errors_surface_with_their_code() {
    let mut state = fresh_state();
    assert_eq!(
        state.run(b"int x notanumber"),
        Err(CoraError::Script { code: ERR_PARSE })
    );
    assert_eq!(
        state.run(b"append missing a"),
        Err(CoraError::Script {
            code: ERR_UNKNOWN_NAME
        })
    );
}

#[test]
fn state_survives_a_failed_run() {
    let mut state = fresh_state();
    state.run(b"int a 1\nappend acc a").unwrap();
    let _ = state.run(b"garbage here");

    // The earlier mutations are still visible; the evaluator is still
    // installed and usable.
    let acc = state.global("acc").unwrap();
    assert_eq!(state.list_length(acc), 1);
    state.run(b"int b 2\nappend acc b").unwrap();
    assert_eq!(state.list_length(acc), 2);
}
