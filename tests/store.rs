//! End-to-end object store behavior through the public embedding surface.

use cora::{CoraError, CoraState, Handle, NoGrowth, QuotaHost, Tag, Value};

#[test]
fn handles_stay_stable_across_heavy_relocation() {
    let mut state = CoraState::new();

    let tracked_int = state.make_int(7).unwrap();
    let tracked_str = state.make_string("anchor").unwrap();
    let tracked_list = state.make_list().unwrap();
    state.list_append(tracked_list, tracked_int).unwrap();

    // Repeated appends to a different list force the region and several
    // container blocks to move.
    let churn = state.make_list().unwrap();
    for i in 0..500 {
        let h = state.make_int(i).unwrap();
        state.list_append(churn, h).unwrap();
    }

    assert!(matches!(state.value(tracked_int), Value::Int(7)));
    assert!(matches!(state.value(tracked_str), Value::Str("anchor")));
    assert_eq!(state.list_get(tracked_list, 0), Some(tracked_int));
    assert_eq!(state.list_length(churn), 500);
}

#[test]
fn an_always_failing_host_cannot_corrupt_anything() {
    // Nothing can be allocated at all; every constructor reports NoMemory.
    let mut state = CoraState::with_host(Box::new(NoGrowth));
    assert_eq!(state.make_int(1), Err(CoraError::NoMemory));
    assert_eq!(state.make_float(1.0), Err(CoraError::NoMemory));
    assert_eq!(state.make_string("x"), Err(CoraError::NoMemory));
    assert_eq!(state.make_list(), Err(CoraError::NoMemory));
    assert_eq!(state.make_map(), Err(CoraError::NoMemory));
    assert_eq!(state.define_global("x", Handle::NIL), Err(CoraError::NoMemory));

    // The interned singletons never need memory.
    assert_eq!(state.make_bool(true).unwrap(), Handle::TRUE);
    assert_eq!(state.nil(), Handle::NIL);
    assert_eq!(state.memory_len(), 0);
}

#[test]
fn quota_exhaustion_preserves_existing_objects() {
    let mut state = CoraState::with_host(Box::new(QuotaHost::new(64)));
    let a = state.make_int(1).unwrap();
    let b = state.make_string("hi").unwrap();

    // Burn the rest of the quota, then check nothing moved or changed.
    loop {
        match state.make_int(0) {
            Ok(_) => {}
            Err(CoraError::NoMemory) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert!(matches!(state.value(a), Value::Int(1)));
    assert!(matches!(state.value(b), Value::Str("hi")));
    assert_eq!(state.tag(a), Tag::Int);
    assert_eq!(state.tag(b), Tag::String);
}

#[test]
fn containers_compose() {
    let mut state = CoraState::new();

    let inner = state.make_list().unwrap();
    for x in [1, 2] {
        let h = state.make_int(x).unwrap();
        state.list_append(inner, h).unwrap();
    }

    let map = state.make_map().unwrap();
    let label = state.make_string("numbers").unwrap();
    state.map_insert(map, "label", label).unwrap();
    state.map_insert(map, "items", inner).unwrap();

    let outer = state.make_list().unwrap();
    state.list_append(outer, map).unwrap();

    let fetched_map = state.list_get(outer, 0).unwrap();
    assert_eq!(fetched_map, map);
    let fetched_inner = state.map_get(fetched_map, "items").unwrap();
    assert_eq!(state.list_length(fetched_inner), 2);

    let pairs: Vec<_> = state.map_pairs(map).map(|(k, _)| k.to_owned()).collect();
    assert_eq!(pairs, vec!["label", "items"]);
}

#[test]
fn list_insert_policy_is_clamp_to_end() {
    let mut state = CoraState::new();
    let list = state.make_list().unwrap();
    let a = state.make_int(1).unwrap();
    let b = state.make_int(2).unwrap();

    state.list_insert(list, a, 0).unwrap(); // insert into empty at 0
    state.list_insert(list, b, 17).unwrap(); // way past the end
    assert_eq!(
        state.list_items(list).collect::<Vec<_>>(),
        vec![a, b]
    );
}
