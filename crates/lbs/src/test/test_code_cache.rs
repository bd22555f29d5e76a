// Tests for snippet loading, running and release
use crate::code_cache::{ANCHOR, CodeCache, do_string, repeated_code};
use crate::fixtures;
use crate::state::{create_state, global_number};
use crate::BenchError;

#[test]
fn test_repeated_code_shape() {
    let code = repeated_code("x = x + 1\n", 3);
    assert_eq!(code, "local x = 0\nx = x + 1\nx = x + 1\nx = x + 1\nacc = acc + x\n");

    // Bodies without a trailing newline stay on their own lines
    let code = repeated_code("x = x + 1", 2);
    assert_eq!(code, "local x = 0\nx = x + 1\nx = x + 1\nacc = acc + x\n");
}

#[test]
fn test_repeated_code_preserves_value() {
    let mut vm = create_state(true).unwrap();
    fixtures::install_accumulator(&mut vm).unwrap();

    let mut cache = CodeCache::new(&mut vm).unwrap();
    let once = cache.load(&mut vm, &repeated_code("x = x + 3\n", 1)).unwrap();
    for _ in 0..5 {
        cache.run(&mut vm, once).unwrap();
    }
    let by_runs = global_number(&mut vm, "acc").unwrap();

    fixtures::install_accumulator(&mut vm).unwrap();
    let unrolled = cache.load(&mut vm, &repeated_code("x = x + 3\n", 5)).unwrap();
    cache.run(&mut vm, unrolled).unwrap();
    let by_unroll = global_number(&mut vm, "acc").unwrap();

    assert_eq!(by_runs, 15.0);
    assert_eq!(by_unroll, by_runs);
}

#[test]
fn test_load_does_not_run() {
    let mut vm = create_state(true).unwrap();
    let mut cache = CodeCache::new(&mut vm).unwrap();
    let handle = cache.load(&mut vm, "touched = 1").unwrap();
    assert!(vm.get_global("touched").unwrap().is_none());

    cache.run(&mut vm, handle).unwrap();
    assert_eq!(global_number(&mut vm, "touched").unwrap(), 1.0);
}

#[test]
fn test_unload_releases_slot() {
    let mut vm = create_state(true).unwrap();
    let mut cache = CodeCache::new(&mut vm).unwrap();

    let handle = cache.load(&mut vm, "return 1").unwrap();
    assert_eq!(cache.len(), 1);
    let anchored = format!("return {ANCHOR}[{}] ~= nil", handle.id());
    assert_eq!(do_string(&mut vm, &anchored).unwrap()[0].as_boolean(), Some(true));

    cache.unload(&mut vm, handle).unwrap();
    assert!(cache.is_empty());
    assert!(!cache.contains(handle));
    assert_eq!(do_string(&mut vm, &anchored).unwrap()[0].as_boolean(), Some(false));

    // The released slot is recycled
    let again = cache.load(&mut vm, "return 2").unwrap();
    assert_eq!(again, handle);
}

#[test]
fn test_many_loads_do_not_leak() {
    let mut vm = create_state(true).unwrap();
    let mut cache = CodeCache::new(&mut vm).unwrap();
    for i in 0..100 {
        let handle = cache.load(&mut vm, &format!("return {i}")).unwrap();
        cache.run(&mut vm, handle).unwrap();
        cache.unload(&mut vm, handle).unwrap();
    }
    assert!(cache.is_empty());

    let a = cache.load(&mut vm, "return 1").unwrap();
    let b = cache.load(&mut vm, "return 2").unwrap();
    assert_eq!(cache.len(), 2);
    assert!(a.id() <= 2 && b.id() <= 2);
    cache.clear(&mut vm).unwrap();
    assert!(cache.is_empty());
}

#[test]
fn test_compile_error() {
    let mut vm = create_state(true).unwrap();
    let mut cache = CodeCache::new(&mut vm).unwrap();
    let err = cache.load(&mut vm, "x = = 1").unwrap_err();
    assert!(matches!(err, BenchError::Compile { .. }), "{err}");
    assert!(cache.is_empty());
}

#[test]
fn test_runtime_error() {
    let mut vm = create_state(true).unwrap();
    let mut cache = CodeCache::new(&mut vm).unwrap();
    let handle = cache.load(&mut vm, "error('boom')").unwrap();
    match cache.run(&mut vm, handle) {
        Err(BenchError::Runtime { message }) => assert!(message.contains("boom"), "{message}"),
        other => panic!("expected runtime error, got {other:?}"),
    }

    let err = do_string(&mut vm, "assert(false, 'check failed')").unwrap_err();
    assert!(matches!(err, BenchError::Runtime { .. }), "{err}");
}

#[test]
fn test_unknown_handle() {
    let mut vm = create_state(true).unwrap();
    let mut cache = CodeCache::new(&mut vm).unwrap();
    let handle = cache.load(&mut vm, "return 1").unwrap();
    cache.unload(&mut vm, handle).unwrap();

    assert!(matches!(
        cache.run(&mut vm, handle),
        Err(BenchError::UnknownSnippet(h)) if h == handle
    ));
    assert!(matches!(
        cache.unload(&mut vm, handle),
        Err(BenchError::UnknownSnippet(_))
    ));
}
