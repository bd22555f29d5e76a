// Tests for the case registry
use ahash::AHashSet;

use crate::config::BenchConfig;
use crate::registry::Registry;

#[test]
fn test_builtin_names_unique_and_found() {
    let registry = Registry::builtin();
    assert_eq!(registry.len(), 20);

    let mut seen = AHashSet::new();
    for case in registry.iter() {
        assert!(seen.insert(case.name), "duplicate case {}", case.name);
        assert_eq!(registry.get(case.name).map(|c| c.name), Some(case.name));
    }
    assert!(registry.get("no_such_case").is_none());
}

#[test]
fn test_matching_filter() {
    let registry = Registry::builtin();
    let userdata: Vec<_> = registry.matching(Some("userdata")).map(|c| c.name).collect();
    assert_eq!(
        userdata,
        vec![
            "userdata_variable_access",
            "userdata_variable_access_large",
            "userdata_variable_access_last",
            "return_userdata",
        ]
    );
    assert_eq!(registry.matching(None).count(), registry.len());
    assert_eq!(registry.matching(Some("zzz")).count(), 0);
}

#[test]
fn test_every_case_passes() {
    let config = BenchConfig {
        repetition: 4,
        iterations: 10,
    };
    let registry = Registry::builtin();
    for case in registry.iter() {
        let outcome = case
            .execute(config.iterations, &config)
            .unwrap_or_else(|e| panic!("{} failed: {e}", case.name));
        assert!(outcome.passed(), "{}: {:?}", case.name, outcome.mismatches);
        assert_eq!(outcome.iterations, 10);
    }
}
