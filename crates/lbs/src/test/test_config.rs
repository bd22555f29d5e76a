// Tests for configuration parsing
use crate::config::BenchConfig;
use crate::BenchError;

#[test]
fn test_defaults() {
    let config = BenchConfig::default();
    assert_eq!(config.repetition, 50);
    assert_eq!(config.iterations, 10_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_vars_overrides() {
    let config = BenchConfig::from_vars(|key| match key {
        "LBS_REPETITION" => Some(" 8 ".to_string()),
        "LBS_ITERATIONS" => Some("250".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.repetition, 8);
    assert_eq!(config.iterations, 250);

    let config = BenchConfig::from_vars(|_| None).unwrap();
    assert_eq!(config, BenchConfig::default());
}

#[test]
fn test_from_vars_rejects_bad_values() {
    let err = BenchConfig::from_vars(|key| (key == "LBS_REPETITION").then(|| "many".to_string()))
        .unwrap_err();
    assert!(matches!(err, BenchError::Config(_)));

    let err = BenchConfig::from_vars(|key| (key == "LBS_ITERATIONS").then(|| "0".to_string()))
        .unwrap_err();
    assert!(matches!(err, BenchError::Config(_)));
}
