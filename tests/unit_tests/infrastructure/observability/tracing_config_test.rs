use pagewise::infrastructure::observability::{DEFAULT_LOG_FILTER, TracingConfig};

#[test]
fn given_explicit_values_when_creating_config_then_keeps_them() {
    let config = TracingConfig::new("prod", true);
    assert_eq!(config.environment, "prod");
    assert!(config.json_format);
}

#[test]
fn given_default_filter_when_inspecting_then_enables_crate_debug_logs() {
    assert!(DEFAULT_LOG_FILTER.starts_with("info"));
    assert!(DEFAULT_LOG_FILTER.contains("pagewise=debug"));
}
