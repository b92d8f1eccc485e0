use chorey_schedule::cli::LogLevel;
use chorey_schedule::logging::build_filter;
use tracing::level_filters::LevelFilter;

#[test]
fn test_cli_level_wins_over_env() {
    let (filter, rejected) = build_filter(Some(LogLevel::Warn), Some("trace"));

    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    assert!(rejected.is_none());
}

#[test]
fn test_env_accepts_per_module_directives() {
    let (filter, rejected) =
        build_filter(None, Some("warn,chorey_schedule::schedule=trace"));

    assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    assert!(rejected.is_none());
}

#[test]
fn test_defaults_to_info() {
    for env in [None, Some(""), Some("   ")] {
        let (filter, rejected) = build_filter(None, env);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert!(rejected.is_none());
    }
}

#[test]
fn test_invalid_env_falls_back_to_info() {
    let (filter, rejected) = build_filter(None, Some("chorey_schedule=loud"));

    assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    assert!(rejected.is_some());
}
