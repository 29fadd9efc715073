//! Logging setup writes to the configured file through the `log` facade,
//! and the feature-gated macros respect their flags.

use murmur::log_api_call;
use murmur::logging::{init_logging, LogConfig};

#[test]
fn init_logging_writes_to_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("murmur_test.log");

    let config = LogConfig {
        log_file: log_path.clone(),
        ..LogConfig::default()
    };
    init_logging(&config).unwrap();

    log::warn!("relay unreachable");

    // Gated macro with the feature enabled reaches the file.
    log_api_call!(config, "session lookup traced");

    // With api_calls off the macro is a no-op.
    let muted = LogConfig::minimal();
    assert!(!muted.features.api_calls);
    log_api_call!(muted, "must not appear");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("Logging initialized"));
    assert!(contents.contains("relay unreachable"));
    assert!(contents.contains("session lookup traced"));
    assert!(!contents.contains("must not appear"));
}
