//! Loading `AuditConfig` from the environment.
//!
//! The environment is process-global, so every case runs in one test body.

use access_audit::AuditConfig;

const ENABLED: &str = "ACCESS_AUDIT_ENABLED";
const CAPACITY: &str = "ACCESS_AUDIT_CHANNEL_CAPACITY";
const LOG_DECISIONS: &str = "ACCESS_AUDIT_LOG_DECISIONS";

fn clear() {
    std::env::remove_var(ENABLED);
    std::env::remove_var(CAPACITY);
    std::env::remove_var(LOG_DECISIONS);
}

#[test]
fn test_from_env() {
    clear();
    assert_eq!(AuditConfig::from_env(), AuditConfig::default());

    std::env::set_var(CAPACITY, "16");
    std::env::set_var(LOG_DECISIONS, "true");
    let config = AuditConfig::from_env();
    assert_eq!(config.channel_capacity, 16);
    assert!(config.log_decisions);
    assert!(config.enabled);

    // Zero and non-numeric capacities fall back to the default.
    std::env::set_var(CAPACITY, "0");
    assert_eq!(AuditConfig::from_env().channel_capacity, 1024);
    std::env::set_var(CAPACITY, "lots");
    assert_eq!(AuditConfig::from_env().channel_capacity, 1024);
    std::env::set_var(CAPACITY, "-5");
    assert_eq!(AuditConfig::from_env().channel_capacity, 1024);

    // Disabling the channel leaves only the console hook.
    std::env::set_var(ENABLED, "off");
    let config = AuditConfig::from_env();
    assert!(!config.enabled);
    let pipeline = config.build();
    assert!(pipeline.receiver.is_none());
    assert!(pipeline.hook.is_some());

    // Nothing enabled means no hook at all.
    std::env::set_var(LOG_DECISIONS, "0");
    let pipeline = AuditConfig::from_env().build();
    assert!(pipeline.hook.is_none());
    assert!(pipeline.receiver.is_none());

    clear();
}
