//! Audit configuration.
//!
//! Configuration is loaded from environment variables with defaults
//! suitable for local development.

use crate::channel::{AuditReceiver, ChannelAuditHook, DEFAULT_CHANNEL_CAPACITY};
use crate::hook::{AuditHook, FanoutAuditHook, TracingAuditHook};
use std::sync::Arc;

/// Audit pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Whether results are forwarded to the audit channel at all.
    pub enabled: bool,

    /// Bounded channel capacity; records beyond it are dropped.
    pub channel_capacity: usize,

    /// Whether every decision is also written to the tracing console.
    pub log_decisions: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            log_decisions: false,
        }
    }
}

impl AuditConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACCESS_AUDIT_ENABLED`: Forward results to the channel (default: true)
    /// - `ACCESS_AUDIT_CHANNEL_CAPACITY`: Channel capacity (default: 1024)
    /// - `ACCESS_AUDIT_LOG_DECISIONS`: Log each decision via tracing (default: false)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            enabled: std::env::var("ACCESS_AUDIT_ENABLED")
                .map(|s| parse_flag(&s))
                .unwrap_or(default.enabled),
            channel_capacity: std::env::var("ACCESS_AUDIT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .filter(|capacity: &usize| *capacity > 0)
                .unwrap_or(default.channel_capacity),
            log_decisions: std::env::var("ACCESS_AUDIT_LOG_DECISIONS")
                .map(|s| parse_flag(&s))
                .unwrap_or(default.log_decisions),
        }
    }

    /// Build the hooks this configuration asks for.
    pub fn build(&self) -> AuditPipeline {
        let mut fanout = FanoutAuditHook::new();
        let mut receiver = None;

        if self.enabled {
            let (hook, rx) = ChannelAuditHook::new(self.channel_capacity);
            fanout = fanout.with(Arc::new(hook));
            receiver = Some(rx);
        }
        if self.log_decisions {
            fanout = fanout.with(Arc::new(TracingAuditHook::new()));
        }

        let hook: Option<Arc<dyn AuditHook>> = if fanout.is_empty() {
            None
        } else {
            Some(Arc::new(fanout))
        };

        AuditPipeline { hook, receiver }
    }
}

fn parse_flag(s: &str) -> bool {
    !matches!(s.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

/// Hooks built from an [`AuditConfig`].
pub struct AuditPipeline {
    /// Hook to attach to gates, if auditing is on.
    pub hook: Option<Arc<dyn AuditHook>>,

    /// Receiving end of the channel, to hand to a worker.
    pub receiver: Option<AuditReceiver>,
}

impl std::fmt::Debug for AuditPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditPipeline")
            .field("hook", &self.hook.is_some())
            .field("receiver", &self.receiver)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert!(config.enabled);
        assert_eq!(config.channel_capacity, 1024);
        assert!(!config.log_decisions);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_build_enabled() {
        let pipeline = AuditConfig::default().build();
        assert!(pipeline.hook.is_some());
        assert!(pipeline.receiver.is_some());
    }

    #[test]
    fn test_build_disabled() {
        let config = AuditConfig {
            enabled: false,
            ..AuditConfig::default()
        };
        let pipeline = config.build();
        assert!(pipeline.hook.is_none());
        assert!(pipeline.receiver.is_none());
    }

    #[test]
    fn test_build_console_only() {
        let config = AuditConfig {
            enabled: false,
            log_decisions: true,
            ..AuditConfig::default()
        };
        let pipeline = config.build();
        assert!(pipeline.hook.is_some());
        assert!(pipeline.receiver.is_none());
    }
}
