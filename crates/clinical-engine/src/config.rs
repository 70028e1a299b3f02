//! Runtime configuration loaded from environment variables.
//!
//! Follows twelve-factor config: everything comes from the environment with
//! sensible defaults for local development.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CLINICAL_DEVICE_ID` | a random `device-<uuid>` | This node's device identity, stamped on every event it produces |
//! | `CLINICAL_DEFAULT_ROLE` | `clinician` | Fallback `performer_role` when a caller omits one |
//! | `RUST_LOG` | `clinical_engine=debug` | Tracing filter |

use std::env;

use uuid::Uuid;

/// Runtime configuration for one node of the engine.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Identity stamped on every event this node produces.
    pub device_id: String,

    /// Fallback `performer_role` for callers that don't supply one.
    pub default_role: String,

    /// `RUST_LOG`-compatible tracing filter for `tracing_subscriber::EnvFilter`.
    pub tracing_filter: String,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let device_id =
            env::var("CLINICAL_DEVICE_ID").unwrap_or_else(|_| format!("device-{}", Uuid::new_v4()));

        let default_role =
            env::var("CLINICAL_DEFAULT_ROLE").unwrap_or_else(|_| "clinician".to_string());

        let tracing_filter =
            env::var("RUST_LOG").unwrap_or_else(|_| "clinical_engine=debug".to_string());

        Self {
            device_id,
            default_role,
            tracing_filter,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            device_id: format!("device-{}", Uuid::new_v4()),
            default_role: "clinician".to_string(),
            tracing_filter: "clinical_engine=debug".to_string(),
        }
    }
}

/// Install a `tracing-subscriber` formatter for tests and the integration
/// scenarios. The library itself never calls this — only test binaries
/// opt in, so linking this crate never forces a subscriber on a consumer
/// that wants to install its own.
#[cfg(test)]
pub fn init_tracing(config: &RuntimeConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.tracing_filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
